use anyhow::{bail, Context, Result};

use crate::api::{build_request, WebexClient};
use crate::config::Config;
use crate::types::{Attachment, Destination, OutboundMessage};

use super::Cli;

/// Assemble the message from the command line flags
pub fn message_from_cli(cli: &Cli) -> Result<OutboundMessage> {
    let destination = Destination::from_parts(cli.room_id.clone(), cli.recipient.clone())?;
    let attachment =
        Attachment::from_parts(cli.file.clone(), cli.file_url.clone(), cli.card.clone())?;

    Ok(OutboundMessage::new(destination)
        .with_text(cli.text.clone())
        .with_markdown(cli.markdown.clone())
        .with_attachment(attachment))
}

pub async fn execute(cli: &Cli, config: &Config, token: &str) -> Result<()> {
    let message = message_from_cli(cli)?;
    let request = build_request(&message, &config.attachment_policy()).await?;

    let client = WebexClient::new(config, token)?;
    let res = client
        .send_message(request)
        .await
        .context("Failed to send message")?;

    // Printed verbatim, errors included
    println!("{}", res.body);

    if !res.status.is_success() {
        bail!("Webex rejected the message ({})", res.status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("webex-notify").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_message_from_flags() {
        let cli = parse(&["-r", "ops@example.com", "-m", "**done**", "-A", "card.json"]);
        let message = message_from_cli(&cli).unwrap();

        assert_eq!(
            message.destination,
            Destination::Email("ops@example.com".into())
        );
        assert_eq!(message.text, None);
        assert_eq!(message.markdown.as_deref(), Some("**done**"));
        assert_eq!(
            message.attachment,
            Some(Attachment::AdaptiveCard(PathBuf::from("card.json")))
        );
    }

    #[test]
    fn test_missing_destination() {
        let cli = parse(&["-t", "hello"]);
        let err = message_from_cli(&cli).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::MissingDestination)
        ));
    }
}
