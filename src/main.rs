mod api;
mod cli;
mod config;
mod error;
mod types;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let default_filter = match cli.verbose {
        0 => "webex_notify=warn",
        1 => "webex_notify=info",
        _ => "webex_notify=debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(err) = run(cli).await {
        cli::output::print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

async fn run(mut cli: Cli) -> Result<()> {
    if let Some(Commands::Completions(cmd)) = cli.command.take() {
        return cli::completions::execute(cmd);
    }

    // Load configuration
    let config = config::Config::load(cli.config.as_deref())?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    let token = cli
        .token
        .clone()
        .filter(|token| !token.is_empty())
        .ok_or(error::Error::MissingToken)?;

    if cli.list_rooms {
        let format = OutputFormat::resolve(cli.format, &config)?;
        cli::rooms::execute(&config, &token, format).await
    } else {
        cli::send::execute(&cli, &config, &token).await
    }
}
