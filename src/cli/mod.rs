pub mod completions;
pub mod output;
pub mod rooms;
pub mod send;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};

use crate::config::Config;

/// Post messages, files and adaptive cards to Webex rooms and people
#[derive(Parser, Debug)]
#[command(name = "webex-notify")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("attachment").multiple(false)))]
pub struct Cli {
    /// Webex API access token
    #[arg(short = 'T', long, env = "WEBEX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Room ID to post to
    #[arg(short = 'R', long, conflicts_with = "recipient")]
    pub room_id: Option<String>,

    /// Recipient's email address (alternative to the room ID)
    #[arg(short = 'r', long)]
    pub recipient: Option<String>,

    /// Message text
    #[arg(short = 't', long)]
    pub text: Option<String>,

    /// Markdown message
    #[arg(short = 'm', long)]
    pub markdown: Option<String>,

    /// Path to a local file to attach
    #[arg(short = 'f', long, group = "attachment")]
    pub file: Option<PathBuf>,

    /// Public file URL to attach
    #[arg(short = 'F', long, group = "attachment")]
    pub file_url: Option<String>,

    /// Path to an adaptive card JSON file
    #[arg(short = 'A', long, group = "attachment")]
    pub card: Option<PathBuf>,

    /// List the rooms visible to the token
    #[arg(
        short = 'L',
        long,
        conflicts_with_all = ["room_id", "recipient", "text", "markdown", "attachment"]
    )]
    pub list_rooms: bool,

    /// Verbosity level (0 to 2)
    #[arg(
        short,
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=2)
    )]
    pub verbose: u8,

    /// Output format of the room list (defaults to the config file setting)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to an alternate config file
    #[arg(long, env = "WEBEX_NOTIFY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completions
    Completions(completions::CompletionsCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Bordered table
    #[default]
    Table,
    /// One `|`-separated line per row
    Plain,
}

impl OutputFormat {
    /// The `--format` flag if given, else the config default
    pub fn resolve(flag: Option<Self>, config: &Config) -> Result<Self> {
        match flag {
            Some(format) => Ok(format),
            None => <Self as ValueEnum>::from_str(&config.output.default_format, true)
                .map_err(|e| anyhow!("Invalid output.default_format in config: {}", e)),
        }
    }
}
