//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Nagios to HipChat notifier
///
/// Render a Nagios host or service notification and post it to a HipChat room.
#[derive(Parser, Debug)]
#[command(name = "hipnotify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "HIPNOTIFY_CONFIG")]
    pub config: Option<String>,

    /// Dry run mode - render the message but don't send it
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a notification
    Send(SendArgs),

    /// Show the severity color table
    Colors,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the send command
#[derive(Parser, Debug)]
pub struct SendArgs {
    /// Notification type: host, short-host, service or short-service
    #[arg(short = 'y', long = "type", value_name = "TYPE")]
    pub kind: String,

    /// Pipe-delimited notification fields from Nagios
    #[arg(short, long)]
    pub inputs: String,

    /// API auth token
    #[arg(short, long, env = "HIPCHAT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Sender name shown in the room
    #[arg(short, long)]
    pub user: Option<String>,

    /// Room id or name
    #[arg(short, long)]
    pub room: Option<String>,

    /// Notify room members (1/0, true/false)
    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_flag
    )]
    pub notify: Option<bool>,

    /// Users to page after delivery (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub mention: Vec<String>,

    /// Directory containing <type>.html templates
    #[arg(long)]
    pub template_dir: Option<PathBuf>,

    /// Message API endpoint
    #[arg(long)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Extra query parameter for the primary message (repeatable)
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

impl SendArgs {
    /// Mention list, if any was given
    pub fn mention_override(&self) -> Option<Vec<String>> {
        if self.mention.is_empty() {
            None
        } else {
            Some(self.mention.clone())
        }
    }
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

fn parse_flag(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(format!("expected 1/0 or true/false, got '{}'", s)),
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
