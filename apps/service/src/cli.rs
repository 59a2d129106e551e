use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pingping", version, about = "Host liveness monitor with webhook notifications")]
pub struct Cli {
    /// Path to the config file (defaults to the XDG location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the probe scheduler until terminated (the default).
    Run,
    /// Inspect or edit monitored targets.
    #[command(subcommand)]
    Target(TargetCommand),
    /// Configure the notification sink.
    #[command(subcommand)]
    Sink(SinkCommand),
}

#[derive(Debug, Subcommand)]
pub enum TargetCommand {
    /// List targets and their last recorded status.
    List,
    /// Add a target to monitor.
    Add { name: String, url: String },
    /// Stop monitoring a target.
    Remove { name: String },
    /// Point a target at a new URL.
    SetUrl { name: String, url: String },
}

#[derive(Debug, Subcommand)]
pub enum SinkCommand {
    /// Replace the webhook URL notifications are posted to.
    Set { url: String },
}
