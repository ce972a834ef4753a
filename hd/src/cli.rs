//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// HireDaemon - Conversational job posting assistant
#[derive(Parser)]
#[command(
    name = "hd",
    about = "Conversational assistant for creating and refining job postings",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one message to a session and print the assistant's reply
    Chat {
        /// The message text
        message: String,

        /// Session id to resume (a fresh one is generated when omitted)
        #[arg(short, long)]
        session: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a session's collected details, posting, and history
    Show {
        /// Session id
        session: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List sessions with persisted state
    Sessions,

    /// Delete a session's persisted state
    Delete {
        /// Session id
        session: String,
    },
}

/// Output format for commands that support it
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
