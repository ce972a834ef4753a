//! HireDaemon - Conversational job posting assistant
//!
//! CLI entry point for chatting with sessions and inspecting their state.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use sessionstore::SessionStore;
use tracing::{debug, info};

use hiredaemon::cli::{Cli, Command, OutputFormat};
use hiredaemon::config::Config;
use hiredaemon::domain::FlowState;
use hiredaemon::flow::FlowController;
use hiredaemon::llm::create_client;
use hiredaemon::prompts::PromptLoader;
use hiredaemon::search::HttpSearchTool;

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hiredaemon")
        .join("logs");
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = match cli_log_level.map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("hiredaemon.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    debug!(model = %config.llm.model, "main: config loaded");

    match cli.command {
        Command::Chat { message, session, format } => {
            debug!(?session, ?format, "main: matched Chat command");
            cmd_chat(&config, &message, session, format).await
        }
        Command::Show { session, format } => {
            debug!(%session, ?format, "main: matched Show command");
            cmd_show(&config, &session, format)
        }
        Command::Sessions => {
            debug!("main: matched Sessions command");
            cmd_sessions(&config)
        }
        Command::Delete { session } => {
            debug!(%session, "main: matched Delete command");
            cmd_delete(&config, &session)
        }
    }
}

/// Run one conversation turn
async fn cmd_chat(config: &Config, message: &str, session: Option<String>, format: OutputFormat) -> Result<()> {
    debug!("cmd_chat: called");
    config.validate()?;

    let session_id = session.unwrap_or_else(|| uuid::Uuid::now_v7().to_string());

    let llm = create_client(&config.llm)?;
    let search = Arc::new(HttpSearchTool::from_config(&config.search)?);
    let prompts = Arc::new(PromptLoader::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))));
    let store = SessionStore::open(&config.storage.sessions_dir)?;
    let controller = FlowController::new(store, llm, search, prompts, config.llm.max_tokens);

    match controller.run_turn(&session_id, message).await {
        Ok(outcome) => match format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "session": session_id,
                    "reply": outcome.reply_text,
                    "job_posting": outcome.job_posting,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
                Ok(())
            }
            OutputFormat::Text => {
                println!("{} {}", "session:".dimmed(), session_id);
                println!();
                println!("{}", outcome.reply_text);
                Ok(())
            }
        },
        Err(e) => {
            eprintln!("{}", e.user_message().red());
            Err(eyre::eyre!(e))
        }
    }
}

/// Show a session's state
fn cmd_show(config: &Config, session_id: &str, format: OutputFormat) -> Result<()> {
    debug!(%session_id, "cmd_show: called");
    let store = SessionStore::open(&config.storage.sessions_dir)?;
    let state: FlowState = store.load_or_create(session_id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        OutputFormat::Text => {
            println!("{} {}", "session:".dimmed(), session_id);
            println!(
                "{} {}",
                "job role:".dimmed(),
                state.role_info.job_role.as_deref().unwrap_or("-")
            );
            println!(
                "{} {}",
                "location:".dimmed(),
                state.role_info.location.as_deref().unwrap_or("-")
            );
            println!(
                "{} {}",
                "company:".dimmed(),
                state.role_info.company_name.as_deref().unwrap_or("-")
            );
            println!("{} {}", "messages:".dimmed(), state.message_history.len());
            match state.job_posting.as_deref() {
                Some(posting) => {
                    println!();
                    println!("{}", posting);
                }
                None => println!("{} none", "posting:".dimmed()),
            }
        }
    }
    Ok(())
}

/// List sessions with persisted state
fn cmd_sessions(config: &Config) -> Result<()> {
    debug!("cmd_sessions: called");
    let store = SessionStore::open(&config.storage.sessions_dir)?;
    let sessions = store.list_sessions()?;
    if sessions.is_empty() {
        println!("No sessions");
        return Ok(());
    }
    for id in sessions {
        println!("{}", id);
    }
    Ok(())
}

/// Delete a session's snapshot
fn cmd_delete(config: &Config, session_id: &str) -> Result<()> {
    debug!(%session_id, "cmd_delete: called");
    let store = SessionStore::open(&config.storage.sessions_dir)?;
    if store.delete(session_id)? {
        println!("Deleted session {}", session_id);
    } else {
        println!("No such session: {}", session_id);
    }
    Ok(())
}
