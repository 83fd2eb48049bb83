mod config;

use crate::config::Config;
use anyhow::{Context, Result};
use clap::Parser;
use parlance_core::capture::{Submission, Utterance};
use parlance_core::{OpenAiChatClient, Orchestrator};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::fmt::time::ChronoLocal;

#[derive(Parser)]
#[command(about = "Practice a language with an AI tutor from the terminal")]
struct Cli {
    /// Override the chat model (otherwise CHAT_MODEL or the default).
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load application configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    // --- 3. Parse Command-Line Arguments ---
    let args = Cli::parse();
    let model = args.model.unwrap_or(config.chat_model);

    if config.openai_api_key.is_none() {
        tracing::warn!(
            "OPENAI_API_KEY is not set; every exchange will return the not-configured fallback"
        );
    }
    tracing::info!("Starting tutor chat with model '{}'", model);

    // --- 4. Build the Conversation Core ---
    let client = OpenAiChatClient::new(config.openai_api_key, model);
    let mut orchestrator = Orchestrator::new(client);

    // --- 5. Chat Loop ---
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"Language practice tutor. Type a sentence and press Enter (Ctrl-D to quit).\n")
        .await?;
    stdout
        .write_all(b"No messages yet. Start typing!\n\n")
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };

        // Blank input never reaches the orchestrator.
        let Some(utterance) = Utterance::from_submission(Submission::Typed(line)) else {
            continue;
        };

        // The loop awaits each exchange before reading the next line, so
        // at most one request is in flight at a time, mirroring the
        // disabled-input state of a chat UI.
        stdout.write_all(b"Analyzing...\n").await?;
        let response = orchestrator.handle(utterance.as_str()).await;

        let rendered = if response.has_issues {
            format!("tutor [correction]> {}\n\n", response.message)
        } else {
            format!("tutor> {}\n\n", response.message)
        };
        stdout.write_all(rendered.as_bytes()).await?;
    }

    tracing::info!("Shutting down...");
    Ok(())
}
