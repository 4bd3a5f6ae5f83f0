use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use medichat::cli::{Cli, Commands};
use medichat::server::{self, AppState};
use medichat::storage::FileHistoryStore;
use medichat::utils::display;
use medichat::{ChatOrchestrator, GroqClient, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;
    init_tracing(&settings);

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => handle_serve(settings, bind).await,
        Commands::Chat {
            message,
            language,
            user,
        } => handle_chat(settings, user, message, language).await,
        Commands::Interactive { language, user } => {
            handle_interactive(settings, user, language).await
        }
        Commands::History { user } => handle_history(settings, user).await,
        Commands::Clear { user } => handle_clear(settings, user).await,
    }
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn build_orchestrator(settings: &Settings) -> Result<ChatOrchestrator> {
    let api_key = Settings::api_key()?;
    let store = FileHistoryStore::new(PathBuf::from(&settings.storage.dir)).await?;
    let client = GroqClient::new(&settings.llm, api_key);
    Ok(ChatOrchestrator::new(Arc::new(store), Arc::new(client)))
}

async fn handle_serve(settings: Settings, bind: Option<String>) -> Result<()> {
    let orchestrator = build_orchestrator(&settings).await?;
    let bind = bind.unwrap_or_else(|| settings.server.bind.clone());
    server::serve(Arc::new(AppState { orchestrator }), &bind).await
}

async fn handle_chat(
    settings: Settings,
    user: String,
    message: String,
    language: String,
) -> Result<()> {
    let orchestrator = build_orchestrator(&settings).await?;

    match orchestrator.handle(&user, &message, &language).await {
        Ok(turn) => {
            println!("\n{}", turn.response);
            Ok(())
        }
        Err(e) => {
            display::print_error(e.user_message());
            Err(e.into())
        }
    }
}

async fn handle_interactive(settings: Settings, user: String, language: String) -> Result<()> {
    let orchestrator = build_orchestrator(&settings).await?;

    display::print_banner("Medichat");
    display::print_disclaimer(
        "General information only, not a diagnosis. Consult a qualified healthcare professional.",
    );
    display::print_info("Describe your symptoms (Ctrl+C to exit)\n");

    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin);

    loop {
        display::print_prompt("You: ");
        let mut input = String::new();
        if reader.read_line(&mut input).await? == 0 {
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/clear" => {
                orchestrator.clear_history(&user).await?;
                display::print_success("Conversation history cleared");
                println!();
                continue;
            }
            "/history" => {
                print_history(&orchestrator, &user).await?;
                continue;
            }
            "/help" => {
                println!("Special commands:");
                println!("  /clear    - Delete conversation history");
                println!("  /history  - Show conversation history");
                println!("  /help     - Show this help");
                println!("  Ctrl+C    - Exit\n");
                continue;
            }
            _ => {}
        }

        match orchestrator.handle(&user, input, &language).await {
            Ok(turn) => {
                display::print_info("Assistant:");
                println!("{}\n", turn.response);
            }
            // Classified failures are printed and the session continues;
            // the turn was not recorded.
            Err(e) => {
                display::print_error(e.user_message());
                println!();
            }
        }
    }

    Ok(())
}

async fn handle_history(settings: Settings, user: String) -> Result<()> {
    let orchestrator = build_orchestrator(&settings).await?;
    print_history(&orchestrator, &user).await
}

async fn handle_clear(settings: Settings, user: String) -> Result<()> {
    let orchestrator = build_orchestrator(&settings).await?;
    orchestrator.clear_history(&user).await?;
    display::print_success(&format!("Cleared conversation history for '{}'", user));
    Ok(())
}

async fn print_history(orchestrator: &ChatOrchestrator, user: &str) -> Result<()> {
    let history = orchestrator.history(user).await?;

    if history.is_empty() {
        display::print_info("No conversation history\n");
        return Ok(());
    }

    for message in &history.messages {
        println!(
            "[{}] {}: {}",
            message.timestamp.format("%Y-%m-%d %H:%M:%S"),
            message.role.as_str(),
            message.content
        );
    }
    println!();
    Ok(())
}
