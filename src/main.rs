//! # Chat Rooms
//!
//! Entry point. Initializes tracing, loads configuration and either serves
//! the HTTP API or bootstraps the admin account.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use chat_rooms::config::Settings;
use chat_rooms::startup::{AppState, Application};

#[derive(Parser)]
#[command(name = "chat-rooms")]
#[command(about = "Token-authenticated chat rooms backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Create the admin account from settings or flags
    InitSuperuser {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    chat_rooms::telemetry::init_tracing();

    let settings = Settings::load().context("Failed to load configuration")?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        in_memory = settings.database.in_memory,
        "Configuration loaded"
    );

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(settings).await,
        Commands::InitSuperuser { username, password } => {
            init_superuser(settings, username, password).await
        }
    }
}

async fn serve(settings: Settings) -> Result<()> {
    info!("Starting chat rooms server");

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    info!("Server shut down");
    Ok(())
}

async fn init_superuser(
    settings: Settings,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let username = username
        .or_else(|| settings.admin.username.clone())
        .context("No admin username: pass --username or set ADMIN_USERNAME")?;
    let password = password
        .or_else(|| settings.admin.password.clone())
        .context("No admin password: pass --password or set ADMIN_PASSWORD")?;

    if settings.database.in_memory {
        tracing::warn!("In-memory store configured; the account will not outlive this process");
    }

    let state = AppState::from_settings(Arc::new(settings)).await?;
    let user = state
        .auth
        .create_superuser(&username, &password)
        .await
        .context("Failed to create superuser")?;

    info!(user_id = user.id, username = %user.username, "Superuser ready");
    Ok(())
}
