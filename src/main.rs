use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use helpdesk_api::config::AppConfig;
use helpdesk_api::database::{DatabaseManager, PgStore};
use helpdesk_api::{logging, server, AppState};

#[derive(Parser)]
#[command(name = "helpdesk-api", version, about = "Ticket desk HTTP API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Address to bind, overrides HOST")]
        host: Option<String>,
        #[arg(long, help = "Port to bind, overrides PORT")]
        port: Option<u16>,
    },

    #[command(about = "Create database tables and exit")]
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_KEY, STAFF_TOKEN
    let _ = dotenvy::dotenv();

    logging::init();

    let cli = Cli::parse();

    // Missing or empty secrets stop the process here, before anything binds
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting Helpdesk API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    DatabaseManager::ensure_schema(&pool)
        .await
        .context("failed to prepare database schema")?;

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Migrate => Ok(()),
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let state = AppState::new(Arc::new(PgStore::new(pool)), &config.security);
            server::serve(&config, state).await
        }
    }
}
