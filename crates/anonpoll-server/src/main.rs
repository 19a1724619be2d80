use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anonpoll_application::SurveyUseCase;
use anonpoll_core::avatar::{CATALOG, catalog};
use anonpoll_core::reservation::ReservationService;
use anonpoll_infrastructure::{ConfigService, JsonAvatarStore, SecretStorage, SmtpNotifier};
use anonpoll_server::AppState;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "anonpoll")]
#[command(about = "Anonymous member survey with unique emoji avatars", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the survey web server
    Serve {
        /// Path to config.toml (default: ~/.config/anonpoll/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Listen address, overrides [server] bind
        #[arg(long)]
        bind: Option<String>,
    },
    /// List claimed avatars
    Claims {
        /// Path to config.toml (default: ~/.config/anonpoll/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, bind } => serve(config, bind).await,
        Commands::Claims { config } => print_claims(config),
    }
}

async fn serve(config_path: Option<PathBuf>, bind: Option<String>) -> Result<()> {
    let config_service = ConfigService::new(config_path)?;
    let config = config_service.load()?;

    let _log_guard = init_logging(&config_service.logs_dir(&config)?)?;
    info!(config = %config_service.path().display(), "Initializing state...");

    let claims_file = config_service.claims_file(&config)?;
    info!(claims_file = %claims_file.display(), "Using claim file");
    let store = Arc::new(JsonAvatarStore::new(claims_file));

    let mail_settings = SecretStorage::new()?
        .load_merged()
        .context("Failed to load mail settings")?;
    if let Err(e) = mail_settings.resolve() {
        warn!(missing = ?e.missing_fields(), "Mail delivery is not configured");
    }

    let survey = SurveyUseCase::new(
        ReservationService::new(store),
        Arc::new(SmtpNotifier::new(mail_settings)),
        Duration::from_secs(config.session.idle_minutes * 60),
    );
    let state = AppState::new(survey).context("Failed to load page templates")?;

    let address = bind.unwrap_or(config.server.bind);
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    anonpoll_server::serve(listener, state).await?;
    Ok(())
}

/// Console output plus a daily rolling file in `dir`.
///
/// The returned guard flushes the file writer on drop.
fn init_logging(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {:?}", dir))?;
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "anonpoll.log"));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    Ok(guard)
}

fn print_claims(config_path: Option<PathBuf>) -> Result<()> {
    let config_service = ConfigService::new(config_path)?;
    let config = config_service.load()?;
    let store = JsonAvatarStore::new(config_service.claims_file(&config)?);

    let claims = store
        .try_load()
        .with_context(|| format!("Failed to read {:?}", store.path()))?;

    println!("{} ({} claimed)", store.path().display(), claims.len());
    for token in claims.iter() {
        match catalog::find(token) {
            Some(avatar) => println!("  {} {}", avatar.emoji, avatar.name),
            None => println!("  {token} (not in catalog)"),
        }
    }
    println!(
        "{} of {} avatars free",
        CATALOG.len() - claims.catalog_claims(),
        CATALOG.len()
    );

    Ok(())
}
