mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;

use user_manager::api::rest::routes::{self, ConcreteProfileService, ConcreteUserService};
use user_manager::infra::storage;
use user_manager::infra::storage::migrations::Migrator;
use user_manager::infra::storage::sea_orm_repo::{SeaOrmProfilesRepository, SeaOrmUsersRepository};

use crate::config::AppConfig;

/// User Manager server - users and their profiles over HTTP/JSON
#[derive(Parser)]
#[command(name = "user-manager-server")]
#[command(about = "User Manager server - users and their profiles over HTTP/JSON")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
    }

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port, cli.verbose);

    logging::init(&config.logging);
    tracing::info!("User Manager server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    let db = storage::connect(&config.database.dsn).await?;
    Migrator::up(&db, None).await?;
    tracing::info!(dsn = %config.database.dsn, "database ready");

    let users = Arc::new(ConcreteUserService::new(
        db.clone(),
        Arc::new(SeaOrmUsersRepository),
        Arc::new(SeaOrmProfilesRepository),
    ));
    let profiles = Arc::new(ConcreteProfileService::new(
        db,
        Arc::new(SeaOrmProfilesRepository),
    ));
    let app = routes::router(users, profiles);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
