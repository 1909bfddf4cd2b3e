use anyhow::Context;
use clap::Parser;
use trivia_api::db;
use trivia_api::server::run_server;
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

/// Trivia question bank API server
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind, overrides TRIVIA_HOST
    #[clap(long)]
    host: Option<String>,
    /// Port to listen on, overrides TRIVIA_PORT
    #[clap(long)]
    port: Option<u16>,
    /// SQLite database file, overrides TRIVIA_DB_PATH
    #[clap(long)]
    db_path: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }
    if let Some(db_path) = cli.db_path {
        settings.db_path = db_path;
    }

    let pool = db::establish_connection(&settings.db_path)
        .await
        .with_context(|| format!("Cannot open database {}", settings.db_path))?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    run_server(pool, &settings.addr()).await
}
