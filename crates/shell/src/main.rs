//! Queue Board Shell - terminal front end for one queue board session
//!
//! Composition root: wires the SQLite session store into the queue engine
//! and runs a line-oriented read loop over stdin.

mod command;
mod render;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use queueboard_core::port::SystemTimeProvider;
use queueboard_core::EngineConfig;
use queueboard_infra_sqlite::{create_pool, run_migrations, SqliteSessionStore};
use session::{Flow, Shell};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_DATABASE: &str = "sqlite::memory:";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Parser)]
#[command(name = "queueboard")]
#[command(about = "Queue board in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite database URL backing the session store
    #[arg(long, env = "QUEUEBOARD_DATABASE", default_value = DEFAULT_DATABASE)]
    database: String,

    /// Session id to open (default: a fresh one)
    #[arg(long, env = "QUEUEBOARD_SESSION")]
    session: Option<String>,

    /// Log output format (logs go to stderr)
    #[arg(long, env = "QUEUEBOARD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Initialize logging
    init_logging(cli.log_format)?;
    info!("Queue board v{} starting...", VERSION);

    // 2. Load configuration
    let config = EngineConfig::from_env().context("Invalid engine configuration")?;
    let database = shellexpand::tilde(&cli.database).into_owned();
    let session_id = cli
        .session
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    info!(database = %database, session_id = %session_id, "Opening session store...");

    // 3. Initialize database
    let pool = create_pool(&database)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 4. Wire the engine
    let store = Arc::new(SqliteSessionStore::new(
        pool,
        session_id,
        Arc::new(SystemTimeProvider),
    ));
    let mut shell = Shell::open(store, config).await;

    // 5. Read loop
    let (_, board) = shell.execute(command::Command::Show).await?;
    println!("{}", board);
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let (flow, output) = shell.execute(command).await?;
        println!("{}", output);
        if flow == Flow::Quit {
            return Ok(());
        }
    }

    // stdin closed: same as closing the tab
    shell.end().await?;
    info!("Shutdown complete.");
    Ok(())
}

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("queueboard=info"))
        .context("Failed to create env filter")?;

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
    }
    Ok(())
}
