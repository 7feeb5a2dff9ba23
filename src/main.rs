mod config;
mod db;
mod error;
mod models;
mod service;
mod ui;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::service::ProjectService;
use crate::ui::{Console, Session};

/// Console manager for project records stored in PostgreSQL.
///
/// The database is read from DATABASE_URL (a .env file is honoured).
#[derive(Parser)]
#[command(name = "project-manager", version, about)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    Cli::parse();

    // Diagnostics go to stderr and only when asked for, so they never mix with the menu
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .with_target(false)
            .init();
    }

    // Load configuration
    let config = config::init()?;
    println!("Initializing project manager...");

    // Initialize database connection
    let db = db::init(&config).await?;
    println!("Database connection established");

    let service = ProjectService::new(db);
    let mut console = Console::new(io::stdin().lock(), io::stdout());
    let mut session = Session::default();

    // Run the menu loop
    let result = ui::run(&service, &mut console, &mut session).await;

    service.dao().close().await;

    // A session cut short by a console failure exits non-zero
    result?;

    Ok(())
}
