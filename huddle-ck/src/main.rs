//! huddle-ck - Attendance check-in service
//!
//! Registers new attendees, checks in returning attendees, auto-assigns
//! attendees to facilitators (load-balanced by gender), and reports
//! per-facilitator rosters for the current service date.

use anyhow::Result;
use clap::Parser;
use huddle_common::config::{ContactNumberPolicy, Overrides, Settings};
use huddle_common::db::init_database;
use huddle_ck::{build_router, AppState};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "huddle-ck", about = "Attendance check-in service")]
struct Args {
    /// SQLite database file path
    #[arg(long)]
    database: Option<PathBuf>,

    /// Bind host for the HTTP listener
    #[arg(long)]
    host: Option<String>,

    /// Bind port for the HTTP listener
    #[arg(long)]
    port: Option<u16>,

    /// Reporting timezone as minutes east of UTC
    #[arg(long)]
    utc_offset_minutes: Option<i32>,

    /// Contact number policy: required-strict or optional
    #[arg(long)]
    contact_policy: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting Huddle Check-In (huddle-ck) v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let contact_policy = args
        .contact_policy
        .as_deref()
        .map(ContactNumberPolicy::parse)
        .transpose()?;

    let overrides = Overrides {
        database_path: args.database,
        bind_host: args.host,
        port: args.port,
        utc_offset_minutes: args.utc_offset_minutes,
        contact_number_policy: contact_policy,
    };
    let settings = Settings::resolve(&overrides)?;
    info!("Database path: {}", settings.database_path.display());
    info!(
        "Reporting offset: {} minutes east of UTC, contact policy: {:?}",
        settings.utc_offset_minutes, settings.contact_number_policy
    );

    let pool = init_database(&settings.database_path).await?;

    let bind = format!("{}:{}", settings.bind_host, settings.port);
    let state = AppState::new(pool, settings);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("huddle-ck listening on http://{bind}");
    info!("Health check: http://{bind}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
