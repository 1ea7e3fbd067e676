//! Database initialization
//!
//! Creates the database file on first run and brings the schema up
//! idempotently. Integration tests reuse [`create_schema`] against
//! in-memory databases.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys (needed for ON DELETE behavior on the weak
    // facilitator reference)
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers while a check-in commits
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and indexes (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // facilitators first: attendees carries a foreign key into it
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS facilitators (
            id TEXT PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            gender TEXT NOT NULL CHECK (gender IN ('Male', 'Female')),
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendees (
            id TEXT PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            contact_number TEXT UNIQUE,
            email TEXT,
            birthday TEXT,
            school_name TEXT NOT NULL,
            barangay TEXT NOT NULL,
            city TEXT NOT NULL,
            social_media_name TEXT,
            gender TEXT NOT NULL CHECK (gender IN ('Male', 'Female')),
            is_dgroup_member INTEGER NOT NULL DEFAULT 0,
            dgroup_leader_name TEXT,
            is_first_timer INTEGER NOT NULL DEFAULT 1,
            facilitator_id TEXT REFERENCES facilitators(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    // UNIQUE(attendee_id, service_date) settles the duplicate check-in
    // race; the pre-insert existence check is an optimization only
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_log (
            id TEXT PRIMARY KEY,
            attendee_id TEXT NOT NULL REFERENCES attendees(id) ON DELETE CASCADE,
            service_date TEXT NOT NULL,
            check_in_time TEXT NOT NULL,
            UNIQUE (attendee_id, service_date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_attendance_log_service_date
         ON attendance_log(service_date)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_attendees_facilitator
         ON attendees(facilitator_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
