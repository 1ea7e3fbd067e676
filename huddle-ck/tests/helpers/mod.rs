//! Shared test fixtures: in-memory database setup and row seeding

// Not every suite uses every helper
#![allow(dead_code)]

use huddle_ck::db;
use huddle_common::db::create_schema;
use huddle_common::db::models::Gender;
use huddle_common::time::service_date_today;
use sqlx::SqlitePool;

/// Tests run against the UTC service date
pub const TEST_OFFSET: i32 = 0;

/// Create an in-memory database with the full schema
pub async fn setup_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();
    create_schema(&pool).await.unwrap();
    pool
}

/// Today's service date as the engine computes it in tests
pub fn today() -> String {
    service_date_today(TEST_OFFSET)
}

/// Seed a facilitator row
pub async fn seed_facilitator(
    pool: &SqlitePool,
    id: &str,
    first_name: &str,
    last_name: &str,
    gender: Gender,
) {
    db::facilitators::insert(pool, id, first_name, last_name, gender)
        .await
        .unwrap();
}

/// Seed a bare attendee row with an optional pre-set assignment
pub async fn seed_attendee(
    pool: &SqlitePool,
    id: &str,
    first_name: &str,
    last_name: &str,
    gender: Gender,
    facilitator_id: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO attendees (id, first_name, last_name, school_name, barangay, city,
                                gender, facilitator_id, is_first_timer)
         VALUES (?, ?, ?, 'Rizal High', 'San Isidro', 'Pasig', ?, ?, 0)",
    )
    .bind(id)
    .bind(first_name)
    .bind(last_name)
    .bind(gender.as_str())
    .bind(facilitator_id)
    .execute(pool)
    .await
    .unwrap();
}

/// Insert an attendance row for today with a fixed timestamp suffix so
/// check-in ordering is deterministic
pub async fn seed_check_in(pool: &SqlitePool, log_id: &str, attendee_id: &str, time: &str) {
    db::attendance::insert(pool, log_id, attendee_id, &today(), time)
        .await
        .unwrap();
}

/// Stored assignment of an attendee, straight from the table
pub async fn stored_assignment(pool: &SqlitePool, attendee_id: &str) -> Option<String> {
    let row: (Option<String>,) =
        sqlx::query_as("SELECT facilitator_id FROM attendees WHERE id = ?")
            .bind(attendee_id)
            .fetch_one(pool)
            .await
            .unwrap();
    row.0
}
