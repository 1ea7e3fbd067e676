//! Facilitator table operations

use huddle_common::db::models::{Facilitator, Gender};
use huddle_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashSet;

fn row_to_facilitator(row: &SqliteRow) -> Result<Facilitator> {
    let gender: String = row.get("gender");
    Ok(Facilitator {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        gender: Gender::parse(&gender)?,
        created_at: row.get("created_at"),
    })
}

/// Insert a facilitator row
pub async fn insert(
    pool: &SqlitePool,
    id: &str,
    first_name: &str,
    last_name: &str,
    gender: Gender,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO facilitators (id, first_name, last_name, gender) VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(first_name)
    .bind(last_name)
    .bind(gender.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load facilitator by id
pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<Facilitator>> {
    let row = sqlx::query(
        "SELECT id, first_name, last_name, gender, created_at FROM facilitators WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_facilitator).transpose()
}

/// Existence check by id
pub async fn exists(pool: &SqlitePool, id: &str) -> Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM facilitators WHERE id = ? LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// The full facilitator-id set.
///
/// One full-table scan per call; the result backs the attendee-exclusion
/// checks so they never turn into per-row queries. Facilitator counts are
/// expected in the tens.
pub async fn all_ids(pool: &SqlitePool) -> Result<HashSet<String>> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT id FROM facilitators")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Facilitators whose id is in `ids`, optionally filtered by gender,
/// ordered by first name ascending (ties left to store order).
pub async fn by_ids(
    pool: &SqlitePool,
    ids: &[String],
    gender: Option<Gender>,
) -> Result<Vec<Facilitator>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let mut sql = format!(
        "SELECT id, first_name, last_name, gender, created_at
         FROM facilitators
         WHERE id IN ({placeholders})"
    );
    if gender.is_some() {
        sql.push_str(" AND gender = ?");
    }
    sql.push_str(" ORDER BY first_name ASC");

    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(id);
    }
    if let Some(g) = gender {
        query = query.bind(g.as_str());
    }

    let rows = query.fetch_all(pool).await?;
    rows.iter().map(row_to_facilitator).collect()
}
