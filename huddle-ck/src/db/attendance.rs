//! Attendance log operations

use huddle_common::db::models::AttendanceLog;
use huddle_common::Result;
use sqlx::{Row, SqlitePool};

/// An attendance row joined to its attendee, for today's reporting.
///
/// The join is INNER: a log row whose attendee has vanished (referential
/// anomaly) simply drops out instead of erroring.
#[derive(Debug, Clone)]
pub struct CheckedInRow {
    pub attendance_log_id: String,
    pub attendee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub contact_number: Option<String>,
    pub check_in_time: String,
    pub is_first_timer: bool,
    pub facilitator_id: Option<String>,
}

/// Insert a check-in row for the given service date
pub async fn insert(
    pool: &SqlitePool,
    id: &str,
    attendee_id: &str,
    service_date: &str,
    check_in_time: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO attendance_log (id, attendee_id, service_date, check_in_time)
         VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(attendee_id)
    .bind(service_date)
    .bind(check_in_time)
    .execute(pool)
    .await?;

    Ok(())
}

/// Find an attendee's log entry for a service date, if any
pub async fn find_for_date(
    pool: &SqlitePool,
    attendee_id: &str,
    service_date: &str,
) -> Result<Option<AttendanceLog>> {
    let row = sqlx::query(
        "SELECT id, attendee_id, service_date, check_in_time
         FROM attendance_log
         WHERE attendee_id = ? AND service_date = ?",
    )
    .bind(attendee_id)
    .bind(service_date)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| AttendanceLog {
        id: row.get("id"),
        attendee_id: row.get("attendee_id"),
        service_date: row.get("service_date"),
        check_in_time: row.get("check_in_time"),
    }))
}

/// Distinct person ids with a log entry on the given service date
pub async fn checked_in_ids(pool: &SqlitePool, service_date: &str) -> Result<Vec<String>> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT DISTINCT attendee_id FROM attendance_log WHERE service_date = ?")
            .bind(service_date)
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Today's log rows joined to attendee fields, newest check-in first
pub async fn joined_for_date(pool: &SqlitePool, service_date: &str) -> Result<Vec<CheckedInRow>> {
    let rows = sqlx::query(
        r#"
        SELECT l.id AS attendance_log_id, l.check_in_time,
               a.id AS attendee_id, a.first_name, a.last_name,
               a.contact_number, a.is_first_timer, a.facilitator_id
        FROM attendance_log l
        JOIN attendees a ON a.id = l.attendee_id
        WHERE l.service_date = ?
        ORDER BY l.check_in_time DESC
        "#,
    )
    .bind(service_date)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| CheckedInRow {
            attendance_log_id: row.get("attendance_log_id"),
            attendee_id: row.get("attendee_id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            contact_number: row.get("contact_number"),
            check_in_time: row.get("check_in_time"),
            is_first_timer: row.get("is_first_timer"),
            facilitator_id: row.get("facilitator_id"),
        })
        .collect())
}

/// Delete a log entry by id; returns affected row count
pub async fn delete(pool: &SqlitePool, log_id: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM attendance_log WHERE id = ?")
        .bind(log_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
