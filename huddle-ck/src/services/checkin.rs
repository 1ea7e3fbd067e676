//! Registration, check-in, and today's attendance flows

use crate::db;
use crate::services::{assignment, roster};
use huddle_common::config::ContactNumberPolicy;
use huddle_common::db::models::{
    Attendee, AttendeeRegistration, CheckedInAttendee, SearchResult,
};
use huddle_common::time::{check_in_timestamp, service_date_today};
use huddle_common::validation::validate_registration;
use huddle_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

/// Result of a registration or check-in, including the facilitator the
/// attendee ended up assigned to (if any).
#[derive(Debug, Clone)]
pub struct CheckInOutcome {
    pub attendee: Attendee,
    pub facilitator_id: Option<String>,
    /// Set when a follow-up step (auto-assignment) failed after the
    /// check-in itself succeeded
    pub warning: Option<String>,
}

/// Register a new attendee and immediately check them in for today.
///
/// There is no cross-table transaction: if the attendance insert fails
/// after the attendee row was created, the error message says so
/// explicitly so the caller knows exactly which step failed.
pub async fn register_and_check_in(
    pool: &SqlitePool,
    utc_offset_minutes: i32,
    policy: ContactNumberPolicy,
    data: &AttendeeRegistration,
) -> Result<CheckInOutcome> {
    validate_registration(data, policy)?;

    let attendee_id = Uuid::new_v4().to_string();
    db::attendees::insert(pool, &attendee_id, data)
        .await
        .map_err(|e| match e {
            Error::DuplicateKey(_) => Error::DuplicateKey(
                "This contact number is already registered. Please use the returning check-in instead."
                    .to_string(),
            ),
            other => other,
        })?;

    let today = service_date_today(utc_offset_minutes);
    let log_id = Uuid::new_v4().to_string();
    db::attendance::insert(pool, &log_id, &attendee_id, &today, &check_in_timestamp())
        .await
        .map_err(|e| e.with_context("attendee registered but check-in failed"))?;

    let mut attendee = db::attendees::get(pool, &attendee_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("attendee {attendee_id} not found")))?;

    info!(attendee_id = %attendee_id, date = %today, "registered new attendee and checked in");

    let (facilitator_id, warning) = run_assignment(pool, utc_offset_minutes, &attendee).await;
    attendee.facilitator_id = facilitator_id.clone();

    Ok(CheckInOutcome {
        attendee,
        facilitator_id,
        warning,
    })
}

/// Check in an existing attendee for today's service.
pub async fn check_in(
    pool: &SqlitePool,
    utc_offset_minutes: i32,
    attendee_id: &str,
) -> Result<CheckInOutcome> {
    if attendee_id.trim().is_empty() {
        return Err(Error::InvalidArgument("Invalid attendee id.".to_string()));
    }

    let mut attendee = db::attendees::get(pool, attendee_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("attendee {attendee_id} not found")))?;

    let today = service_date_today(utc_offset_minutes);

    // Pre-read is an optimization for a friendly fast path; the UNIQUE
    // constraint below is what actually settles the race
    if db::attendance::find_for_date(pool, attendee_id, &today)
        .await?
        .is_some()
    {
        return Err(Error::DuplicateKey(
            "You are already checked in for today's service.".to_string(),
        ));
    }

    let log_id = Uuid::new_v4().to_string();
    db::attendance::insert(pool, &log_id, attendee_id, &today, &check_in_timestamp())
        .await
        .map_err(|e| match e {
            Error::DuplicateKey(_) => Error::DuplicateKey(
                "You are already checked in for today's service.".to_string(),
            ),
            other => other,
        })?;

    info!(attendee_id, date = %today, "attendee checked in");

    let (facilitator_id, warning) = run_assignment(pool, utc_offset_minutes, &attendee).await;
    attendee.facilitator_id = facilitator_id.clone();

    Ok(CheckInOutcome {
        attendee,
        facilitator_id,
        warning,
    })
}

/// Run the auto-assignment trigger, degrading failure to a warning:
/// the check-in has already committed and stays successful.
async fn run_assignment(
    pool: &SqlitePool,
    utc_offset_minutes: i32,
    attendee: &Attendee,
) -> (Option<String>, Option<String>) {
    match assignment::ensure_assignment(pool, utc_offset_minutes, attendee).await {
        Ok(facilitator_id) => (facilitator_id, None),
        Err(e) => {
            warn!(attendee_id = %attendee.id, error = %e, "auto-assignment failed after check-in");
            (
                attendee.facilitator_id.clone(),
                Some(format!("Checked in, but facilitator assignment failed: {e}")),
            )
        }
    }
}

/// Everyone checked in for today's service, newest first.
pub async fn checked_in_today(
    pool: &SqlitePool,
    utc_offset_minutes: i32,
) -> Result<Vec<CheckedInAttendee>> {
    let today = service_date_today(utc_offset_minutes);
    let rows = db::attendance::joined_for_date(pool, &today).await?;
    Ok(rows.iter().map(roster::row_to_checked_in).collect())
}

/// Remove an attendance entry (undo check-in).
pub async fn undo_check_in(pool: &SqlitePool, attendance_log_id: &str) -> Result<()> {
    if attendance_log_id.trim().is_empty() {
        return Err(Error::InvalidArgument("Invalid attendance log id.".to_string()));
    }

    let affected = db::attendance::delete(pool, attendance_log_id).await?;
    if affected == 0 {
        return Err(Error::NotFound(
            "No attendance record was deleted.".to_string(),
        ));
    }

    info!(attendance_log_id, "check-in removed");
    Ok(())
}

/// Search attendees by name or contact number.
///
/// Queries shorter than two characters succeed with an empty result
/// rather than scanning the table.
pub async fn search_attendees(pool: &SqlitePool, query: &str) -> Result<Vec<SearchResult>> {
    let term = query.trim();
    if term.len() < 2 {
        return Ok(Vec::new());
    }
    db::attendees::search(pool, term).await
}
