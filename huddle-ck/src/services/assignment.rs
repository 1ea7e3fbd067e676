//! Load-balanced facilitator assignment and the transfer operation

use crate::db;
use crate::services::{membership, roster};
use huddle_common::db::models::{Attendee, Gender};
use huddle_common::time::service_date_today;
use huddle_common::{Error, Result};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{debug, info};

/// Reassign an attendee to a facilitator, or to none.
///
/// Validation order, first failure wins:
/// 1. empty attendee id
/// 2. the attendee must not itself be a facilitator
/// 3. for a non-null target, attendee and facilitator must both exist and
///    their genders must match
///
/// A `None` target is an explicit unassign, not an error.
pub async fn transfer(
    pool: &SqlitePool,
    attendee_id: &str,
    new_facilitator_id: Option<&str>,
) -> Result<()> {
    if attendee_id.trim().is_empty() {
        return Err(Error::InvalidArgument("attendee id must not be empty".to_string()));
    }

    if membership::is_facilitator(pool, attendee_id).await {
        return Err(Error::PolicyViolation(
            "facilitators cannot be assigned to a facilitator".to_string(),
        ));
    }

    if let Some(facilitator_id) = new_facilitator_id {
        let attendee = db::attendees::get(pool, attendee_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("attendee {attendee_id} not found")))?;
        let facilitator = db::facilitators::get(pool, facilitator_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("facilitator {facilitator_id} not found")))?;

        if attendee.gender != facilitator.gender {
            return Err(Error::PolicyViolation(format!(
                "attendee gender ({}) must match facilitator gender ({})",
                attendee.gender, facilitator.gender
            )));
        }
    }

    let affected = db::attendees::set_facilitator(pool, attendee_id, new_facilitator_id).await?;
    if affected == 0 {
        return Err(Error::NotFound(format!("attendee {attendee_id} not found")));
    }

    info!(attendee_id, facilitator_id = ?new_facilitator_id, "attendee transferred");
    Ok(())
}

/// Pick the least-loaded active facilitator of matching gender and assign
/// the attendee to them.
///
/// Returns `Ok(None)` when the attendee is a facilitator or no
/// facilitator of that gender is active today; that is a valid terminal
/// state, never an error. Two concurrent calls can both read the same least-loaded
/// facilitator before either commits; the transient skew is accepted
/// rather than locked against.
pub async fn auto_assign(
    pool: &SqlitePool,
    utc_offset_minutes: i32,
    attendee_id: &str,
    gender: Gender,
) -> Result<Option<String>> {
    // Facilitators are never auto-assigned
    if membership::is_facilitator(pool, attendee_id).await {
        debug!(attendee_id, "skipping auto-assignment for facilitator");
        return Ok(None);
    }

    let active = roster::active_facilitators(pool, utc_offset_minutes, Some(gender)).await?;
    if active.is_empty() {
        debug!(attendee_id, %gender, "no active facilitator of matching gender");
        return Ok(None);
    }

    // Current load per active facilitator. Every active facilitator is
    // pre-seeded at zero so an empty group still competes; attendees who
    // are themselves facilitators do not count toward load.
    let today = service_date_today(utc_offset_minutes);
    let exclusion = db::facilitators::all_ids(pool).await?;
    let rows = db::attendance::joined_for_date(pool, &today).await?;

    let mut loads: HashMap<&str, usize> =
        active.iter().map(|f| (f.id.as_str(), 0)).collect();
    for row in &rows {
        let Some(facilitator_id) = row.facilitator_id.as_deref() else {
            continue;
        };
        if exclusion.contains(&row.attendee_id) {
            continue;
        }
        if let Some(count) = loads.get_mut(facilitator_id) {
            *count += 1;
        }
    }

    // Smallest load wins; ties go to the first in active order (first
    // name ascending), which keeps the choice deterministic
    let Some(chosen) = active.iter().min_by_key(|f| loads[f.id.as_str()]) else {
        return Ok(None);
    };

    debug!(
        attendee_id,
        facilitator_id = %chosen.id,
        load = loads[chosen.id.as_str()],
        "selected least-loaded facilitator"
    );

    transfer(pool, attendee_id, Some(chosen.id.as_str())).await?;
    Ok(Some(chosen.id.clone()))
}

/// Auto-assignment trigger used after a successful check-in.
///
/// Already-assigned attendees are left untouched, so running the trigger
/// twice is idempotent.
pub async fn ensure_assignment(
    pool: &SqlitePool,
    utc_offset_minutes: i32,
    attendee: &Attendee,
) -> Result<Option<String>> {
    if let Some(existing) = &attendee.facilitator_id {
        return Ok(Some(existing.clone()));
    }
    auto_assign(pool, utc_offset_minutes, &attendee.id, attendee.gender).await
}
