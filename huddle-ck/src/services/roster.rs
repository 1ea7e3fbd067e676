//! Daily activity resolution and per-facilitator rosters

use crate::db;
use crate::db::attendance::CheckedInRow;
use huddle_common::db::models::{
    full_name, CheckedInAttendee, Facilitator, FacilitatorRoster, Gender,
};
use huddle_common::time::service_date_today;
use huddle_common::{Error, Result};
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Facilitators active today: those with an attendance entry for the
/// current service date, optionally filtered by gender, ordered by first
/// name ascending.
///
/// An empty result is success: nobody has checked in yet.
pub async fn active_facilitators(
    pool: &SqlitePool,
    utc_offset_minutes: i32,
    gender: Option<Gender>,
) -> Result<Vec<Facilitator>> {
    let today = service_date_today(utc_offset_minutes);
    let checked_in = db::attendance::checked_in_ids(pool, &today).await?;
    if checked_in.is_empty() {
        return Ok(Vec::new());
    }

    let active = db::facilitators::by_ids(pool, &checked_in, gender).await?;
    debug!(
        date = %today,
        checked_in = checked_in.len(),
        active = active.len(),
        "resolved active facilitators"
    );
    Ok(active)
}

pub(crate) fn row_to_checked_in(row: &CheckedInRow) -> CheckedInAttendee {
    CheckedInAttendee {
        attendance_log_id: row.attendance_log_id.clone(),
        attendee_id: row.attendee_id.clone(),
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        contact_number: row.contact_number.clone(),
        full_name: full_name(&row.first_name, &row.last_name),
        check_in_time: row.check_in_time.clone(),
        is_first_timer: row.is_first_timer,
    }
}

/// Group today's checked-in attendees by assigned facilitator.
///
/// The facilitator-id exclusion set is built once up front; a facilitator
/// who also checked in as an attendee never appears in anyone's group,
/// whatever their own `facilitator_id` says.
fn group_by_facilitator(
    rows: &[CheckedInRow],
    exclusion: &HashSet<String>,
) -> HashMap<String, Vec<CheckedInAttendee>> {
    let mut groups: HashMap<String, Vec<CheckedInAttendee>> = HashMap::new();
    for row in rows {
        let Some(facilitator_id) = row.facilitator_id.as_deref() else {
            continue;
        };
        if exclusion.contains(&row.attendee_id) {
            continue;
        }
        groups
            .entry(facilitator_id.to_string())
            .or_default()
            .push(row_to_checked_in(row));
    }
    groups
}

fn build_roster(
    facilitator: Facilitator,
    attendees: Vec<CheckedInAttendee>,
) -> FacilitatorRoster {
    FacilitatorRoster {
        id: facilitator.id,
        first_name: facilitator.first_name,
        last_name: facilitator.last_name,
        gender: facilitator.gender,
        attendee_count: attendees.len(),
        attendees,
    }
}

/// Today's roster for a single facilitator.
///
/// Attendees come back newest check-in first; attendees who are
/// themselves facilitators are excluded.
pub async fn roster_for(
    pool: &SqlitePool,
    utc_offset_minutes: i32,
    facilitator_id: &str,
) -> Result<FacilitatorRoster> {
    let facilitator = db::facilitators::get(pool, facilitator_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("facilitator {facilitator_id} not found")))?;

    let today = service_date_today(utc_offset_minutes);
    let exclusion = db::facilitators::all_ids(pool).await?;
    let rows = db::attendance::joined_for_date(pool, &today).await?;

    let attendees = rows
        .iter()
        .filter(|row| row.facilitator_id.as_deref() == Some(facilitator_id))
        .filter(|row| !exclusion.contains(&row.attendee_id))
        .map(row_to_checked_in)
        .collect();

    Ok(build_roster(facilitator, attendees))
}

/// Rosters for every facilitator active today, exactly the set returned
/// by [`active_facilitators`], each with its (possibly empty) group of
/// checked-in attendees.
pub async fn all_rosters(
    pool: &SqlitePool,
    utc_offset_minutes: i32,
) -> Result<Vec<FacilitatorRoster>> {
    let active = active_facilitators(pool, utc_offset_minutes, None).await?;
    if active.is_empty() {
        return Ok(Vec::new());
    }

    let today = service_date_today(utc_offset_minutes);
    let exclusion = db::facilitators::all_ids(pool).await?;
    let rows = db::attendance::joined_for_date(pool, &today).await?;
    let mut groups = group_by_facilitator(&rows, &exclusion);

    Ok(active
        .into_iter()
        .map(|facilitator| {
            let attendees = groups.remove(&facilitator.id).unwrap_or_default();
            build_roster(facilitator, attendees)
        })
        .collect())
}
