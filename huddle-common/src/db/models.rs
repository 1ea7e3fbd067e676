//! Database row models and reporting shapes

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attendee / facilitator gender.
///
/// Assignment requires the facilitator's gender to equal the attendee's,
/// so this is a closed enum rather than free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Parse a stored column value
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(Error::Unknown(format!("invalid gender value '{other}' in store"))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attendee row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
    pub school_name: String,
    pub barangay: String,
    pub city: String,
    pub social_media_name: Option<String>,
    pub gender: Gender,
    pub is_dgroup_member: bool,
    pub dgroup_leader_name: Option<String>,
    pub is_first_timer: bool,
    /// Weak reference to an assigned facilitator; relation only
    pub facilitator_id: Option<String>,
    pub created_at: String,
}

/// Facilitator row.
///
/// Shares the identifier space with attendees: a facilitator who is also
/// registered as an attendee carries the same id in both tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facilitator {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub created_at: String,
}

/// Attendance log row; one per (attendee, service date)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceLog {
    pub id: String,
    pub attendee_id: String,
    pub service_date: String,
    pub check_in_time: String,
}

/// New-attendee registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeRegistration {
    pub first_name: String,
    pub last_name: String,
    /// Under the optional contact policy, `false` waives the
    /// contact-number requirement
    #[serde(default = "default_true")]
    pub has_mobile_number: bool,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
    pub school_name: String,
    pub barangay: String,
    pub city: String,
    pub social_media_name: Option<String>,
    pub gender: Gender,
    #[serde(default)]
    pub is_dgroup_member: bool,
    pub dgroup_leader_name: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Search result projection with computed full name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub contact_number: Option<String>,
    pub full_name: String,
}

/// A checked-in attendee as reported in today's list and rosters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckedInAttendee {
    pub attendance_log_id: String,
    pub attendee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub contact_number: Option<String>,
    pub full_name: String,
    pub check_in_time: String,
    pub is_first_timer: bool,
}

/// A facilitator together with today's attendees assigned to them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilitatorRoster {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub attendees: Vec<CheckedInAttendee>,
    pub attendee_count: usize,
}

/// Computed display name, `first last`
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}
