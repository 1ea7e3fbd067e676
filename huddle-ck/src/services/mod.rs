//! Service layer: the assignment and reporting engine plus the check-in
//! CRUD flows

pub mod assignment;
pub mod checkin;
pub mod membership;
pub mod roster;

pub use assignment::{auto_assign, ensure_assignment, transfer};
pub use checkin::{
    check_in, checked_in_today, register_and_check_in, search_attendees, undo_check_in,
    CheckInOutcome,
};
pub use membership::is_facilitator;
pub use roster::{active_facilitators, all_rosters, roster_for};
