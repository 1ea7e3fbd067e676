//! Store adapter: per-table query modules
//!
//! All raw store access lives here; the service layer above only ever
//! sees typed rows and `huddle_common::Error` kinds.

pub mod attendance;
pub mod attendees;
pub mod facilitators;
