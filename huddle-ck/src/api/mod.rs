//! HTTP API handlers for huddle-ck

pub mod attendees;
pub mod checkin;
pub mod health;
pub mod rosters;

pub use attendees::attendee_routes;
pub use checkin::checkin_routes;
pub use health::health_routes;
pub use rosters::roster_routes;
