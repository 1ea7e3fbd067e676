//! Facilitator membership classification

use crate::db;
use sqlx::SqlitePool;
use tracing::warn;

/// Whether `person_id` belongs to the facilitator set.
///
/// Absence is a normal `false`. A store failure also degrades to `false`
/// so that assignment is never blocked by a transient lookup error;
/// callers must not lean on this result for anything security-sensitive.
pub async fn is_facilitator(pool: &SqlitePool, person_id: &str) -> bool {
    match db::facilitators::exists(pool, person_id).await {
        Ok(found) => found,
        Err(e) => {
            warn!(
                person_id,
                error = %e,
                "facilitator lookup failed, treating as non-facilitator"
            );
            false
        }
    }
}
