//! Attendee table operations

use huddle_common::db::models::{full_name, Attendee, AttendeeRegistration, Gender, SearchResult};
use huddle_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn row_to_attendee(row: &SqliteRow) -> Result<Attendee> {
    let gender: String = row.get("gender");
    Ok(Attendee {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        contact_number: row.get("contact_number"),
        email: row.get("email"),
        birthday: row.get("birthday"),
        school_name: row.get("school_name"),
        barangay: row.get("barangay"),
        city: row.get("city"),
        social_media_name: row.get("social_media_name"),
        gender: Gender::parse(&gender)?,
        is_dgroup_member: row.get("is_dgroup_member"),
        dgroup_leader_name: row.get("dgroup_leader_name"),
        is_first_timer: row.get("is_first_timer"),
        facilitator_id: row.get("facilitator_id"),
        created_at: row.get("created_at"),
    })
}

/// Insert a new attendee from validated registration data.
///
/// Text fields are trimmed here, and empty optionals collapse to NULL, so
/// the stored row never carries stray whitespace. First-timer is always
/// true for a fresh registration.
pub async fn insert(pool: &SqlitePool, id: &str, data: &AttendeeRegistration) -> Result<()> {
    fn clean(value: &Option<String>) -> Option<String> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    let dgroup_leader_name = if data.is_dgroup_member {
        clean(&data.dgroup_leader_name)
    } else {
        None
    };

    sqlx::query(
        r#"
        INSERT INTO attendees (
            id, first_name, last_name, contact_number, email, birthday,
            school_name, barangay, city, social_media_name, gender,
            is_dgroup_member, dgroup_leader_name, is_first_timer
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1)
        "#,
    )
    .bind(id)
    .bind(data.first_name.trim())
    .bind(data.last_name.trim())
    .bind(clean(&data.contact_number))
    .bind(clean(&data.email))
    .bind(clean(&data.birthday))
    .bind(data.school_name.trim())
    .bind(data.barangay.trim())
    .bind(data.city.trim())
    .bind(clean(&data.social_media_name))
    .bind(data.gender.as_str())
    .bind(data.is_dgroup_member)
    .bind(dgroup_leader_name)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load attendee by id
pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<Attendee>> {
    let row = sqlx::query(
        r#"
        SELECT id, first_name, last_name, contact_number, email, birthday,
               school_name, barangay, city, social_media_name, gender,
               is_dgroup_member, dgroup_leader_name, is_first_timer,
               facilitator_id, created_at
        FROM attendees
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_attendee).transpose()
}

/// Update the weak facilitator reference; returns affected row count
pub async fn set_facilitator(
    pool: &SqlitePool,
    attendee_id: &str,
    facilitator_id: Option<&str>,
) -> Result<u64> {
    let result = sqlx::query("UPDATE attendees SET facilitator_id = ? WHERE id = ?")
        .bind(facilitator_id)
        .bind(attendee_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Case-insensitive substring search across first name, last name, and
/// contact number, limited to 10 rows ordered by first name.
pub async fn search(pool: &SqlitePool, term: &str) -> Result<Vec<SearchResult>> {
    // Escape LIKE metacharacters so a literal % or _ in the query does
    // not widen the match
    let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    let pattern = format!("%{escaped}%");

    let rows = sqlx::query(
        r#"
        SELECT id, first_name, last_name, contact_number
        FROM attendees
        WHERE first_name LIKE ? ESCAPE '\'
           OR last_name LIKE ? ESCAPE '\'
           OR contact_number LIKE ? ESCAPE '\'
        ORDER BY first_name ASC
        LIMIT 10
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            let first_name: String = row.get("first_name");
            let last_name: String = row.get("last_name");
            SearchResult {
                id: row.get("id"),
                full_name: full_name(&first_name, &last_name),
                first_name,
                last_name,
                contact_number: row.get("contact_number"),
            }
        })
        .collect())
}
