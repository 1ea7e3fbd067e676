//! Registration, check-in, undo, and search flow tests

mod helpers;

use helpers::{
    seed_attendee, seed_check_in, seed_facilitator, setup_pool, stored_assignment, today,
    TEST_OFFSET,
};
use huddle_ck::services::{
    check_in, checked_in_today, register_and_check_in, roster_for, search_attendees,
    undo_check_in,
};
use huddle_common::config::ContactNumberPolicy;
use huddle_common::db::models::{AttendeeRegistration, Gender};
use huddle_common::Error;

fn registration(first_name: &str, contact: &str, gender: Gender) -> AttendeeRegistration {
    AttendeeRegistration {
        first_name: first_name.to_string(),
        last_name: "Reyes".to_string(),
        has_mobile_number: true,
        contact_number: Some(contact.to_string()),
        email: None,
        birthday: None,
        school_name: "Rizal High".to_string(),
        barangay: "San Isidro".to_string(),
        city: "Pasig".to_string(),
        social_media_name: None,
        gender,
        is_dgroup_member: false,
        dgroup_leader_name: None,
    }
}

#[tokio::test]
async fn register_creates_attendee_log_and_assignment() {
    let pool = setup_pool().await;
    seed_facilitator(&pool, "f1", "Grace", "Lim", Gender::Female).await;
    seed_attendee(&pool, "f1", "Grace", "Lim", Gender::Female, None).await;
    seed_check_in(&pool, "lf1", "f1", "2025-03-14T01:00:00+00:00").await;

    let data = registration("Ana", "+639171234567", Gender::Female);
    let outcome =
        register_and_check_in(&pool, TEST_OFFSET, ContactNumberPolicy::RequiredStrict, &data)
            .await
            .unwrap();

    assert!(outcome.attendee.is_first_timer);
    assert_eq!(outcome.facilitator_id.as_deref(), Some("f1"));
    assert_eq!(outcome.attendee.facilitator_id.as_deref(), Some("f1"));
    assert!(outcome.warning.is_none());

    // Attendance row exists for today
    let log = huddle_ck::db::attendance::find_for_date(&pool, &outcome.attendee.id, &today())
        .await
        .unwrap();
    assert!(log.is_some());

    // And the new attendee shows up on the facilitator's roster
    let roster = roster_for(&pool, TEST_OFFSET, "f1").await.unwrap();
    assert_eq!(roster.attendee_count, 1);
}

#[tokio::test]
async fn register_without_active_facilitator_leaves_unassigned() {
    let pool = setup_pool().await;
    let data = registration("Ana", "+639171234567", Gender::Female);
    let outcome =
        register_and_check_in(&pool, TEST_OFFSET, ContactNumberPolicy::RequiredStrict, &data)
            .await
            .unwrap();

    // Nobody to assign to: success with a null assignment, not an error
    assert_eq!(outcome.facilitator_id, None);
    assert!(outcome.warning.is_none());
}

#[tokio::test]
async fn register_rejects_duplicate_contact_number() {
    let pool = setup_pool().await;
    let data = registration("Ana", "+639171234567", Gender::Female);
    register_and_check_in(&pool, TEST_OFFSET, ContactNumberPolicy::RequiredStrict, &data)
        .await
        .unwrap();

    let again = registration("Anita", "+639171234567", Gender::Female);
    let err =
        register_and_check_in(&pool, TEST_OFFSET, ContactNumberPolicy::RequiredStrict, &again)
            .await
            .unwrap_err();
    match err {
        Error::DuplicateKey(msg) => assert!(msg.contains("already registered")),
        other => panic!("expected DuplicateKey, got {other:?}"),
    }
}

#[tokio::test]
async fn register_rejects_invalid_contact_format() {
    let pool = setup_pool().await;
    let data = registration("Ana", "0917123456", Gender::Female);
    let err =
        register_and_check_in(&pool, TEST_OFFSET, ContactNumberPolicy::RequiredStrict, &data)
            .await
            .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[tokio::test]
async fn register_allows_missing_contact_under_optional_policy() {
    let pool = setup_pool().await;
    let mut data = registration("Ana", "", Gender::Female);
    data.has_mobile_number = false;
    data.contact_number = None;

    let outcome = register_and_check_in(&pool, TEST_OFFSET, ContactNumberPolicy::Optional, &data)
        .await
        .unwrap();
    assert_eq!(outcome.attendee.contact_number, None);
}

#[tokio::test]
async fn check_in_assigns_unassigned_attendee() {
    let pool = setup_pool().await;
    seed_facilitator(&pool, "f1", "Marco", "Cruz", Gender::Male).await;
    seed_attendee(&pool, "f1", "Marco", "Cruz", Gender::Male, None).await;
    seed_check_in(&pool, "lf1", "f1", "2025-03-14T01:00:00+00:00").await;

    seed_attendee(&pool, "a1", "Ben", "Torres", Gender::Male, None).await;
    let outcome = check_in(&pool, TEST_OFFSET, "a1").await.unwrap();

    assert_eq!(outcome.facilitator_id.as_deref(), Some("f1"));
    assert_eq!(stored_assignment(&pool, "a1").await.as_deref(), Some("f1"));
}

#[tokio::test]
async fn check_in_leaves_existing_assignment_untouched() {
    let pool = setup_pool().await;
    seed_facilitator(&pool, "f1", "Marco", "Cruz", Gender::Male).await;
    seed_facilitator(&pool, "f2", "Nino", "Santos", Gender::Male).await;
    seed_attendee(&pool, "f1", "Marco", "Cruz", Gender::Male, None).await;
    seed_check_in(&pool, "lf1", "f1", "2025-03-14T01:00:00+00:00").await;

    // Already assigned to the inactive f2; check-in must not rebalance
    seed_attendee(&pool, "a1", "Ben", "Torres", Gender::Male, Some("f2")).await;
    let outcome = check_in(&pool, TEST_OFFSET, "a1").await.unwrap();

    assert_eq!(outcome.facilitator_id.as_deref(), Some("f2"));
    assert_eq!(stored_assignment(&pool, "a1").await.as_deref(), Some("f2"));
}

#[tokio::test]
async fn duplicate_check_in_is_rejected_with_friendly_message() {
    let pool = setup_pool().await;
    seed_attendee(&pool, "a1", "Ana", "Reyes", Gender::Female, None).await;

    check_in(&pool, TEST_OFFSET, "a1").await.unwrap();
    let err = check_in(&pool, TEST_OFFSET, "a1").await.unwrap_err();
    match err {
        Error::DuplicateKey(msg) => {
            assert!(msg.contains("already checked in"));
        }
        other => panic!("expected DuplicateKey, got {other:?}"),
    }
}

#[tokio::test]
async fn check_in_unknown_attendee_is_not_found() {
    let pool = setup_pool().await;
    let err = check_in(&pool, TEST_OFFSET, "ghost").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = check_in(&pool, TEST_OFFSET, "").await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[tokio::test]
async fn today_list_is_newest_first_and_complete() {
    let pool = setup_pool().await;
    seed_attendee(&pool, "a1", "Ana", "Reyes", Gender::Female, None).await;
    seed_attendee(&pool, "a2", "Bea", "Cruz", Gender::Female, None).await;
    seed_check_in(&pool, "l1", "a1", "2025-03-14T01:00:00+00:00").await;
    seed_check_in(&pool, "l2", "a2", "2025-03-14T02:00:00+00:00").await;

    let list = checked_in_today(&pool, TEST_OFFSET).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].attendee_id, "a2");
    assert_eq!(list[0].full_name, "Bea Cruz");
    assert_eq!(list[1].attendee_id, "a1");
}

#[tokio::test]
async fn undo_check_in_removes_the_entry() {
    let pool = setup_pool().await;
    seed_attendee(&pool, "a1", "Ana", "Reyes", Gender::Female, None).await;
    seed_check_in(&pool, "l1", "a1", "2025-03-14T01:00:00+00:00").await;

    undo_check_in(&pool, "l1").await.unwrap();
    let list = checked_in_today(&pool, TEST_OFFSET).await.unwrap();
    assert!(list.is_empty());

    // Second undo finds nothing to delete
    let err = undo_check_in(&pool, "l1").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = undo_check_in(&pool, "").await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[tokio::test]
async fn unassigned_after_transfer_disappears_from_roster() {
    let pool = setup_pool().await;
    seed_facilitator(&pool, "f1", "Grace", "Lim", Gender::Female).await;
    seed_attendee(&pool, "f1", "Grace", "Lim", Gender::Female, None).await;
    seed_check_in(&pool, "lf1", "f1", "2025-03-14T01:00:00+00:00").await;

    seed_attendee(&pool, "a1", "Ana", "Reyes", Gender::Female, Some("f1")).await;
    seed_check_in(&pool, "l1", "a1", "2025-03-14T02:00:00+00:00").await;

    let before = roster_for(&pool, TEST_OFFSET, "f1").await.unwrap();
    assert_eq!(before.attendee_count, 1);

    huddle_ck::services::transfer(&pool, "a1", None).await.unwrap();

    let after = roster_for(&pool, TEST_OFFSET, "f1").await.unwrap();
    assert_eq!(after.attendee_count, 0);
}

#[tokio::test]
async fn search_matches_name_and_contact_case_insensitively() {
    let pool = setup_pool().await;
    seed_attendee(&pool, "a1", "Ana", "Reyes", Gender::Female, None).await;
    seed_attendee(&pool, "a2", "Bea", "Cruz", Gender::Female, None).await;
    sqlx::query("UPDATE attendees SET contact_number = '+639171234567' WHERE id = 'a1'")
        .execute(&pool)
        .await
        .unwrap();

    let by_name = search_attendees(&pool, "reyes").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].full_name, "Ana Reyes");

    let by_contact = search_attendees(&pool, "1234").await.unwrap();
    assert_eq!(by_contact.len(), 1);
    assert_eq!(by_contact[0].id, "a1");

    // Too-short queries succeed with nothing
    let short = search_attendees(&pool, "a").await.unwrap();
    assert!(short.is_empty());
}
