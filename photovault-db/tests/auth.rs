use chrono::{Duration, Utc};

use photovault_db::operations::DEMO_TOKEN;
use photovault_db::{
    insert_device, insert_token, insert_user, open_memory, seed_demo, validate_token,
    OperationError,
};

#[test]
fn valid_token_resolves_session() {
    let conn = open_memory().unwrap();
    seed_demo(&conn).unwrap();

    let session = validate_token(&conn, "alice", DEMO_TOKEN).unwrap();
    assert!(session.user_id > 0);
    assert!(session.device_id > 0);

    // bob gets a different user id for the same token string
    let other = validate_token(&conn, "bob", DEMO_TOKEN).unwrap();
    assert_ne!(session.user_id, other.user_id);
}

#[test]
fn wrong_token_not_found() {
    let conn = open_memory().unwrap();
    seed_demo(&conn).unwrap();

    let err = validate_token(&conn, "alice", "not-the-token").unwrap_err();
    assert!(matches!(err, OperationError::TokenNotFound(user) if user == "alice"));
}

#[test]
fn unknown_user_not_found() {
    let conn = open_memory().unwrap();
    seed_demo(&conn).unwrap();

    let err = validate_token(&conn, "mallory", DEMO_TOKEN).unwrap_err();
    assert!(matches!(err, OperationError::TokenNotFound(_)));
}

#[test]
fn expired_token_reported_as_expired() {
    let conn = open_memory().unwrap();
    let user_id = insert_user(&conn, "carol").unwrap();
    let device_id = insert_device(&conn, user_id, "carol-phone").unwrap();

    let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339();
    insert_token(&conn, "stale", user_id, device_id, Some(&yesterday)).unwrap();

    let err = validate_token(&conn, "carol", "stale").unwrap_err();
    assert!(matches!(err, OperationError::TokenExpired(user) if user == "carol"));
}

#[test]
fn future_expiry_still_valid() {
    let conn = open_memory().unwrap();
    let user_id = insert_user(&conn, "dave").unwrap();
    let device_id = insert_device(&conn, user_id, "dave-phone").unwrap();

    let tomorrow = (Utc::now() + Duration::days(1)).to_rfc3339();
    insert_token(&conn, "fresh", user_id, device_id, Some(&tomorrow)).unwrap();

    let session = validate_token(&conn, "dave", "fresh").unwrap();
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.device_id, device_id);
}

#[test]
fn expired_row_does_not_shadow_valid_one() {
    let conn = open_memory().unwrap();
    let user_id = insert_user(&conn, "erin").unwrap();
    let device_id = insert_device(&conn, user_id, "erin-phone").unwrap();

    let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339();
    insert_token(&conn, "rotated", user_id, device_id, Some(&yesterday)).unwrap();
    insert_token(&conn, "rotated", user_id, device_id, None).unwrap();

    // Token was reissued without expiry; the stale row must not win.
    let session = validate_token(&conn, "erin", "rotated").unwrap();
    assert_eq!(session.user_id, user_id);
}
