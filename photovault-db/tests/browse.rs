use photovault_db::operations::DEMO_TOKEN;
use photovault_db::*;

fn seeded() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    seed_demo(&conn).unwrap();
    conn
}

#[test]
fn browse_day_counts_assets() {
    let conn = seeded();
    let report = browse_day(&conn, "alice", DEMO_TOKEN, 2019, 7, 4).unwrap();
    assert_eq!(report.days, 1);
    assert_eq!(report.assets, 2);
}

#[test]
fn browse_day_empty_day_still_visits() {
    let conn = seeded();
    let report = browse_day(&conn, "alice", DEMO_TOKEN, 2019, 7, 5).unwrap();
    assert_eq!(report.days, 1);
    assert_eq!(report.assets, 0);
}

#[test]
fn browse_month_walks_asset_days_only() {
    let conn = seeded();
    // January 2007 has two seeded days (5th and 6th), two assets each
    let report = browse_month(&conn, "alice", DEMO_TOKEN, 2007, 1).unwrap();
    assert_eq!(report.days, 2);
    assert_eq!(report.assets, 4);

    let empty = browse_month(&conn, "alice", DEMO_TOKEN, 2007, 2).unwrap();
    assert_eq!(empty.days, 0);
    assert_eq!(empty.assets, 0);
}

#[test]
fn browse_year_lists_every_day() {
    let conn = seeded();
    let report = browse_year(&conn, "alice", DEMO_TOKEN, 2007).unwrap();
    assert_eq!(report.days, 2);
    assert_eq!(report.assets, 4);
}

#[test]
fn browse_years_digests_all_days() {
    let conn = seeded();
    let report = browse_years(&conn, "alice", DEMO_TOKEN).unwrap();
    // Digest mode visits every seeded day but lists no rows
    assert_eq!(report.days, 6);
    assert_eq!(report.assets, 0);
}

#[test]
fn bad_token_aborts_browse() {
    let conn = seeded();
    let err = browse_years(&conn, "alice", "wrong").unwrap_err();
    assert!(matches!(err, OperationError::TokenNotFound(_)));
}

#[test]
fn failed_browse_leaves_connection_usable() {
    let conn = seeded();
    assert!(browse_day(&conn, "alice", "wrong", 2019, 7, 4).is_err());

    // The rolled-back transaction must not poison later browses
    let report = browse_day(&conn, "alice", DEMO_TOKEN, 2019, 7, 4).unwrap();
    assert_eq!(report.assets, 2);
}

#[test]
fn users_only_see_their_own_assets() {
    let conn = seeded();
    let alice = browse_years(&conn, "alice", DEMO_TOKEN).unwrap();
    let bob = browse_years(&conn, "bob", DEMO_TOKEN).unwrap();
    assert_eq!(alice.days, bob.days);

    // Per-day listings stay disjoint: alice's day never shows bob's rows
    let report = browse_day(&conn, "alice", DEMO_TOKEN, 2019, 7, 4).unwrap();
    assert_eq!(report.assets, 2);
}
