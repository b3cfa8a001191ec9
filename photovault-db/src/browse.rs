//! The transactional browse operations.
//!
//! Each operation validates the caller's bearer token and then walks one
//! slice of the asset hierarchy, all inside a single explicit transaction.
//! The first error aborts the walk; the transaction rolls back on drop and
//! the error propagates to the caller.

use rusqlite::{Connection, Transaction};

use crate::auth::validate_token;
use crate::operations::OperationError;
use crate::queries::{assets_by_day, day_digest, days_map, distinct_days, distinct_years};

/// What a browse operation touched, for caller-side summaries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BrowseReport {
    /// Calendar days visited.
    pub days: usize,
    /// Asset rows listed across those days.
    pub assets: usize,
}

impl BrowseReport {
    fn absorb(&mut self, other: BrowseReport) {
        self.days += other.days;
        self.assets += other.assets;
    }
}

/// Browse every year the user has assets in, collecting per-day hash
/// digests rather than full listings.
pub fn browse_years(
    conn: &Connection,
    user_name: &str,
    token: &str,
) -> Result<BrowseReport, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let session = validate_token(&tx, user_name, token)?;

    let mut report = BrowseReport::default();
    for year in distinct_years(&tx, session.user_id)? {
        report.absorb(walk_year(&tx, session.user_id, year, false)?);
    }

    tx.commit()?;
    Ok(report)
}

/// Browse one year with full per-day listings.
pub fn browse_year(
    conn: &Connection,
    user_name: &str,
    token: &str,
    year: i32,
) -> Result<BrowseReport, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let session = validate_token(&tx, user_name, token)?;
    let report = walk_year(&tx, session.user_id, year, true)?;
    tx.commit()?;
    Ok(report)
}

/// Browse one month, listing each day that has assets.
pub fn browse_month(
    conn: &Connection,
    user_name: &str,
    token: &str,
    year: i32,
    month: u32,
) -> Result<BrowseReport, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let session = validate_token(&tx, user_name, token)?;

    let mut report = BrowseReport::default();
    for day in distinct_days(&tx, session.user_id, year, month)? {
        report.absorb(list_day(&tx, session.user_id, year, month, day)?);
    }

    tx.commit()?;
    Ok(report)
}

/// Browse a single calendar day.
pub fn browse_day(
    conn: &Connection,
    user_name: &str,
    token: &str,
    year: i32,
    month: u32,
    day: u32,
) -> Result<BrowseReport, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let session = validate_token(&tx, user_name, token)?;
    let report = list_day(&tx, session.user_id, year, month, day)?;
    tx.commit()?;
    Ok(report)
}

/// Walk every day of a year that has assets: full listings when
/// `day_detail` is set, hash digests otherwise.
fn walk_year(
    tx: &Transaction,
    user_id: i64,
    year: i32,
    day_detail: bool,
) -> Result<BrowseReport, OperationError> {
    let map = days_map(tx, user_id, year)?;

    let mut report = BrowseReport::default();
    for (month, day) in map.days() {
        if day_detail {
            report.absorb(list_day(tx, user_id, year, month, day)?);
        } else if day_digest(tx, user_id, year, month, day)?.is_some() {
            report.days += 1;
        }
    }
    Ok(report)
}

fn list_day(
    tx: &Transaction,
    user_id: i64,
    year: i32,
    month: u32,
    day: u32,
) -> Result<BrowseReport, OperationError> {
    let rows = assets_by_day(tx, user_id, year, month, day)?;
    Ok(BrowseReport {
        days: 1,
        assets: rows.len(),
    })
}
