//! Read queries for the asset hierarchy.
//!
//! Provides the year/month/day drill-down queries the browse battery runs,
//! plus overall vault statistics.

use rusqlite::{params, Connection};

use crate::operations::OperationError;

// ── Asset Rows ──────────────────────────────────────────────────────────────

/// One asset row from a day listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRow {
    pub id: i64,
    pub hash: String,
    pub ext_id: Option<i64>,
}

/// List a user's assets for one calendar day, joined against the owning
/// device and ordered by hash.
pub fn assets_by_day(
    conn: &Connection,
    user_id: i64,
    year: i32,
    month: u32,
    day: u32,
) -> Result<Vec<AssetRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, hash, ext_id FROM (
             SELECT a.id, a.hash, a.ext_id
             FROM assets AS a
             INNER JOIN (SELECT * FROM devices) AS d ON a.device_id = d.id
             WHERE a.user_id = ?1 AND a.year = ?2 AND a.month = ?3 AND a.day = ?4
         ) ORDER BY hash",
    )?;
    let rows = stmt.query_map(params![user_id, year, month, day], |row| {
        Ok(AssetRow {
            id: row.get(0)?,
            hash: row.get(1)?,
            ext_id: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Concatenate a day's asset hashes (hash-ordered) into a single digest
/// string. Returns `None` when the day has no assets.
pub fn day_digest(
    conn: &Connection,
    user_id: i64,
    year: i32,
    month: u32,
    day: u32,
) -> Result<Option<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT group_concat(hash, '') FROM (
             SELECT hash FROM assets
             WHERE user_id = ?1 AND year = ?2 AND month = ?3 AND day = ?4
             ORDER BY hash
         )",
    )?;
    let digest: Option<String> =
        stmt.query_row(params![user_id, year, month, day], |row| row.get(0))?;
    Ok(digest)
}

// ── Calendar Queries ────────────────────────────────────────────────────────

/// Distinct years the user has assets in, ascending.
pub fn distinct_years(conn: &Connection, user_id: i64) -> Result<Vec<i32>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT year AS y FROM assets WHERE user_id = ?1 ORDER BY y",
    )?;
    let rows = stmt.query_map(params![user_id], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Distinct days within a month the user has assets on, ascending.
pub fn distinct_days(
    conn: &Connection,
    user_id: i64,
    year: i32,
    month: u32,
) -> Result<Vec<u32>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT day AS d FROM assets
         WHERE user_id = ?1 AND year = ?2 AND month = ?3 ORDER BY d",
    )?;
    let rows = stmt.query_map(params![user_id, year, month], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Month/day presence bitmap for one year. Indexed `[month - 1][day - 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaysMap(pub [[bool; 31]; 12]);

impl DaysMap {
    /// Days marked present, as `(month, day)` pairs in calendar order.
    pub fn days(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().enumerate().flat_map(|(m, days)| {
            days.iter()
                .enumerate()
                .filter(|(_, present)| **present)
                .map(move |(d, _)| (m as u32 + 1, d as u32 + 1))
        })
    }
}

/// Which month/day slots of a year the user has assets in.
pub fn days_map(conn: &Connection, user_id: i64, year: i32) -> Result<DaysMap, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT month AS m, day AS d FROM assets
         WHERE user_id = ?1 AND year = ?2 ORDER BY m, d",
    )?;
    let rows = stmt.query_map(params![user_id, year], |row| {
        Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?))
    })?;

    let mut map = DaysMap::default();
    for row in rows {
        let (month, day) = row?;
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            map.0[month as usize - 1][day as usize - 1] = true;
        }
    }
    Ok(map)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall vault statistics.
pub fn vault_stats(conn: &Connection) -> Result<VaultStats, OperationError> {
    let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
    let devices: i64 = conn.query_row("SELECT COUNT(*) FROM devices", [], |r| r.get(0))?;
    let tokens: i64 = conn.query_row("SELECT COUNT(*) FROM tokens", [], |r| r.get(0))?;
    let assets: i64 = conn.query_row("SELECT COUNT(*) FROM assets", [], |r| r.get(0))?;
    let days_with_assets: i64 = conn.query_row(
        "SELECT COUNT(*) FROM (SELECT DISTINCT user_id, year, month, day FROM assets)",
        [],
        |r| r.get(0),
    )?;

    Ok(VaultStats {
        users,
        devices,
        tokens,
        assets,
        days_with_assets,
    })
}

/// Summary statistics for the vault.
#[derive(Debug)]
pub struct VaultStats {
    pub users: i64,
    pub devices: i64,
    pub tokens: i64,
    pub assets: i64,
    pub days_with_assets: i64,
}
