//! Insert operations for users, devices, tokens, and assets.

use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Token not found for user '{0}'")]
    TokenNotFound(String),
    #[error("Token expired for user '{0}'")]
    TokenExpired(String),
}

/// Insert a user, returning the new row id.
pub fn insert_user(conn: &Connection, user_name: &str) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO users (user_name) VALUES (?1)",
        params![user_name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a device for a user, returning the new row id.
pub fn insert_device(conn: &Connection, user_id: i64, name: &str) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO devices (user_id, name) VALUES (?1, ?2)",
        params![user_id, name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a bearer token for a user/device pair.
///
/// `expires_at` is an RFC 3339 timestamp, or `None` for a non-expiring token.
pub fn insert_token(
    conn: &Connection,
    token: &str,
    user_id: i64,
    device_id: i64,
    expires_at: Option<&str>,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO tokens (token, user_id, device_id, expires_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![token, user_id, device_id, expires_at],
    )?;
    Ok(())
}

/// A new asset row to insert.
#[derive(Debug, Clone)]
pub struct NewAsset<'a> {
    pub user_id: i64,
    pub device_id: i64,
    pub hash: &'a str,
    pub ext_id: Option<i64>,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Insert an asset, returning the new row id.
pub fn insert_asset(conn: &Connection, asset: &NewAsset) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO assets (user_id, device_id, hash, ext_id, year, month, day)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            asset.user_id,
            asset.device_id,
            asset.hash,
            asset.ext_id,
            asset.year,
            asset.month,
            asset.day,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The token the demo dataset issues to every seeded device.
pub const DEMO_TOKEN: &str = "1234567";

/// Populate the demo dataset: two users with one device each, a shared
/// demo token, and assets scattered over a few years.
///
/// Everything runs in a single transaction so a fresh database either gets
/// the whole dataset or none of it.
pub fn seed_demo(conn: &Connection) -> Result<(), OperationError> {
    let tx = conn.unchecked_transaction()?;

    for (user_name, device_name) in [("alice", "alice-phone"), ("bob", "bob-camera")] {
        let user_id = insert_user(&tx, user_name)?;
        let device_id = insert_device(&tx, user_id, device_name)?;
        insert_token(&tx, DEMO_TOKEN, user_id, device_id, None)?;

        // A handful of shooting days per user, two assets per day.
        let mut ext_id = 1;
        for (year, month, day) in [
            (2007, 1, 5),
            (2007, 1, 6),
            (2009, 6, 21),
            (2012, 2, 29),
            (2015, 12, 31),
            (2019, 7, 4),
        ] {
            for n in 0..2 {
                let hash = format!("{user_name}-{year:04}{month:02}{day:02}-{n}");
                insert_asset(
                    &tx,
                    &NewAsset {
                        user_id,
                        device_id,
                        hash: &hash,
                        ext_id: Some(ext_id),
                        year,
                        month,
                        day,
                    },
                )?;
                ext_id += 1;
            }
        }
    }

    tx.commit()?;
    Ok(())
}
