//! Bearer-token validation against the user/device join.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::operations::OperationError;

/// The user/device pair a validated token resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub device_id: i64,
}

/// Validate a bearer token for the named user.
///
/// Fetches every token issued to the user and compares the presented token
/// against each row in code. An expired row never matches; if the only
/// matching rows are expired, the error says so rather than "not found".
pub fn validate_token(
    conn: &Connection,
    user_name: &str,
    token: &str,
) -> Result<Session, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT t.token, t.user_id, t.device_id, t.expires_at
         FROM tokens AS t
         INNER JOIN (SELECT id FROM users WHERE user_name = ?1) AS u
             ON u.id = t.user_id",
    )?;

    let rows = stmt.query_map(params![user_name], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let now = Utc::now();
    let mut saw_expired = false;
    for row in rows {
        let (stored, user_id, device_id, expires_at) = row?;
        if stored != token {
            continue;
        }
        if let Some(expiry) = expires_at.as_deref() {
            match DateTime::parse_from_rfc3339(expiry) {
                Ok(expiry) if expiry <= now => {
                    saw_expired = true;
                    continue;
                }
                // Unparseable expiry is treated as expired rather than open-ended
                Err(e) => {
                    log::warn!("Bad expires_at '{expiry}' for user '{user_name}': {e}");
                    saw_expired = true;
                    continue;
                }
                Ok(_) => {}
            }
        }
        return Ok(Session { user_id, device_id });
    }

    if saw_expired {
        Err(OperationError::TokenExpired(user_name.to_string()))
    } else {
        Err(OperationError::TokenNotFound(user_name.to_string()))
    }
}
