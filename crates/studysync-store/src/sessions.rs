//! DB-backed login sessions keyed by random opaque tokens.

use rand::RngCore;
use rusqlite::{Connection, params};

use crate::db::now_epoch;
use crate::users::user_by_id;
use crate::{StoreError, User};

const TOKEN_LEN: usize = 32;

pub fn create_session(conn: &Connection, user_id: i64) -> Result<String, StoreError> {
    let mut bytes = [0u8; TOKEN_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    let token: String = bytes.iter().map(|b| format!("{b:02x}")).collect();

    conn.execute(
        "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
        params![token, user_id, now_epoch()],
    )?;
    Ok(token)
}

pub fn user_for_token(conn: &Connection, token: &str) -> Result<Option<User>, StoreError> {
    let mut stmt = conn.prepare_cached("SELECT user_id FROM sessions WHERE token = ?1")?;
    let user_id: Option<i64> = match stmt.query_row(params![token], |row| row.get(0)) {
        Ok(id) => Some(id),
        Err(rusqlite::Error::QueryReturnedNoRows) => None,
        Err(e) => return Err(e.into()),
    };

    match user_id {
        Some(id) => user_by_id(conn, id),
        None => Ok(None),
    }
}

pub fn delete_session(conn: &Connection, token: &str) -> Result<(), StoreError> {
    conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    Ok(())
}

pub fn purge_older_than(conn: &Connection, max_age_secs: u64) -> Result<usize, StoreError> {
    let cutoff = now_epoch() - max_age_secs as i64;
    let removed = conn.execute(
        "DELETE FROM sessions WHERE created_at < ?1",
        params![cutoff],
    )?;
    if removed > 0 {
        tracing::debug!(removed, "purged expired sessions");
    }
    Ok(removed)
}
