use rusqlite::{Connection, params};

use crate::password::{hash_password, verify_password};
use crate::{StoreError, User};

pub fn create_user(
    conn: &Connection,
    email: &str,
    password: &str,
    display_name: &str,
) -> Result<User, StoreError> {
    let password_hash = hash_password(password);

    let result = conn.execute(
        "INSERT INTO users (email, password_hash, display_name) VALUES (?1, ?2, ?3)",
        params![email, password_hash, display_name],
    );

    match result {
        Ok(_) => {
            let id = conn.last_insert_rowid();
            tracing::info!(user_id = id, "registered user");
            Ok(User {
                id,
                email: email.to_string(),
                password_hash,
                display_name: display_name.to_string(),
            })
        }
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(StoreError::EmailTaken)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn user_by_email(conn: &Connection, email: &str) -> Result<Option<User>, StoreError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, email, password_hash, display_name FROM users WHERE email = ?1",
    )?;
    let user = stmt
        .query_row(params![email], row_to_user)
        .map(Some)
        .or_else(not_found_to_none)?;
    Ok(user)
}

pub fn user_by_id(conn: &Connection, id: i64) -> Result<Option<User>, StoreError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, email, password_hash, display_name FROM users WHERE id = ?1")?;
    let user = stmt
        .query_row(params![id], row_to_user)
        .map(Some)
        .or_else(not_found_to_none)?;
    Ok(user)
}

pub fn verify_login(
    conn: &Connection,
    email: &str,
    password: &str,
) -> Result<Option<User>, StoreError> {
    let Some(user) = user_by_email(conn, email)? else {
        return Ok(None);
    };
    if verify_password(password, &user.password_hash) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        display_name: row.get(3)?,
    })
}

fn not_found_to_none(e: rusqlite::Error) -> Result<Option<User>, rusqlite::Error> {
    match e {
        rusqlite::Error::QueryReturnedNoRows => Ok(None),
        other => Err(other),
    }
}
