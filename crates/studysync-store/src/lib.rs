//! SQLite-backed persistence for the study-guide application.
//!
//! One [`Store`] wraps one `rusqlite::Connection`; the web layer shares it
//! behind a mutex. Schema lives in [`db`], row operations in the per-table
//! modules, password hashing in [`password`].

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

mod db;
mod guides;
pub mod password;
mod sessions;
mod users;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("email already registered")]
    EmailTaken,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A registered user.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
}

/// One uploaded syllabus document and its metadata.
#[derive(Debug, Clone)]
pub struct StudyGuide {
    pub id: i64,
    pub user_id: Option<i64>,
    /// Path of the stored upload on disk.
    pub filename: String,
    /// Name the file was uploaded under.
    pub original_name: String,
    pub exam_board: Option<String>,
    pub year: Option<String>,
    pub created_at: i64,
}

/// An extracted topic attached to a study guide.
#[derive(Debug, Clone)]
pub struct Topic {
    pub id: i64,
    pub study_guide_id: i64,
    pub title: String,
    pub selected: bool,
}

/// Handle to an open application database.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        db::init_database(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        db::init_database(&conn)?;
        Ok(Self { conn })
    }

    // ── users ──

    /// Create a user with a freshly hashed password.
    /// Fails with [`StoreError::EmailTaken`] when the email is registered.
    pub fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User, StoreError> {
        users::create_user(&self.conn, email, password, display_name)
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        users::user_by_email(&self.conn, email)
    }

    pub fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        users::user_by_id(&self.conn, id)
    }

    /// Check credentials; `None` for unknown email or wrong password.
    pub fn verify_login(&self, email: &str, password: &str) -> Result<Option<User>, StoreError> {
        users::verify_login(&self.conn, email, password)
    }

    // ── guides & topics ──

    pub fn create_guide(
        &self,
        user_id: Option<i64>,
        filename: &str,
        original_name: &str,
        exam_board: Option<&str>,
        year: Option<&str>,
    ) -> Result<StudyGuide, StoreError> {
        guides::create_guide(&self.conn, user_id, filename, original_name, exam_board, year)
    }

    pub fn guide_by_id(&self, id: i64) -> Result<Option<StudyGuide>, StoreError> {
        guides::guide_by_id(&self.conn, id)
    }

    pub fn guides_for_user(&self, user_id: i64) -> Result<Vec<StudyGuide>, StoreError> {
        guides::guides_for_user(&self.conn, user_id)
    }

    /// Insert topic rows for a guide; blank titles are skipped.
    pub fn add_topics(&self, guide_id: i64, titles: &[String]) -> Result<(), StoreError> {
        guides::add_topics(&self.conn, guide_id, titles)
    }

    pub fn topics_for_guide(&self, guide_id: i64) -> Result<Vec<Topic>, StoreError> {
        guides::topics_for_guide(&self.conn, guide_id)
    }

    pub fn set_topic_selected(&self, topic_id: i64, selected: bool) -> Result<(), StoreError> {
        guides::set_topic_selected(&self.conn, topic_id, selected)
    }

    /// Make exactly `topic_ids` the selected set for `guide_id`.
    pub fn set_selection(&self, guide_id: i64, topic_ids: &[i64]) -> Result<(), StoreError> {
        guides::set_selection(&self.conn, guide_id, topic_ids)
    }

    pub fn selected_topics(&self, guide_id: i64) -> Result<Vec<Topic>, StoreError> {
        guides::selected_topics(&self.conn, guide_id)
    }

    // ── sessions ──

    /// Start a session for a user, returning the opaque token.
    pub fn create_session(&self, user_id: i64) -> Result<String, StoreError> {
        sessions::create_session(&self.conn, user_id)
    }

    pub fn user_for_token(&self, token: &str) -> Result<Option<User>, StoreError> {
        sessions::user_for_token(&self.conn, token)
    }

    pub fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        sessions::delete_session(&self.conn, token)
    }

    /// Drop sessions older than `max_age_secs`. Returns how many were removed.
    pub fn purge_sessions_older_than(&self, max_age_secs: u64) -> Result<usize, StoreError> {
        sessions::purge_older_than(&self.conn, max_age_secs)
    }
}
