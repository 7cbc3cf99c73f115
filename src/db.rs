// SQLite persistence layer for draft sessions.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::draft::engine::SessionState;

/// SQLite-backed key-value store for saved draft sessions.
///
/// Each session is stored as one JSON blob under its session id. Reads and
/// writes are whole-session: the caller loads, mutates in memory, and saves
/// back. Concurrent writers are last-write-wins.
pub struct SessionStore {
    conn: Mutex<Connection>,
}

impl SessionStore {
    /// Open (or create) a SQLite database at `path` and ensure the sessions
    /// table exists. Pass `":memory:"` for an ephemeral in-memory database
    /// (useful for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS sessions (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Persist a session under its id. Uses INSERT OR REPLACE so repeated
    /// saves overwrite the previous snapshot.
    pub fn save_session(&self, session_id: &str, state: &SessionState) -> Result<()> {
        let conn = self.conn();
        let json_str =
            serde_json::to_string(state).context("failed to serialize session state")?;
        conn.execute(
            "INSERT OR REPLACE INTO sessions (key, value) VALUES (?1, ?2)",
            params![session_id, json_str],
        )
        .context("failed to save session")?;
        Ok(())
    }

    /// Load a previously saved session by id. Returns `None` if the id does
    /// not exist.
    pub fn load_session(&self, session_id: &str) -> Result<Option<SessionState>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT value FROM sessions WHERE key = ?1")
            .context("failed to prepare load_session query")?;

        let mut rows = stmt
            .query_map(params![session_id], |row| {
                let json_str: String = row.get(0)?;
                Ok(json_str)
            })
            .context("failed to query session")?;

        match rows.next() {
            Some(row_result) => {
                let json_str = row_result.context("failed to read session row")?;
                let state: SessionState = serde_json::from_str(&json_str)
                    .context("failed to deserialize session state")?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    /// Delete all saved sessions and the current-session pointer.
    pub fn clear(&self) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin transaction")?;
        tx.execute("DELETE FROM sessions", [])
            .context("failed to delete sessions")?;
        tx.commit().context("failed to commit clear")?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Session ID management
    // ------------------------------------------------------------------

    /// Key in the sessions table that stores the current session id. Session
    /// ids never collide with it because `generate_session_id` has a fixed
    /// prefix.
    const CURRENT_SESSION_KEY: &'static str = "current_session_id";

    /// Retrieve the stored current session id. Returns `None` if no session
    /// has been started yet.
    pub fn current_session_id(&self) -> Result<Option<String>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT value FROM sessions WHERE key = ?1")
            .context("failed to prepare current_session_id query")?;
        let mut rows = stmt
            .query_map(params![Self::CURRENT_SESSION_KEY], |row| {
                let json_str: String = row.get(0)?;
                Ok(json_str)
            })
            .context("failed to query current session id")?;

        match rows.next() {
            Some(row_result) => {
                let json_str = row_result.context("failed to read session id row")?;
                let id: String = serde_json::from_str(&json_str)
                    .context("failed to deserialize session id")?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Persist the current session id.
    pub fn set_current_session_id(&self, session_id: &str) -> Result<()> {
        let conn = self.conn();
        let json_str =
            serde_json::to_string(session_id).context("failed to serialize session id")?;
        conn.execute(
            "INSERT OR REPLACE INTO sessions (key, value) VALUES (?1, ?2)",
            params![Self::CURRENT_SESSION_KEY, json_str],
        )
        .context("failed to save current session id")?;
        Ok(())
    }

    /// Generate a new unique session id from the current UTC timestamp.
    ///
    /// Format: `mock_YYYYMMDD_HHMMSS_SSS` (e.g. `mock_20260830_143022_123`).
    /// The millisecond suffix keeps ids unique even when two sessions start
    /// in the same second.
    pub fn generate_session_id() -> String {
        let now = chrono::Utc::now();
        now.format("mock_%Y%m%d_%H%M%S_%3f").to_string()
    }
}
