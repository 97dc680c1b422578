use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use watchlist_models::{DedupKey, Movie};
use crate::error::{Result, StoreError};
use crate::seed::SUGGESTED_MOVIES;

const CREATE_MOVIES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS movies (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        year INTEGER,
        watched INTEGER DEFAULT 0,
        rating INTEGER,
        created_at INTEGER
    )
"#;

const SELECT_COLUMNS: &str = "SELECT id, title, year, watched, rating, created_at FROM movies";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

/// Connection lifecycle: `Uninitialized -> Initializing -> Ready -> Closed`.
///
/// A closed store may be initialized again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Initializing,
    Ready,
    Closed,
}

pub struct MovieStore {
    location: StoreLocation,
    conn: Option<Connection>,
    state: StoreState,
}

impl MovieStore {
    /// Create an unopened store for a database file; call [`initialize`](Self::initialize) before use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::File(path.into()),
            conn: None,
            state: StoreState::Uninitialized,
        }
    }

    /// Create an unopened in-memory store (useful for testing)
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::Memory,
            conn: None,
            state: StoreState::Uninitialized,
        }
    }

    /// Initialize the connection and ensure the schema in one step
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self::new(path);
        store.initialize()?;
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let mut store = Self::in_memory();
        store.initialize()?;
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Open the connection. Calling this while already `Ready` keeps the
    /// existing connection.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state == StoreState::Ready && self.conn.is_some() {
            debug!("Database already initialized, reusing connection");
            return Ok(());
        }

        let previous = self.state;
        self.state = StoreState::Initializing;

        match self.open_connection() {
            Ok(conn) => {
                self.conn = Some(conn);
                self.state = StoreState::Ready;
                info!("Database connected: {}", self.describe_location());
                Ok(())
            }
            Err(e) => {
                self.state = previous;
                warn!("Failed to open database {}: {}", self.describe_location(), e);
                Err(e)
            }
        }
    }

    fn open_connection(&self) -> Result<Connection> {
        match &self.location {
            StoreLocation::Memory => Connection::open_in_memory().map_err(|e| StoreError::StorageUnavailable {
                path: ":memory:".to_string(),
                reason: e.to_string(),
            }),
            StoreLocation::File(path) => {
                let unavailable = |reason: String| StoreError::StorageUnavailable {
                    path: path.display().to_string(),
                    reason,
                };

                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| unavailable(e.to_string()))?;
                }

                Connection::open(path).map_err(|e| unavailable(e.to_string()))
            }
        }
    }

    fn describe_location(&self) -> String {
        match &self.location {
            StoreLocation::File(path) => path.display().to_string(),
            StoreLocation::Memory => ":memory:".to_string(),
        }
    }

    fn conn(&self) -> Result<&Connection> {
        match (&self.state, &self.conn) {
            (StoreState::Ready, Some(conn)) => Ok(conn),
            _ => Err(StoreError::NotInitialized),
        }
    }

    /// Create the `movies` table if absent. Existing rows are never touched.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn()?.execute_batch(CREATE_MOVIES_TABLE)?;
        debug!("Movies table ready");
        Ok(())
    }

    /// Insert the suggested films when the table has no rows.
    ///
    /// Returns how many rows were inserted (0 when the table was not empty).
    pub fn seed_if_empty(&mut self) -> Result<usize> {
        if self.state != StoreState::Ready {
            return Err(StoreError::NotInitialized);
        }
        let conn = self.conn.as_mut().ok_or(StoreError::NotInitialized)?;

        let tx = conn.transaction()?;
        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
        if existing > 0 {
            debug!("Skipping seed, table already has {} movies", existing);
            return Ok(0);
        }

        let now = Utc::now().timestamp();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO movies (title, year, rating, watched, created_at) VALUES (?1, ?2, ?3, 0, ?4)",
            )?;
            for suggestion in SUGGESTED_MOVIES {
                stmt.execute(params![suggestion.title, suggestion.year, suggestion.rating, now])?;
            }
        }
        tx.commit()?;

        info!("Seeded {} movies", SUGGESTED_MOVIES.len());
        Ok(SUGGESTED_MOVIES.len())
    }

    /// Append an unwatched movie stamped with the current time; returns its id
    pub fn insert(&self, title: &str, year: Option<i32>, rating: Option<i32>) -> Result<i64> {
        let conn = self.conn()?;

        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::InsertFailed {
                reason: "title is required".to_string(),
            });
        }

        conn.execute(
            "INSERT INTO movies (title, year, rating, watched, created_at) VALUES (?1, ?2, ?3, 0, ?4)",
            params![title, year, rating, Utc::now().timestamp()],
        )
        .map_err(|e| StoreError::InsertFailed { reason: e.to_string() })?;

        let id = conn.last_insert_rowid();
        debug!(id, title, "Inserted movie");
        Ok(id)
    }

    /// Every row, newest first. Ties on `created_at` fall back to the higher id.
    pub fn get_all(&self) -> Result<Vec<Movie>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY created_at DESC, id DESC", SELECT_COLUMNS))?;
        let rows = stmt.query_map([], Self::row_to_movie)?;
        rows.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn get(&self, id: i64) -> Result<Movie> {
        let conn = self.conn()?;
        conn.query_row(&format!("{} WHERE id = ?1", SELECT_COLUMNS), [id], Self::row_to_movie)
            .optional()?
            .ok_or(StoreError::NotFound { id })
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn()?.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Title/year identities of every stored row, for import deduplication
    pub fn dedup_keys(&self) -> Result<HashSet<DedupKey>> {
        Ok(self.get_all()?.iter().map(Movie::dedup_key).collect())
    }

    /// Overwrite title, year and rating. `id`, `watched` and `created_at` are left alone.
    pub fn update(&self, id: i64, title: &str, year: Option<i32>, rating: Option<i32>) -> Result<()> {
        let conn = self.conn()?;

        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let updated = conn.execute(
            "UPDATE movies SET title = ?2, year = ?3, rating = ?4 WHERE id = ?1",
            params![id, title, year, rating],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound { id });
        }

        debug!(id, title, "Updated movie");
        Ok(())
    }

    /// Flip the watched flag; returns the new value
    pub fn toggle_watched(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;

        let current: Option<Option<i64>> = conn
            .query_row("SELECT watched FROM movies WHERE id = ?1", [id], |row| row.get(0))
            .optional()?;
        let current = current.ok_or(StoreError::NotFound { id })?.unwrap_or(0) != 0;

        let watched = !current;
        conn.execute(
            "UPDATE movies SET watched = ?2 WHERE id = ?1",
            params![id, watched as i64],
        )?;

        debug!(id, watched, "Toggled watched");
        Ok(watched)
    }

    /// Remove a row permanently. A missing id is reported as `NotFound`.
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM movies WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(StoreError::NotFound { id });
        }
        debug!(id, "Deleted movie");
        Ok(())
    }

    /// Release the connection. Later calls fail with `NotInitialized` until
    /// [`initialize`](Self::initialize) runs again.
    pub fn close(&mut self) -> Result<()> {
        self.state = StoreState::Closed;
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| StoreError::Storage(e))?;
            info!("Database closed");
        }
        Ok(())
    }

    fn row_to_movie(row: &Row) -> rusqlite::Result<Movie> {
        let watched: Option<i64> = row.get(3)?;
        let created_at: Option<i64> = row.get(5)?;
        Ok(Movie {
            id: row.get(0)?,
            title: row.get(1)?,
            year: row.get(2)?,
            watched: watched.unwrap_or(0) != 0,
            rating: row.get(4)?,
            created_at: created_at.unwrap_or(0),
        })
    }
}

impl Drop for MovieStore {
    fn drop(&mut self) {
        if self.conn.is_some() {
            if let Err(e) = self.close() {
                warn!("Failed to close database cleanly: {}", e);
            }
        }
    }
}
