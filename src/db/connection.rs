use crate::config::ProfileConfig;
use crate::db::schema::{create_tables, seed_default_settings};
use crate::errors::{Error, Result};
use rusqlite::Connection;
use std::sync::Mutex;
use tracing::{debug, info, instrument};

/// Owned handle to the backing SQLite store.
///
/// A front end opens one handle at startup, holds it for the lifetime of
/// the process, and calls [`Database::close`] once at shutdown. All
/// operations are synchronous blocking calls. After `close`, operations
/// fail with a `Storage` error rather than silently no-opping.
pub struct Database {
    conn: Mutex<Option<Connection>>,
}

impl Database {
    /// Opens (or creates) the store at `db_path`, ensures the schema
    /// exists, and seeds the default settings row if absent. Idempotent:
    /// safe to call on an already-initialized store.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the store cannot be opened or the schema
    /// cannot be created.
    #[instrument]
    pub fn open(db_path: &str) -> Result<Self> {
        Self::open_with_profile(db_path, &ProfileConfig::default())
    }

    /// Like [`Database::open`], but seeds the settings row from `profile`
    /// when the store is brand new.
    #[instrument(skip(profile))]
    pub fn open_with_profile(db_path: &str, profile: &ProfileConfig) -> Result<Self> {
        debug!("Opening database connection to: {}", db_path);
        let conn = Connection::open(db_path).map_err(|e| {
            Error::Storage(format!("Failed to open database at {}: {}", db_path, e))
        })?;

        conn.execute("PRAGMA foreign_keys = ON;", [])
            .map_err(|e| Error::Storage(format!("Failed to enable foreign keys: {}", e)))?;

        info!("Database connection opened. Ensuring tables are created...");
        create_tables(&conn)?;
        seed_default_settings(&conn, profile)?;

        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    /// Runs `f` against the live connection, failing with a `Storage` error
    /// if the handle has been closed.
    pub(crate) fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self
            .conn
            .lock()
            .map_err(|_| Error::Storage("Failed to acquire DB lock".to_string()))?;
        match guard.as_ref() {
            Some(conn) => f(conn),
            None => Err(Error::Storage(
                "Database connection is closed".to_string(),
            )),
        }
    }

    /// Releases the storage connection. Safe to call multiple times; a
    /// second call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if SQLite reports a failure while closing.
    #[instrument(skip(self))]
    pub fn close(&self) -> Result<()> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|_| Error::Storage("Failed to acquire DB lock".to_string()))?;
        match guard.take() {
            Some(conn) => {
                conn.close()
                    .map_err(|(_, e)| Error::Storage(format!("Failed to close database: {}", e)))?;
                info!("Database connection closed.");
            }
            None => debug!("Database connection already closed; nothing to do."),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils::{init_test_tracing, setup_test_db};
    use crate::errors::Result;
    use crate::models::NewMealLog;
    use chrono::NaiveDate;

    #[test]
    fn test_close_is_idempotent_and_blocks_operations() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db()?;

        db.create_log(&NewMealLog {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            meal_type: "Lunch",
            food_name: "Rice",
            calories: 200.0,
            serving_size: None,
            notes: None,
        })?;

        db.close()?;

        let err = db.read_all().unwrap_err();
        assert!(
            matches!(err, Error::Storage(_)),
            "Operations on a closed handle should fail with a storage error, got: {:?}",
            err
        );

        // Second close is a no-op.
        db.close()?;
        Ok(())
    }

    #[test]
    fn test_reopening_same_store_does_not_duplicate_state() -> Result<()> {
        init_test_tracing();
        let path = std::env::temp_dir().join(format!("calq-reopen-test-{}.db", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        let _ = std::fs::remove_file(&path);

        let db = Database::open(&path_str)?;
        db.create_log(&NewMealLog {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            meal_type: "Dinner",
            food_name: "Soup",
            calories: 150.0,
            serving_size: None,
            notes: None,
        })?;
        db.close()?;

        // Second open must not recreate tables or duplicate the settings row.
        let db = Database::open(&path_str)?;
        assert_eq!(db.read_all()?.len(), 1);
        assert_eq!(db.target_calories()?, 2000);

        let settings_rows: i64 = db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT COUNT(*) FROM settings")?;
            let count = stmt.query_row([], |row| row.get(0))?;
            Ok(count)
        })?;
        assert_eq!(settings_rows, 1, "Settings row must not be duplicated");

        db.close()?;
        std::fs::remove_file(&path).ok();
        Ok(())
    }
}
