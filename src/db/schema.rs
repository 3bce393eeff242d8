use crate::config::ProfileConfig;
use crate::errors::{Error, Result};
use rusqlite::{Connection, params};
use tracing::{debug, info, instrument};

#[instrument(skip(conn))]
pub(crate) fn create_tables(conn: &Connection) -> Result<()> {
    debug!("Executing CREATE TABLE statements if tables do not exist.");
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS meals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            meal_type TEXT NOT NULL,
            food_name TEXT NOT NULL,
            calories REAL NOT NULL CHECK (calories >= 0),
            serving_size TEXT,
            notes TEXT,
            timestamp DATETIME NOT NULL
        );

        -- Daily and weekly aggregates are keyed by the logical date.
        CREATE INDEX IF NOT EXISTS idx_meals_date ON meals(date);

        CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            name TEXT NOT NULL,
            target_calories INTEGER NOT NULL DEFAULT 2000
        );
        COMMIT;",
    )
    .map_err(|e| Error::Storage(format!("Failed to create tables: {}", e)))?;
    info!("Database tables ensured (meals + singleton settings row schema).");
    Ok(())
}

/// Inserts the singleton settings row if the table is empty. Running this
/// against an already-seeded store leaves the existing row untouched, which
/// is what keeps initialization idempotent.
#[instrument(skip(conn, profile))]
pub(crate) fn seed_default_settings(conn: &Connection, profile: &ProfileConfig) -> Result<()> {
    let inserted = conn.execute(
        "INSERT INTO settings (id, name, target_calories)
         SELECT 1, ?1, ?2
         WHERE NOT EXISTS (SELECT 1 FROM settings)",
        params![profile.name, profile.target_calories],
    )?;
    if inserted > 0 {
        info!(
            "Seeded settings row: name='{}', target_calories={}",
            profile.name, profile.target_calories
        );
    } else {
        debug!("Settings row already present; seeding skipped.");
    }
    Ok(())
}
