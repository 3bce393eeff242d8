use crate::db::Database;
use crate::errors::{Error, Result};
use crate::models::MealLog;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{OptionalExtension, params};
use tracing_subscriber::EnvFilter;

pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

// A fresh in-memory store per test; `open` already creates the schema and
// seeds the settings row.
pub(crate) fn setup_test_db() -> Result<Database> {
    Database::open(":memory:")
}

pub(crate) struct DirectInsertArgs<'a> {
    pub(crate) date: NaiveDate,
    pub(crate) meal_type: &'a str,
    pub(crate) food_name: &'a str,
    pub(crate) calories: f64,
    pub(crate) serving_size: Option<&'a str>,
    pub(crate) notes: Option<&'a str>,
    pub(crate) timestamp: DateTime<Utc>,
}

// Inserts a meal log with an explicit timestamp, bypassing `create_log`,
// so ordering and immutability tests can pin exact creation instants.
pub(crate) fn direct_insert_meal(db: &Database, args: &DirectInsertArgs<'_>) -> Result<i64> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare_cached(
            "INSERT INTO meals (date, meal_type, food_name, calories, serving_size, notes, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        let id = stmt.insert(params![
            args.date,
            args.meal_type,
            args.food_name,
            args.calories,
            args.serving_size,
            args.notes,
            args.timestamp,
        ])?;
        Ok(id)
    })
}

// Fetches a single log by id for test verification.
pub(crate) fn get_meal_by_id_for_test(db: &Database, id: i64) -> Result<Option<MealLog>> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare_cached(
            "SELECT id, date, meal_type, food_name, calories, serving_size, notes, timestamp
             FROM meals WHERE id = ?1",
        )?;
        stmt.query_row(params![id], |row| {
            Ok(MealLog {
                id: row.get(0)?,
                date: row.get(1)?,
                meal_type: row.get(2)?,
                food_name: row.get(3)?,
                calories: row.get(4)?,
                serving_size: row.get(5)?,
                notes: row.get(6)?,
                timestamp: row.get(7)?,
            })
        })
        .optional()
        .map_err(Error::from)
    })
}

// Removes the settings row so the fallback branch can be exercised.
pub(crate) fn delete_settings_row_for_test(db: &Database) -> Result<()> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM settings", [])?;
        Ok(())
    })
}
