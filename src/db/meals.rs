use crate::db::Database;
use crate::errors::{Error, Result};
use crate::models::{DailyTotal, MealLog, MealLogUpdate, NewMealLog};
use chrono::{Duration, Local, NaiveDate, Utc};
use rusqlite::{Row, params};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

fn map_meal_row(row: &Row<'_>) -> rusqlite::Result<MealLog> {
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
}

const MEAL_COLUMNS: &str = "id, date, meal_type, food_name, calories, serving_size, notes, timestamp";

impl Database {
    /// Creates a new meal log. The creation instant and id are assigned
    /// here; the timestamp is never touched again by later updates.
    ///
    /// Field content is the caller's responsibility beyond what the schema
    /// enforces (non-null fields, non-negative calories).
    ///
    /// # Returns
    ///
    /// The id of the newly inserted log.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` on any underlying failure, including
    /// constraint violations.
    #[instrument(skip(self, entry))]
    pub fn create_log(&self, entry: &NewMealLog<'_>) -> Result<i64> {
        self.with_conn(|conn| {
            let timestamp = Utc::now();
            let mut stmt = conn.prepare_cached(
                "INSERT INTO meals (date, meal_type, food_name, calories, serving_size, notes, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            let id = stmt.insert(params![
                entry.date,
                entry.meal_type,
                entry.food_name,
                entry.calories,
                entry.serving_size,
                entry.notes,
                timestamp,
            ])?;
            info!(
                "Created meal log {}: '{}' ({} kcal, {}) on {}",
                id, entry.food_name, entry.calories, entry.meal_type, entry.date
            );
            Ok(id)
        })
    }

    /// Returns all logs for the given date, earliest logged first. An empty
    /// Vec when nothing was logged that day.
    #[instrument(skip(self))]
    pub fn read_by_date(&self, date: NaiveDate) -> Result<Vec<MealLog>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {MEAL_COLUMNS} FROM meals WHERE date = ?1 ORDER BY timestamp ASC"
            ))?;
            let rows = stmt.query_map(params![date], map_meal_row)?;

            let mut logs = Vec::new();
            for row in rows {
                logs.push(row.map_err(|e| Error::Storage(format!("Failed to map meal row: {}", e)))?);
            }
            debug!("Fetched {} meal logs for {}", logs.len(), date);
            Ok(logs)
        })
    }

    /// Returns every log in the store, most recent date first and most
    /// recently logged within a date first.
    #[instrument(skip(self))]
    pub fn read_all(&self) -> Result<Vec<MealLog>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {MEAL_COLUMNS} FROM meals ORDER BY date DESC, timestamp DESC"
            ))?;
            let rows = stmt.query_map([], map_meal_row)?;

            let mut logs = Vec::new();
            for row in rows {
                logs.push(row.map_err(|e| Error::Storage(format!("Failed to map meal row: {}", e)))?);
            }
            debug!("Fetched {} meal logs in total", logs.len());
            Ok(logs)
        })
    }

    /// Replaces the mutable fields of the log with the given id. The date,
    /// timestamp, and id are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no log has that id, `Error::Storage` on
    /// any underlying failure.
    #[instrument(skip(self, changes))]
    pub fn update_log(&self, id: i64, changes: &MealLogUpdate<'_>) -> Result<()> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(
                "UPDATE meals SET meal_type = ?1, food_name = ?2, calories = ?3, serving_size = ?4, notes = ?5
                 WHERE id = ?6",
            )?;
            let rows_affected = stmt.execute(params![
                changes.meal_type,
                changes.food_name,
                changes.calories,
                changes.serving_size,
                changes.notes,
                id,
            ])?;

            if rows_affected == 0 {
                warn!("Attempted to update nonexistent meal log {}", id);
                return Err(Error::NotFound(id));
            }
            info!("Updated meal log {}", id);
            Ok(())
        })
    }

    /// Deletes the log with the given id. Idempotent: deleting an id that
    /// does not exist succeeds without error.
    #[instrument(skip(self))]
    pub fn delete_log(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let rows_deleted = conn.execute("DELETE FROM meals WHERE id = ?1", params![id])?;
            if rows_deleted > 0 {
                info!("Deleted meal log {}", id);
            } else {
                debug!("No meal log {} to delete", id);
            }
            Ok(())
        })
    }

    /// Sums the calories logged on the given date. 0.0 when nothing was
    /// logged; the COALESCE makes the empty-day fallback part of the query
    /// contract rather than an error path.
    #[instrument(skip(self))]
    pub fn daily_total(&self, date: NaiveDate) -> Result<f64> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare_cached("SELECT COALESCE(SUM(calories), 0.0) FROM meals WHERE date = ?1")?;
            let total: f64 = stmt.query_row(params![date], |row| row.get(0))?;
            debug!("Daily total for {}: {} kcal", date, total);
            Ok(total)
        })
    }

    /// Returns the rolling week ending today: exactly 7 entries, oldest
    /// first, one per calendar day, with 0.0 for days without logs.
    pub fn weekly_series(&self) -> Result<Vec<DailyTotal>> {
        self.weekly_series_ending(Local::now().date_naive())
    }

    /// The rolling week ending on an explicit date. `weekly_series` is this
    /// with `end` set to today.
    #[instrument(skip(self))]
    pub fn weekly_series_ending(&self, end: NaiveDate) -> Result<Vec<DailyTotal>> {
        let start = end - Duration::days(6);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT date, SUM(calories) FROM meals WHERE date BETWEEN ?1 AND ?2 GROUP BY date",
            )?;
            let rows = stmt.query_map(params![start, end], |row| {
                Ok((row.get::<_, NaiveDate>(0)?, row.get::<_, f64>(1)?))
            })?;

            let mut totals: HashMap<NaiveDate, f64> = HashMap::new();
            for row in rows {
                let (date, total) = row?;
                totals.insert(date, total);
            }

            let series: Vec<DailyTotal> = (0..7)
                .map(|offset| {
                    let date = start + Duration::days(offset);
                    DailyTotal {
                        date,
                        total: totals.get(&date).copied().unwrap_or(0.0),
                    }
                })
                .collect();
            debug!("Weekly series {} through {}: {} days", start, end, series.len());
            Ok(series)
        })
    }
}
