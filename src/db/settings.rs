use crate::db::Database;
use crate::models::UserSettings;
use crate::errors::Result;
use rusqlite::OptionalExtension;
use tracing::{debug, instrument, warn};

/// Daily calorie target used when no settings row exists.
pub const DEFAULT_TARGET_CALORIES: i64 = 2000;

impl Database {
    /// Fetches the singleton settings row, or `None` if it is missing.
    #[instrument(skip(self))]
    pub fn settings(&self) -> Result<Option<UserSettings>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare_cached("SELECT id, name, target_calories FROM settings WHERE id = 1")?;
            let settings = stmt
                .query_row([], |row| {
                    Ok(UserSettings {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        target_calories: row.get(2)?,
                    })
                })
                .optional()?;
            debug!("Settings row: {:?}", settings);
            Ok(settings)
        })
    }

    /// Returns the user's daily calorie target.
    ///
    /// Falling back to [`DEFAULT_TARGET_CALORIES`] when the settings row is
    /// missing is part of the contract: a dashboard keeps rendering against
    /// a sane target instead of failing. Real storage errors still
    /// propagate.
    #[instrument(skip(self))]
    pub fn target_calories(&self) -> Result<i64> {
        let target = match self.settings()? {
            Some(settings) => settings.target_calories,
            None => {
                warn!(
                    "Settings row missing; falling back to default target of {} kcal",
                    DEFAULT_TARGET_CALORIES
                );
                DEFAULT_TARGET_CALORIES
            }
        };
        debug!("Daily calorie target: {}", target);
        Ok(target)
    }
}
