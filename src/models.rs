use crate::calc;
use crate::errors::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One logged food record tied to a calendar date and meal category.
///
/// `date` is the user-chosen logical date; `timestamp` is the wall-clock
/// creation instant assigned at insert and never updated afterwards.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MealLog {
    pub id: i64,
    pub date: NaiveDate,
    pub meal_type: String,
    pub food_name: String,
    pub calories: f64,
    pub serving_size: Option<String>,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Arguments for inserting a new meal log. The id and timestamp are
/// assigned by the store at creation time.
#[derive(Debug)]
pub struct NewMealLog<'a> {
    pub date: NaiveDate,
    pub meal_type: &'a str,
    pub food_name: &'a str,
    pub calories: f64,
    pub serving_size: Option<&'a str>,
    pub notes: Option<&'a str>,
}

/// Replacement values for the mutable fields of an existing meal log.
///
/// There is deliberately no `date` or `timestamp` field here: neither can
/// be changed once a log has been created.
#[derive(Debug)]
pub struct MealLogUpdate<'a> {
    pub meal_type: &'a str,
    pub food_name: &'a str,
    pub calories: f64,
    pub serving_size: Option<&'a str>,
    pub notes: Option<&'a str>,
}

/// The singleton settings row (id is fixed at 1).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserSettings {
    pub id: i64,
    pub name: String,
    pub target_calories: i64,
}

/// One element of the 7-day rolling series: a calendar day and the sum of
/// calories logged on it (0.0 when nothing was logged).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Reference data for a food and its calorie information. Not persisted by
/// the core; logs store calories directly.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FoodItem {
    pub name: String,
    pub calories_per_serving: f64,
    /// Standard serving size in `unit` (e.g. grams or ml).
    pub standard_serving_size: f64,
    pub unit: String,
}

impl FoodItem {
    /// Creates a food item with the default unit of grams.
    #[must_use]
    pub fn new(name: impl Into<String>, calories_per_serving: f64, standard_serving_size: f64) -> Self {
        Self {
            name: name.into(),
            calories_per_serving,
            standard_serving_size,
            unit: "g".to_string(),
        }
    }

    /// Scales this item's calories to the given serving size.
    ///
    /// # Errors
    ///
    /// Returns `Error::DivisionByZero` if the item's standard serving size
    /// is zero.
    pub fn calories_for_serving(&self, user_serving_size: f64) -> Result<f64> {
        calc::scale_serving(
            self.calories_per_serving,
            self.standard_serving_size,
            user_serving_size,
        )
    }
}

/// The four canonical meal categories.
///
/// Storage keeps `meal_type` as free text; this enum exists so presentation
/// layers can constrain input to the canonical set and round-trip it
/// case-insensitively.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    /// All categories, in display order.
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snacks,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snacks => "Snacks",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snacks" => Ok(MealType::Snacks),
            other => Err(Error::InvalidInput(format!(
                "'{}' is not a recognized meal type",
                other
            ))),
        }
    }
}
