//! Pure serving-size and aggregation calculations.
//!
//! Everything in this module is a deterministic function of its inputs and
//! performs no storage access, so front ends can call it directly on values
//! they already hold (e.g. text-field contents or a fetched day of logs).

use crate::errors::{Error, Result};
use crate::models::MealLog;

/// Parses a raw user-supplied value (typically text-field contents) as a
/// number.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if the value is not parseable as a number.
pub fn parse_serving_value(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::InvalidInput(format!("'{}' is not a number", raw.trim())))
}

/// Scales calories-per-serving to the user's actual serving size:
/// `(calories_per_serving / standard_serving_size) * user_serving_size`.
///
/// # Errors
///
/// Returns `Error::DivisionByZero` if `standard_serving_size` is zero. This
/// is checked explicitly so callers can tell it apart from a generic bad
/// input.
pub fn scale_serving(
    calories_per_serving: f64,
    standard_serving_size: f64,
    user_serving_size: f64,
) -> Result<f64> {
    if standard_serving_size == 0.0 {
        return Err(Error::DivisionByZero);
    }
    Ok((calories_per_serving / standard_serving_size) * user_serving_size)
}

/// Computes total calories for a serving from raw text inputs.
///
/// This is the parse-then-scale composition front ends use when all three
/// values come straight out of input fields.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if any value is not numeric, or
/// `Error::DivisionByZero` if the standard serving size is zero.
pub fn calculate_calories_for_serving(
    calories_per_serving: &str,
    standard_serving_size: &str,
    user_serving_size: &str,
) -> Result<f64> {
    let cal = parse_serving_value(calories_per_serving)?;
    let std_size = parse_serving_value(standard_serving_size)?;
    let user_size = parse_serving_value(user_serving_size)?;
    scale_serving(cal, std_size, user_size)
}

/// Sums the calories across a set of meal logs. An empty slice sums to 0.0.
#[must_use]
pub fn total_daily_calories(logs: &[MealLog]) -> f64 {
    logs.iter().map(|log| log.calories).sum()
}

/// Filters meal logs by meal type, case-insensitively, preserving relative
/// order. No match yields an empty result, not an error.
#[must_use]
pub fn filter_logs_by_meal_type<'a>(logs: &'a [MealLog], meal_type: &str) -> Vec<&'a MealLog> {
    let wanted = meal_type.to_lowercase();
    logs.iter()
        .filter(|log| log.meal_type.to_lowercase() == wanted)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn make_log(meal_type: &str, food_name: &str, calories: f64) -> MealLog {
        MealLog {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            meal_type: meal_type.to_string(),
            food_name: food_name.to_string(),
            calories,
            serving_size: None,
            notes: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_scale_serving_formula() {
        assert_eq!(scale_serving(100.0, 50.0, 75.0).unwrap(), 150.0);
        assert_eq!(scale_serving(130.0, 100.0, 100.0).unwrap(), 130.0);
    }

    #[test]
    fn test_calculate_from_text_inputs() {
        let total = calculate_calories_for_serving("100", "50", "75").unwrap();
        assert_eq!(total, 150.0);
    }

    #[test]
    fn test_zero_standard_serving_size_is_division_by_zero() {
        let err = calculate_calories_for_serving("100", "0", "75").unwrap_err();
        assert!(
            matches!(err, Error::DivisionByZero),
            "Expected DivisionByZero, got: {:?}",
            err
        );
        assert!(matches!(
            scale_serving(0.0, 0.0, 0.0).unwrap_err(),
            Error::DivisionByZero
        ));
    }

    #[test]
    fn test_non_numeric_input_is_invalid() {
        let err = calculate_calories_for_serving("abc", "50", "75").unwrap_err();
        assert!(
            matches!(err, Error::InvalidInput(_)),
            "Expected InvalidInput, got: {:?}",
            err
        );
        assert!(matches!(
            calculate_calories_for_serving("100", "50", "").unwrap_err(),
            Error::InvalidInput(_)
        ));
    }

    #[test]
    fn test_parse_serving_value_trims_whitespace() {
        assert_eq!(parse_serving_value(" 42.5 ").unwrap(), 42.5);
    }

    #[test]
    fn test_total_daily_calories_empty_is_zero() {
        assert_eq!(total_daily_calories(&[]), 0.0);
    }

    #[test]
    fn test_total_daily_calories_sums_entries() {
        let logs = vec![
            make_log("Breakfast", "Oatmeal", 100.0),
            make_log("Lunch", "Salad", 250.5),
            make_log("Snacks", "Water", 0.0),
        ];
        assert_eq!(total_daily_calories(&logs), 350.5);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let logs = vec![
            make_log("Breakfast", "Oatmeal", 100.0),
            make_log("Lunch", "Salad", 250.5),
            make_log("BREAKFAST", "Toast", 80.0),
        ];

        for query in ["breakfast", "Breakfast", "BREAKFAST"] {
            let matched = filter_logs_by_meal_type(&logs, query);
            assert_eq!(matched.len(), 2, "Query '{}' should match both entries", query);
            assert_eq!(matched[0].food_name, "Oatmeal");
            assert_eq!(matched[1].food_name, "Toast");
        }
    }

    #[test]
    fn test_filter_empty_and_no_match() {
        assert!(filter_logs_by_meal_type(&[], "breakfast").is_empty());

        let logs = vec![make_log("Lunch", "Salad", 250.5)];
        assert!(filter_logs_by_meal_type(&logs, "dinner").is_empty());
    }
}
