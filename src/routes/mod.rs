// src/routes/mod.rs

use chrono::{Duration, NaiveDate, Utc};

use crate::error::ApiError;

pub mod categories;
pub mod channels;
pub mod customers;
pub mod deliveries;
pub mod health;
pub mod overview;
pub mod payments;
pub mod products;
pub mod sales;
pub mod stores;

pub const DEFAULT_PERIOD_DAYS: i64 = 30;
pub const MAX_PERIOD_DAYS: i64 = 365;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 50;

/// Resolves the reporting window. Explicit dates win; otherwise `days`
/// (default 30, bounded 1–365) counted back from today.
pub fn resolve_range(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    days: Option<i64>,
) -> Result<(NaiveDate, NaiveDate), ApiError> {
    match (start_date, end_date) {
        (Some(start), Some(end)) => {
            if start > end {
                return Err(ApiError::Validation(format!(
                    "start_date {start} is after end_date {end}"
                )));
            }
            Ok((start, end))
        }
        (Some(_), None) | (None, Some(_)) => Err(ApiError::Validation(
            "start_date and end_date must be supplied together".into(),
        )),
        (None, None) => {
            let days = days.unwrap_or(DEFAULT_PERIOD_DAYS);
            if !(1..=MAX_PERIOD_DAYS).contains(&days) {
                return Err(ApiError::Validation(format!(
                    "days must be between 1 and {MAX_PERIOD_DAYS}, got {days}"
                )));
            }
            let end = Utc::now().date_naive();
            Ok((end - Duration::days(days), end))
        }
    }
}

/// Bounded result limit, 1–50, defaulting to 10.
pub fn check_limit(limit: Option<i64>) -> Result<i64, ApiError> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::Validation(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {limit}"
        )));
    }
    Ok(limit)
}

/// Parses the `store_ids` query value, e.g. `"1,4,9"`.
pub fn parse_store_ids(raw: &str) -> Result<Vec<i64>, ApiError> {
    let ids: Result<Vec<i64>, _> = raw
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect();
    match ids {
        Ok(ids) if !ids.is_empty() => Ok(ids),
        _ => Err(ApiError::Validation(format!(
            "store_ids must be comma-separated integers, got {raw:?}"
        ))),
    }
}

/// Picks the template variant for an optional channel filter. The filter
/// value rides as a bound parameter; only the template *name* branches.
/// A blank `channel=` counts as absent, not as a filter on "".
pub fn channel_variant(
    base: &'static str,
    start: NaiveDate,
    end: NaiveDate,
    channel: Option<String>,
) -> (String, Vec<crate::query::SqlParam>) {
    use crate::query::SqlParam;
    let channel = channel
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    match channel {
        Some(ch) => (
            format!("{base}_by_channel"),
            vec![SqlParam::Date(start), SqlParam::Date(end), SqlParam::Text(ch)],
        ),
        None => (
            base.to_string(),
            vec![SqlParam::Date(start), SqlParam::Date(end)],
        ),
    }
}

/// One-decimal rounding used for every derived ratio in the API.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percentage share of `part` in `total`, one decimal, 0 when the
/// partition is empty.
pub fn share(part: i64, total: i64) -> f64 {
    if total <= 0 {
        0.0
    } else {
        round1(part as f64 / total as f64 * 100.0)
    }
}
