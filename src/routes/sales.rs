// src/routes/sales.rs

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{CancellationSummary, DayOfWeekSales, Envelope, SalesTrendPoint, TimeAnalysisPoint},
    query::{
        executor::{f64_col, i64_col, str_col, Row},
        SqlParam,
    },
    AppState,
};

use super::{channel_variant, resolve_range, round1};

#[derive(Deserialize)]
pub struct SalesQ {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
    pub channel: Option<String>,
}

/// Daily sales counts and revenue over the period, ordered by date.
pub async fn trend(
    State(state): State<AppState>,
    Query(q): Query<SalesQ>,
) -> Result<Json<Envelope<SalesTrendPoint>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let (name, params) = channel_variant("sales_trend", start, end, q.channel);

    let rows = state
        .executor
        .run("vendas_e_desempenho", &name, &params)
        .await?;
    Ok(Json(Envelope::ok(shape_trend(&rows))))
}

/// Hour-of-day buckets with volume, revenue, and operational timings.
pub async fn time_analysis(
    State(state): State<AppState>,
    Query(q): Query<SalesQ>,
) -> Result<Json<Envelope<TimeAnalysisPoint>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let (name, params) = channel_variant("time_analysis", start, end, q.channel);

    let rows = state
        .executor
        .run("vendas_e_desempenho", &name, &params)
        .await?;
    Ok(Json(Envelope::ok(shape_hours(&rows))))
}

/// Weekdays ranked by sales volume over the period.
pub async fn top_days(
    State(state): State<AppState>,
    Query(q): Query<SalesQ>,
) -> Result<Json<Envelope<DayOfWeekSales>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let rows = state
        .executor
        .run(
            "vendas_e_desempenho",
            "top_sales_day_week",
            &[SqlParam::Date(start), SqlParam::Date(end)],
        )
        .await?;

    let data = rows
        .iter()
        .map(|r| DayOfWeekSales {
            day_of_week: str_col(r, "day_of_week"),
            day_number: i64_col(r, "day_number"),
            sales_count: i64_col(r, "sales_count"),
            total_revenue: f64_col(r, "total_revenue"),
        })
        .collect();
    Ok(Json(Envelope::ok(data)))
}

/// Share of cancelled orders in the period. The SQL counts; the ratio is
/// derived here, all statuses included in the denominator.
pub async fn cancellation_rate(
    State(state): State<AppState>,
    Query(q): Query<SalesQ>,
) -> Result<Json<Envelope<CancellationSummary>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let rows = state
        .executor
        .run(
            "vendas_e_desempenho",
            "cancellation_rate",
            &[SqlParam::Date(start), SqlParam::Date(end)],
        )
        .await?;
    Ok(Json(Envelope::ok(shape_cancellation(&rows))))
}

fn shape_cancellation(rows: &[Row]) -> Vec<CancellationSummary> {
    rows.iter()
        .map(|r| {
            let total_orders = i64_col(r, "total_orders");
            let cancelled_orders = i64_col(r, "cancelled_orders");
            let rate = if total_orders <= 0 {
                0.0
            } else {
                round1(cancelled_orders as f64 / total_orders as f64 * 100.0)
            };
            CancellationSummary {
                total_orders,
                cancelled_orders,
                cancellation_rate: rate,
            }
        })
        .collect()
}

fn shape_trend(rows: &[Row]) -> Vec<SalesTrendPoint> {
    rows.iter()
        .map(|r| SalesTrendPoint {
            date: str_col(r, "date"),
            sales_count: i64_col(r, "sales_count"),
            daily_revenue: f64_col(r, "daily_revenue"),
        })
        .collect()
}

fn shape_hours(rows: &[Row]) -> Vec<TimeAnalysisPoint> {
    rows.iter()
        .map(|r| TimeAnalysisPoint {
            hour: i64_col(r, "hour"),
            sales_count: i64_col(r, "sales_count"),
            total_revenue: f64_col(r, "total_revenue"),
            avg_delivery_minutes: f64_col(r, "avg_delivery_minutes"),
            avg_production_minutes: f64_col(r, "avg_production_minutes"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trend_rows_keep_date_strings() {
        let row: Row = serde_json::from_value(json!({
            "date": "2025-03-14",
            "sales_count": 17,
            "daily_revenue": 690.30
        }))
        .unwrap();
        let points = shape_trend(&[row]);
        assert_eq!(points[0].date, "2025-03-14");
        assert_eq!(points[0].sales_count, 17);
    }

    #[test]
    fn cancellation_rate_is_one_decimal_over_all_statuses() {
        let row: Row = serde_json::from_value(json!({
            "total_orders": 400,
            "cancelled_orders": 37
        }))
        .unwrap();
        let data = shape_cancellation(&[row]);
        assert_eq!(data[0].cancellation_rate, 9.3);

        let empty: Row = serde_json::from_value(json!({
            "total_orders": 0,
            "cancelled_orders": 0
        }))
        .unwrap();
        assert_eq!(shape_cancellation(&[empty])[0].cancellation_rate, 0.0);
    }

    #[test]
    fn hour_buckets_default_missing_timings_to_zero() {
        let row: Row = serde_json::from_value(json!({
            "hour": 12,
            "sales_count": 40,
            "total_revenue": 1600.0,
            "avg_delivery_minutes": null,
            "avg_production_minutes": 14.2
        }))
        .unwrap();
        let points = shape_hours(&[row]);
        assert_eq!(points[0].hour, 12);
        assert_eq!(points[0].avg_delivery_minutes, 0.0);
        assert_eq!(points[0].avg_production_minutes, 14.2);
    }
}
