// src/routes/products.rs

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{AddonInsight, Envelope, ProductInsight, ProductPerformance},
    query::{
        executor::{f64_col, i64_col, str_col, Row},
        SqlParam,
    },
    AppState,
};

use super::{check_limit, resolve_range, round1};

#[derive(Deserialize)]
pub struct TopInsightsQ {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct PerformanceQ {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
}

/// Top products by revenue with the customization rate derived in
/// application code: add-on lines over times sold, percent, one decimal.
pub async fn top_insights(
    State(state): State<AppState>,
    Query(q): Query<TopInsightsQ>,
) -> Result<Json<Envelope<ProductInsight>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let limit = check_limit(q.limit)?;

    let rows = state
        .executor
        .run(
            "produtos",
            "top_products",
            &[
                SqlParam::Date(start),
                SqlParam::Date(end),
                SqlParam::Int(limit),
            ],
        )
        .await?;
    Ok(Json(Envelope::ok(shape_insights(&rows))))
}

/// Per-product sales volume, revenue, and average line price.
pub async fn performance(
    State(state): State<AppState>,
    Query(q): Query<PerformanceQ>,
) -> Result<Json<Envelope<ProductPerformance>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let rows = state
        .executor
        .run(
            "produtos",
            "product_performance",
            &[SqlParam::Date(start), SqlParam::Date(end)],
        )
        .await?;

    let data = rows
        .iter()
        .map(|r| ProductPerformance {
            name: str_col(r, "product_name"),
            times_sold: i64_col(r, "times_sold"),
            total_quantity: i64_col(r, "total_quantity"),
            total_revenue: f64_col(r, "total_revenue"),
            avg_price: f64_col(r, "avg_price"),
        })
        .collect();
    Ok(Json(Envelope::ok(data)))
}

/// Most-ordered add-on items across completed sales in the period.
pub async fn top_addons(
    State(state): State<AppState>,
    Query(q): Query<TopInsightsQ>,
) -> Result<Json<Envelope<AddonInsight>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let limit = check_limit(q.limit)?;

    let rows = state
        .executor
        .run(
            "produtos",
            "top_addon_items",
            &[
                SqlParam::Date(start),
                SqlParam::Date(end),
                SqlParam::Int(limit),
            ],
        )
        .await?;

    let data = rows
        .iter()
        .map(|r| AddonInsight {
            name: str_col(r, "item_name"),
            times_added: i64_col(r, "times_added"),
            total_revenue: f64_col(r, "total_revenue"),
        })
        .collect();
    Ok(Json(Envelope::ok(data)))
}

fn shape_insights(rows: &[Row]) -> Vec<ProductInsight> {
    rows.iter()
        .map(|r| {
            let times_sold = i64_col(r, "times_sold");
            let customizations = i64_col(r, "total_customizations");
            ProductInsight {
                name: str_col(r, "product_name"),
                times_sold,
                total_quantity: i64_col(r, "total_quantity"),
                total_revenue: f64_col(r, "total_revenue"),
                customization_rate: customization_rate(customizations, times_sold),
            }
        })
        .collect()
}

fn customization_rate(customizations: i64, times_sold: i64) -> f64 {
    if times_sold <= 0 {
        0.0
    } else {
        round1(customizations as f64 / times_sold as f64 * 100.0)
    }
}
