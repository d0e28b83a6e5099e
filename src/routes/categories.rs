// src/routes/categories.rs

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{CategoryPerformance, Envelope},
    query::{
        executor::{f64_col, i64_col, str_col},
        SqlParam,
    },
    AppState,
};

use super::resolve_range;

#[derive(Deserialize)]
pub struct CategoriesQ {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
}

/// Category-level units and revenue across completed sales in the period.
pub async fn performance(
    State(state): State<AppState>,
    Query(q): Query<CategoriesQ>,
) -> Result<Json<Envelope<CategoryPerformance>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let rows = state
        .executor
        .run(
            "produtos",
            "category_performance",
            &[SqlParam::Date(start), SqlParam::Date(end)],
        )
        .await?;

    let data = rows
        .iter()
        .map(|r| CategoryPerformance {
            name: str_col(r, "category_name"),
            total_sales: i64_col(r, "total_sales"),
            total_units: i64_col(r, "total_units"),
            total_revenue: f64_col(r, "total_revenue"),
        })
        .collect();
    Ok(Json(Envelope::ok(data)))
}
