// src/routes/overview.rs

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{Envelope, OverviewSummary},
    query::executor::{f64_col, i64_col, Row},
    AppState,
};

use super::{channel_variant, resolve_range};

#[derive(Deserialize)]
pub struct OverviewQ {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
    pub channel: Option<String>,
}

/// Period KPIs: order count, revenue, average ticket, distinct customers.
/// `unique_customers` is the real `COUNT(DISTINCT customer_id)` from the
/// query, not the legacy 70%-of-orders estimate.
pub async fn overview(
    State(state): State<AppState>,
    Query(q): Query<OverviewQ>,
) -> Result<Json<Envelope<OverviewSummary>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let (name, params) = channel_variant("total_sales_period", start, end, q.channel);

    let rows = state
        .executor
        .run("vendas_e_desempenho", &name, &params)
        .await?;
    Ok(Json(Envelope::ok(shape(&rows))))
}

fn shape(rows: &[Row]) -> Vec<OverviewSummary> {
    rows.iter()
        .map(|r| OverviewSummary {
            total_sales: i64_col(r, "total_sales"),
            total_revenue: f64_col(r, "total_revenue"),
            avg_ticket: f64_col(r, "avg_ticket"),
            unique_customers: i64_col(r, "unique_customers"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shapes_summary_row() {
        let row: Row = serde_json::from_value(json!({
            "total_sales": 128,
            "total_revenue": 5120.75,
            "avg_ticket": 40.0,
            "unique_customers": 93
        }))
        .unwrap();
        let data = shape(&[row]);
        assert_eq!(data[0].total_sales, 128);
        assert_eq!(data[0].unique_customers, 93);
        assert_eq!(data[0].total_revenue, 5120.75);
    }

    #[test]
    fn empty_period_shapes_to_empty_data() {
        assert!(shape(&[]).is_empty());
    }
}
