// src/routes/deliveries.rs

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{DeliveryStatusSummary, DeliveryTypeSummary, Envelope},
    query::{
        executor::{f64_col, i64_col, str_col, Row},
        SqlParam,
    },
    AppState,
};

use super::{resolve_range, share};

#[derive(Deserialize)]
pub struct DeliveriesQ {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
}

/// Delivery counts and mean door-to-door minutes per status.
pub async fn status(
    State(state): State<AppState>,
    Query(q): Query<DeliveriesQ>,
) -> Result<Json<Envelope<DeliveryStatusSummary>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let rows = state
        .executor
        .run(
            "entregas",
            "delivery_status",
            &[SqlParam::Date(start), SqlParam::Date(end)],
        )
        .await?;

    let data = rows
        .iter()
        .map(|r| DeliveryStatusSummary {
            status: str_col(r, "status"),
            count: i64_col(r, "count"),
            avg_time_minutes: f64_col(r, "avg_time_minutes"),
        })
        .collect();
    Ok(Json(Envelope::ok(data)))
}

/// How deliveries split across delivery types in the period, with each
/// type's share derived here.
pub async fn types(
    State(state): State<AppState>,
    Query(q): Query<DeliveriesQ>,
) -> Result<Json<Envelope<DeliveryTypeSummary>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let rows = state
        .executor
        .run(
            "entregas",
            "delivery_type_distribution",
            &[SqlParam::Date(start), SqlParam::Date(end)],
        )
        .await?;
    Ok(Json(Envelope::ok(shape_types(&rows))))
}

fn shape_types(rows: &[Row]) -> Vec<DeliveryTypeSummary> {
    let total: i64 = rows.iter().map(|r| i64_col(r, "count")).sum();
    rows.iter()
        .map(|r| {
            let count = i64_col(r, "count");
            DeliveryTypeSummary {
                delivery_type: str_col(r, "delivery_type"),
                count,
                percentage: share(count, total),
            }
        })
        .collect()
}
