// src/routes/stores.rs

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{Envelope, StoreComparison, StoreListItem, StorePerformance, StoreRanking, StoreRegion},
    query::{
        executor::{f64_col, i64_col, str_col},
        SqlParam,
    },
    AppState,
};

use super::{check_limit, parse_store_ids, resolve_range};

#[derive(Deserialize)]
pub struct StoresQ {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
}

#[derive(Deserialize)]
pub struct RankingQ {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct ComparisonQ {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
    pub store_ids: String,
}

pub async fn performance(
    State(state): State<AppState>,
    Query(q): Query<StoresQ>,
) -> Result<Json<Envelope<StorePerformance>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let rows = state
        .executor
        .run(
            "vendas_e_desempenho",
            "store_performance",
            &[SqlParam::Date(start), SqlParam::Date(end)],
        )
        .await?;

    let data = rows
        .iter()
        .map(|r| StorePerformance {
            store_name: str_col(r, "store_name"),
            total_sales: i64_col(r, "total_sales"),
            total_revenue: f64_col(r, "total_revenue"),
            avg_ticket: f64_col(r, "avg_ticket"),
        })
        .collect();
    Ok(Json(Envelope::ok(data)))
}

/// Top stores by revenue; rank is assigned here from the template's own
/// ORDER BY, so it stays stable across pages of the same period.
pub async fn ranking(
    State(state): State<AppState>,
    Query(q): Query<RankingQ>,
) -> Result<Json<Envelope<StoreRanking>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let limit = check_limit(q.limit)?;

    let rows = state
        .executor
        .run(
            "vendas_e_desempenho",
            "store_ranking",
            &[
                SqlParam::Date(start),
                SqlParam::Date(end),
                SqlParam::Int(limit),
            ],
        )
        .await?;

    let data = rows
        .iter()
        .enumerate()
        .map(|(idx, r)| StoreRanking {
            rank: idx as i64 + 1,
            store_id: i64_col(r, "store_id"),
            store_name: str_col(r, "store_name"),
            total_sales: i64_col(r, "total_sales"),
            total_revenue: f64_col(r, "total_revenue"),
            avg_ticket: f64_col(r, "avg_ticket"),
        })
        .collect();
    Ok(Json(Envelope::ok(data)))
}

pub async fn comparison(
    State(state): State<AppState>,
    Query(q): Query<ComparisonQ>,
) -> Result<Json<Envelope<StoreComparison>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let ids = parse_store_ids(&q.store_ids)?;

    let rows = state
        .executor
        .run(
            "vendas_e_desempenho",
            "store_comparison",
            &[
                SqlParam::Date(start),
                SqlParam::Date(end),
                SqlParam::IntList(ids),
            ],
        )
        .await?;

    let data = rows
        .iter()
        .map(|r| StoreComparison {
            store_id: i64_col(r, "store_id"),
            store_name: str_col(r, "store_name"),
            total_sales: i64_col(r, "total_sales"),
            total_revenue: f64_col(r, "total_revenue"),
            avg_ticket: f64_col(r, "avg_ticket"),
            avg_delivery_minutes: f64_col(r, "avg_delivery_minutes"),
        })
        .collect();
    Ok(Json(Envelope::ok(data)))
}

pub async fn regions(
    State(state): State<AppState>,
    Query(q): Query<StoresQ>,
) -> Result<Json<Envelope<StoreRegion>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let rows = state
        .executor
        .run(
            "vendas_e_desempenho",
            "sales_by_store_city",
            &[SqlParam::Date(start), SqlParam::Date(end)],
        )
        .await?;

    let data = rows
        .iter()
        .map(|r| StoreRegion {
            city: str_col(r, "city"),
            state: str_col(r, "state"),
            store_count: i64_col(r, "store_count"),
            total_sales: i64_col(r, "total_sales"),
            total_revenue: f64_col(r, "total_revenue"),
        })
        .collect();
    Ok(Json(Envelope::ok(data)))
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Envelope<StoreListItem>>, ApiError> {
    let rows = state
        .executor
        .run("vendas_e_desempenho", "store_list", &[])
        .await?;

    let data = rows
        .iter()
        .map(|r| StoreListItem {
            store_id: i64_col(r, "store_id"),
            name: str_col(r, "name"),
            city: str_col(r, "city"),
            state: str_col(r, "state"),
        })
        .collect();
    Ok(Json(Envelope::ok(data)))
}
