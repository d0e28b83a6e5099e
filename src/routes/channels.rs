// src/routes/channels.rs

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{ChannelPerformance, Envelope},
    query::{
        executor::{f64_col, i64_col, str_col, Row},
        SqlParam,
    },
    AppState,
};

use super::{resolve_range, share};

#[derive(Deserialize)]
pub struct ChannelsQ {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
}

/// Per-channel volume, revenue, and share of sales over the period.
pub async fn performance(
    State(state): State<AppState>,
    Query(q): Query<ChannelsQ>,
) -> Result<Json<Envelope<ChannelPerformance>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let rows = state
        .executor
        .run(
            "vendas_e_desempenho",
            "channel_performance",
            &[SqlParam::Date(start), SqlParam::Date(end)],
        )
        .await?;
    Ok(Json(Envelope::ok(shape(&rows))))
}

fn shape(rows: &[Row]) -> Vec<ChannelPerformance> {
    let total: i64 = rows.iter().map(|r| i64_col(r, "sales_count")).sum();
    rows.iter()
        .map(|r| {
            let sales_count = i64_col(r, "sales_count");
            ChannelPerformance {
                name: str_col(r, "channel_name"),
                channel_type: str_col(r, "channel_type"),
                sales_count,
                total_revenue: f64_col(r, "total_revenue"),
                avg_ticket: f64_col(r, "avg_ticket"),
                percentage: share(sales_count, total),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(name: &str, count: i64, revenue: f64) -> Row {
        serde_json::from_value(json!({
            "channel_name": name,
            "channel_type": "D",
            "sales_count": count,
            "total_revenue": revenue,
            "avg_ticket": revenue / count as f64
        }))
        .unwrap()
    }

    #[test]
    fn shares_partition_the_period() {
        // 50/30/20 orders over a 100-order period.
        let rows = vec![
            row("iFood", 50, 2500.0),
            row("Balcão", 30, 900.0),
            row("WhatsApp", 20, 500.0),
        ];
        let data = shape(&rows);
        let shares: Vec<f64> = data.iter().map(|c| c.percentage).collect();
        assert_eq!(shares, vec![50.0, 30.0, 20.0]);
        assert!((shares.iter().sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_partition_yields_no_rows_and_no_division() {
        assert!(shape(&[]).is_empty());
        let data = shape(&[row("iFood", 0, 0.0)]);
        assert_eq!(data[0].percentage, 0.0);
    }
}
