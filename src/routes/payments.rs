// src/routes/payments.rs

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{Envelope, PaymentMethodSummary},
    query::{
        executor::{f64_col, i64_col, str_col, Row},
        SqlParam,
    },
    AppState,
};

use super::{resolve_range, share};

#[derive(Deserialize)]
pub struct PaymentsQ {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
}

/// Payment-method totals for the period, with each method's share of
/// payment count derived here.
pub async fn summary(
    State(state): State<AppState>,
    Query(q): Query<PaymentsQ>,
) -> Result<Json<Envelope<PaymentMethodSummary>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let rows = state
        .executor
        .run(
            "pagamentos",
            "payment_summary",
            &[SqlParam::Date(start), SqlParam::Date(end)],
        )
        .await?;
    Ok(Json(Envelope::ok(shape(&rows))))
}

fn shape(rows: &[Row]) -> Vec<PaymentMethodSummary> {
    let total: i64 = rows.iter().map(|r| i64_col(r, "total_payments")).sum();
    rows.iter()
        .map(|r| {
            let total_payments = i64_col(r, "total_payments");
            PaymentMethodSummary {
                method: str_col(r, "payment_method"),
                total_payments,
                total_amount: f64_col(r, "total_amount"),
                avg_amount: f64_col(r, "avg_amount"),
                percentage: share(total_payments, total),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_shares_sum_to_one_hundred() {
        let rows: Vec<Row> = [("PIX", 60), ("Cartão", 25), ("Dinheiro", 15)]
            .iter()
            .map(|(m, n)| {
                serde_json::from_value(json!({
                    "payment_method": m,
                    "total_payments": n,
                    "total_amount": 100.0,
                    "avg_amount": 10.0
                }))
                .unwrap()
            })
            .collect();
        let data = shape(&rows);
        let sum: f64 = data.iter().map(|p| p.percentage).sum();
        assert_eq!(data[0].percentage, 60.0);
        assert!((sum - 100.0).abs() < 0.2);
    }
}
