// src/routes/customers.rs

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{CustomerAgeGroup, Envelope, OrdersPerCustomer, PromotionOptin},
    query::{
        executor::{f64_col, i64_col, str_col, Row},
        SqlParam,
    },
    AppState,
};

use super::{resolve_range, round1};

#[derive(Deserialize)]
pub struct CustomersQ {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
}

/// Customer base broken down by age bracket with average lifetime spend.
/// Covers the whole registered base, so it takes no date range.
pub async fn insights(
    State(state): State<AppState>,
) -> Result<Json<Envelope<CustomerAgeGroup>>, ApiError> {
    let rows = state
        .executor
        .run("clientes", "customer_age_distribution", &[])
        .await?;

    let data = rows
        .iter()
        .map(|r| CustomerAgeGroup {
            age_group: str_col(r, "age_group"),
            customer_count: i64_col(r, "customer_count"),
            avg_spent: f64_col(r, "avg_spent"),
        })
        .collect();
    Ok(Json(Envelope::ok(data)))
}

/// Email/SMS promotion opt-in across the registered base; rates derived
/// here, one decimal.
pub async fn promotion_optin(
    State(state): State<AppState>,
) -> Result<Json<Envelope<PromotionOptin>>, ApiError> {
    let rows = state
        .executor
        .run("clientes", "promotion_optin_rate", &[])
        .await?;
    Ok(Json(Envelope::ok(shape_optin(&rows))))
}

/// Completed orders per identified customer over the period.
pub async fn avg_orders(
    State(state): State<AppState>,
    Query(q): Query<CustomersQ>,
) -> Result<Json<Envelope<OrdersPerCustomer>>, ApiError> {
    let (start, end) = resolve_range(q.start_date, q.end_date, q.days)?;
    let rows = state
        .executor
        .run(
            "clientes",
            "avg_orders_per_customer",
            &[SqlParam::Date(start), SqlParam::Date(end)],
        )
        .await?;
    Ok(Json(Envelope::ok(shape_orders(&rows))))
}

fn shape_optin(rows: &[Row]) -> Vec<PromotionOptin> {
    rows.iter()
        .map(|r| {
            let total_customers = i64_col(r, "total_customers");
            let email_optin = i64_col(r, "email_optin");
            let sms_optin = i64_col(r, "sms_optin");
            PromotionOptin {
                total_customers,
                email_optin,
                sms_optin,
                email_optin_rate: rate(email_optin, total_customers),
                sms_optin_rate: rate(sms_optin, total_customers),
            }
        })
        .collect()
}

fn shape_orders(rows: &[Row]) -> Vec<OrdersPerCustomer> {
    rows.iter()
        .map(|r| {
            let active_customers = i64_col(r, "active_customers");
            let total_orders = i64_col(r, "total_orders");
            let avg = if active_customers <= 0 {
                0.0
            } else {
                round1(total_orders as f64 / active_customers as f64)
            };
            OrdersPerCustomer {
                active_customers,
                total_orders,
                avg_orders_per_customer: avg,
            }
        })
        .collect()
}

fn rate(part: i64, total: i64) -> f64 {
    if total <= 0 {
        0.0
    } else {
        round1(part as f64 / total as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optin_rates_are_one_decimal() {
        let row: Row = serde_json::from_value(json!({
            "total_customers": 800,
            "email_optin": 600,
            "sms_optin": 100
        }))
        .unwrap();
        let data = shape_optin(&[row]);
        assert_eq!(data[0].email_optin_rate, 75.0);
        assert_eq!(data[0].sms_optin_rate, 12.5);

        let empty: Row = serde_json::from_value(json!({
            "total_customers": 0,
            "email_optin": 0,
            "sms_optin": 0
        }))
        .unwrap();
        assert_eq!(shape_optin(&[empty])[0].email_optin_rate, 0.0);
    }

    #[test]
    fn orders_per_customer_guards_empty_base() {
        let row: Row = serde_json::from_value(json!({
            "active_customers": 40,
            "total_orders": 100
        }))
        .unwrap();
        assert_eq!(shape_orders(&[row])[0].avg_orders_per_customer, 2.5);

        let empty: Row = serde_json::from_value(json!({
            "active_customers": 0,
            "total_orders": 0
        }))
        .unwrap();
        assert_eq!(shape_orders(&[empty])[0].avg_orders_per_customer, 0.0);
    }
}
