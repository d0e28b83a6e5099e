// src/query/executor.rs

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::{postgres::PgRow, Column as _, Pool, Postgres, Row as _, TypeInfo as _};

use crate::error::{classify_sqlx, ApiError};

use super::{
    catalog::QueryCatalog,
    params::{bind_params, check_placeholders, SqlParam},
};

/// One result row: column name → normalized JSON value, in SELECT-list order.
pub type Row = serde_json::Map<String, Value>;

/// Resolves a named template, binds parameters, runs it on the pool, and
/// materializes rows for transport.
#[derive(Clone)]
pub struct QueryExecutor {
    pool: Pool<Postgres>,
    catalog: Arc<QueryCatalog>,
}

impl QueryExecutor {
    pub fn new(pool: Pool<Postgres>, catalog: Arc<QueryCatalog>) -> Self {
        Self { pool, catalog }
    }

    pub async fn run(
        &self,
        category: &str,
        name: &str,
        params: &[SqlParam],
    ) -> Result<Vec<Row>, ApiError> {
        let template = self.catalog.load(category, name)?;
        check_placeholders(category, name, &template, params.len())?;

        let query = bind_params(sqlx::query(&template), params);
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify_sqlx(category, name, e))?;

        tracing::debug!(%category, %name, rows = rows.len(), "query executed");
        Ok(rows.iter().map(row_to_json).collect())
    }
}

/// Converts a driver row into a JSON object, normalizing by Postgres type:
/// integers → i64, floats and NUMERIC → f64, DATE → `YYYY-MM-DD`,
/// timestamps → RFC 3339, SQL NULL → null.
fn row_to_json(row: &PgRow) -> Row {
    let mut out = Row::new();
    for (idx, column) in row.columns().iter().enumerate() {
        out.insert(column.name().to_string(), decode_value(row, idx));
    }
    out
}

fn decode_value(row: &PgRow, idx: usize) -> Value {
    let type_name = row.columns()[idx].type_info().name();
    match type_name {
        "INT2" => opt(row.try_get::<Option<i16>, _>(idx), |v| Value::from(v as i64)),
        "INT4" => opt(row.try_get::<Option<i32>, _>(idx), |v| Value::from(v as i64)),
        "INT8" => opt(row.try_get::<Option<i64>, _>(idx), Value::from),
        "FLOAT4" => opt(row.try_get::<Option<f32>, _>(idx), |v| float(v as f64)),
        "FLOAT8" => opt(row.try_get::<Option<f64>, _>(idx), float),
        "NUMERIC" => opt(row.try_get::<Option<Decimal>, _>(idx), |d| {
            d.to_f64().map(float).unwrap_or(Value::Null)
        }),
        "BOOL" => opt(row.try_get::<Option<bool>, _>(idx), Value::from),
        "DATE" => opt(row.try_get::<Option<chrono::NaiveDate>, _>(idx), |d| {
            Value::from(d.format("%Y-%m-%d").to_string())
        }),
        "TIMESTAMP" => opt(row.try_get::<Option<chrono::NaiveDateTime>, _>(idx), |t| {
            Value::from(t.format("%Y-%m-%dT%H:%M:%S").to_string())
        }),
        "TIMESTAMPTZ" => opt(
            row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx),
            |t| Value::from(t.to_rfc3339()),
        ),
        _ => opt(row.try_get::<Option<String>, _>(idx), Value::from),
    }
}

fn opt<T>(res: Result<Option<T>, sqlx::Error>, f: impl FnOnce(T) -> Value) -> Value {
    match res {
        Ok(Some(v)) => f(v),
        _ => Value::Null,
    }
}

fn float(v: f64) -> Value {
    serde_json::Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

// Field accessors for handlers shaping rows into response DTOs. Missing or
// null columns read as zero / empty, matching the legacy API's behavior.

pub fn f64_col(row: &Row, key: &str) -> f64 {
    row.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

pub fn i64_col(row: &Row, key: &str) -> i64 {
    row.get(key).and_then(Value::as_i64).unwrap_or(0)
}

pub fn str_col(row: &Row, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn accessors_default_nulls_to_zero() {
        let r = row(&[
            ("total_revenue", json!(1234.5)),
            ("sales_count", json!(42)),
            ("channel_name", json!("iFood")),
            ("avg_ticket", Value::Null),
        ]);
        assert_eq!(f64_col(&r, "total_revenue"), 1234.5);
        assert_eq!(i64_col(&r, "sales_count"), 42);
        assert_eq!(str_col(&r, "channel_name"), "iFood");
        assert_eq!(f64_col(&r, "avg_ticket"), 0.0);
        assert_eq!(i64_col(&r, "absent"), 0);
        assert_eq!(str_col(&r, "absent"), "");
    }

    #[test]
    fn float_rejects_non_finite() {
        assert_eq!(float(f64::NAN), Value::Null);
        assert_eq!(float(2.5), json!(2.5));
    }
}
