// src/query/params.rs

use chrono::NaiveDate;
use sqlx::{postgres::PgArguments, query::Query, Postgres};

use crate::error::ApiError;

/// Value kinds handlers may bind into a template. Caller-supplied strings
/// (channel names and the like) always travel through here as bound
/// parameters; nothing is ever spliced into the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Date(NaiveDate),
    Text(String),
    Int(i64),
    IntList(Vec<i64>),
}

/// Highest `$N` placeholder index present in the template.
pub fn placeholder_count(template: &str) -> usize {
    let mut max = 0usize;
    let bytes = template.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end > start {
                if let Ok(n) = template[start..end].parse::<usize>() {
                    max = max.max(n);
                }
            }
            i = end;
        } else {
            i += 1;
        }
    }
    max
}

/// Fails with `Binding` when the supplied parameter list does not match the
/// template's placeholders.
pub fn check_placeholders(
    category: &str,
    name: &str,
    template: &str,
    supplied: usize,
) -> Result<(), ApiError> {
    let expected = placeholder_count(template);
    if expected != supplied {
        return Err(ApiError::Binding {
            category: category.to_string(),
            name: name.to_string(),
            expected,
            supplied,
        });
    }
    Ok(())
}

/// Attaches each parameter positionally. `IntList` binds as `int8[]`, for
/// templates using `= ANY($n)`.
pub fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[SqlParam],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Date(d) => query.bind(*d),
            SqlParam::Text(s) => query.bind(s.clone()),
            SqlParam::Int(n) => query.bind(*n),
            SqlParam::IntList(v) => query.bind(v.clone()),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_highest_placeholder() {
        assert_eq!(placeholder_count("SELECT 1"), 0);
        assert_eq!(
            placeholder_count("SELECT * FROM sales WHERE created_at BETWEEN $1 AND $2"),
            2
        );
        // Order of appearance does not matter.
        assert_eq!(placeholder_count("WHERE b = $2 AND a = $1 LIMIT $3"), 3);
        assert_eq!(placeholder_count("SELECT '$' || name FROM stores"), 0);
    }

    #[test]
    fn mismatch_is_a_binding_error() {
        let err = check_placeholders("produtos", "top_products", "WHERE x = $1 AND y = $2", 1)
            .unwrap_err();
        match err {
            ApiError::Binding {
                expected, supplied, ..
            } => {
                assert_eq!(expected, 2);
                assert_eq!(supplied, 1);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(check_placeholders("produtos", "top_products", "WHERE x = $1", 1).is_ok());
        assert!(check_placeholders("clientes", "total", "SELECT COUNT(*)", 0).is_ok());
    }

    #[test]
    fn hostile_filter_values_never_touch_the_template() {
        // The channel value rides as a bound parameter; the template's
        // placeholder structure is what gets validated, not the value.
        let template = "SELECT * FROM sales WHERE channel_id IN \
                        (SELECT id FROM channels WHERE name = $3) \
                        AND created_at BETWEEN $1 AND $2";
        let hostile = "O'Brien'; DROP TABLE sales;--".to_string();
        let params = vec![
            SqlParam::Date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            SqlParam::Date(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()),
            SqlParam::Text(hostile.clone()),
        ];
        assert!(check_placeholders("vendas_e_desempenho", "x", template, params.len()).is_ok());
        // The value stayed data, the SQL stayed SQL.
        assert!(!template.contains("O'Brien"));
        assert_eq!(params[2], SqlParam::Text(hostile));
    }
}
