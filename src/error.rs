// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Everything a request can fail with, mapped to one HTTP status each.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("query template not found: {category}/{name}")]
    TemplateNotFound { category: String, name: String },

    #[error("parameter mismatch in {category}/{name}: template expects {expected}, got {supplied}")]
    Binding {
        category: String,
        name: String,
        expected: usize,
        supplied: usize,
    },

    #[error("query {category}/{name} failed")]
    QueryExecution {
        category: String,
        name: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("timed out waiting for a database connection")]
    PoolTimeout,

    #[error("database unavailable")]
    Connection(#[source] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::TemplateNotFound { .. } | ApiError::Binding { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::QueryExecution { .. } => StatusCode::BAD_GATEWAY,
            ApiError::PoolTimeout | ApiError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::QueryExecution {
                category,
                name,
                source,
            } => {
                tracing::error!(%category, %name, error = %source, "query execution failed");
            }
            ApiError::Validation(_) => {}
            other => tracing::error!(error = %other, "request failed"),
        }
        // Clients get the message, never the driver's internals.
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Classifies a driver error from a named query into the taxonomy.
pub fn classify_sqlx(category: &str, name: &str, err: sqlx::Error) -> ApiError {
    match err {
        sqlx::Error::PoolTimedOut => ApiError::PoolTimeout,
        e @ (sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_)) => {
            ApiError::Connection(e)
        }
        other => ApiError::QueryExecution {
            category: category.to_string(),
            name: name.to_string(),
            source: other,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::TemplateNotFound {
                category: "produtos".into(),
                name: "missing".into()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::PoolTimeout.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn pool_timeout_is_classified_as_503() {
        let err = classify_sqlx("produtos", "top_products", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ApiError::PoolTimeout));
    }

    #[test]
    fn row_errors_keep_query_identity() {
        let err = classify_sqlx("produtos", "top_products", sqlx::Error::RowNotFound);
        match err {
            ApiError::QueryExecution { category, name, .. } => {
                assert_eq!(category, "produtos");
                assert_eq!(name, "top_products");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
