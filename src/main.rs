// src/main.rs

use std::{env, sync::Arc};

use axum::{http::HeaderValue, routing::get, Router};
use sqlx::{Pool, Postgres};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

mod db;
mod error;
mod models;
mod query;
mod routes;

use query::{QueryCatalog, QueryExecutor, REGISTERED_QUERIES};

#[derive(Clone)]
pub struct AppState {
    pub pool: Pool<Postgres>,
    pub executor: QueryExecutor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let pool = db::connect().await?;

    let queries_dir = env::var("QUERIES_DIR").unwrap_or_else(|_| "database/queries".into());
    let catalog = Arc::new(QueryCatalog::new(&queries_dir));
    // A missing template is a broken deployment; refuse to start.
    catalog
        .preload(REGISTERED_QUERIES)
        .map_err(|e| anyhow::anyhow!("query catalog preload failed: {e}"))?;
    tracing::info!(dir = %queries_dir, count = REGISTERED_QUERIES.len(), "query catalog loaded");

    let state = AppState {
        executor: QueryExecutor::new(pool.clone(), catalog),
        pool,
    };

    let cors = match env::var("CORS_ORIGINS") {
        Ok(origins) => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Permissive for local dev (tighten for prod)
        Err(_) => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let analytics = Router::new()
        .route("/overview", get(routes::overview::overview))
        .route("/sales/trend", get(routes::sales::trend))
        .route("/sales/time-analysis", get(routes::sales::time_analysis))
        .route("/sales/top-days", get(routes::sales::top_days))
        .route(
            "/sales/cancellation-rate",
            get(routes::sales::cancellation_rate),
        )
        .route("/channels/performance", get(routes::channels::performance))
        .route("/products/top-insights", get(routes::products::top_insights))
        .route("/products/performance", get(routes::products::performance))
        .route("/products/top-addons", get(routes::products::top_addons))
        .route("/stores/performance", get(routes::stores::performance))
        .route("/stores/ranking", get(routes::stores::ranking))
        .route("/stores/comparison", get(routes::stores::comparison))
        .route("/stores/regions", get(routes::stores::regions))
        .route("/stores/list", get(routes::stores::list))
        .route("/customers/insights", get(routes::customers::insights))
        .route(
            "/customers/promotion-optin",
            get(routes::customers::promotion_optin),
        )
        .route("/customers/avg-orders", get(routes::customers::avg_orders))
        .route("/payments/summary", get(routes::payments::summary))
        .route("/deliveries/status", get(routes::deliveries::status))
        .route("/deliveries/types", get(routes::deliveries::types))
        .route(
            "/categories/performance",
            get(routes::categories::performance),
        );

    let api = Router::new()
        .route("/health", get(routes::health::health))
        .nest("/api/analytics", analytics)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "API listening");

    axum::serve(listener, api.into_make_service()).await?;
    Ok(())
}
