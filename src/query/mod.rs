// src/query/mod.rs

pub mod catalog;
pub mod executor;
pub mod params;

pub use catalog::QueryCatalog;
pub use executor::{QueryExecutor, Row};
pub use params::SqlParam;

/// Every template the service ships. Preloaded at startup so a missing file
/// fails the deployment instead of the first request that needs it.
pub const REGISTERED_QUERIES: &[(&str, &str)] = &[
    ("vendas_e_desempenho", "total_sales_period"),
    ("vendas_e_desempenho", "total_sales_period_by_channel"),
    ("vendas_e_desempenho", "sales_trend"),
    ("vendas_e_desempenho", "sales_trend_by_channel"),
    ("vendas_e_desempenho", "time_analysis"),
    ("vendas_e_desempenho", "time_analysis_by_channel"),
    ("vendas_e_desempenho", "channel_performance"),
    ("vendas_e_desempenho", "store_performance"),
    ("vendas_e_desempenho", "store_ranking"),
    ("vendas_e_desempenho", "store_comparison"),
    ("vendas_e_desempenho", "sales_by_store_city"),
    ("vendas_e_desempenho", "store_list"),
    ("vendas_e_desempenho", "top_sales_day_week"),
    ("vendas_e_desempenho", "cancellation_rate"),
    ("produtos", "top_products"),
    ("produtos", "product_performance"),
    ("produtos", "category_performance"),
    ("produtos", "top_addon_items"),
    ("clientes", "customer_age_distribution"),
    ("clientes", "promotion_optin_rate"),
    ("clientes", "avg_orders_per_customer"),
    ("pagamentos", "payment_summary"),
    ("entregas", "delivery_status"),
    ("entregas", "delivery_type_distribution"),
];
