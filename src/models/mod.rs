// src/models/mod.rs

use serde::Serialize;

// ───────────────────────────────────────
// Uniform response envelope
// ───────────────────────────────────────

/// Every analytics endpoint answers `{"data": [...], "success": true}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: Vec<T>,
    pub success: bool,
}

impl<T> Envelope<T> {
    pub fn ok(data: Vec<T>) -> Self {
        Self {
            data,
            success: true,
        }
    }
}

// ───────────────────────────────────────
// Overview & sales
// ───────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OverviewSummary {
    pub total_sales: i64,
    pub total_revenue: f64,
    pub avg_ticket: f64,
    pub unique_customers: i64,
}

#[derive(Debug, Serialize)]
pub struct SalesTrendPoint {
    pub date: String,
    pub sales_count: i64,
    pub daily_revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct TimeAnalysisPoint {
    pub hour: i64,
    pub sales_count: i64,
    pub total_revenue: f64,
    pub avg_delivery_minutes: f64,
    pub avg_production_minutes: f64,
}

#[derive(Debug, Serialize)]
pub struct DayOfWeekSales {
    pub day_of_week: String,
    pub day_number: i64,
    pub sales_count: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct CancellationSummary {
    pub total_orders: i64,
    pub cancelled_orders: i64,
    /// Cancelled over total, percent, one decimal.
    pub cancellation_rate: f64,
}

// ───────────────────────────────────────
// Channels
// ───────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChannelPerformance {
    pub name: String,
    pub channel_type: String,
    pub sales_count: i64,
    pub total_revenue: f64,
    pub avg_ticket: f64,
    /// Share of sales in the period, one decimal; the full partition sums
    /// to 100 within rounding.
    pub percentage: f64,
}

// ───────────────────────────────────────
// Products & categories
// ───────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProductInsight {
    pub name: String,
    pub times_sold: i64,
    pub total_quantity: i64,
    pub total_revenue: f64,
    /// Product-lines carrying at least one add-on over times sold, percent,
    /// one decimal.
    pub customization_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct ProductPerformance {
    pub name: String,
    pub times_sold: i64,
    pub total_quantity: i64,
    pub total_revenue: f64,
    pub avg_price: f64,
}

#[derive(Debug, Serialize)]
pub struct AddonInsight {
    pub name: String,
    pub times_added: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct CategoryPerformance {
    pub name: String,
    pub total_sales: i64,
    pub total_units: i64,
    pub total_revenue: f64,
}

// ───────────────────────────────────────
// Stores
// ───────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StorePerformance {
    pub store_name: String,
    pub total_sales: i64,
    pub total_revenue: f64,
    pub avg_ticket: f64,
}

#[derive(Debug, Serialize)]
pub struct StoreRanking {
    pub rank: i64,
    pub store_id: i64,
    pub store_name: String,
    pub total_sales: i64,
    pub total_revenue: f64,
    pub avg_ticket: f64,
}

#[derive(Debug, Serialize)]
pub struct StoreComparison {
    pub store_id: i64,
    pub store_name: String,
    pub total_sales: i64,
    pub total_revenue: f64,
    pub avg_ticket: f64,
    pub avg_delivery_minutes: f64,
}

#[derive(Debug, Serialize)]
pub struct StoreRegion {
    pub city: String,
    pub state: String,
    pub store_count: i64,
    pub total_sales: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct StoreListItem {
    pub store_id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
}

// ───────────────────────────────────────
// Customers, payments, deliveries
// ───────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CustomerAgeGroup {
    pub age_group: String,
    pub customer_count: i64,
    pub avg_spent: f64,
}

#[derive(Debug, Serialize)]
pub struct PromotionOptin {
    pub total_customers: i64,
    pub email_optin: i64,
    pub sms_optin: i64,
    pub email_optin_rate: f64,
    pub sms_optin_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct OrdersPerCustomer {
    pub active_customers: i64,
    pub total_orders: i64,
    pub avg_orders_per_customer: f64,
}

#[derive(Debug, Serialize)]
pub struct PaymentMethodSummary {
    pub method: String,
    pub total_payments: i64,
    pub total_amount: f64,
    pub avg_amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct DeliveryStatusSummary {
    pub status: String,
    pub count: i64,
    pub avg_time_minutes: f64,
}

#[derive(Debug, Serialize)]
pub struct DeliveryTypeSummary {
    pub delivery_type: String,
    pub count: i64,
    pub percentage: f64,
}
