use std::sync::Arc;

use donation::{PaymentRecord, ProfileUpdate, UserRecord};
use gateway::OrderGateway;
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::config::AppConfig;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Payment gateway adapter
    pub gateway: Arc<dyn OrderGateway>,
    /// Process-wide configuration
    pub config: AppConfig,
    /// Cache for display-only profile reads
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    User(UserRecord),
    Payments(Vec<PaymentRecord>),
}

pub fn user_cache_key(username: &str) -> String {
    format!("user_{username}")
}

pub fn payments_cache_key(username: &str) -> String {
    format!("payments_{username}")
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::payments::initiate_payment,
        crate::handlers::payments::get_user_payments,
        crate::handlers::users::get_user,
        crate::handlers::profile::update_profile,
        crate::handlers::webhook::razorpay_callback,
    ),
    components(
        schemas(
            ApiResponse<UserRecord>,
            ApiResponse<Vec<PaymentRecord>>,
            ErrorResponse,
            HealthResponse,
            UserRecord,
            PaymentRecord,
            ProfileUpdate,
            crate::handlers::payments::InitiatePaymentRequest,
            crate::handlers::payments::InitiatedOrderResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Donation order initiation and supporter lists"),
        (name = "users", description = "Creator profile endpoints"),
        (name = "webhook", description = "Payment gateway callback"),
    ),
    info(
        title = "TrustPayHub API",
        description = "Crowdfunding page platform - creator profiles and gateway-backed donations",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
