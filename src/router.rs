use axum::{
    Router,
    routing::{get, post, put},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{
    health::health_check,
    payments::{get_user_payments, initiate_payment},
    profile::update_profile,
    users::get_user,
    webhook::razorpay_callback,
};
use crate::schemas::{ApiDoc, AppState};

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Donation routes
        .route("/api/v1/payments/initiate", post(initiate_payment))
        .route("/api/v1/users/:username/payments", get(get_user_payments))
        // Creator profile routes
        .route("/api/v1/users/:username", get(get_user))
        .route("/api/v1/users/:username/profile", put(update_profile))
        // Gateway callback target (the checkout form posts here)
        .route("/api/razorpay", post(razorpay_callback))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
