use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use donation::GatewaySettings;
use gateway::RazorpayClient;
use moka::future::Cache;
use sea_orm::Database;

use crate::schemas::AppState;

/// Process-wide configuration, read from the environment once at startup
/// and injected into handlers through `AppState`. Operations never read the
/// environment themselves.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Platform gateway keys; creators may carry their own stored pair as a
    /// per-field fallback.
    pub gateway: GatewaySettings,
    /// Public base URL used to build the post-checkout redirect target.
    pub public_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let gateway = GatewaySettings {
            key_id: std::env::var("RAZORPAY_KEY_ID").ok(),
            key_secret: std::env::var("RAZORPAY_KEY_SECRET").ok(),
        };
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            gateway,
            public_base_url,
        }
    }
}

/// Initialize application state for the given database URL
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    let config = AppConfig::from_env();
    if config.gateway.key_id.is_none() {
        tracing::warn!(
            "RAZORPAY_KEY_ID not set; orders will rely on per-creator dashboard credentials"
        );
    }

    // Connect to database
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    let gateway = Arc::new(RazorpayClient::new()?);

    // Cache for the display-only profile reads
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    Ok(AppState {
        db,
        gateway,
        config,
        cache,
    })
}
