#[cfg(test)]
pub mod test_utils {
    use std::sync::Arc;

    use axum::Router;
    use donation::GatewaySettings;
    use gateway::MockGateway;
    use migration::{Migrator, MigratorTrait};
    use moka::future::Cache;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::config::AppConfig;
    use crate::router::create_router;
    use crate::schemas::AppState;

    /// Platform-wide gateway keys used by every test deployment.
    pub const TEST_KEY_ID: &str = "rzp_test_platform_key";
    pub const TEST_KEY_SECRET: &str = "platform_secret_123";

    /// Per-user fallback keys stored on the seeded "bob" creator.
    pub const BOB_KEY_ID: &str = "rzp_test_bob_key";
    pub const BOB_KEY_SECRET: &str = "bob_secret_value";

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing, with two seeded creators and the mock
    /// gateway standing in for Razorpay
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;

        let alice = model::entities::user::ActiveModel {
            username: Set("alice".to_string()),
            email: Set("alice@example.com".to_string()),
            ..Default::default()
        };

        let bob = model::entities::user::ActiveModel {
            username: Set("bob".to_string()),
            email: Set("bob@example.com".to_string()),
            razorpay_id: Set(Some(BOB_KEY_ID.to_string())),
            razorpay_secret: Set(Some(BOB_KEY_SECRET.to_string())),
            ..Default::default()
        };

        alice.insert(&db).await.expect("Failed to create test user 1");
        bob.insert(&db).await.expect("Failed to create test user 2");

        let config = AppConfig {
            gateway: GatewaySettings {
                key_id: Some(TEST_KEY_ID.to_string()),
                key_secret: Some(TEST_KEY_SECRET.to_string()),
            },
            public_base_url: "http://localhost:3000".to_string(),
        };

        let cache = Cache::new(100);

        AppState {
            db,
            gateway: Arc::new(MockGateway::new()),
            config,
            cache,
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let _ = init_test_tracing();

        let state = setup_test_app_state().await;
        create_router(state)
    }
}
