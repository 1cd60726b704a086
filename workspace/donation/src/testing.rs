//! Shared fixtures for the module test suites.

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use model::entities::{payment, user};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::GatewaySettings;

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None).await.expect("Migrations failed.");

    db
}

/// Platform-wide gateway keys as most deployments configure them.
pub fn platform_settings() -> GatewaySettings {
    GatewaySettings {
        key_id: Some("rzp_test_platform_key".to_string()),
        key_secret: Some("platform_secret_123".to_string()),
    }
}

pub async fn seed_user(db: &DatabaseConnection, username: &str, email: &str) -> user::Model {
    user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        created_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed user")
}

pub async fn seed_user_with_keys(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    key_id: &str,
    key_secret: &str,
) -> user::Model {
    user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        razorpay_id: Set(Some(key_id.to_string())),
        razorpay_secret: Set(Some(key_secret.to_string())),
        created_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed user")
}

pub async fn seed_payment(
    db: &DatabaseConnection,
    oid: &str,
    amount: Decimal,
    to_user: &str,
    done: bool,
) -> payment::Model {
    payment::ActiveModel {
        oid: Set(oid.to_string()),
        amount: Set(amount),
        to_user: Set(to_user.to_string()),
        name: Set("Supporter".to_string()),
        message: Set("Thanks for everything".to_string()),
        done: Set(done),
        created_at: Set(Some(Utc::now())),
        updated_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed payment")
}
