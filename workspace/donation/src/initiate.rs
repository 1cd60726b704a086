use chrono::Utc;
use gateway::{Order, OrderGateway, OrderRequest};
use model::entities::{payment, user};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::GatewaySettings;
use crate::error::DonationError;

/// The gateway's minimum charge floor, in minor units.
pub const MIN_ORDER_AMOUNT_MINOR: i64 = 100;

/// All orders are denominated in Indian rupees; the gateway side in paise.
pub const CURRENCY: &str = "INR";

/// Donor-supplied fields accompanying a donation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DonationForm {
    pub name: String,
    pub message: String,
}

/// A successfully initiated order: the gateway's handle plus the key id that
/// created it, so the caller can open checkout with the exact same key.
#[derive(Debug, Clone)]
pub struct InitiatedOrder {
    pub order: Order,
    pub key_id: String,
}

/// Create a gateway order for a donation and persist the pending payment.
///
/// Validation happens strictly before the gateway call: the amount floor,
/// the recipient lookup, and the credential plausibility checks all fail
/// without any network traffic or storage write. There are no retries; an
/// ambiguous gateway failure must be resubmitted by the caller, because
/// blindly re-creating an order risks duplicates.
#[instrument(skip(db, gateway, settings, form))]
pub async fn initiate(
    db: &DatabaseConnection,
    gateway: &dyn OrderGateway,
    settings: &GatewaySettings,
    amount_minor: i64,
    to_username: &str,
    form: &DonationForm,
) -> Result<InitiatedOrder, DonationError> {
    if amount_minor < MIN_ORDER_AMOUNT_MINOR {
        return Err(DonationError::InvalidAmount);
    }

    let recipient = user::Entity::find()
        .filter(user::Column::Username.eq(to_username))
        .one(db)
        .await
        .map_err(DonationError::from_db)?
        .ok_or(DonationError::RecipientNotFound)?;

    let credentials = settings.resolve_for(&recipient)?;
    debug!(
        source = if settings.key_id.is_some() { "environment" } else { "user record" },
        "resolved gateway credentials"
    );

    // The time-based token keeps receipts unique across repeated attempts
    // for the same recipient.
    let request = OrderRequest {
        amount: amount_minor,
        currency: CURRENCY.to_string(),
        receipt: format!("receipt_{}_{}", to_username, Utc::now().timestamp_millis()),
    };

    let order = gateway.create_order(&credentials, &request).await?;

    // The gateway speaks minor units; the stored ledger speaks major units.
    let now = Utc::now();
    payment::ActiveModel {
        oid: Set(order.id.clone()),
        amount: Set(Decimal::new(amount_minor, 2)),
        to_user: Set(to_username.to_string()),
        name: Set(form.name.clone()),
        message: Set(form.message.clone()),
        done: Set(false),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(DonationError::from_db)?;

    info!(order_id = %order.id, recipient = %to_username, "payment order initiated");

    Ok(InitiatedOrder {
        key_id: credentials.key_id.clone(),
        order,
    })
}

#[cfg(test)]
mod tests {
    use gateway::{MockGateway, MockMode};
    use model::entities::payment;
    use rust_decimal::Decimal;
    use sea_orm::EntityTrait;

    use super::*;
    use crate::testing::{platform_settings, seed_user, seed_user_with_keys, setup_db};

    fn form() -> DonationForm {
        DonationForm {
            name: "Bob".to_string(),
            message: "go!".to_string(),
        }
    }

    #[tokio::test]
    async fn amounts_below_the_floor_never_reach_the_gateway_or_the_store() {
        let db = setup_db().await;
        seed_user(&db, "alice", "alice@example.com").await;
        let mock = MockGateway::new();

        for amount in [0, 1, 99] {
            let err = initiate(&db, &mock, &platform_settings(), amount, "alice", &form())
                .await
                .unwrap_err();
            assert!(matches!(err, DonationError::InvalidAmount));
        }

        assert!(mock.orders().is_empty());
        assert!(
            payment::Entity::find().all(&db).await.unwrap().is_empty(),
            "no pending payment may be written for a rejected amount"
        );
    }

    #[tokio::test]
    async fn unknown_recipient_fails_before_the_gateway_call() {
        let db = setup_db().await;
        let mock = MockGateway::new();

        let err = initiate(&db, &mock, &platform_settings(), 500, "nobody", &form())
            .await
            .unwrap_err();

        assert!(matches!(err, DonationError::RecipientNotFound));
        assert!(mock.orders().is_empty());
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_the_gateway_call() {
        let db = setup_db().await;
        seed_user(&db, "alice", "alice@example.com").await;
        let mock = MockGateway::new();

        let err = initiate(&db, &mock, &GatewaySettings::default(), 500, "alice", &form())
            .await
            .unwrap_err();

        assert!(matches!(err, DonationError::GatewayNotConfigured));
        assert!(mock.orders().is_empty());
    }

    #[tokio::test]
    async fn implausibly_short_credentials_are_rejected() {
        let db = setup_db().await;
        seed_user(&db, "alice", "alice@example.com").await;
        let mock = MockGateway::new();
        let settings = GatewaySettings {
            key_id: Some("short".to_string()),
            key_secret: Some("platform_secret_123".to_string()),
        };

        let err = initiate(&db, &mock, &settings, 500, "alice", &form())
            .await
            .unwrap_err();

        assert!(matches!(err, DonationError::InvalidCredentials));
        assert!(mock.orders().is_empty());
    }

    #[tokio::test]
    async fn successful_initiation_persists_a_pending_major_unit_payment() {
        let db = setup_db().await;
        seed_user(&db, "alice", "alice@example.com").await;
        let mock = MockGateway::new();

        let initiated = initiate(&db, &mock, &platform_settings(), 500, "alice", &form())
            .await
            .unwrap();

        // Gateway side is minor units, with the receipt tagged for alice.
        assert_eq!(initiated.order.amount, 500);
        assert_eq!(initiated.order.currency, "INR");
        assert!(
            initiated
                .order
                .receipt
                .as_deref()
                .unwrap()
                .starts_with("receipt_alice_")
        );
        assert_eq!(initiated.key_id, platform_settings().key_id.unwrap());

        // Stored side is major units and pending.
        let rows = payment::Entity::find().all(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.oid, initiated.order.id);
        assert_eq!(row.amount, Decimal::new(500, 2));
        assert_eq!(row.to_user, "alice");
        assert_eq!(row.name, "Bob");
        assert_eq!(row.message, "go!");
        assert!(!row.done);
    }

    #[tokio::test]
    async fn recipient_credentials_are_used_when_no_platform_keys_exist() {
        let db = setup_db().await;
        seed_user_with_keys(
            &db,
            "alice",
            "alice@example.com",
            "rzp_test_alice_key",
            "alice_secret_value",
        )
        .await;
        let mock = MockGateway::new();

        let initiated = initiate(&db, &mock, &GatewaySettings::default(), 500, "alice", &form())
            .await
            .unwrap();

        assert_eq!(initiated.key_id, "rzp_test_alice_key");
    }

    #[tokio::test]
    async fn gateway_rejection_leaves_no_pending_payment() {
        let db = setup_db().await;
        seed_user(&db, "alice", "alice@example.com").await;
        let mock = MockGateway::with_mode(MockMode::AuthFailure);

        let err = initiate(&db, &mock, &platform_settings(), 500, "alice", &form())
            .await
            .unwrap_err();

        assert!(matches!(err, DonationError::AuthenticationFailed));
        assert!(payment::Entity::find().all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn gateway_timeout_is_its_own_failure_kind() {
        let db = setup_db().await;
        seed_user(&db, "alice", "alice@example.com").await;
        let mock = MockGateway::with_mode(MockMode::Timeout);

        let err = initiate(&db, &mock, &platform_settings(), 500, "alice", &form())
            .await
            .unwrap_err();

        assert!(matches!(err, DonationError::Timeout));
    }
}
