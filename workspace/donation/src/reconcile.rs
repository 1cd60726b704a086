use chrono::Utc;
use gateway::types::PaymentCallback;
use gateway::{OrderGateway, signature};
use model::entities::{payment, user};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{debug, info, instrument, warn};

use crate::GatewaySettings;
use crate::error::DonationError;

/// Reconcile a gateway checkout callback against the stored pending payment.
///
/// The callback is attacker-reachable, so nothing is written until it has
/// been verified twice: the HMAC signature must match the secret that
/// created the order, and the gateway's own order record must carry the same
/// minor-unit amount as the stored row. Only then is `done` flipped, as an
/// idempotent set; webhook-style duplicate delivery finds the row already
/// completed and writes nothing.
#[instrument(skip(db, gateway, settings, callback), fields(order_id = %callback.razorpay_order_id))]
pub async fn reconcile_payment(
    db: &DatabaseConnection,
    gateway: &dyn OrderGateway,
    settings: &GatewaySettings,
    callback: &PaymentCallback,
) -> Result<payment::Model, DonationError> {
    let stored = payment::Entity::find()
        .filter(payment::Column::Oid.eq(&callback.razorpay_order_id))
        .one(db)
        .await
        .map_err(DonationError::from_db)?
        .ok_or_else(|| {
            warn!("callback for unknown order id");
            DonationError::CallbackRejected
        })?;

    let recipient = user::Entity::find()
        .filter(user::Column::Username.eq(&stored.to_user))
        .one(db)
        .await
        .map_err(DonationError::from_db)?
        .ok_or(DonationError::RecipientNotFound)?;

    let credentials = settings.resolve_for(&recipient)?;

    if !signature::verify_payment_signature(
        &callback.razorpay_order_id,
        &callback.razorpay_payment_id,
        &callback.razorpay_signature,
        &credentials.key_secret,
    ) {
        warn!("callback signature mismatch");
        return Err(DonationError::CallbackRejected);
    }

    // Cross-check the gateway's order against the stored ledger row. The
    // ledger is in major units, the order in minor units.
    let order = gateway
        .fetch_order(&credentials, &callback.razorpay_order_id)
        .await?;
    let stored_minor = (stored.amount * Decimal::from(100)).to_i64();
    if stored_minor != Some(order.amount) {
        warn!(
            gateway_amount = order.amount,
            "callback amount mismatch against stored payment"
        );
        return Err(DonationError::CallbackRejected);
    }

    if stored.done {
        debug!("payment already reconciled; duplicate callback ignored");
        return Ok(stored);
    }

    let oid = stored.oid.clone();
    let mut active: payment::ActiveModel = stored.into();
    active.done = Set(true);
    active.updated_at = Set(Some(Utc::now()));
    let updated = active.update(db).await.map_err(DonationError::from_db)?;

    info!(oid = %oid, "payment reconciled");
    Ok(updated)
}
