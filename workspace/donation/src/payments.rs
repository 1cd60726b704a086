use chrono::{DateTime, Utc};
use model::entities::payment;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use tracing::{instrument, warn};
use utoipa::ToSchema;

/// A completed donation as returned to callers, identifiers flattened to
/// plain strings and timestamps to RFC 3339.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub oid: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub to_user: String,
    pub name: String,
    pub message: String,
    pub done: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<payment::Model> for PaymentRecord {
    fn from(model: payment::Model) -> Self {
        Self {
            id: model.id.to_string(),
            oid: model.oid,
            amount: model.amount,
            to_user: model.to_user,
            name: model.name,
            message: model.message,
            done: model.done,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Completed donations for a creator, largest first (the supporter ranking).
///
/// Only `done = true` rows are returned. A storage failure degrades to an
/// empty list instead of failing the caller's page; this list is display
/// only and availability wins over completeness here. Equal amounts keep a
/// stable relative order via the id tiebreak.
#[instrument(skip(db))]
pub async fn fetch_payments_for_user(db: &DatabaseConnection, username: &str) -> Vec<PaymentRecord> {
    let result = payment::Entity::find()
        .filter(payment::Column::ToUser.eq(username))
        .filter(payment::Column::Done.eq(true))
        .order_by_desc(payment::Column::Amount)
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await;

    match result {
        Ok(models) => models.into_iter().map(PaymentRecord::from).collect(),
        Err(db_error) => {
            warn!("failed to fetch payments for '{username}': {db_error}");
            Vec::new()
        }
    }
}
