use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A single donation, keyed by the gateway order id.
///
/// Created with `done = false` when the order is opened at the gateway and
/// flipped to `done = true` exactly once by the callback reconciliation.
/// `amount` is stored in major currency units while the gateway order itself
/// is denominated in minor units.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Gateway order id, the primary correlation key for callbacks.
    #[sea_orm(unique)]
    pub oid: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    /// Recipient username. A denormalized copy, not a foreign key; renames
    /// re-point it through an explicit cascade.
    pub to_user: String,
    pub name: String,
    pub message: String,
    #[sea_orm(default_value = "false")]
    pub done: bool,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
