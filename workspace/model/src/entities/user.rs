use sea_orm::entity::prelude::*;

/// A creator with a public donation page.
///
/// `email` is the stable identifier used to match the row during profile
/// updates, because `username` itself is mutable. The per-user gateway
/// credentials are only consulted when no process-wide keys are configured.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub name: Option<String>,
    pub razorpay_id: Option<String>,
    pub razorpay_secret: Option<String>,
    pub profile_pic: Option<String>,
    pub cover_pic: Option<String>,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

// Payments reference users only through the denormalized `to_user` string,
// so there is no SeaORM relation to declare here.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
