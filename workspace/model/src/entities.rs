//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the crowdfunding platform here: creators
//! with public profile pages, and the donations made to them.

pub mod payment;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::payment::Entity as Payment;
    pub use super::user::Entity as User;
}
