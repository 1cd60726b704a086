use model::entities::user;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;
use tracing::{error, instrument};
use utoipa::ToSchema;

use crate::error::{DonationError, is_quota_error};

/// A creator's public profile as returned to callers.
///
/// Deliberately omits the stored gateway secret; the key id is included
/// because the checkout UI needs it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    #[serde(rename = "razorpayid")]
    pub razorpay_id: Option<String>,
    #[serde(rename = "profilepic")]
    pub profile_pic: Option<String>,
    #[serde(rename = "coverpic")]
    pub cover_pic: Option<String>,
}

impl From<user::Model> for UserRecord {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id.to_string(),
            username: model.username,
            email: model.email,
            name: model.name,
            razorpay_id: model.razorpay_id,
            profile_pic: model.profile_pic,
            cover_pic: model.cover_pic,
        }
    }
}

/// Look up a creator by username. Absence is a `None`, not an error;
/// quota-style storage failures keep their own kind, anything else is a
/// generic fetch failure.
#[instrument(skip(db))]
pub async fn fetch_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<UserRecord>, DonationError> {
    let found = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(|db_error| {
            error!("failed to fetch user '{username}': {db_error}");
            if is_quota_error(&db_error) {
                DonationError::StorageExhausted
            } else {
                DonationError::FetchFailed
            }
        })?;

    Ok(found.map(UserRecord::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{seed_user_with_keys, setup_db};

    #[tokio::test]
    async fn fetches_the_public_profile() {
        let db = setup_db().await;
        seed_user_with_keys(
            &db,
            "alice",
            "alice@example.com",
            "rzp_test_alice_key",
            "alice_secret_value",
        )
        .await;

        let record = fetch_user(&db, "alice").await.unwrap().unwrap();
        assert_eq!(record.username, "alice");
        assert_eq!(record.email, "alice@example.com");
        assert_eq!(record.razorpay_id.as_deref(), Some("rzp_test_alice_key"));
    }

    #[tokio::test]
    async fn unknown_username_is_none() {
        let db = setup_db().await;
        assert!(fetch_user(&db, "ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn the_gateway_secret_never_serializes() {
        let db = setup_db().await;
        seed_user_with_keys(
            &db,
            "alice",
            "alice@example.com",
            "rzp_test_alice_key",
            "alice_secret_value",
        )
        .await;

        let record = fetch_user(&db, "alice").await.unwrap().unwrap();
        let value = serde_json::to_value(&record).unwrap();

        let rendered = value.to_string();
        assert!(!rendered.contains("alice_secret_value"));
        assert!(value.get("razorpaysecret").is_none());
        assert!(value.get("razorpay_secret").is_none());
    }
}
