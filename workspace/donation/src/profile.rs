use chrono::Utc;
use model::entities::{payment, user};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::error::{DonationError, is_unique_violation};

/// Normalized profile-update input. The HTTP layer owns the two external
/// representations (JSON body, form body) and coerces both into this struct
/// before anything is validated or written.
///
/// `username` and `email` are optional at the wire so their absence can be
/// reported as a soft validation failure instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "razorpayid")]
    pub razorpay_id: Option<String>,
    #[serde(default, rename = "razorpaysecret")]
    pub razorpay_secret: Option<String>,
    #[serde(default, rename = "profilepic")]
    pub profile_pic: Option<String>,
    #[serde(default, rename = "coverpic")]
    pub cover_pic: Option<String>,
}

/// Update a creator's profile, cascading a username rename into the payment
/// ledger.
///
/// The user row is matched by the stable email, never by the old username,
/// because the username is exactly the thing being changed. On a rename the
/// availability pre-check is only an early exit; the schema's unique
/// constraint is the authoritative guard, and a constraint violation on the
/// write surfaces as the same soft `UsernameTaken`. The payment cascade
/// re-points every denormalized `to_user` reference; re-running it for the
/// same old→new pair is a no-op, so a failure between the two writes can be
/// healed by resubmitting.
#[instrument(skip(db, update))]
pub async fn update_profile(
    db: &DatabaseConnection,
    update: &ProfileUpdate,
    old_username: &str,
) -> Result<(), DonationError> {
    let (Some(username), Some(email)) = (update.username.as_deref(), update.email.as_deref())
    else {
        return Err(invalid_profile_data());
    };
    if username.trim().is_empty() || email.trim().is_empty() {
        return Err(invalid_profile_data());
    }

    let renaming = username != old_username;
    if renaming {
        let taken = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
            .map_err(DonationError::from_db)?
            .is_some();
        if taken {
            return Err(DonationError::UsernameTaken);
        }
    }

    let Some(current) = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(DonationError::from_db)?
    else {
        warn!("profile update for unknown email; nothing written");
        return Err(invalid_profile_data());
    };

    let mut active: user::ActiveModel = current.into();
    active.username = Set(username.to_string());
    if let Some(name) = &update.name {
        active.name = Set(Some(name.clone()));
    }
    if let Some(key_id) = &update.razorpay_id {
        active.razorpay_id = Set(Some(key_id.clone()));
    }
    if let Some(secret) = &update.razorpay_secret {
        active.razorpay_secret = Set(Some(secret.clone()));
    }
    if let Some(profile_pic) = &update.profile_pic {
        active.profile_pic = Set(Some(profile_pic.clone()));
    }
    if let Some(cover_pic) = &update.cover_pic {
        active.cover_pic = Set(Some(cover_pic.clone()));
    }
    active.updated_at = Set(Some(Utc::now()));

    active.update(db).await.map_err(|db_error| {
        // Lost the rename race: someone claimed the username between the
        // pre-check and this write. The constraint is the real arbiter.
        if is_unique_violation(&db_error) {
            DonationError::UsernameTaken
        } else {
            DonationError::from_db(db_error)
        }
    })?;

    if renaming {
        let cascaded = payment::Entity::update_many()
            .col_expr(payment::Column::ToUser, Expr::value(username))
            .filter(payment::Column::ToUser.eq(old_username))
            .exec(db)
            .await
            .map_err(DonationError::from_db)?;
        info!(
            rows = cascaded.rows_affected,
            "re-pointed payments from '{old_username}' to '{username}'"
        );
    }

    Ok(())
}

fn invalid_profile_data() -> DonationError {
    DonationError::Validation("Invalid profile data".to_string())
}
