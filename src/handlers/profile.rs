use axum::{
    async_trait,
    extract::{Form, FromRequest, Path, Request, State},
    http::{StatusCode, header},
    response::Json,
};
use donation::{DonationError, ProfileUpdate};
use tracing::{debug, error, info, instrument, warn};

use crate::handlers::error_response;
use crate::schemas::{
    ApiResponse, AppState, ErrorResponse, payments_cache_key, user_cache_key,
};

/// Profile payloads arrive either as JSON (the API) or form-encoded (the
/// dashboard form post). Both representations are coerced into the one
/// normalized `ProfileUpdate` here, before any validation or business logic
/// sees them.
pub struct ProfilePayload(pub ProfileUpdate);

#[async_trait]
impl<S> FromRequest<S> for ProfilePayload
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        let update = if content_type.starts_with("application/json") {
            Json::<ProfileUpdate>::from_request(req, state)
                .await
                .map_err(|rejection| malformed_payload(rejection.to_string()))?
                .0
        } else {
            Form::<ProfileUpdate>::from_request(req, state)
                .await
                .map_err(|rejection| malformed_payload(rejection.to_string()))?
                .0
        };

        Ok(Self(update))
    }
}

fn malformed_payload(detail: String) -> (StatusCode, Json<ErrorResponse>) {
    warn!("Malformed profile payload: {}", detail);
    let error_body = ErrorResponse {
        error: "Invalid profile data".to_string(),
        code: "INVALID_PROFILE_DATA".to_string(),
        success: false,
    };
    (StatusCode::BAD_REQUEST, Json(error_body))
}

/// Update a creator's profile; `{username}` is the name they currently hold.
/// A changed username cascades into the payment ledger.
#[utoipa::path(
    put,
    path = "/api/v1/users/{username}/profile",
    tag = "users",
    params(
        ("username" = String, Path, description = "The creator's current username"),
    ),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile updated successfully", body = ApiResponse<String>),
        (status = 400, description = "Missing required profile fields", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn update_profile(
    Path(username): Path<String>,
    State(state): State<AppState>,
    payload: ProfilePayload,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    let ProfilePayload(update) = payload;
    debug!("Updating profile for '{}'", username);

    match donation::update_profile(&state.db, &update, &username).await {
        Ok(()) => {
            // Both identities leave the cache: a rename moves the profile
            // and its supporter list to the new key.
            state.cache.invalidate(&user_cache_key(&username)).await;
            state.cache.invalidate(&payments_cache_key(&username)).await;
            if let Some(new_username) = update.username.as_deref() {
                if new_username != username {
                    state.cache.invalidate(&user_cache_key(new_username)).await;
                    state
                        .cache
                        .invalidate(&payments_cache_key(new_username))
                        .await;
                }
            }

            info!("Profile updated for '{}'", username);
            Ok(Json(ApiResponse {
                data: format!("Profile for {} updated", username),
                message: "Profile updated successfully".to_string(),
                success: true,
            }))
        }
        Err(err @ (DonationError::Validation(_) | DonationError::UsernameTaken)) => {
            warn!("Profile update rejected for '{}': {}", username, err);
            Err(error_response(&err))
        }
        Err(err) => {
            error!("Failed to update profile for '{}': {}", username, err);
            Err(error_response(&err))
        }
    }
}
