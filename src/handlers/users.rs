use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use donation::UserRecord;
use tracing::{debug, instrument, trace, warn};

use crate::handlers::error_response;
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse, user_cache_key};

/// Get a creator's public profile by username
#[utoipa::path(
    get,
    path = "/api/v1/users/{username}",
    tag = "users",
    params(
        ("username" = String, Path, description = "Creator username"),
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserRecord>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_user(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserRecord>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_user function");

    let cache_key = user_cache_key(&username);
    if let Some(CachedData::User(record)) = state.cache.get(&cache_key).await {
        debug!("Returning cached profile for '{}'", username);
        return Ok(Json(ApiResponse {
            data: record,
            message: "User retrieved from cache".to_string(),
            success: true,
        }));
    }

    match donation::fetch_user(&state.db, &username).await {
        Ok(Some(record)) => {
            debug!("Retrieved profile for '{}'", username);
            state
                .cache
                .insert(cache_key, CachedData::User(record.clone()))
                .await;
            Ok(Json(ApiResponse {
                data: record,
                message: "User retrieved successfully".to_string(),
                success: true,
            }))
        }
        Ok(None) => {
            warn!("User '{}' not found", username);
            let error_body = ErrorResponse {
                error: "User not found".to_string(),
                code: "USER_NOT_FOUND".to_string(),
                success: false,
            };
            Err((StatusCode::NOT_FOUND, Json(error_body)))
        }
        Err(err) => Err(error_response(&err)),
    }
}
