use axum::http::StatusCode;
use axum::response::Json;
use donation::DonationError;

use crate::schemas::ErrorResponse;

pub mod health;
pub mod payments;
pub mod profile;
pub mod users;
pub mod webhook;

/// Map a domain error to the API's error envelope. Soft, user-correctable
/// failures come back as 4xx; configuration and collaborator faults as 5xx.
pub fn error_response(error: &DonationError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match error {
        DonationError::RecipientNotFound => StatusCode::NOT_FOUND,
        DonationError::InvalidAmount
        | DonationError::Validation(_)
        | DonationError::CallbackRejected => StatusCode::BAD_REQUEST,
        DonationError::UsernameTaken => StatusCode::CONFLICT,
        DonationError::GatewayNotConfigured | DonationError::InvalidCredentials => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        DonationError::AuthenticationFailed | DonationError::Gateway(_) => StatusCode::BAD_GATEWAY,
        DonationError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        DonationError::StorageExhausted => StatusCode::INSUFFICIENT_STORAGE,
        DonationError::FetchFailed | DonationError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let body = ErrorResponse {
        error: error.to_string(),
        code: error.code().to_string(),
        success: false,
    };

    (status, Json(body))
}
