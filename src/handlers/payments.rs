use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use donation::{DonationForm, PaymentRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::handlers::error_response;
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse, payments_cache_key};

/// Request body for initiating a donation
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct InitiatePaymentRequest {
    /// Donation amount in minor currency units (paise)
    pub amount: i64,
    /// Recipient creator's username
    #[validate(length(min = 1))]
    pub to_username: String,
    /// Donor display name
    #[validate(length(max = 100))]
    pub name: String,
    /// Donor message shown on the supporter list
    #[validate(length(max = 500))]
    pub message: String,
}

/// Initiated-order response model
#[derive(Debug, Serialize, ToSchema)]
pub struct InitiatedOrderResponse {
    /// Gateway order id to open checkout with
    pub order_id: String,
    /// Minor-unit amount the order was created with
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    /// Key id that created the order. Checkout must be opened with this
    /// exact key or the session will not match the order.
    pub key_id: String,
}

/// Initiate a donation: create the gateway order and persist the pending
/// payment
#[utoipa::path(
    post,
    path = "/api/v1/payments/initiate",
    tag = "payments",
    request_body = InitiatePaymentRequest,
    responses(
        (status = 201, description = "Payment order initiated", body = ApiResponse<InitiatedOrderResponse>),
        (status = 400, description = "Invalid amount or donation form", body = ErrorResponse),
        (status = 404, description = "Recipient not found", body = ErrorResponse),
        (status = 502, description = "Gateway rejected the order", body = ErrorResponse),
        (status = 503, description = "Gateway not configured", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn initiate_payment(
    State(state): State<AppState>,
    Json(request): Json<InitiatePaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InitiatedOrderResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    trace!("Entering initiate_payment function");
    debug!(
        "Initiating payment of {} minor units to '{}'",
        request.amount, request.to_username
    );

    if let Err(validation_error) = request.validate() {
        warn!("Rejected donation form: {}", validation_error);
        let error_body = ErrorResponse {
            error: "Invalid donation form".to_string(),
            code: "INVALID_DONATION_FORM".to_string(),
            success: false,
        };
        return Err((StatusCode::BAD_REQUEST, Json(error_body)));
    }

    let form = DonationForm {
        name: request.name.clone(),
        message: request.message.clone(),
    };

    match donation::initiate(
        &state.db,
        state.gateway.as_ref(),
        &state.config.gateway,
        request.amount,
        &request.to_username,
        &form,
    )
    .await
    {
        Ok(initiated) => {
            info!(
                "Payment order {} initiated for '{}'",
                initiated.order.id, request.to_username
            );
            let response = ApiResponse {
                data: InitiatedOrderResponse {
                    order_id: initiated.order.id,
                    amount: initiated.order.amount,
                    currency: initiated.order.currency,
                    receipt: initiated.order.receipt,
                    key_id: initiated.key_id,
                },
                message: "Payment order initiated successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(err) => {
            error!(
                "Failed to initiate payment for '{}': {}",
                request.to_username, err
            );
            Err(error_response(&err))
        }
    }
}

/// Get the completed payments for a creator, largest first
#[utoipa::path(
    get,
    path = "/api/v1/users/{username}/payments",
    tag = "payments",
    params(
        ("username" = String, Path, description = "Creator username"),
    ),
    responses(
        (status = 200, description = "Completed payments, sorted by amount descending", body = ApiResponse<Vec<PaymentRecord>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_user_payments(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<PaymentRecord>>> {
    trace!("Entering get_user_payments function");

    let cache_key = payments_cache_key(&username);
    if let Some(CachedData::Payments(records)) = state.cache.get(&cache_key).await {
        debug!("Returning {} cached payments for '{}'", records.len(), username);
        return Json(ApiResponse {
            data: records,
            message: "Payments retrieved from cache".to_string(),
            success: true,
        });
    }

    // The read path degrades to an empty list on storage failure, so this
    // never errors out the page.
    let records = donation::fetch_payments_for_user(&state.db, &username).await;
    debug!("Retrieved {} payments for '{}'", records.len(), username);

    state
        .cache
        .insert(cache_key, CachedData::Payments(records.clone()))
        .await;

    Json(ApiResponse {
        data: records,
        message: "Payments retrieved successfully".to_string(),
        success: true,
    })
}
