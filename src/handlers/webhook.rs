use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Json, Redirect},
};
use gateway::types::PaymentCallback;
use tracing::{error, info, instrument};

use crate::handlers::error_response;
use crate::schemas::{AppState, ErrorResponse, payments_cache_key};

/// Gateway checkout callback. Razorpay posts the order/payment/signature
/// triple here after the payer completes checkout; a verified callback
/// completes the pending payment and sends the payer's browser back to the
/// creator's page.
#[utoipa::path(
    post,
    path = "/api/razorpay",
    tag = "webhook",
    responses(
        (status = 303, description = "Payment reconciled; redirect to the creator's page"),
        (status = 400, description = "Callback failed verification", body = ErrorResponse)
    )
)]
#[instrument(skip(state, callback))]
pub async fn razorpay_callback(
    State(state): State<AppState>,
    Form(callback): Form<PaymentCallback>,
) -> Result<Redirect, (StatusCode, Json<ErrorResponse>)> {
    match donation::reconcile_payment(
        &state.db,
        state.gateway.as_ref(),
        &state.config.gateway,
        &callback,
    )
    .await
    {
        Ok(payment) => {
            info!("Payment {} reconciled for '{}'", payment.oid, payment.to_user);

            // The supporter list just changed.
            state
                .cache
                .invalidate(&payments_cache_key(&payment.to_user))
                .await;

            let target = format!(
                "{}/{}?paymentdone=true",
                state.config.public_base_url.trim_end_matches('/'),
                payment.to_user
            );
            Ok(Redirect::to(&target))
        }
        Err(err) => {
            error!(
                "Callback rejected for order '{}': {}",
                callback.razorpay_order_id, err
            );
            Err(error_response(&err))
        }
    }
}
