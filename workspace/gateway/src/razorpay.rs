use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::OrderGateway;
use crate::credentials::Credentials;
use crate::error::GatewayError;
use crate::types::{Order, OrderRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.razorpay.com/v1";

/// All gateway calls are bounded; a hung gateway surfaces as
/// `GatewayError::Timeout` instead of falling into a generic failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Live HTTP adapter for the Razorpay Orders API.
#[derive(Debug, Clone)]
pub struct RazorpayClient {
    http: reqwest::Client,
    base_url: String,
}

/// Error envelope the gateway returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: Option<String>,
    description: Option<String>,
}

impl RazorpayClient {
    pub fn new() -> Result<Self, GatewayError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint, e.g. a local stub.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(GatewayError::from)?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    async fn parse_response(response: reqwest::Response) -> Result<Order, GatewayError> {
        let status = response.status();

        if status.is_success() {
            let order = response.json::<Order>().await?;
            debug!(order_id = %order.id, "gateway accepted the order request");
            return Ok(order);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!("gateway rejected the API keys");
            return Err(GatewayError::AuthenticationFailed);
        }

        let body = response.json::<ApiErrorBody>().await.ok();
        let detail = body.and_then(|b| b.error);

        // The gateway reports credential problems on some endpoints as a
        // BAD_REQUEST_ERROR rather than a 401.
        if detail
            .as_ref()
            .and_then(|d| d.code.as_deref())
            .is_some_and(|code| code == "BAD_REQUEST_ERROR")
        {
            warn!("gateway reported BAD_REQUEST_ERROR for the order request");
            return Err(GatewayError::AuthenticationFailed);
        }

        let description = detail.and_then(|d| d.description).unwrap_or_else(|| {
            format!(
                "Payment gateway error ({}). Please try again.",
                status.as_u16()
            )
        });

        Err(GatewayError::Api {
            status: status.as_u16(),
            description,
        })
    }
}

#[async_trait]
impl OrderGateway for RazorpayClient {
    #[instrument(skip(self, credentials))]
    async fn create_order(
        &self,
        credentials: &Credentials,
        request: &OrderRequest,
    ) -> Result<Order, GatewayError> {
        debug!(receipt = %request.receipt, amount = request.amount, "creating gateway order");

        let response = self
            .http
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&credentials.key_id, Some(&credentials.key_secret))
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    #[instrument(skip(self, credentials))]
    async fn fetch_order(
        &self,
        credentials: &Credentials,
        order_id: &str,
    ) -> Result<Order, GatewayError> {
        let response = self
            .http
            .get(format!("{}/orders/{}", self.base_url, order_id))
            .basic_auth(&credentials.key_id, Some(&credentials.key_secret))
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
