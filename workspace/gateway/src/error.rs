use thiserror::Error;

/// Failures surfaced by the gateway adapter.
///
/// Configuration and credential problems are detected before any network
/// call; the remaining variants classify what the gateway (or the wire)
/// reported.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(
        "Payment gateway not configured. Please set RAZORPAY_KEY_ID and RAZORPAY_KEY_SECRET in environment variables or dashboard settings."
    )]
    NotConfigured,

    #[error(
        "Invalid Razorpay credentials. Please check your environment variables or dashboard settings."
    )]
    InvalidCredentials,

    #[error("Razorpay authentication failed. Please check your API keys in the dashboard settings.")]
    AuthenticationFailed,

    #[error("The payment gateway did not respond in time. Please try again.")]
    Timeout,

    /// Any other error the gateway reported, carrying its own description.
    #[error("{description}")]
    Api { status: u16, description: String },

    #[error("Failed to reach the payment gateway: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport(error.to_string())
        }
    }
}
