use gateway::GatewayError;
use sea_orm::DbErr;
use thiserror::Error;

/// Error taxonomy of the donation core.
///
/// Validation and not-found conditions fail before any external call.
/// Gateway and storage failures are classified at the operation boundary;
/// anything unclassified propagates as [`DonationError::Database`] so it
/// stays visible for diagnosis. Every variant renders a message fit to show
/// the end user as a notification.
#[derive(Error, Debug)]
pub enum DonationError {
    #[error("User not found")]
    RecipientNotFound,

    #[error("Invalid amount. Minimum amount is \u{20b9}1 (100 paise)")]
    InvalidAmount,

    #[error(
        "Payment gateway not configured. Please set RAZORPAY_KEY_ID and RAZORPAY_KEY_SECRET in environment variables or dashboard settings."
    )]
    GatewayNotConfigured,

    #[error(
        "Invalid Razorpay credentials. Please check your environment variables or dashboard settings."
    )]
    InvalidCredentials,

    #[error("Razorpay authentication failed. Please check your API keys in the dashboard settings.")]
    AuthenticationFailed,

    #[error("The payment gateway did not respond in time. Please try again.")]
    Timeout,

    /// Any other gateway-reported failure, carrying the gateway's own
    /// description.
    #[error("{0}")]
    Gateway(String),

    #[error("Database storage limit exceeded. Please contact support.")]
    StorageExhausted,

    /// Soft, user-correctable: required profile fields missing or empty.
    #[error("{0}")]
    Validation(String),

    /// Soft, user-correctable: the requested username belongs to someone
    /// else.
    #[error("Username already exists")]
    UsernameTaken,

    /// The gateway callback failed authenticity or amount verification;
    /// nothing was written.
    #[error("Payment verification failed")]
    CallbackRejected,

    #[error("Failed to fetch user data")]
    FetchFailed,

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl DonationError {
    /// Stable machine-readable code for API error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RecipientNotFound => "USER_NOT_FOUND",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::GatewayNotConfigured => "GATEWAY_NOT_CONFIGURED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AuthenticationFailed => "GATEWAY_AUTHENTICATION_FAILED",
            Self::Timeout => "GATEWAY_TIMEOUT",
            Self::Gateway(_) => "GATEWAY_ERROR",
            Self::StorageExhausted => "STORAGE_EXHAUSTED",
            Self::Validation(_) => "INVALID_PROFILE_DATA",
            Self::UsernameTaken => "USERNAME_ALREADY_EXISTS",
            Self::CallbackRejected => "PAYMENT_VERIFICATION_FAILED",
            Self::FetchFailed => "FETCH_FAILED",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Classify a storage failure: quota-style errors get their own kind,
    /// everything else propagates unchanged.
    pub(crate) fn from_db(error: DbErr) -> Self {
        if is_quota_error(&error) {
            Self::StorageExhausted
        } else {
            Self::Database(error)
        }
    }
}

impl From<GatewayError> for DonationError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::NotConfigured => Self::GatewayNotConfigured,
            GatewayError::InvalidCredentials => Self::InvalidCredentials,
            GatewayError::AuthenticationFailed => Self::AuthenticationFailed,
            GatewayError::Timeout => Self::Timeout,
            GatewayError::Api { description, .. } => Self::Gateway(description),
            GatewayError::Transport(message) => Self::Gateway(message),
        }
    }
}

pub(crate) fn is_quota_error(error: &DbErr) -> bool {
    error.to_string().to_lowercase().contains("quota")
}

/// Unique-constraint violations on the rename write are the authoritative
/// "username taken" signal; the driver only exposes them via the message.
pub(crate) fn is_unique_violation(error: &DbErr) -> bool {
    let message = error.to_string().to_lowercase();
    message.contains("unique") || message.contains("constraint")
}
