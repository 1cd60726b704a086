use std::fmt;

use crate::error::GatewayError;

/// Anything shorter than this cannot be a real Razorpay key or secret, so
/// resolution rejects it before a network call is ever attempted.
const MIN_CREDENTIAL_LEN: usize = 10;

/// A resolved key id / secret pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key_id: String,
    pub key_secret: String,
}

impl Credentials {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }

    /// Resolve the pair to use for a recipient.
    ///
    /// Each field independently prefers the process-wide configured value
    /// and falls back to the recipient's stored one, matching how the
    /// platform's dashboard settings layer over the environment. Values are
    /// trimmed; blank strings fall through to the fallback.
    pub fn resolve(
        configured_key: Option<&str>,
        configured_secret: Option<&str>,
        user_key: Option<&str>,
        user_secret: Option<&str>,
    ) -> Result<Self, GatewayError> {
        let key_id = pick(configured_key, user_key);
        let key_secret = pick(configured_secret, user_secret);

        let (Some(key_id), Some(key_secret)) = (key_id, key_secret) else {
            return Err(GatewayError::NotConfigured);
        };

        if key_id.len() < MIN_CREDENTIAL_LEN || key_secret.len() < MIN_CREDENTIAL_LEN {
            return Err(GatewayError::InvalidCredentials);
        }

        Ok(Self { key_id, key_secret })
    }
}

fn pick(primary: Option<&str>, fallback: Option<&str>) -> Option<String> {
    primary
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| fallback.map(str::trim).filter(|value| !value.is_empty()))
        .map(str::to_owned)
}

// The secret must never end up in logs, so Debug prints only a key-id
// prefix.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.key_id.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("key_id", &format!("{prefix}..."))
            .field("key_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_values_win_over_user_values() {
        let creds = Credentials::resolve(
            Some("rzp_test_configured"),
            Some("configured_secret"),
            Some("rzp_test_user"),
            Some("user_secret_value"),
        )
        .unwrap();
        assert_eq!(creds.key_id, "rzp_test_configured");
        assert_eq!(creds.key_secret, "configured_secret");
    }

    #[test]
    fn falls_back_per_field() {
        // Key id from the environment, secret from the recipient's record.
        let creds = Credentials::resolve(
            Some("rzp_test_configured"),
            None,
            Some("rzp_test_user"),
            Some("user_secret_value"),
        )
        .unwrap();
        assert_eq!(creds.key_id, "rzp_test_configured");
        assert_eq!(creds.key_secret, "user_secret_value");
    }

    #[test]
    fn blank_configured_value_falls_through() {
        let creds = Credentials::resolve(
            Some("   "),
            Some("configured_secret"),
            Some("rzp_test_user"),
            None,
        )
        .unwrap();
        assert_eq!(creds.key_id, "rzp_test_user");
    }

    #[test]
    fn values_are_trimmed() {
        let creds = Credentials::resolve(
            Some("  rzp_test_configured  "),
            Some(" configured_secret "),
            None,
            None,
        )
        .unwrap();
        assert_eq!(creds.key_id, "rzp_test_configured");
        assert_eq!(creds.key_secret, "configured_secret");
    }

    #[test]
    fn missing_pair_is_not_configured() {
        let err = Credentials::resolve(None, None, None, None).unwrap_err();
        assert!(matches!(err, GatewayError::NotConfigured));

        // A key without any secret is equally unusable.
        let err = Credentials::resolve(Some("rzp_test_configured"), None, None, None).unwrap_err();
        assert!(matches!(err, GatewayError::NotConfigured));
    }

    #[test]
    fn implausibly_short_values_are_rejected() {
        let err =
            Credentials::resolve(Some("short"), Some("configured_secret"), None, None).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidCredentials));

        let err =
            Credentials::resolve(Some("rzp_test_configured"), Some("tiny"), None, None).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidCredentials));
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        let creds = Credentials::new("rzp_test_abcdef", "super_secret_value");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("rzp_test..."));
        assert!(!rendered.contains("super_secret_value"));
    }
}
