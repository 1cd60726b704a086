//! Business core of the crowdfunding platform: order initiation, callback
//! reconciliation, supporter/profile queries, and profile updates with the
//! username-rename cascade.
//!
//! Every operation here is a request-scoped unit of work over the shared
//! datastore; there is no in-process coordination between concurrent
//! invocations. The schema's unique constraints are the authoritative guard
//! where that matters (see [`profile::update_profile`]).

pub mod error;
pub mod initiate;
pub mod payments;
pub mod profile;
pub mod reconcile;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub use error::DonationError;
pub use initiate::{DonationForm, InitiatedOrder, initiate};
pub use payments::{PaymentRecord, fetch_payments_for_user};
pub use profile::{ProfileUpdate, update_profile};
pub use reconcile::reconcile_payment;
pub use users::{UserRecord, fetch_user};

use gateway::{Credentials, GatewayError};
use model::entities::user;

/// Process-wide gateway configuration, resolved once at startup and injected
/// into every operation that talks to the gateway. Either field may be
/// absent; recipients can carry their own stored pair as a fallback.
#[derive(Debug, Clone, Default)]
pub struct GatewaySettings {
    pub key_id: Option<String>,
    pub key_secret: Option<String>,
}

impl GatewaySettings {
    /// Resolve the credentials to use for a recipient: process-wide values
    /// first, the recipient's stored pair as the per-field fallback.
    pub fn resolve_for(&self, recipient: &user::Model) -> Result<Credentials, GatewayError> {
        Credentials::resolve(
            self.key_id.as_deref(),
            self.key_secret.as_deref(),
            recipient.razorpay_id.as_deref(),
            recipient.razorpay_secret.as_deref(),
        )
    }
}
