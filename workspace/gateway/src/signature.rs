//! Checkout callback signature verification.
//!
//! Razorpay signs the callback with HMAC-SHA256 over
//! `"{order_id}|{payment_id}"` keyed with the API secret, hex encoded. The
//! callback receiver must verify this before reconciling anything.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify a callback signature against the secret that created the order.
///
/// Returns false for malformed (non-hex) signatures rather than erroring;
/// an attacker-controlled field never becomes an error path.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> bool {
    let Ok(provided) = hex::decode(signature.trim()) else {
        return false;
    };

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(signed_payload(order_id, payment_id).as_bytes());
    // verify_slice is constant-time.
    mac.verify_slice(&provided).is_ok()
}

/// Compute the signature for an order/payment pair. Exposed so tests and
/// local tooling can produce valid callbacks.
pub fn sign_payment(order_id: &str, payment_id: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(signed_payload(order_id, payment_id).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn signed_payload(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}|{payment_id}")
}
