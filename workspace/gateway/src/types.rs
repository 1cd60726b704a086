use serde::{Deserialize, Serialize};

/// Order creation payload. `amount` is in minor currency units (paise for
/// INR); the gateway API never speaks major units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

/// A gateway-side order record, as returned by order creation and lookup.
/// Extra response fields the platform does not use are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// The parameter triple Razorpay posts back after checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentCallback {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_deserializes_from_gateway_response() {
        // Trimmed from a real orders.create response; unknown fields must
        // not break deserialization.
        let body = r#"{
            "id": "order_IluGWxBm9U8zJ8",
            "entity": "order",
            "amount": 5000,
            "amount_paid": 0,
            "amount_due": 5000,
            "currency": "INR",
            "receipt": "receipt_alice_1700000000000",
            "status": "created",
            "attempts": 0,
            "created_at": 1700000000
        }"#;

        let order: Order = serde_json::from_str(body).unwrap();
        assert_eq!(order.id, "order_IluGWxBm9U8zJ8");
        assert_eq!(order.amount, 5000);
        assert_eq!(order.currency, "INR");
        assert_eq!(order.status.as_deref(), Some("created"));
    }
}
