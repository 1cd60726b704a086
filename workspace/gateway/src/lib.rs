//! Razorpay order-gateway adapter.
//!
//! The donation core talks to the payment gateway exclusively through the
//! [`OrderGateway`] trait; [`RazorpayClient`] is the live HTTP
//! implementation and `MockGateway` (behind the `testkit` feature) the
//! in-memory one used by tests.

pub mod credentials;
pub mod error;
pub mod razorpay;
pub mod signature;
pub mod types;

#[cfg(any(test, feature = "testkit"))]
pub mod mock;

pub use credentials::Credentials;
pub use error::GatewayError;
pub use razorpay::RazorpayClient;
pub use types::{Order, OrderRequest};

#[cfg(any(test, feature = "testkit"))]
pub use mock::{MockGateway, MockMode};

use async_trait::async_trait;

/// The seam between the donation core and the external payment gateway.
///
/// Credentials are passed per call rather than held by the adapter because
/// they are resolved per recipient (process-wide keys first, then the
/// recipient's stored pair).
#[async_trait]
pub trait OrderGateway: Send + Sync + std::fmt::Debug {
    /// Create an order denominated in minor currency units.
    async fn create_order(
        &self,
        credentials: &Credentials,
        request: &OrderRequest,
    ) -> Result<Order, GatewayError>;

    /// Fetch an existing order by its gateway id.
    async fn fetch_order(
        &self,
        credentials: &Credentials,
        order_id: &str,
    ) -> Result<Order, GatewayError>;
}
