//! In-memory stand-in for the Razorpay Orders API, used by tests across the
//! workspace. Orders it creates are retained so `fetch_order` behaves like
//! the real gateway's lookup.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::OrderGateway;
use crate::credentials::Credentials;
use crate::error::GatewayError;
use crate::types::{Order, OrderRequest};

/// Failure modes the mock can simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    Ok,
    AuthFailure,
    ApiError,
    Timeout,
}

#[derive(Debug)]
pub struct MockGateway {
    orders: Mutex<Vec<Order>>,
    next_id: AtomicU64,
    mode: MockMode,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::with_mode(MockMode::Ok)
    }

    pub fn with_mode(mode: MockMode) -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            mode,
        }
    }

    /// Snapshot of every order created so far.
    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }

    /// Seed an order directly, bypassing `create_order`. Lets tests set up
    /// mismatches between the gateway's record and the stored payment.
    pub fn insert_order(&self, order: Order) {
        self.orders.lock().unwrap().push(order);
    }

    fn simulated_failure(&self) -> Option<GatewayError> {
        match self.mode {
            MockMode::Ok => None,
            MockMode::AuthFailure => Some(GatewayError::AuthenticationFailed),
            MockMode::ApiError => Some(GatewayError::Api {
                status: 500,
                description: "mock gateway is on fire".to_string(),
            }),
            MockMode::Timeout => Some(GatewayError::Timeout),
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderGateway for MockGateway {
    async fn create_order(
        &self,
        _credentials: &Credentials,
        request: &OrderRequest,
    ) -> Result<Order, GatewayError> {
        if let Some(err) = self.simulated_failure() {
            return Err(err);
        }

        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let order = Order {
            id: format!("order_MOCK{n:06}"),
            amount: request.amount,
            currency: request.currency.clone(),
            receipt: Some(request.receipt.clone()),
            status: Some("created".to_string()),
        };

        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn fetch_order(
        &self,
        _credentials: &Credentials,
        order_id: &str,
    ) -> Result<Order, GatewayError> {
        if let Some(err) = self.simulated_failure() {
            return Err(err);
        }

        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|order| order.id == order_id)
            .cloned()
            .ok_or_else(|| GatewayError::Api {
                status: 400,
                description: format!("order {order_id} does not exist"),
            })
    }
}
