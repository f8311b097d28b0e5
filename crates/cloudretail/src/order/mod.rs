//! Order API client
//!
//! One remote endpoint: a purchase submission. The client distinguishes a
//! completed HTTP exchange that the service answered with a denial
//! ([`OrderOutcome::Rejected`]) from a transport-level failure
//! ([`OrderOutcome::Unreachable`]); the two are surfaced to the shopper
//! differently.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::session::Credential;
use crate::types::PurchaseRequest;

pub mod http_client;

pub use http_client::HttpOrderClient;

/// Message shown when the service declines an order without saying why
pub const ORDER_FAILED_MESSAGE: &str = "Order failed";

/// Wire body of a purchase submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Product identifier
    #[serde(rename = "productId")]
    pub product_id: String,
    /// Number of units
    pub qty: u32,
}

impl From<&PurchaseRequest> for OrderRequest {
    fn from(request: &PurchaseRequest) -> Self {
        Self {
            product_id: request.product_id().to_string(),
            qty: request.quantity(),
        }
    }
}

/// Wire body of an accepted purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Opaque identifier assigned to the accepted order
    #[serde(rename = "orderId")]
    pub order_id: String,
}

/// Interface that connects the storefront to the order service. Typically
/// represents an [`HttpOrderClient`].
#[async_trait]
pub trait OrderConnector: Debug {
    /// Submit a purchase with the given session credential
    ///
    /// Exactly one network call per invocation; no automatic retry.
    async fn submit_order(
        &self,
        credential: &Credential,
        request: &PurchaseRequest,
    ) -> Result<OrderResponse, Error>;
}

/// Classified settlement of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// The service accepted the purchase
    Accepted {
        /// Opaque identifier assigned to the order
        order_id: String,
    },
    /// The service responded but declined the order
    Rejected {
        /// Displayable cause of the rejection
        reason: String,
    },
    /// The call could not complete
    Unreachable,
}

impl OrderOutcome {
    /// Classify the result of a [`OrderConnector::submit_order`] call
    pub fn classify(result: Result<OrderResponse, Error>) -> Self {
        match result {
            Ok(response) => {
                if response.order_id.is_empty() {
                    tracing::warn!("Order service accepted without an order id");
                    return Self::Unreachable;
                }
                Self::Accepted {
                    order_id: response.order_id,
                }
            }
            Err(Error::Order(response)) => Self::Rejected {
                reason: response
                    .message
                    .unwrap_or_else(|| ORDER_FAILED_MESSAGE.to_string()),
            },
            Err(err) => {
                tracing::warn!("Order service unreachable: {}", err);
                Self::Unreachable
            }
        }
    }
}
