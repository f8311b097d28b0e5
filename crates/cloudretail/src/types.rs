//! Types

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Purchase Request
///
/// Immutable value describing one purchase attempt. Constructed per attempt
/// and never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    product_id: String,
    quantity: u32,
}

impl PurchaseRequest {
    /// Create new [`PurchaseRequest`]
    ///
    /// # Errors
    ///
    /// Returns an error when `product_id` is empty or `quantity` is zero.
    pub fn new<S>(product_id: S, quantity: u32) -> Result<Self, Error>
    where
        S: Into<String>,
    {
        let product_id = product_id.into();
        if product_id.is_empty() {
            return Err(Error::EmptyProductId);
        }
        if quantity < 1 {
            return Err(Error::ZeroQuantity);
        }
        Ok(Self {
            product_id,
            quantity,
        })
    }

    /// Product being purchased
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Number of units, always at least 1
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}
