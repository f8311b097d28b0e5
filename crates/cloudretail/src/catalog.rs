//! Catalog
//!
//! The storefront sells a small fixed catalog; inventory management lives
//! entirely on the service side.

use serde::{Deserialize, Serialize};

/// Product id submitted when the shopper buys the featured catalog entry
pub const FEATURED_PRODUCT_ID: &str = "global-inventory";

/// A catalog entry rendered by the storefront
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque product identifier submitted with a purchase
    pub id: String,
    /// Display name
    pub name: String,
    /// Short display description
    pub description: String,
}

/// The built-in catalog shown on the landing page
pub fn builtin() -> Vec<Product> {
    vec![Product {
        id: FEATURED_PRODUCT_ID.to_string(),
        name: "Global Inventory".to_string(),
        description: "Browse our global inventory.".to_string(),
    }]
}
