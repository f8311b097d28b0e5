//! Errors

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// CloudRetail Error
#[derive(Debug, Error)]
pub enum Error {
    /// No user is signed in, or the session could not be silently refreshed
    #[error("Session credential unavailable")]
    AuthUnavailable,
    /// Storefront responded but declined the order
    #[error("{0}")]
    Order(ErrorResponse),
    /// HTTP error
    #[error("HTTP error {0:?}: {1}")]
    HttpError(Option<u16>, String),
    /// Product id may not be empty
    #[error("Product id cannot be empty")]
    EmptyProductId,
    /// Quantity below the minimum of one
    #[error("Quantity must be at least 1")]
    ZeroQuantity,
    /// Url Error
    #[error(transparent)]
    Url(#[from] crate::store_url::Error),
    /// Serde Error
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    /// Custom Error
    #[error("`{0}`")]
    Custom(String),
}

/// Order API Error Response
///
/// Body returned by the order endpoint when it declines a purchase. The
/// `message` field is optional on the wire; callers fall back to a generic
/// message when it is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable cause of the rejection
    pub message: Option<String>,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "order rejected: {}", message),
            None => write!(f, "order rejected"),
        }
    }
}

impl ErrorResponse {
    /// Create new [`ErrorResponse`]
    pub fn new(message: Option<String>) -> Self {
        Self { message }
    }

    /// Error response from json
    ///
    /// Never fails: a body that does not match the documented error shape
    /// yields a response without a message.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str::<Value>(json)
            .map(Self::from_value)
            .unwrap_or_default()
    }

    /// Error response from json Value
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value::<ErrorResponse>(value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_with_message() {
        let response = ErrorResponse::from_json(r#"{"message":"Out of stock"}"#);
        assert_eq!(response.message.as_deref(), Some("Out of stock"));
    }

    #[test]
    fn error_response_without_message() {
        let response = ErrorResponse::from_json(r#"{"status":422}"#);
        assert_eq!(response.message, None);
    }

    #[test]
    fn error_response_from_malformed_body() {
        let response = ErrorResponse::from_json("<html>502 Bad Gateway</html>");
        assert_eq!(response.message, None);

        let response = ErrorResponse::from_json("[1,2,3]");
        assert_eq!(response.message, None);
    }
}
