//! Session provider adapter
//!
//! Wraps the identity backend behind a single capability: return the current
//! valid bearer credential or signal unavailability. The purchase controller
//! never inspects credential contents, only their presence.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub mod oidc;

pub use oidc::OidcSessionProvider;

/// Opaque bearer credential proving the current signed-in session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential(String);

impl Credential {
    /// Create new [`Credential`]
    pub fn new<S>(token: S) -> Self
    where
        S: Into<String>,
    {
        Self(token.into())
    }

    /// Value for the `Authorization` request header
    pub fn to_authorization_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

/// Interface that supplies the current valid session credential.
///
/// A single attempt per call; implementations may transparently refresh
/// against the identity backend but must not retry. All denial causes (no
/// signed-in user, expired session, unreachable backend) surface as
/// [`Error::AuthUnavailable`].
#[async_trait]
pub trait SessionProvider: Debug {
    /// Get a non-expired bearer credential for the signed-in user
    async fn acquire_credential(&self) -> Result<Credential, Error>;
}
