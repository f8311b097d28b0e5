//! Open Id Connect

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;

use super::{Credential, SessionProvider};
use crate::util::unix_time;

/// Leeway subtracted from the token lifetime when judging freshness, so a
/// credential handed to the order call does not expire mid-flight.
const EXPIRY_LEEWAY_SECS: u64 = 10;

/// OIDC Error
#[derive(Debug, Error)]
pub enum Error {
    /// From Reqwest error
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    /// No user is signed in
    #[error("No signed in session")]
    NotSignedIn,
    /// Session expired with no refresh token to renew it
    #[error("Session expired")]
    SessionExpired,
}

impl From<Error> for crate::error::Error {
    fn from(value: Error) -> Self {
        tracing::debug!("Session acquisition failed: {}", value);
        crate::error::Error::AuthUnavailable
    }
}

/// Open Id Config
#[derive(Debug, Clone, Deserialize)]
pub struct OidcConfig {
    /// Token endpoint used for refresh grants
    pub token_endpoint: String,
    /// Issuer of the session tokens
    pub issuer: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
enum GrantType {
    RefreshToken,
}

#[derive(Debug, Clone, Serialize)]
struct RefreshTokenRequest {
    grant_type: GrantType,
    client_id: String,
    refresh_token: String,
}

/// Token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Bearer access token
    pub access_token: String,
    /// Rotated refresh token, when the identity backend issues one
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds
    pub expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct StoredSession {
    access_token: String,
    refresh_token: Option<String>,
    /// Absolute unix expiry; `None` means the backend did not bound it
    expires_at: Option<u64>,
}

impl StoredSession {
    fn is_fresh(&self, now: u64) -> bool {
        match self.expires_at {
            Some(expires_at) => now + EXPIRY_LEEWAY_SECS < expires_at,
            None => true,
        }
    }
}

/// Session provider backed by an OpenID Connect identity service
#[derive(Debug, Clone)]
pub struct OidcSessionProvider {
    client: Client,
    openid_discovery: String,
    client_id: String,
    oidc_config: Arc<RwLock<Option<OidcConfig>>>,
    session: Arc<RwLock<Option<StoredSession>>>,
}

impl OidcSessionProvider {
    /// Create new [`OidcSessionProvider`]
    pub fn new(openid_discovery: String, client_id: String) -> Self {
        Self {
            client: Client::new(),
            openid_discovery,
            client_id,
            oidc_config: Arc::new(RwLock::new(None)),
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Install tokens obtained from an interactive sign in
    #[instrument(skip_all)]
    pub async fn sign_in(
        &self,
        access_token: String,
        refresh_token: Option<String>,
        expires_in: Option<i64>,
    ) {
        let now = unix_time();
        let session = StoredSession {
            access_token,
            refresh_token,
            expires_at: expires_in.map(|secs| now + secs.max(0) as u64),
        };
        *self.session.write().await = Some(session);
    }

    /// Forget the current session
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        *self.session.write().await = None;
    }

    /// Get config from oidc server
    #[instrument(skip(self))]
    pub async fn get_oidc_config(&self) -> Result<OidcConfig, Error> {
        tracing::debug!("Getting oidc config");
        let oidc_config = self
            .client
            .get(&self.openid_discovery)
            .send()
            .await?
            .json::<OidcConfig>()
            .await?;

        let mut current_config = self.oidc_config.write().await;

        *current_config = Some(oidc_config.clone());

        Ok(oidc_config)
    }

    async fn token_endpoint(&self) -> Result<String, Error> {
        let cached = { self.oidc_config.read().await.clone() };
        let config = match cached {
            Some(config) => config,
            None => self.get_oidc_config().await?,
        };
        Ok(config.token_endpoint)
    }

    /// Get new access token using refresh token
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_access_token(
        &self,
        refresh_token: String,
    ) -> Result<TokenResponse, Error> {
        let token_url = self.token_endpoint().await?;

        let request = RefreshTokenRequest {
            grant_type: GrantType::RefreshToken,
            client_id: self.client_id.clone(),
            refresh_token,
        };

        let response = self
            .client
            .post(token_url)
            .form(&request)
            .send()
            .await?
            .json::<TokenResponse>()
            .await?;

        Ok(response)
    }
}

#[async_trait]
impl SessionProvider for OidcSessionProvider {
    #[instrument(skip(self))]
    async fn acquire_credential(&self) -> Result<Credential, crate::error::Error> {
        let now = unix_time();
        let stored = { self.session.read().await.clone() }.ok_or(Error::NotSignedIn)?;

        if stored.is_fresh(now) {
            return Ok(Credential::new(stored.access_token));
        }

        let refresh_token = stored
            .refresh_token
            .clone()
            .ok_or(Error::SessionExpired)?;

        tracing::debug!("Access token expired, refreshing against the identity backend");
        let token_response = self.refresh_access_token(refresh_token).await?;

        let access_token = token_response.access_token.clone();
        let renewed = StoredSession {
            access_token: token_response.access_token,
            // Keep the previous refresh token when the backend does not rotate it
            refresh_token: token_response.refresh_token.or(stored.refresh_token),
            expires_at: token_response.expires_in.map(|secs| now + secs.max(0) as u64),
        };
        *self.session.write().await = Some(renewed);

        Ok(Credential::new(access_token))
    }
}
