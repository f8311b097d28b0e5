//! Http order client

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, IntoUrl};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use super::{OrderConnector, OrderRequest, OrderResponse};
use crate::error::{Error, ErrorResponse};
use crate::session::Credential;
use crate::store_url::StoreUrl;
use crate::types::PurchaseRequest;

#[derive(Debug, Clone)]
struct HttpClientCore {
    inner: Client,
}

impl HttpClientCore {
    fn new() -> Self {
        Self {
            inner: Client::new(),
        }
    }

    fn client(&self) -> &Client {
        &self.inner
    }

    async fn http_post<U: IntoUrl + Send, P: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        url: U,
        credential: &Credential,
        payload: &P,
    ) -> Result<R, Error> {
        let response = self
            .client()
            .post(url)
            .json(&payload)
            .header(AUTHORIZATION, credential.to_authorization_value())
            .send()
            .await
            .map_err(|e| {
                Error::HttpError(
                    e.status().map(|status_code| status_code.as_u16()),
                    e.to_string(),
                )
            })?;

        let status = response.status();

        let response = response.text().await.map_err(|e| {
            Error::HttpError(
                e.status().map(|status_code| status_code.as_u16()),
                e.to_string(),
            )
        })?;

        if !status.is_success() {
            // The exchange completed; the service answered with a denial.
            return Err(Error::Order(ErrorResponse::from_json(&response)));
        }

        serde_json::from_str::<R>(&response).map_err(|err| {
            tracing::warn!("Http Response error: {}", err);
            err.into()
        })
    }
}

/// Http Client
#[derive(Debug, Clone)]
pub struct HttpOrderClient {
    core: HttpClientCore,
    store_url: StoreUrl,
}

impl HttpOrderClient {
    /// Create new [`HttpOrderClient`]
    pub fn new(store_url: StoreUrl) -> Self {
        Self {
            core: HttpClientCore::new(),
            store_url,
        }
    }
}

#[async_trait]
impl OrderConnector for HttpOrderClient {
    #[instrument(skip(self, credential))]
    async fn submit_order(
        &self,
        credential: &Credential,
        request: &PurchaseRequest,
    ) -> Result<OrderResponse, Error> {
        let url = self.store_url.join_paths(&["v1", "orders"])?;

        self.core
            .http_post(url, credential, &OrderRequest::from(request))
            .await
    }
}
