//! End to end purchase flow against scripted collaborators.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cloudretail::checkout::{AUTH_FAILED_MESSAGE, NETWORK_ERROR_MESSAGE};
use cloudretail::order::OrderResponse;
use cloudretail::{
    catalog, CheckoutController, Credential, Error, OrderConnector, PurchaseRequest,
    SessionProvider, SubmissionState,
};

#[derive(Debug)]
struct ScriptedSession {
    credential: Option<Credential>,
    acquisitions: AtomicUsize,
}

impl ScriptedSession {
    fn signed_in() -> Arc<Self> {
        Arc::new(Self {
            credential: Some(Credential::new("tok-flow")),
            acquisitions: AtomicUsize::new(0),
        })
    }

    fn signed_out() -> Arc<Self> {
        Arc::new(Self {
            credential: None,
            acquisitions: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SessionProvider for ScriptedSession {
    async fn acquire_credential(&self) -> Result<Credential, Error> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        self.credential.clone().ok_or(Error::AuthUnavailable)
    }
}

#[derive(Debug)]
struct ScriptedConnector {
    responses: Mutex<VecDeque<Result<OrderResponse, Error>>>,
    submissions: AtomicUsize,
}

impl ScriptedConnector {
    fn new(responses: Vec<Result<OrderResponse, Error>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            submissions: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl OrderConnector for ScriptedConnector {
    async fn submit_order(
        &self,
        _credential: &Credential,
        _request: &PurchaseRequest,
    ) -> Result<OrderResponse, Error> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted connector ran out of responses")
    }
}

fn featured_request() -> PurchaseRequest {
    PurchaseRequest::new(catalog::FEATURED_PRODUCT_ID, 1).unwrap()
}

#[tokio::test]
async fn purchase_lifecycle_over_the_public_api() {
    let session = ScriptedSession::signed_in();
    let connector = ScriptedConnector::new(vec![
        Ok(OrderResponse {
            order_id: "ORD-100".to_string(),
        }),
        Err(Error::HttpError(None, "timed out".to_string())),
        Ok(OrderResponse {
            order_id: "ORD-101".to_string(),
        }),
    ]);
    let controller = CheckoutController::new(session.clone(), connector.clone());

    assert_eq!(controller.state(), SubmissionState::Idle);

    // First attempt settles in success.
    let settled = controller.submit(featured_request()).await;
    assert_eq!(settled.order_id(), Some("ORD-100"));

    // A transport failure surfaces as the generic network message and the
    // prior order id does not leak into the failed state.
    let settled = controller.submit(featured_request()).await;
    assert_eq!(settled.error_message(), Some(NETWORK_ERROR_MESSAGE));
    assert_eq!(settled.order_id(), None);

    // The machine is re-enterable after a failure.
    let settled = controller.submit(featured_request()).await;
    assert_eq!(settled.order_id(), Some("ORD-101"));

    assert_eq!(session.acquisitions.load(Ordering::SeqCst), 3);
    assert_eq!(connector.submissions.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn signed_out_shopper_gets_the_fixed_message() {
    let session = ScriptedSession::signed_out();
    let connector = ScriptedConnector::new(vec![]);
    let controller = CheckoutController::new(session, connector.clone());

    let settled = controller.submit(featured_request()).await;

    assert_eq!(settled.error_message(), Some(AUTH_FAILED_MESSAGE));
    assert_eq!(connector.submissions.load(Ordering::SeqCst), 0);
}
