//! Purchase submission state machine
//!
//! [`CheckoutController`] owns the [`SubmissionState`] the storefront
//! renders. One submission is a strictly sequential pipeline with two await
//! points: acquire a session credential, post the order, classify the
//! outcome.
//!
//! ```text
//!   Idle ─────────┐
//!   Succeeded ────┼─ submit() ──► Submitting ──► Succeeded | Failed
//!   Failed ───────┘                   │
//!                                     └─ submit() while in flight: dropped
//! ```
//!
//! Every failure path resolves into [`SubmissionState::Failed`] with a
//! displayable message; no error escapes to the presentation layer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::instrument;

use crate::order::{OrderConnector, OrderOutcome};
use crate::session::SessionProvider;
use crate::types::PurchaseRequest;

/// Message shown when no session credential could be acquired
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed. Please refresh.";

/// Message shown when the order service could not be reached
pub const NETWORK_ERROR_MESSAGE: &str = "Network Error";

/// Display state of the current or most recent purchase attempt
///
/// `Succeeded` and `Failed` are display states, not dead ends: the next
/// `submit()` re-enters `Submitting` and clears the prior result. Carrying
/// the order id and the failure message on their own variants keeps the two
/// mutually exclusive by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase")]
pub enum SubmissionState {
    /// No attempt in flight and no settled result
    #[default]
    Idle,
    /// An attempt is in flight; further purchase actions are dropped
    Submitting,
    /// The most recent attempt was accepted
    Succeeded {
        /// Opaque identifier the order service assigned
        #[serde(rename = "orderId")]
        order_id: String,
    },
    /// The most recent attempt failed
    Failed {
        /// Displayable cause
        #[serde(rename = "errorMessage")]
        message: String,
    },
}

impl SubmissionState {
    /// Whether an attempt is currently in flight
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Order id of the most recent attempt, when it succeeded
    pub fn order_id(&self) -> Option<&str> {
        match self {
            Self::Succeeded { order_id } => Some(order_id),
            _ => None,
        }
    }

    /// Failure message of the most recent attempt, when it failed
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Purchase request controller
///
/// Owns the submission state machine. Presentation reads state through
/// [`CheckoutController::subscribe`] and triggers transitions only through
/// [`CheckoutController::submit`].
#[derive(Debug)]
pub struct CheckoutController {
    session: Arc<dyn SessionProvider + Send + Sync>,
    connector: Arc<dyn OrderConnector + Send + Sync>,
    state: watch::Sender<SubmissionState>,
    in_flight: AtomicBool,
}

impl CheckoutController {
    /// Create new [`CheckoutController`] in the `Idle` state
    pub fn new(
        session: Arc<dyn SessionProvider + Send + Sync>,
        connector: Arc<dyn OrderConnector + Send + Sync>,
    ) -> Self {
        let (state, _) = watch::channel(SubmissionState::default());
        Self {
            session,
            connector,
            state,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current submission state
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Subscribe to submission state changes
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Run one purchase attempt to a settled state
    ///
    /// Publishes `Submitting`, then the terminal classification of the
    /// attempt, and returns it. A call made while another attempt is in
    /// flight is dropped without dispatching a second order: the unchanged
    /// current state is returned.
    #[instrument(skip(self))]
    pub async fn submit(&self, request: PurchaseRequest) -> SubmissionState {
        // The UI disables its trigger while submitting, but a fast double
        // trigger must still not dispatch twice. The claim happens before
        // any state is touched.
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Submission already in flight, dropping purchase action");
            return self.state();
        }

        self.state.send_replace(SubmissionState::Submitting);

        let settled = self.run_attempt(&request).await;

        self.state.send_replace(settled.clone());
        self.in_flight.store(false, Ordering::Release);

        settled
    }

    async fn run_attempt(&self, request: &PurchaseRequest) -> SubmissionState {
        let credential = match self.session.acquire_credential().await {
            Ok(credential) => credential,
            Err(err) => {
                tracing::warn!("Could not acquire session credential: {}", err);
                return SubmissionState::Failed {
                    message: AUTH_FAILED_MESSAGE.to_string(),
                };
            }
        };

        let result = self.connector.submit_order(&credential, request).await;

        match OrderOutcome::classify(result) {
            OrderOutcome::Accepted { order_id } => SubmissionState::Succeeded { order_id },
            OrderOutcome::Rejected { reason } => SubmissionState::Failed { message: reason },
            OrderOutcome::Unreachable => SubmissionState::Failed {
                message: NETWORK_ERROR_MESSAGE.to_string(),
            },
        }
    }
}
