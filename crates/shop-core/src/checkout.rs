//! # Checkout Initiation Flow
//!
//! State machine for the "buy now" flow on a product page:
//!
//! ```text
//!   Idle ──trigger──▶ Pending ──▶ Redirected   (terminal)
//!                        │
//!                        └──────▶ Failed       (re-triggerable)
//! ```
//!
//! A flow instance is scoped to one page instance. While a request is
//! `Pending` further triggers are ignored, so at most one checkout-creation
//! request is ever in flight. On success the browser is navigated to the
//! returned URL and the flow never re-enables (navigation away is expected).
//! On failure the trigger re-enables and a fixed notice is surfaced; no
//! automatic retry.

use crate::error::StoreResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Fixed user-facing notice shown when checkout creation fails
pub const CHECKOUT_FAILURE_NOTICE: &str = "Falha ao criar checkout";

/// Request body sent to the checkout-creation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Identifier of the price object to check out
    pub price_id: String,
}

/// Successful response from the checkout-creation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRedirect {
    /// Hosted checkout page to navigate the browser to
    pub checkout_url: String,
}

/// Client for the (separately deployed) checkout-session-creation endpoint.
///
/// Any transport failure, non-2xx status, or malformed body must surface as
/// an `Err`; the flow treats all of them the same way.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn create_session(&self, price_id: &str) -> StoreResult<CheckoutRedirect>;
}

/// Browser-navigation collaborator, stubbable in tests
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// State of a checkout flow instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    /// No checkout attempted yet; trigger enabled
    Idle,
    /// Checkout-creation request in flight; trigger disabled
    Pending,
    /// Session created and browser navigated; trigger stays disabled
    Redirected,
    /// Last attempt failed; trigger re-enabled
    Failed,
}

impl CheckoutState {
    /// Whether the purchase trigger is enabled in this state
    pub fn can_trigger(&self) -> bool {
        matches!(self, CheckoutState::Idle | CheckoutState::Failed)
    }
}

/// One page instance's checkout flow
pub struct CheckoutFlow {
    state: Mutex<CheckoutState>,
}

impl CheckoutFlow {
    /// Create a new flow in the `Idle` state
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CheckoutState::Idle),
        }
    }

    /// Current state
    pub fn state(&self) -> CheckoutState {
        *self.state.lock().expect("checkout state lock")
    }

    /// The failure notice to show the user, if the last attempt failed
    pub fn failure_notice(&self) -> Option<&'static str> {
        matches!(self.state(), CheckoutState::Failed).then_some(CHECKOUT_FAILURE_NOTICE)
    }

    /// Attempt to start a checkout for `price_id`.
    ///
    /// Returns the resulting state. Triggers while `Pending` or `Redirected`
    /// are no-ops and issue no request.
    pub async fn trigger(
        &self,
        price_id: &str,
        gateway: &dyn CheckoutGateway,
        navigator: &dyn Navigator,
    ) -> CheckoutState {
        {
            let mut state = self.state.lock().expect("checkout state lock");
            if !state.can_trigger() {
                return *state;
            }
            *state = CheckoutState::Pending;
        }

        match gateway.create_session(price_id).await {
            Ok(redirect) => {
                navigator.navigate(&redirect.checkout_url);
                self.set(CheckoutState::Redirected)
            }
            Err(_err) => {
                // Wire an external error-monitoring collaborator here.
                self.set(CheckoutState::Failed)
            }
        }
    }

    fn set(&self, next: CheckoutState) -> CheckoutState {
        let mut state = self.state.lock().expect("checkout state lock");
        *state = next;
        next
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubGateway {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubGateway {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CheckoutGateway for StubGateway {
        async fn create_session(&self, _price_id: &str) -> StoreResult<CheckoutRedirect> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Suspend once so a concurrent trigger observes Pending
            tokio::task::yield_now().await;
            if self.fail {
                Err(StoreError::CheckoutCreationFailed("simulated".into()))
            } else {
                Ok(CheckoutRedirect {
                    checkout_url: "https://pay.example/sess_1".into(),
                })
            }
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &str) {
            self.visited.lock().unwrap().push(url.to_string());
        }
    }

    #[tokio::test]
    async fn test_success_navigates_once_and_stays_disabled() {
        let flow = CheckoutFlow::new();
        let gateway = StubGateway::new(false);
        let navigator = RecordingNavigator::default();

        let state = flow.trigger("price_1", &gateway, &navigator).await;
        assert_eq!(state, CheckoutState::Redirected);
        assert_eq!(
            navigator.visited.lock().unwrap().as_slice(),
            ["https://pay.example/sess_1"]
        );

        // Terminal: a later trigger issues no second request
        let state = flow.trigger("price_1", &gateway, &navigator).await;
        assert_eq!(state, CheckoutState::Redirected);
        assert_eq!(gateway.call_count(), 1);
        assert_eq!(navigator.visited.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_reenables_trigger_without_navigation() {
        let flow = CheckoutFlow::new();
        let gateway = StubGateway::new(true);
        let navigator = RecordingNavigator::default();

        let state = flow.trigger("price_1", &gateway, &navigator).await;
        assert_eq!(state, CheckoutState::Failed);
        assert!(state.can_trigger());
        assert_eq!(flow.failure_notice(), Some(CHECKOUT_FAILURE_NOTICE));
        assert!(navigator.visited.lock().unwrap().is_empty());

        // Manual re-trigger goes out again
        flow.trigger("price_1", &gateway, &navigator).await;
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_double_submit_sends_one_request() {
        let flow = CheckoutFlow::new();
        let gateway = StubGateway::new(false);
        let navigator = RecordingNavigator::default();

        let (first, second) = tokio::join!(
            flow.trigger("price_1", &gateway, &navigator),
            flow.trigger("price_1", &gateway, &navigator),
        );

        assert_eq!(gateway.call_count(), 1);
        assert_eq!(navigator.visited.lock().unwrap().len(), 1);
        // One of the two observed the in-flight request
        assert!(first == CheckoutState::Pending || second == CheckoutState::Pending);
    }

    #[test]
    fn test_idle_has_no_notice() {
        let flow = CheckoutFlow::new();
        assert_eq!(flow.state(), CheckoutState::Idle);
        assert!(flow.failure_notice().is_none());
    }
}
