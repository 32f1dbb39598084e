//! # Request Handlers
//!
//! Axum request handlers for the storefront page-data API and the checkout
//! proxy. Page handlers return the props the templates consume; the template
//! rendering itself lives elsewhere.

use crate::pages::PageResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use shop_core::{
    CheckoutFlow, CheckoutRequest, CheckoutState, HomeProps, Navigator, ProductProps, StoreError,
    CHECKOUT_FAILURE_NOTICE,
};
use std::sync::Mutex;
use tracing::{error, info, instrument};

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

fn store_error_to_response(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Home page props (catalog listing flow)
#[instrument(skip(state))]
pub async fn home_page(
    State(state): State<AppState>,
) -> Result<Json<HomeProps>, (StatusCode, Json<ErrorResponse>)> {
    let page = state.pages.home_page().await.map_err(|e| {
        error!("Failed to generate home page: {}", e);
        store_error_to_response(e)
    })?;

    Ok(Json(page.props))
}

/// Product detail props (product detail flow)
#[instrument(skip(state), fields(product_id = %product_id))]
pub async fn product_page(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    match state.pages.product_page(&product_id).await {
        Ok(PageResponse::Ready(page)) => Ok(Json::<ProductProps>(page.props).into_response()),
        Ok(PageResponse::Generating) => {
            // First-time generation in flight; the page shows a loading state
            Ok((
                StatusCode::ACCEPTED,
                Json(serde_json::json!({ "status": "generating" })),
            )
                .into_response())
        }
        Err(e) => {
            error!("Failed to generate product page: {}", e);
            Err(store_error_to_response(e))
        }
    }
}

/// Captures the URL the checkout flow navigates to, so the handler can
/// answer with a browser redirect
#[derive(Default)]
struct RedirectCapture {
    target: Mutex<Option<String>>,
}

impl RedirectCapture {
    fn target(&self) -> Option<String> {
        self.target.lock().expect("redirect target lock").clone()
    }
}

impl Navigator for RedirectCapture {
    fn navigate(&self, url: &str) {
        *self.target.lock().expect("redirect target lock") = Some(url.to_string());
    }
}

/// Checkout initiation: forward the price id to the checkout-creation
/// endpoint and redirect the browser to the session URL
#[instrument(skip(state, request), fields(price_id = %request.price_id))]
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let flow = CheckoutFlow::new();
    let navigator = RedirectCapture::default();

    let outcome = flow
        .trigger(&request.price_id, state.checkout.as_ref(), &navigator)
        .await;

    match (outcome, navigator.target()) {
        (CheckoutState::Redirected, Some(url)) => {
            info!("Redirecting to checkout session: {}", url);
            Ok(Redirect::to(&url).into_response())
        }
        _ => Err((
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::new(CHECKOUT_FAILURE_NOTICE, 502)),
        )),
    }
}
