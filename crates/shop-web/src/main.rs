//! # Storefront RS
//!
//! Statically generated storefront backed by the Stripe catalog.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export CHECKOUT_ENDPOINT_URL=https://checkout.example/api/checkout
//!
//! # Run the server
//! storefront
//! ```

use shop_web::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Static path plan: {} pre-rendered ids, fallback={:?}",
        state.pages.plan().prerender.len(),
        state.pages.plan().fallback
    );

    // Build-time pass: generate the home page and the listed product pages
    state.pages.prerender().await?;

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Storefront starting on http://{}", addr);

    if !is_prod {
        info!("Home props: http://{}/api/v1/pages/home", addr);
        info!("Checkout: POST http://{}/api/v1/checkout", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
