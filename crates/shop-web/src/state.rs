//! # Application State
//!
//! Shared state for the Axum application.
//! Wires the catalog provider, page store, and checkout gateway together;
//! everything is injected so tests can swap in stubs.

use crate::checkout::HttpCheckoutGateway;
use crate::pages::PageStore;
use shop_core::{BoxedCatalogProvider, CheckoutGateway, StaticPathPlan};
use shop_stripe::StripeCatalog;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the storefront
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Checkout-session-creation endpoint (separately deployed)
    pub checkout_endpoint: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url =
            std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let checkout_endpoint = std::env::var("CHECKOUT_ENDPOINT_URL")
            .unwrap_or_else(|_| format!("{}/api/checkout", base_url));

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            checkout_endpoint,
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Generated page cache
    pub pages: PageStore,
    /// Checkout-creation client
    pub checkout: Arc<dyn CheckoutGateway>,
}

impl AppState {
    /// Create state backed by the Stripe catalog and the configured checkout
    /// endpoint
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let plan = load_static_path_plan();

        let catalog = StripeCatalog::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        let checkout = Arc::new(HttpCheckoutGateway::new(config.checkout_endpoint.clone()));

        Ok(Self::with_parts(config, Arc::new(catalog), plan, checkout))
    }

    /// Create state from explicit parts (used by tests)
    pub fn with_parts(
        config: AppConfig,
        catalog: BoxedCatalogProvider,
        plan: StaticPathPlan,
        checkout: Arc<dyn CheckoutGateway>,
    ) -> Self {
        Self {
            config,
            pages: PageStore::new(catalog, plan),
            checkout,
        }
    }
}

/// Load the static path plan from config, falling back to pure on-demand
/// generation
fn load_static_path_plan() -> StaticPathPlan {
    let config_paths = [
        "config/prerender.toml",
        "../config/prerender.toml",
        "../../config/prerender.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            match StaticPathPlan::from_toml(&content) {
                Ok(plan) => {
                    tracing::info!(
                        "Loaded static path plan from {}: {} pre-rendered ids",
                        path,
                        plan.prerender.len()
                    );
                    return plan;
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path, e);
                }
            }
        }
    }

    tracing::info!("No static path plan found, generating all pages on demand");
    StaticPathPlan::on_demand()
}
