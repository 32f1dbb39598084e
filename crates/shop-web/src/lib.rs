//! # shop-web
//!
//! HTTP delivery layer for storefront-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server serving page props
//! - The static page store (revalidation + on-demand generation)
//! - The checkout proxy endpoint
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/v1/pages/home` | Home page props |
//! | GET | `/api/v1/pages/products/:id` | Product detail props |
//! | POST | `/api/v1/checkout` | Initiate checkout (303 to session URL) |

pub mod checkout;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;

pub use checkout::HttpCheckoutGateway;
pub use pages::{PageResponse, PageStore};
pub use routes::create_router;
pub use state::{AppConfig, AppState};
