//! # shop-stripe
//!
//! Stripe catalog client for storefront-rs.
//!
//! This crate provides:
//!
//! 1. **StripeCatalog** - `CatalogProvider` implementation over the Stripe
//!    Products API, always requesting `default_price` expansion
//! 2. **Mappers** - pure functions shaping raw provider products into the
//!    display records consumed by page templates
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_stripe::StripeCatalog;
//! use shop_core::CatalogProvider;
//!
//! // Create the catalog client from environment
//! let catalog = StripeCatalog::from_env()?;
//!
//! // Catalog listing flow
//! let products = catalog.list_products().await?;
//!
//! // Product detail flow
//! let detail = catalog.get_product("prod_123").await?;
//! println!("{} costs {}", detail.name, detail.price);
//! ```

pub mod catalog;
pub mod config;

// Re-exports
pub use catalog::{map_catalog, to_detail, to_summary, DefaultPrice, StripeCatalog, StripePrice, StripeProduct};
pub use config::StripeConfig;
