//! # shop-core
//!
//! Core types and traits for the storefront-rs page-generation engine.
//!
//! This crate provides:
//! - `CatalogProvider` trait as the seam to the payments provider's catalog
//! - `ProductSummary` and `ProductDetail` display records
//! - `CheckoutFlow` state machine for checkout initiation
//! - `StaticPage`, `RevalidationPolicy`, and `GenerationState` for the
//!   static-generation contract
//! - `StaticPathPlan` for pre-render path resolution
//! - `StoreError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{CheckoutFlow, HomeProps, StaticPage};
//!
//! // Build the home page props from the injected provider
//! let products = catalog.list_products().await?;
//! let page = StaticPage::new(HomeProps { products });
//!
//! // Initiate checkout for a product's default price
//! let flow = CheckoutFlow::new();
//! flow.trigger(&detail.default_price_id, &gateway, &navigator).await;
//! ```

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod page;
pub mod paths;
pub mod product;

// Re-exports for convenience
pub use catalog::{BoxedCatalogProvider, CatalogProvider};
pub use checkout::{
    CheckoutFlow, CheckoutGateway, CheckoutRedirect, CheckoutRequest, CheckoutState, Navigator,
    CHECKOUT_FAILURE_NOTICE,
};
pub use error::{StoreError, StoreResult};
pub use money::format_brl;
pub use page::{GenerationState, HomeProps, ProductProps, RevalidationPolicy, StaticPage};
pub use paths::{FallbackPolicy, StaticPathPlan};
pub use product::{ProductDetail, ProductSummary};
