//! # Catalog Provider Trait
//!
//! Seam between the page-generation flows and the payments provider's
//! catalog API. The provider client is injected as an explicit dependency
//! into every data-loading call site, never reached through a process-wide
//! singleton, so tests can substitute a stub.

use crate::error::StoreResult;
use crate::product::{ProductDetail, ProductSummary};
use async_trait::async_trait;
use std::sync::Arc;

/// Catalog queries against the payments provider.
///
/// Both operations must request price expansion from the provider so the
/// mappers see expanded price objects, not bare identifiers.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// List all active products with their default price expanded.
    ///
    /// The returned order is the provider's order; implementations must not
    /// reorder.
    async fn list_products(&self) -> StoreResult<Vec<ProductSummary>>;

    /// Fetch one product (with expanded price) by its provider identifier.
    async fn get_product(&self, product_id: &str) -> StoreResult<ProductDetail>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared catalog provider (dynamic dispatch)
pub type BoxedCatalogProvider = Arc<dyn CatalogProvider>;
