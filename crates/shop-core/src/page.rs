//! # Static Page Generation Types
//!
//! Types describing generated page output and its freshness contract.
//! Pages are generated at build time (or on demand), served from cache while
//! fresh, and regenerated on the first request after the revalidation window
//! closes (stale-while-revalidate).

use crate::product::{ProductDetail, ProductSummary};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Props handed to the home (catalog listing) template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeProps {
    pub products: Vec<ProductSummary>,
}

/// Props handed to the product detail template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductProps {
    pub product: ProductDetail,
}

/// How long generated output stays valid before the next request triggers
/// regeneration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevalidationPolicy {
    max_age_secs: u64,
}

impl RevalidationPolicy {
    /// Catalog listing pages revalidate every 2 hours
    pub const fn catalog() -> Self {
        Self {
            max_age_secs: 60 * 60 * 2,
        }
    }

    /// Product detail pages revalidate every hour
    pub const fn product_detail() -> Self {
        Self {
            max_age_secs: 60 * 60,
        }
    }

    /// Custom window (used by tests)
    pub const fn with_max_age_secs(max_age_secs: u64) -> Self {
        Self { max_age_secs }
    }

    pub fn max_age(&self) -> Duration {
        Duration::seconds(self.max_age_secs as i64)
    }

    /// Whether output generated at `generated_at` is still served as-is
    pub fn is_fresh(&self, generated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(generated_at) < self.max_age()
    }
}

/// One generated page: props plus the generation timestamp the revalidation
/// policy is judged against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPage<T> {
    pub props: T,
    pub generated_at: DateTime<Utc>,
}

impl<T> StaticPage<T> {
    pub fn new(props: T) -> Self {
        Self {
            props,
            generated_at: Utc::now(),
        }
    }

    pub fn is_fresh(&self, policy: RevalidationPolicy, now: DateTime<Utc>) -> bool {
        policy.is_fresh(self.generated_at, now)
    }
}

/// Lifecycle of an on-demand generated page, surfaced explicitly to the
/// caller instead of hiding behind a platform fallback flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    /// Never requested, nothing cached
    NotStarted,
    /// First generation in flight; requesters see a loading placeholder or
    /// block, per the fallback policy
    Generating,
    /// Generated output available
    Ready,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_window_is_two_hours() {
        let policy = RevalidationPolicy::catalog();
        let generated = Utc::now();

        assert!(policy.is_fresh(generated, generated + Duration::minutes(119)));
        assert!(!policy.is_fresh(generated, generated + Duration::hours(2)));
    }

    #[test]
    fn test_detail_window_is_one_hour() {
        let policy = RevalidationPolicy::product_detail();
        let generated = Utc::now();

        assert!(policy.is_fresh(generated, generated + Duration::minutes(59)));
        assert!(!policy.is_fresh(generated, generated + Duration::minutes(61)));
    }

    #[test]
    fn test_static_page_freshness() {
        let page = StaticPage::new(HomeProps { products: vec![] });
        assert!(page.is_fresh(RevalidationPolicy::catalog(), Utc::now()));
        assert!(!page.is_fresh(
            RevalidationPolicy::with_max_age_secs(0),
            Utc::now() + Duration::seconds(1)
        ));
    }
}
