//! # Storefront Error Types
//!
//! Typed error handling for the storefront page-generation engine.
//! All catalog and checkout operations return `Result<T, StoreError>`.

use thiserror::Error;

/// Core error type for catalog, page-generation, and checkout operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Product not found in the provider catalog
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// The provider returned `default_price` as a bare identifier instead of
    /// an expanded object. The caller forgot to request expansion.
    #[error("Default price not expanded for product: {product_id}")]
    PriceNotExpanded { product_id: String },

    /// Expanded price carries no unit amount
    #[error("Price has no unit amount: {price_id}")]
    MissingUnitAmount { price_id: String },

    /// Product has an empty image list
    #[error("Product has no images: {product_id}")]
    MissingImage { product_id: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider or checkout endpoint
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Checkout session creation failed
    #[error("Checkout creation failed: {0}")]
    CheckoutCreationFailed(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::NetworkError(_) | StoreError::ProviderError { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Configuration(_) => 500,
            StoreError::ProductNotFound { .. } => 404,
            StoreError::PriceNotExpanded { .. } => 502,
            StoreError::MissingUnitAmount { .. } => 502,
            StoreError::MissingImage { .. } => 502,
            StoreError::ProviderError { .. } => 502,
            StoreError::NetworkError(_) => 503,
            StoreError::CheckoutCreationFailed(_) => 502,
            StoreError::Serialization(_) => 500,
            StoreError::Internal(_) => 500,
        }
    }
}

/// Result type alias for storefront operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(StoreError::NetworkError("timeout".into()).is_retryable());
        assert!(StoreError::ProviderError {
            provider: "stripe".into(),
            message: "overloaded".into()
        }
        .is_retryable());
        assert!(!StoreError::PriceNotExpanded {
            product_id: "prod_1".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            StoreError::ProductNotFound {
                product_id: "x".into()
            }
            .status_code(),
            404
        );
        assert_eq!(
            StoreError::PriceNotExpanded {
                product_id: "prod_1".into()
            }
            .status_code(),
            502
        );
        assert_eq!(StoreError::NetworkError("refused".into()).status_code(), 503);
    }
}
