//! # Stripe Catalog Client
//!
//! Catalog queries against the Stripe Products API, plus the pure mappers
//! that shape raw provider products into display records.
//!
//! Both queries request `default_price` expansion so the polymorphic
//! identifier-or-object field arrives as an expanded object. The mappers
//! refuse a bare identifier with a named error instead of faulting downstream.

use crate::config::StripeConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shop_core::{
    format_brl, CatalogProvider, ProductDetail, ProductSummary, StoreError, StoreResult,
};
use tracing::{debug, error, info, instrument};

/// Stripe implementation of `CatalogProvider`
pub struct StripeCatalog {
    config: StripeConfig,
    client: Client,
}

impl StripeCatalog {
    /// Create a new Stripe catalog client
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> StoreResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> StoreResult<T> {
        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .query(query)
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if status == reqwest::StatusCode::NOT_FOUND {
                if let Some(product_id) = path.strip_prefix("/v1/products/") {
                    return Err(StoreError::ProductNotFound {
                        product_id: product_id.to_string(),
                    });
                }
            }

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(StoreError::ProviderError {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(StoreError::ProviderError {
                provider: "stripe".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            StoreError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })
    }
}

#[async_trait]
impl CatalogProvider for StripeCatalog {
    #[instrument(skip(self))]
    async fn list_products(&self) -> StoreResult<Vec<ProductSummary>> {
        let list: StripeListResponse = self
            .get_json(
                "/v1/products",
                &[("active", "true"), ("expand[]", "data.default_price")],
            )
            .await?;

        debug!("Stripe returned {} products", list.data.len());

        map_catalog(&list.data)
    }

    #[instrument(skip(self))]
    async fn get_product(&self, product_id: &str) -> StoreResult<ProductDetail> {
        let product: StripeProduct = self
            .get_json(
                &format!("/v1/products/{}", product_id),
                &[("expand[]", "default_price")],
            )
            .await?;

        info!("Fetched product: id={}, name={}", product.id, product.name);

        to_detail(&product)
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeListResponse {
    data: Vec<StripeProduct>,
}

/// Raw product object as returned by `GET /v1/products`
#[derive(Debug, Clone, Deserialize)]
pub struct StripeProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub default_price: Option<DefaultPrice>,
}

/// Stripe's polymorphic `default_price` field: a bare identifier unless the
/// request asked for expansion
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DefaultPrice {
    Expanded(StripePrice),
    Id(String),
}

/// Expanded price object
#[derive(Debug, Clone, Deserialize)]
pub struct StripePrice {
    pub id: String,
    #[serde(default)]
    pub unit_amount: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

// =============================================================================
// Mappers
// =============================================================================

fn expanded_price(product: &StripeProduct) -> StoreResult<&StripePrice> {
    match &product.default_price {
        Some(DefaultPrice::Expanded(price)) => Ok(price),
        _ => Err(StoreError::PriceNotExpanded {
            product_id: product.id.clone(),
        }),
    }
}

fn formatted_price(product: &StripeProduct) -> StoreResult<(String, String)> {
    let price = expanded_price(product)?;
    let unit_amount = price.unit_amount.ok_or_else(|| StoreError::MissingUnitAmount {
        price_id: price.id.clone(),
    })?;

    Ok((price.id.clone(), format_brl(unit_amount)))
}

fn first_image(product: &StripeProduct) -> StoreResult<String> {
    product
        .images
        .first()
        .cloned()
        .ok_or_else(|| StoreError::MissingImage {
            product_id: product.id.clone(),
        })
}

/// Shape one raw product into its catalog-listing record
pub fn to_summary(product: &StripeProduct) -> StoreResult<ProductSummary> {
    let (_price_id, price) = formatted_price(product)?;

    Ok(ProductSummary {
        id: product.id.clone(),
        name: product.name.clone(),
        image_url: first_image(product)?,
        price,
    })
}

/// Shape one raw product into its detail record, surfacing the price
/// identifier for checkout initiation
pub fn to_detail(product: &StripeProduct) -> StoreResult<ProductDetail> {
    let (price_id, price) = formatted_price(product)?;

    Ok(ProductDetail {
        id: product.id.clone(),
        name: product.name.clone(),
        image_url: first_image(product)?,
        price,
        description: product.description.clone().unwrap_or_default(),
        default_price_id: price_id,
    })
}

/// Shape a raw product list, preserving the provider's order
pub fn map_catalog(products: &[StripeProduct]) -> StoreResult<Vec<ProductSummary>> {
    products.iter().map(to_summary).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_product(id: &str, name: &str, unit_amount: i64) -> StripeProduct {
        StripeProduct {
            id: id.to_string(),
            name: name.to_string(),
            description: Some("Camiseta de algodão".to_string()),
            images: vec!["img.png".to_string()],
            default_price: Some(DefaultPrice::Expanded(StripePrice {
                id: format!("price_{}", id),
                unit_amount: Some(unit_amount),
            })),
        }
    }

    #[test]
    fn test_summary_mapping() {
        let product = StripeProduct {
            id: "prod_1".into(),
            name: "Camiseta".into(),
            description: None,
            images: vec!["img.png".into()],
            default_price: Some(DefaultPrice::Expanded(StripePrice {
                id: "price_1".into(),
                unit_amount: Some(5000),
            })),
        };

        let summary = to_summary(&product).unwrap();
        assert_eq!(summary.id, "prod_1");
        assert_eq!(summary.name, "Camiseta");
        assert_eq!(summary.image_url, "img.png");
        assert_eq!(summary.price, "R$ 50,00");
    }

    #[test]
    fn test_detail_mapping_surfaces_price_id() {
        let detail = to_detail(&raw_product("prod_9", "Moletom", 19900)).unwrap();
        assert_eq!(detail.price, "R$ 199,00");
        assert_eq!(detail.default_price_id, "price_prod_9");
        assert_eq!(detail.description, "Camiseta de algodão");
    }

    #[test]
    fn test_catalog_mapping_preserves_order() {
        let products = [
            raw_product("prod_b", "B", 1000),
            raw_product("prod_a", "A", 2000),
            raw_product("prod_c", "C", 3000),
        ];

        let mapped = map_catalog(&products).unwrap();
        let ids: Vec<_> = mapped.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["prod_b", "prod_a", "prod_c"]);
    }

    #[test]
    fn test_unexpanded_price_is_a_named_error() {
        let mut product = raw_product("prod_1", "Camiseta", 5000);
        product.default_price = Some(DefaultPrice::Id("price_1".into()));

        let err = to_summary(&product).unwrap_err();
        assert!(matches!(err, StoreError::PriceNotExpanded { ref product_id } if product_id == "prod_1"));
    }

    #[test]
    fn test_missing_unit_amount() {
        let mut product = raw_product("prod_1", "Camiseta", 0);
        product.default_price = Some(DefaultPrice::Expanded(StripePrice {
            id: "price_1".into(),
            unit_amount: None,
        }));

        let err = to_detail(&product).unwrap_err();
        assert!(matches!(err, StoreError::MissingUnitAmount { ref price_id } if price_id == "price_1"));
    }

    #[test]
    fn test_missing_image() {
        let mut product = raw_product("prod_1", "Camiseta", 5000);
        product.images.clear();

        let err = to_summary(&product).unwrap_err();
        assert!(matches!(err, StoreError::MissingImage { .. }));
    }

    #[test]
    fn test_default_price_deserializes_both_shapes() {
        let expanded: StripeProduct = serde_json::from_str(
            r#"{"id":"prod_1","name":"Camiseta","images":["img.png"],
                "default_price":{"id":"price_1","unit_amount":5000}}"#,
        )
        .unwrap();
        assert!(matches!(
            expanded.default_price,
            Some(DefaultPrice::Expanded(_))
        ));

        let bare: StripeProduct = serde_json::from_str(
            r#"{"id":"prod_1","name":"Camiseta","images":[],"default_price":"price_1"}"#,
        )
        .unwrap();
        assert!(matches!(bare.default_price, Some(DefaultPrice::Id(_))));
    }
}
