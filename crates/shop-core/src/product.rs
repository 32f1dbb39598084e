//! # Product Display Records
//!
//! Read-only projections of provider catalog entries, shaped for page
//! templates. Records are constructed fresh on every page generation and
//! discarded once the template consumes them; the payments provider remains
//! the system of record for products and prices.
//!
//! Fields serialize in camelCase because they cross the wire as page props.

use serde::{Deserialize, Serialize};

/// Catalog-listing projection of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Opaque provider identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// First image in the provider's image list
    pub image_url: String,

    /// Pre-formatted localized price (e.g. "R$ 199,00")
    pub price: String,
}

/// Detail-page projection of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    /// Opaque provider identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// First image in the provider's image list
    pub image_url: String,

    /// Pre-formatted localized price (e.g. "R$ 199,00")
    pub price: String,

    /// Long-form description
    pub description: String,

    /// Identifier of the default price object, required to initiate checkout
    pub default_price_id: String,
}

impl ProductDetail {
    /// Drop the detail-only fields, keeping the listing projection
    pub fn to_summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            price: self.price.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = ProductSummary {
            id: "prod_1".into(),
            name: "Camiseta".into(),
            image_url: "img.png".into(),
            price: "R$ 50,00".into(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["imageUrl"], "img.png");
        assert_eq!(json["price"], "R$ 50,00");
    }

    #[test]
    fn test_detail_surfaces_price_id() {
        let detail = ProductDetail {
            id: "prod_1".into(),
            name: "Camiseta".into(),
            image_url: "img.png".into(),
            price: "R$ 50,00".into(),
            description: "Algodão".into(),
            default_price_id: "price_1".into(),
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["defaultPriceId"], "price_1");

        let summary = detail.to_summary();
        assert_eq!(summary.id, "prod_1");
        assert_eq!(summary.price, "R$ 50,00");
    }
}
