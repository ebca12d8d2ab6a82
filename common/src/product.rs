//! Catalog product types.

use serde::{Deserialize, Serialize};

use crate::{Money, ProductId};

/// A product as published by the catalog backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-assigned identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Picture reference (path or URL).
    pub picture: String,
    /// List price, always in USD.
    pub price_usd: Money,
    /// Categories in catalog order.
    pub categories: Vec<String>,
}

impl Product {
    /// Create a product with no description, picture or categories.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price_usd: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            picture: String::new(),
            price_usd,
            categories: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the picture reference.
    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = picture.into();
        self
    }

    /// Add a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let product = Product::new("66VCHSJNUP", "Tank Top", Money::new("USD", 18, 990_000_000))
            .with_description("Perfectly cropped cotton tank.")
            .with_picture("/static/img/products/tank-top.jpg")
            .with_category("clothing")
            .with_category("tops");

        assert_eq!(product.id.as_str(), "66VCHSJNUP");
        assert_eq!(product.categories, vec!["clothing", "tops"]);
        assert_eq!(product.price_usd.units, 18);
    }

    #[test]
    fn test_product_json_shape() {
        let product = Product::new("1YMWWN1N4O", "Watch", Money::new("USD", 109, 990_000_000));
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["id"], "1YMWWN1N4O");
        assert_eq!(json["price_usd"]["currency_code"], "USD");
        assert_eq!(json["price_usd"]["nanos"], 990_000_000);
    }
}
