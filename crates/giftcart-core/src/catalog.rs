//! # Catalog
//!
//! The read-only list of purchasable products the cart is built from.
//!
//! The catalog is supplied from outside (config file, seed list) and
//! validated once at construction. Order is preserved so the renderer can
//! show products in the order they were listed.

use std::collections::HashSet;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::{validate_price, validate_product_name};

/// An ordered, validated list of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, validating every entry.
    ///
    /// ## Rules
    /// - Each name passes `validate_product_name`
    /// - Each price passes `validate_price`
    /// - Ids are unique
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            validate_product_name(&product.name)?;
            validate_price(product.price)?;

            if !seen.insert(product.id) {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.to_string(),
                }
                .into());
            }
        }

        Ok(Catalog { products })
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Returns true if a product with this id is listed.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Products in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    /// The storefront's stock list.
    fn default() -> Self {
        Catalog {
            products: vec![
                Product::new(1, "Laptop", Money::from_units(500)),
                Product::new(2, "Smartphone", Money::from_units(300)),
                Product::new(3, "Headphones", Money::from_units(100)),
                Product::new(4, "Smartwatch", Money::from_units(150)),
            ],
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = Catalog::default();
        let rebuilt = Catalog::new(catalog.products().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 4);
        assert_eq!(rebuilt.get(3).unwrap().name, "Headphones");
    }

    #[test]
    fn test_preserves_listing_order() {
        let catalog = Catalog::default();
        let ids: Vec<ProductId> = catalog.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            Product::new(7, "Cable", Money::from_units(10)),
            Product::new(7, "Charger", Money::from_units(20)),
        ]);

        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
    }

    #[test]
    fn test_rejects_negative_price_and_blank_name() {
        assert!(Catalog::new(vec![Product::new(1, "Refund", Money::from_units(-5))]).is_err());
        assert!(Catalog::new(vec![Product::new(1, " ", Money::from_units(5))]).is_err());
    }

    #[test]
    fn test_lookup_misses() {
        let catalog = Catalog::default();
        assert!(catalog.get(42).is_none());
        assert!(!catalog.contains(42));
        assert!(catalog.contains(1));
    }
}
