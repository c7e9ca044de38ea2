//! # Domain Types
//!
//! Core domain types used throughout GiftCart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Product      │ ─────► │    CartLine     │                        │
//! │  │  ─────────────  │  add   │  ─────────────  │                        │
//! │  │  id (u32)       │        │  id             │                        │
//! │  │  name           │        │  name  (frozen) │                        │
//! │  │  price          │        │  price (frozen) │                        │
//! │  └─────────────────┘        │  quantity > 0   │                        │
//! │                             └─────────────────┘                        │
//! │                                                                         │
//! │  The gift is a Product too, with a reserved id and a zero price.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Stable product identifier, unique within a catalog.
pub type ProductId = u32;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price in whole currency units.
    pub price: Money,
}

impl Product {
    /// Creates a product.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        Product {
            id,
            name: name.into(),
            price,
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product's presence in the cart.
///
/// ## Design Notes
/// Name and price are copied from the product when the line is created,
/// the same snapshot pattern a receipt uses. A line is never stored with a
/// quantity of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line for a product with the given quantity.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        CartLine {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
