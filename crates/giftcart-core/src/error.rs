//! # Error Types
//!
//! Domain-specific error types for giftcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  giftcart-core errors (this file)                                      │
//! │  ├── CartError        - Protocol violations against the cart           │
//! │  ├── ValidationError  - Catalog / config input failures                │
//! │  └── CoreError        - Everything above, plus lookup failures         │
//! │                                                                         │
//! │  giftcart-session errors (separate crate)                              │
//! │  └── SessionError     - Runtime, config file, env failures             │
//! │                                                                         │
//! │  Flow: CartError / ValidationError → CoreError → SessionError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Cart operations are total. Clamping a quantity at zero, or changing a
//! product that is not in the cart, succeed as no-ops. Only a caller trying
//! to drive the engine-managed gift line by hand gets an error back.

use thiserror::Error;

use crate::money::Money;
use crate::types::ProductId;

// =============================================================================
// Cart Error
// =============================================================================

/// Rejected cart operations.
///
/// The cart state is guaranteed untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The caller tried to add, change or remove the gift line directly.
    ///
    /// ## When This Occurs
    /// - `change_quantity(GIFT_ID, +1)` from a stale renderer
    /// - `add_product` called with the gift descriptor
    /// - `remove_product(GIFT_ID)`
    ///
    /// The gift line only ever moves through the eligibility rule.
    #[error("Gift line {id} is managed by the cart and cannot be changed directly")]
    GiftLineLocked { id: ProductId },
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The gift's reserved id is also used by a catalog product.
    #[error("Gift id {0} collides with a catalog product")]
    GiftIdCollision(ProductId),

    /// The gift threshold must be strictly positive.
    #[error("Gift threshold must be positive, got {0}")]
    InvalidThreshold(Money),

    /// The gift must be free.
    #[error("Gift price must be 0, got {0}")]
    GiftNotFree(Money),

    /// Cart protocol violation (wraps CartError).
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for catalog entries and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., two catalog products sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result of a single cart operation.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::GiftLineLocked { id: 99 };
        assert_eq!(
            err.to_string(),
            "Gift line 99 is managed by the cart and cannot be changed directly"
        );

        let err = CoreError::InvalidThreshold(Money::from_units(-1));
        assert_eq!(err.to_string(), "Gift threshold must be positive, got -1");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Duplicate {
            field: "product id".to_string(),
            value: "3".to_string(),
        };
        assert_eq!(err.to_string(), "product id '3' already exists");
    }

    #[test]
    fn test_conversions_into_core_error() {
        let core_err: CoreError = CartError::GiftLineLocked { id: 99 }.into();
        assert!(matches!(core_err, CoreError::Cart(_)));

        let core_err: CoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
