//! # Cart Configuration
//!
//! The promotion constants the engine is built with: the spend threshold,
//! the gift descriptor, and how long the "gift granted" banner stays up.
//!
//! These are plain values passed in at construction. Loading them from a
//! file or the environment is giftcart-session's job.

use std::time::Duration;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::validate_product_name;

/// Reserved id of the default gift. Never used by the default catalog.
pub const DEFAULT_GIFT_ID: ProductId = 99;

/// Default spend that unlocks the gift.
pub const DEFAULT_THRESHOLD: Money = Money::from_units(1000);

/// Default lifetime of the "gift granted" banner.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Promotion settings for one cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Subtotal at or above which the gift is granted.
    pub threshold: Money,

    /// The free item. Its id is reserved and must not appear in the catalog.
    pub gift: Product,

    /// How long the "gift granted" notice stays active after a grant.
    pub notice_duration: Duration,
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            threshold: DEFAULT_THRESHOLD,
            gift: Product::new(DEFAULT_GIFT_ID, "Wireless Mouse", Money::zero()),
            notice_duration: DEFAULT_NOTICE_DURATION,
        }
    }
}

impl CartConfig {
    /// Checks the settings against the catalog they will be used with.
    ///
    /// ## Rules
    /// - Threshold is strictly positive
    /// - Gift is free and has a valid name
    /// - Gift id does not collide with any catalog product
    pub fn validate(&self, catalog: &Catalog) -> CoreResult<()> {
        if !self.threshold.is_positive() {
            return Err(CoreError::InvalidThreshold(self.threshold));
        }

        if !self.gift.price.is_zero() {
            return Err(CoreError::GiftNotFree(self.gift.price));
        }

        validate_product_name(&self.gift.name)?;

        if catalog.contains(self.gift.id) {
            return Err(CoreError::GiftIdCollision(self.gift.id));
        }

        Ok(())
    }

    /// The reserved gift id.
    #[inline]
    pub fn gift_id(&self) -> ProductId {
        self.gift.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_for_default_catalog() {
        assert!(CartConfig::default().validate(&Catalog::default()).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let config = CartConfig {
            threshold: Money::zero(),
            ..CartConfig::default()
        };
        assert!(matches!(
            config.validate(&Catalog::default()),
            Err(CoreError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_rejects_paid_gift() {
        let mut config = CartConfig::default();
        config.gift.price = Money::from_units(1);
        assert!(matches!(
            config.validate(&Catalog::default()),
            Err(CoreError::GiftNotFree(_))
        ));
    }

    #[test]
    fn test_rejects_gift_id_collision() {
        let mut config = CartConfig::default();
        config.gift.id = 1;
        assert!(matches!(
            config.validate(&Catalog::default()),
            Err(CoreError::GiftIdCollision(1))
        ));
    }
}
