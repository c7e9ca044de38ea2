//! # Session Configuration
//!
//! Loads the catalog and promotion constants the cart is built with.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GIFTCART_THRESHOLD=1500                                            │
//! │     GIFTCART_NOTICE_MS=3000                                            │
//! │     GIFTCART_GIFT_NAME="Wireless Mouse"                                │
//! │     GIFTCART_CURRENCY_SYMBOL=₹                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/giftcart/giftcart.toml (Linux)                           │
//! │     ~/Library/Application Support/com.giftcart.giftcart/ (macOS)       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Four-product storefront, threshold 1000, 3s banner                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [promotion]
//! threshold = 1000
//! notice_ms = 3000
//!
//! [promotion.gift]
//! id = 99
//! name = "Wireless Mouse"
//!
//! [display]
//! currency_symbol = "₹"
//!
//! [[catalog]]
//! id = 1
//! name = "Laptop"
//! price = 500
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use giftcart_core::config::{DEFAULT_GIFT_ID, DEFAULT_NOTICE_DURATION, DEFAULT_THRESHOLD};
use giftcart_core::{CartConfig, Catalog, Money, Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};

// =============================================================================
// Promotion Settings
// =============================================================================

/// The free gift descriptor. Always priced at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftSettings {
    /// Reserved id; must not appear in the catalog.
    #[serde(default = "default_gift_id")]
    pub id: ProductId,

    #[serde(default = "default_gift_name")]
    pub name: String,
}

fn default_gift_id() -> ProductId {
    DEFAULT_GIFT_ID
}

fn default_gift_name() -> String {
    "Wireless Mouse".to_string()
}

impl Default for GiftSettings {
    fn default() -> Self {
        GiftSettings {
            id: default_gift_id(),
            name: default_gift_name(),
        }
    }
}

/// Threshold and banner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionSettings {
    /// Subtotal (whole currency units) that unlocks the gift.
    #[serde(default = "default_threshold")]
    pub threshold: i64,

    /// How long the "gift granted" banner stays up (milliseconds).
    #[serde(default = "default_notice_ms")]
    pub notice_ms: u64,

    #[serde(default)]
    pub gift: GiftSettings,
}

fn default_threshold() -> i64 {
    DEFAULT_THRESHOLD.units()
}

fn default_notice_ms() -> u64 {
    DEFAULT_NOTICE_DURATION.as_millis() as u64
}

impl Default for PromotionSettings {
    fn default() -> Self {
        PromotionSettings {
            threshold: default_threshold(),
            notice_ms: default_notice_ms(),
            gift: GiftSettings::default(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// Presentation settings for text renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl DisplaySettings {
    /// Formats an amount with the currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use giftcart_core::Money;
    /// use giftcart_session::config::DisplaySettings;
    ///
    /// let display = DisplaySettings::default();
    /// assert_eq!(display.format_amount(Money::from_units(1000)), "₹1000");
    /// ```
    pub fn format_amount(&self, amount: Money) -> String {
        let units = amount.units();
        format!(
            "{}{}{}",
            if units < 0 { "-" } else { "" },
            self.currency_symbol,
            units.unsigned_abs()
        )
    }
}

// =============================================================================
// Main Session Configuration
// =============================================================================

/// Complete configuration for a cart session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub promotion: PromotionSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    /// Purchasable products in display order.
    #[serde(default = "default_catalog")]
    pub catalog: Vec<Product>,
}

fn default_catalog() -> Vec<Product> {
    Catalog::default().products().to_vec()
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            promotion: PromotionSettings::default(),
            display: DisplaySettings::default(),
            catalog: default_catalog(),
        }
    }
}

impl SessionConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (giftcart.toml)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. The platform default path is
    /// optional.
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with overrides read from `lookup` instead of the
    /// process environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> SessionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path {
            Some(path) => {
                info!(?path, "Loading cart config from file");
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    info!(?path, "Loading cart config from file");
                    Self::from_file(&path)?
                }
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> SessionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes configuration to file, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> SessionResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SessionError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Cart config saved");
        Ok(path)
    }

    /// Validates the configuration by building what it describes.
    pub fn validate(&self) -> SessionResult<()> {
        if self.display.currency_symbol.is_empty() {
            return Err(SessionError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }

        if self.promotion.notice_ms == 0 {
            return Err(SessionError::InvalidConfig(
                "notice_ms must be greater than 0".into(),
            ));
        }

        let catalog = self.catalog()?;
        self.cart_config().validate(&catalog)?;

        Ok(())
    }

    /// Builds the validated catalog.
    pub fn catalog(&self) -> SessionResult<Catalog> {
        Ok(Catalog::new(self.catalog.clone())?)
    }

    /// Builds the engine's promotion settings.
    pub fn cart_config(&self) -> CartConfig {
        CartConfig {
            threshold: Money::from_units(self.promotion.threshold),
            gift: Product::new(
                self.promotion.gift.id,
                self.promotion.gift.name.clone(),
                Money::zero(),
            ),
            notice_duration: Duration::from_millis(self.promotion.notice_ms),
        }
    }

    /// Applies `GIFTCART_*` overrides from an arbitrary lookup.
    ///
    /// Unparseable numbers are logged and skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("GIFTCART_THRESHOLD") {
            match raw.trim().parse::<i64>() {
                Ok(threshold) => {
                    debug!(threshold, "Overriding threshold from environment");
                    self.promotion.threshold = threshold;
                }
                Err(_) => warn!(value = %raw, "Ignoring non-numeric GIFTCART_THRESHOLD"),
            }
        }

        if let Some(raw) = lookup("GIFTCART_NOTICE_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.promotion.notice_ms = ms,
                Err(_) => warn!(value = %raw, "Ignoring non-numeric GIFTCART_NOTICE_MS"),
            }
        }

        if let Some(name) = lookup("GIFTCART_GIFT_NAME") {
            self.promotion.gift.name = name;
        }

        if let Some(symbol) = lookup("GIFTCART_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "giftcart", "giftcart")
            .map(|dirs| dirs.config_dir().join("giftcart.toml"))
    }
}
