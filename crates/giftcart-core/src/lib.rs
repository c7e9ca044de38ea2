//! # giftcart-core: Pure Cart State Machine
//!
//! This crate is the **heart** of GiftCart. It holds the cart lines, the
//! running totals, and the rule that grants or revokes a free gift when
//! spend crosses a threshold. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        GiftCart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Renderer (web UI / terminal)                 │   │
//! │  │     Product grid ──► Cart list ──► Progress bar ──► Banner     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartView                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              giftcart-session (tokio, config)                   │   │
//! │  │        timers for the banner, watch channel, TOML loading      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ giftcart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐ │   │
//! │  │   │  types   │ │  money   │ │ catalog  │ │      engine      │ │   │
//! │  │   │ Product  │ │  Money   │ │ Catalog  │ │ CartEngine       │ │   │
//! │  │   │ CartLine │ │          │ │          │ │ gift rule        │ │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO ENV • SYNCHRONOUS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Product`, `CartLine`
//! - [`money`] - Integer money in whole currency units
//! - [`catalog`] - Validated, ordered product list
//! - [`config`] - Threshold, gift descriptor, notice duration
//! - [`engine`] - `CartEngine` and the gift-eligibility rule
//! - [`notice`] - Tokens for the "gift granted" banner
//! - [`view`] - `CartView`, the renderer's snapshot
//! - [`error`] / [`validation`] - Typed errors and input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use giftcart_core::{CartConfig, CartEngine, Catalog, Money};
//!
//! let mut cart = CartEngine::new(Catalog::default(), CartConfig::default()).unwrap();
//! let laptop = cart.catalog().get(1).cloned().unwrap();
//!
//! cart.add_product(&laptop).unwrap();
//! let mutation = cart.add_product(&laptop).unwrap();
//!
//! // 500 × 2 meets the 1000 threshold: the gift is appended.
//! assert!(mutation.granted().is_some());
//! assert_eq!(cart.subtotal(), Money::from_units(1000));
//! assert_eq!(cart.snapshot().len(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod money;
pub mod notice;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use config::CartConfig;
pub use engine::{CartEngine, GiftTransition, LineChange, Mutation};
pub use error::{CartError, CartResult, CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use notice::{GiftNotice, NoticeToken};
pub use types::{CartLine, Product, ProductId};
pub use view::CartView;
