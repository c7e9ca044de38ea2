//! # GiftCart Session
//!
//! Runtime wrapper around [`giftcart_core::CartEngine`].
//!
//! ## Module Structure
//! ```text
//! giftcart_session/
//! ├── config.rs   ← SessionConfig: TOML file + GIFTCART_* env overrides
//! ├── error.rs    ← SessionError
//! ├── session.rs  ← CartSession: locking, view broadcast, banner timers
//! └── bin/
//!     └── cart-shell.rs  ← Line-oriented driver
//! ```
//!
//! ## Data Flow
//! ```text
//! ┌──────────────┐   add / inc / dec   ┌───────────────┐   lock   ┌──────────────┐
//! │   Renderer   │ ──────────────────► │  CartSession  │ ───────► │  CartEngine  │
//! │              │ ◄────────────────── │               │ ◄─────── │              │
//! └──────────────┘   watch<CartView>   └───────┬───────┘  view    └──────────────┘
//!                                              │
//!                                              │ grant → tokio::spawn(sleep → expire)
//!                                              ▼
//!                                      ┌───────────────┐
//!                                      │ banner timer  │
//!                                      └───────────────┘
//! ```

pub mod config;
pub mod error;
pub mod session;

pub use config::{DisplaySettings, GiftSettings, PromotionSettings, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use session::CartSession;

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to info with debug for the cart crates.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,giftcart_core=debug,giftcart_session=debug"));

    // stderr keeps log lines out of the shell's stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
