//! # Cart Session
//!
//! Runs a [`CartEngine`] for one shopper: serializes operations, publishes
//! a fresh [`CartView`] after each one, and expires the "gift granted"
//! banner on a tokio timer.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Renderer Action          Session Method            Engine Call         │
//! │  ───────────────          ──────────────            ───────────         │
//! │                                                                         │
//! │  Click "Add to Cart" ───► add_product(id) ────────► add_product(&p)    │
//! │  Click [+] / [-] ───────► change_quantity(id, ±1) ► change_quantity    │
//! │  Click remove ──────────► remove_product(id) ─────► remove_product     │
//! │  Close banner ──────────► dismiss_notice() ───────► dismiss_notice     │
//! │                                                                         │
//! │  Every write: lock engine → mutate → (grant? arm timer) → publish      │
//! │  view → unlock. Subscribers never see a half-applied operation.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Banner Timer
//! One pending timer at most. A new grant aborts the previous timer before
//! arming its own, and the engine ignores expiry for any token but the
//! latest, so an old timer can never clear a newer banner.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use giftcart_core::{
    CartConfig, CartEngine, CartLine, CartView, Catalog, CoreError, Money, Mutation, NoticeToken,
    Product, ProductId,
};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};

/// State shared with the banner timer tasks.
#[derive(Debug)]
struct Shared {
    engine: Mutex<CartEngine>,
    views: watch::Sender<CartView>,
    expiry: Mutex<Option<JoinHandle<()>>>,
}

impl Shared {
    /// The engine is in a steady state between operations, so a poisoned
    /// lock still guards consistent data.
    fn lock_engine(&self) -> MutexGuard<'_, CartEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_expiry(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.expiry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, engine: &CartEngine) -> CartView {
        let view = engine.view();
        self.views.send_replace(view.clone());
        view
    }

    fn cancel_expiry(&self) {
        if let Some(handle) = self.lock_expiry().take() {
            handle.abort();
        }
    }
}

/// A shopper's cart plus its banner timer.
///
/// ## Thread Safety
/// `std::sync::Mutex` around the engine: operations are short and almost
/// all of them write, so there is nothing to gain from a `RwLock`.
#[derive(Debug)]
pub struct CartSession {
    shared: Arc<Shared>,
    runtime: Handle,
}

impl CartSession {
    /// Creates a session with an empty cart.
    ///
    /// Must be called from within a tokio runtime; the banner timers are
    /// spawned on it.
    pub fn new(catalog: Catalog, config: CartConfig) -> SessionResult<Self> {
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        let engine = CartEngine::new(catalog, config)?;
        let (views, _) = watch::channel(engine.view());

        info!(
            products = engine.catalog().len(),
            threshold = %engine.config().threshold,
            "Cart session started"
        );

        Ok(CartSession {
            shared: Arc::new(Shared {
                engine: Mutex::new(engine),
                views,
                expiry: Mutex::new(None),
            }),
            runtime,
        })
    }

    /// Creates a session from a loaded [`SessionConfig`].
    pub fn from_config(config: &SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        Self::new(config.catalog()?, config.cart_config())
    }

    // =========================================================================
    // Renderer → Cart
    // =========================================================================

    /// Adds one unit of a catalog product.
    pub fn add_product(&self, product_id: ProductId) -> SessionResult<CartView> {
        debug!(product_id, "add_product");
        self.mutate(|engine| {
            let product = engine
                .catalog()
                .get(product_id)
                .cloned()
                .ok_or(CoreError::ProductNotFound(product_id))?;
            Ok(engine.add_product(&product)?)
        })
    }

    /// Applies a signed quantity delta (usually ±1).
    pub fn change_quantity(&self, product_id: ProductId, delta: i64) -> SessionResult<CartView> {
        debug!(product_id, delta, "change_quantity");
        self.mutate(|engine| Ok(engine.change_quantity(product_id, delta)?))
    }

    /// Removes a line regardless of quantity.
    pub fn remove_product(&self, product_id: ProductId) -> SessionResult<CartView> {
        debug!(product_id, "remove_product");
        self.mutate(|engine| Ok(engine.remove_product(product_id)?))
    }

    /// Empties the cart.
    pub fn clear(&self) -> CartView {
        debug!("clear");
        let mut engine = self.shared.lock_engine();
        engine.clear();
        self.shared.publish(&engine)
    }

    /// Closes the banner early and cancels its timer.
    pub fn dismiss_notice(&self) -> CartView {
        let mut engine = self.shared.lock_engine();
        if engine.dismiss_notice() {
            self.shared.cancel_expiry();
        }
        self.shared.publish(&engine)
    }

    // =========================================================================
    // Cart → Renderer
    // =========================================================================

    /// Subscribes to views. The receiver starts at the current view.
    pub fn subscribe(&self) -> watch::Receiver<CartView> {
        self.shared.views.subscribe()
    }

    pub fn view(&self) -> CartView {
        self.shared.lock_engine().view()
    }

    pub fn snapshot(&self) -> Vec<CartLine> {
        self.shared.lock_engine().snapshot().to_vec()
    }

    pub fn subtotal(&self) -> Money {
        self.shared.lock_engine().subtotal()
    }

    pub fn progress(&self, threshold: Money) -> f64 {
        self.shared.lock_engine().progress(threshold)
    }

    pub fn gift_notice_active(&self) -> bool {
        self.shared.lock_engine().gift_notice().is_some()
    }

    /// Catalog products in listing order.
    pub fn products(&self) -> Vec<Product> {
        self.shared.lock_engine().catalog().products().to_vec()
    }

    /// Runs a read-only closure against the engine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let lines = session.with_engine(|cart| cart.line_count());
    /// ```
    pub fn with_engine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartEngine) -> R,
    {
        let engine = self.shared.lock_engine();
        f(&engine)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn mutate<F>(&self, f: F) -> SessionResult<CartView>
    where
        F: FnOnce(&mut CartEngine) -> Result<Mutation, CoreError>,
    {
        let mut engine = self.shared.lock_engine();
        let mutation = f(&mut engine)?;

        if let Some(token) = mutation.granted() {
            self.arm_expiry(token, engine.config().notice_duration);
        }

        Ok(self.shared.publish(&engine))
    }

    /// Replaces any pending banner timer with one for `token`.
    fn arm_expiry(&self, token: NoticeToken, after: Duration) {
        let shared = Arc::clone(&self.shared);

        let handle = self.runtime.spawn(async move {
            sleep(after).await;
            let mut engine = shared.lock_engine();
            if engine.expire_notice(token) {
                shared.publish(&engine);
            }
        });

        if let Some(previous) = self.shared.lock_expiry().replace(handle) {
            previous.abort();
            debug!(generation = token.generation(), "superseded pending banner timer");
        }
    }
}

impl Drop for CartSession {
    fn drop(&mut self) {
        self.shared.cancel_expiry();
    }
}
