//! # Cart Store
//!
//! The single source of truth for one shopper's cart.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  add_item / update_quantity / apply_coupon / ...                    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  1. lock cart (tokio Mutex - mutations run one at a time)           │
//! │  2. pure transition in velora-core  ──► Vec<CartEvent> | CartError  │
//! │  3. persist snapshot (lock still held - writes stay ordered)        │
//! │  4. render events ──► NotificationSink                             │
//! │  5. return CartView                                                 │
//! │                                                                     │
//! │  Persistence is best-effort: a failed write is logged and the       │
//! │  in-memory state stays authoritative for the rest of the session.   │
//! │  Rejections notify the user with the specific reason and leave      │
//! │  both memory and storage untouched.                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Coupon lookup is the calling layer's only other I/O: `redeem_coupon`
//! resolves a code through a [`CouponLookup`] port and checks the validity
//! window and usage cap before the snapshot ever reaches the cart.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::notify::{render_error, render_event, NotificationSink};
use velora_core::validation::{canonicalize_coupon_code, validate_coupon_code};
use velora_core::{
    Cart, CartError, CartEvent, CartResult, Coupon, LineItem, Money, BundleOffer,
    ProductDetails, Totals,
};
use velora_db::{Database, PersistedCoupon, SnapshotRepository};

// =============================================================================
// Views
// =============================================================================

/// Snapshot of the cart handed back after every operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub applied_coupon: Option<Coupon>,
    pub totals: Totals,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            items: cart.items().to_vec(),
            applied_coupon: cart.applied_coupon().cloned(),
            totals: *cart.totals(),
        }
    }
}

/// What the checkout collaborator needs to charge and record: the amount
/// due equals the cart's final total at this moment, and exactly one of the
/// discount fields is nonzero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub amount_due: Money,
    pub subtotal: Money,
    pub bundle_discount: Money,
    pub coupon_discount: Money,
    pub coupon_code: Option<String>,
}

impl From<&Cart> for CheckoutSummary {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        CheckoutSummary {
            amount_due: totals.final_total,
            subtotal: totals.subtotal,
            bundle_discount: totals.bundle_discount,
            coupon_discount: totals.coupon_discount,
            coupon_code: cart.applied_coupon().map(|c| c.code.clone()),
        }
    }
}

// =============================================================================
// Coupon Lookup Port
// =============================================================================

/// Resolves a canonical coupon code to a coupon record, or "not found".
///
/// The production implementation talks to the coupon service; tests and the
/// demo use [`InMemoryCoupons`].
pub trait CouponLookup: Send + Sync {
    fn find(&self, code: &str) -> impl Future<Output = StoreResult<Option<Coupon>>> + Send;
}

/// In-process coupon directory keyed by canonical code.
#[derive(Debug, Default)]
pub struct InMemoryCoupons {
    coupons: HashMap<String, Coupon>,
}

impl InMemoryCoupons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a coupon under its canonical code.
    pub fn insert(&mut self, coupon: Coupon) {
        self.coupons
            .insert(canonicalize_coupon_code(&coupon.code), coupon);
    }
}

impl CouponLookup for InMemoryCoupons {
    fn find(&self, code: &str) -> impl Future<Output = StoreResult<Option<Coupon>>> + Send {
        let found = self.coupons.get(code).cloned();
        async move { Ok(found) }
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Owns the cart for one session: in-memory state, snapshot persistence,
/// and the notification channel.
pub struct CartStore {
    cart: Mutex<Cart>,
    snapshots: SnapshotRepository,
    sink: Arc<dyn NotificationSink>,
}

impl CartStore {
    /// Opens the store, rehydrating from the persisted snapshot.
    ///
    /// Missing or corrupt snapshot rows mean an empty cart, never a failed
    /// startup. A persisted coupon that conflicts with an active bundle
    /// offer is dropped here, and its row cleared, before the first
    /// mutation runs.
    pub async fn open(
        db: &Database,
        offer: BundleOffer,
        sink: Arc<dyn NotificationSink>,
    ) -> StoreResult<Self> {
        let snapshots = db.snapshots();

        let items = snapshots.load_items().await?.unwrap_or_default();
        let persisted_coupon = snapshots.load_coupon().await?;
        let had_coupon = persisted_coupon.is_some();

        let cart = Cart::from_parts(items, persisted_coupon.map(|p| p.coupon), offer);

        if had_coupon && cart.applied_coupon().is_none() {
            warn!("Persisted coupon conflicts with the active bundle offer, dropping it");
            if let Err(err) = snapshots.clear_coupon().await {
                warn!(error = %err, "Failed to clear conflicting coupon snapshot");
            }
        }

        debug!(
            items = cart.items().len(),
            coupon = cart.applied_coupon().is_some(),
            "Cart store opened"
        );

        Ok(CartStore {
            cart: Mutex::new(cart),
            snapshots,
            sink,
        })
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Current cart contents and totals.
    pub async fn view(&self) -> CartView {
        CartView::from(&*self.cart.lock().await)
    }

    /// Whether a product id is currently in the cart.
    pub async fn is_in_cart(&self, id: &str) -> bool {
        self.cart.lock().await.is_in_cart(id)
    }

    /// The amounts the checkout collaborator must charge and record.
    pub async fn checkout_summary(&self) -> CheckoutSummary {
        CheckoutSummary::from(&*self.cart.lock().await)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a product, or grows its quantity by one.
    pub async fn add_item(&self, product: &ProductDetails) -> StoreResult<CartView> {
        debug!(id = %product.id, "add_item");
        self.mutate(|cart| cart.add_item(product)).await
    }

    /// Removes a line. Absent ids are a no-op.
    pub async fn remove_item(&self, id: &str) -> StoreResult<CartView> {
        debug!(id = %id, "remove_item");
        self.mutate(|cart| Ok(cart.remove_item(id))).await
    }

    /// Sets a line's quantity; zero or less removes the line.
    pub async fn update_quantity(&self, id: &str, quantity: i64) -> StoreResult<CartView> {
        debug!(id = %id, quantity = %quantity, "update_quantity");
        self.mutate(|cart| cart.update_quantity(id, quantity)).await
    }

    /// Empties the cart and its persisted snapshot.
    pub async fn clear(&self) -> StoreResult<CartView> {
        debug!("clear");
        self.mutate(|cart| Ok(cart.clear())).await
    }

    /// Applies an already-validated coupon snapshot.
    pub async fn apply_coupon(&self, coupon: Coupon) -> StoreResult<CartView> {
        debug!(code = %coupon.code, "apply_coupon");
        self.mutate(|cart| cart.apply_coupon(coupon)).await
    }

    /// Removes the applied coupon. No-op when none is applied.
    pub async fn remove_coupon(&self) -> StoreResult<CartView> {
        debug!("remove_coupon");
        self.mutate(|cart| Ok(cart.remove_coupon())).await
    }

    /// Resolves a user-entered code and applies it.
    ///
    /// This is the calling-layer half of coupon validation: canonicalize,
    /// look the code up, check the validity window and usage cap, then
    /// delegate to [`CartStore::apply_coupon`] for the in-cart rules
    /// (bundle exclusivity, minimum order amount).
    pub async fn redeem_coupon<L: CouponLookup>(
        &self,
        code: &str,
        lookup: &L,
    ) -> StoreResult<CartView> {
        self.redeem_coupon_at(code, lookup, Utc::now()).await
    }

    /// [`CartStore::redeem_coupon`] with an explicit clock, for tests.
    pub async fn redeem_coupon_at<L: CouponLookup>(
        &self,
        code: &str,
        lookup: &L,
        now: DateTime<Utc>,
    ) -> StoreResult<CartView> {
        let canonical = canonicalize_coupon_code(code);
        if let Err(err) = validate_coupon_code(&canonical) {
            return Err(self.reject(CartError::from(err).into()));
        }

        debug!(code = %canonical, "redeem_coupon");

        let coupon = match lookup.find(&canonical).await? {
            Some(coupon) => coupon,
            None => {
                return Err(self.reject(StoreError::CouponNotFound { code: canonical }));
            }
        };

        if now < coupon.valid_from {
            return Err(self.reject(StoreError::CouponNotYetActive { code: canonical }));
        }
        if now > coupon.valid_until {
            return Err(self.reject(StoreError::CouponExpired { code: canonical }));
        }
        if !coupon.has_uses_remaining() {
            return Err(self.reject(StoreError::CouponExhausted { code: canonical }));
        }

        self.apply_coupon(coupon).await
    }

    /// Completes checkout: reports the charge breakdown, then clears the
    /// cart and its snapshot. The caller records the summary on the order.
    pub async fn complete_checkout(&self) -> StoreResult<CheckoutSummary> {
        let mut cart = self.cart.lock().await;
        let summary = CheckoutSummary::from(&*cart);

        debug!(amount_due = %summary.amount_due, "complete_checkout");

        let events = cart.clear();
        self.persist(&cart).await;
        drop(cart);

        for event in &events {
            self.sink.notify(render_event(event));
        }

        Ok(summary)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Runs one mutation to completion: pure transition, ordered persist,
    /// notifications. The lock is held across the persistence await so a
    /// newer in-memory state can never be shadowed by an older write.
    async fn mutate<F>(&self, op: F) -> StoreResult<CartView>
    where
        F: FnOnce(&mut Cart) -> CartResult<Vec<CartEvent>>,
    {
        let mut cart = self.cart.lock().await;

        let events = match op(&mut cart) {
            Ok(events) => events,
            Err(err) => return Err(self.reject(err.into())),
        };

        if !events.is_empty() {
            self.persist(&cart).await;
        }

        let view = CartView::from(&*cart);
        drop(cart);

        for event in &events {
            self.sink.notify(render_event(event));
        }

        Ok(view)
    }

    /// Best-effort snapshot write. Failures are logged; the in-memory cart
    /// stays authoritative and the session continues.
    async fn persist(&self, cart: &Cart) {
        if let Err(err) = self.snapshots.save_items(cart.items()).await {
            warn!(error = %err, "Failed to persist cart items");
        }

        let result = match cart.applied_coupon() {
            Some(coupon) => {
                self.snapshots
                    .save_coupon(&PersistedCoupon {
                        coupon: coupon.clone(),
                        discount: cart.totals().coupon_discount,
                    })
                    .await
            }
            None => self.snapshots.clear_coupon().await,
        };
        if let Err(err) = result {
            warn!(error = %err, "Failed to persist coupon snapshot");
        }
    }

    /// Notifies the user about a rejected operation and passes it through.
    fn reject(&self, err: StoreError) -> StoreError {
        self.sink.notify(render_error(&err));
        err
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
