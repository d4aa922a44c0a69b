//! # Cart Aggregate
//!
//! The single source of truth for cart contents and totals.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                                                                     │
//! │   Empty ──add_item──► Populated ◄──add/remove/update──► Populated   │
//! │     ▲                     │                                         │
//! │     └──────clear()────────┘   (checkout completion also clears)     │
//! │                                                                     │
//! │   Orthogonal: NoCoupon ⇄ CouponApplied                              │
//! │     • entry blocked while bundle_active                             │
//! │     • a transition INTO bundle_active force-clears the coupon       │
//! │       within the same mutation (CouponSuperseded event)             │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation runs the pure evaluator at its end and returns a list of
//! [`CartEvent`] descriptors. The aggregate performs no I/O and raises no
//! notifications itself; the service layer renders events for the user.

use serde::{Deserialize, Serialize};

use crate::error::{CartError, CartResult, CouponRejection};
use crate::money::Money;
use crate::pricing::{evaluate, BundleOffer, Totals};
use crate::types::{Coupon, LineItem, ProductDetails};
use crate::validation::{validate_product_id, validate_product_name, validate_unit_price};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Events
// =============================================================================

/// Advisory descriptors of what a mutation did.
///
/// Events are outputs, not state: replaying them is never needed to rebuild
/// the cart. The service layer turns them into user-facing notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CartEvent {
    /// A line was added or its quantity grew by one.
    ItemAdded { name: String, quantity: i64 },

    /// A line was removed.
    ItemRemoved { name: String },

    /// A line's quantity was set explicitly.
    QuantityChanged { name: String, quantity: i64 },

    /// All items and the coupon were cleared.
    CartCleared,

    /// The bundle offer newly activated during this mutation.
    BundleActivated { saved: Money },

    /// A coupon was applied; `discount` is its current contribution.
    CouponApplied { code: String, discount: Money },

    /// The user removed the applied coupon.
    CouponRemoved { code: String },

    /// The bundle offer activated while a coupon was applied; the coupon
    /// was force-cleared as part of the same mutation.
    CouponSuperseded { code: String },
}

// =============================================================================
// Cart
// =============================================================================

/// The cart aggregate: ordered line items unique by product id, at most one
/// applied coupon, and cached totals recomputed after every mutation.
///
/// ## Invariants
/// - Items are unique by `id`; adding an existing product grows its quantity
/// - Every stored quantity is >= 1
/// - `totals` always equals `evaluate(items, coupon, offer)`
/// - A coupon is never applied while the bundle offer is active
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    applied_coupon: Option<Coupon>,
    totals: Totals,
    offer: BundleOffer,
}

impl Cart {
    /// Creates an empty cart priced under `offer`.
    pub fn new(offer: BundleOffer) -> Self {
        Cart {
            items: Vec::new(),
            applied_coupon: None,
            totals: Totals::default(),
            offer,
        }
    }

    /// Rebuilds a cart from persisted parts.
    ///
    /// Lines with a non-positive quantity are discarded (they are never
    /// written, so their presence means a damaged snapshot). A persisted
    /// coupon that conflicts with an active bundle offer is dropped, the
    /// same reconciliation every live mutation applies.
    pub fn from_parts(
        items: Vec<LineItem>,
        coupon: Option<Coupon>,
        offer: BundleOffer,
    ) -> Self {
        let mut cart = Cart {
            items: items.into_iter().filter(|i| i.quantity >= 1).collect(),
            applied_coupon: coupon,
            totals: Totals::default(),
            offer,
        };
        cart.recompute();
        if cart.totals.bundle_active {
            cart.applied_coupon = None;
            cart.recompute();
        }
        cart
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// The line items, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The applied coupon, if any.
    pub fn applied_coupon(&self) -> Option<&Coupon> {
        self.applied_coupon.as_ref()
    }

    /// The derived totals as of the last mutation.
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// The bundle offer this cart is priced under.
    pub fn offer(&self) -> &BundleOffer {
        &self.offer
    }

    /// Whether a product id is currently in the cart.
    pub fn is_in_cart(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Whether the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a product to the cart, or grows its quantity by one.
    ///
    /// Rejects without mutation when the id or name is empty, the unit
    /// price is negative, or a guard rail (cart size, line quantity) would
    /// be crossed.
    pub fn add_item(&mut self, product: &ProductDetails) -> CartResult<Vec<CartEvent>> {
        validate_product_id(&product.id)?;
        validate_product_name(&product.name)?;
        validate_unit_price(product.unit_price)?;

        let was_active = self.totals.bundle_active;

        let quantity = if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            if item.quantity + 1 > MAX_ITEM_QUANTITY {
                return Err(CartError::QuantityTooLarge {
                    requested: item.quantity + 1,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity += 1;
            item.quantity
        } else {
            if self.items.len() >= MAX_CART_ITEMS {
                return Err(CartError::CartTooLarge {
                    max: MAX_CART_ITEMS,
                });
            }
            self.items.push(LineItem::from_product(product));
            1
        };

        let mut events = vec![CartEvent::ItemAdded {
            name: product.name.clone(),
            quantity,
        }];
        self.finish_mutation(was_active, &mut events);
        Ok(events)
    }

    /// Removes the line with `id`. Removing an absent id is a no-op, not an
    /// error: the state before and after are equal and no events are raised.
    pub fn remove_item(&mut self, id: &str) -> Vec<CartEvent> {
        let Some(pos) = self.items.iter().position(|item| item.id == id) else {
            return Vec::new();
        };

        let was_active = self.totals.bundle_active;
        let removed = self.items.remove(pos);

        let mut events = vec![CartEvent::ItemRemoved { name: removed.name }];
        self.finish_mutation(was_active, &mut events);
        events
    }

    /// Sets the quantity of the line with `id`.
    ///
    /// A quantity of zero or less behaves exactly like [`Cart::remove_item`];
    /// an absent id is a no-op either way.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> CartResult<Vec<CartEvent>> {
        if quantity <= 0 {
            return Ok(self.remove_item(id));
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CartError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        let was_active = self.totals.bundle_active;

        let name = match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                item.name.clone()
            }
            None => return Ok(Vec::new()),
        };

        let mut events = vec![CartEvent::QuantityChanged { name, quantity }];
        self.finish_mutation(was_active, &mut events);
        Ok(events)
    }

    /// Empties the cart: items gone, coupon gone, totals zeroed.
    pub fn clear(&mut self) -> Vec<CartEvent> {
        self.items.clear();
        self.applied_coupon = None;
        self.recompute();
        vec![CartEvent::CartCleared]
    }

    /// Applies a validated coupon snapshot.
    ///
    /// The caller has already checked the validity window and usage cap;
    /// the cart enforces only bundle exclusivity and the minimum order
    /// amount. Rejection leaves the cart unchanged.
    pub fn apply_coupon(&mut self, coupon: Coupon) -> CartResult<Vec<CartEvent>> {
        if self.totals.bundle_active {
            return Err(CartError::CouponRejected {
                reason: CouponRejection::BundleActive,
            });
        }

        if self.totals.subtotal < coupon.min_order_amount {
            return Err(CartError::CouponRejected {
                reason: CouponRejection::MinimumNotMet {
                    required: coupon.min_order_amount,
                    subtotal: self.totals.subtotal,
                },
            });
        }

        let code = coupon.code.clone();
        self.applied_coupon = Some(coupon);
        self.recompute();

        Ok(vec![CartEvent::CouponApplied {
            code,
            discount: self.totals.coupon_discount,
        }])
    }

    /// Clears the applied coupon. No-op when none is applied.
    pub fn remove_coupon(&mut self) -> Vec<CartEvent> {
        let Some(coupon) = self.applied_coupon.take() else {
            return Vec::new();
        };

        self.recompute();
        vec![CartEvent::CouponRemoved { code: coupon.code }]
    }

    // -------------------------------------------------------------------------
    // Recomputation
    // -------------------------------------------------------------------------

    /// Recomputes the cached totals from current items and coupon.
    fn recompute(&mut self) {
        self.totals = evaluate(&self.items, self.applied_coupon.as_ref(), &self.offer);
    }

    /// Shared tail of every item mutation: recompute, report a fresh bundle
    /// activation, and force-clear a coupon the activation superseded.
    fn finish_mutation(&mut self, was_active: bool, events: &mut Vec<CartEvent>) {
        self.recompute();

        if self.totals.bundle_active && !was_active {
            events.push(CartEvent::BundleActivated {
                saved: self.totals.bundle_discount,
            });
        }

        // Mutual exclusion is enforced in the same transition, not merely
        // in the totals: the coupon leaves the state entirely.
        if self.totals.bundle_active {
            if let Some(coupon) = self.applied_coupon.take() {
                self.recompute();
                events.push(CartEvent::CouponSuperseded { code: coupon.code });
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
