//! # Domain Types
//!
//! Core domain types for the Velora cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  ProductDetails            LineItem               Coupon            │
//! │  ──────────────            ────────               ──────            │
//! │  id                        id (unique in cart)    code (canonical)  │
//! │  name                      name (frozen)          discount_type     │
//! │  unit_price                unit_price (frozen)    discount_value    │
//! │  image_ref                 image_ref (frozen)     min_order_amount  │
//! │  category                  category (frozen)      valid_from/until  │
//! │                            quantity >= 1          max_uses/used     │
//! │                                                                     │
//! │  add_item() freezes ProductDetails into a LineItem so the cart      │
//! │  keeps displaying consistent data even if the catalog changes.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Structs serialize camelCase: the persisted snapshot and the storefront
//! frontend both speak that convention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Details
// =============================================================================

/// Catalog data handed to `add_item` by the storefront.
///
/// The cart never looks products up itself; the caller resolves the product
/// and passes this snapshot in.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDetails {
    /// Catalog identifier. Unique key within the cart.
    pub id: String,

    /// Display name shown in the cart and on notifications.
    pub name: String,

    /// Unit price in minor units. Must be non-negative.
    pub unit_price: Money,

    /// Reference to the product image (storage path or URL).
    pub image_ref: Option<String>,

    /// Catalog category (e.g. "serum", "moisturizer").
    pub category: Option<String>,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// Product data is frozen at add time; `quantity` is the only field that
/// changes afterwards. An item with quantity 0 is never stored - reaching 0
/// removes the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Product id (unique key within the cart).
    pub id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Image reference at time of adding (frozen).
    pub image_ref: Option<String>,

    /// Category at time of adding (frozen).
    pub category: Option<String>,

    /// Quantity in cart. Invariant: >= 1.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item from catalog details with quantity 1.
    pub fn from_product(product: &ProductDetails) -> Self {
        LineItem {
            id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            image_ref: product.image_ref.clone(),
            category: product.category.clone(),
            quantity: 1,
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// Discount kind a coupon grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DiscountType {
    /// `discount_value` percent off the subtotal.
    Percentage,
    /// `discount_value` minor units off the subtotal.
    Fixed,
}

/// A coupon snapshot as resolved by the coupon lookup collaborator.
///
/// The cart holds at most one applied coupon at a time, and only while the
/// bundle offer is not active. Temporal and usage validity are checked by
/// the calling layer before the coupon reaches the cart; the cart itself
/// only enforces the minimum order amount and bundle exclusivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Coupon {
    /// Canonical code: trimmed, uppercase.
    pub code: String,

    /// Percentage or fixed discount.
    pub discount_type: DiscountType,

    /// Percent for `Percentage`, minor units for `Fixed`.
    pub discount_value: i64,

    /// Subtotal required before the coupon may be applied.
    pub min_order_amount: Money,

    /// Start of the validity window (inclusive).
    #[ts(as = "String")]
    pub valid_from: DateTime<Utc>,

    /// End of the validity window (inclusive).
    #[ts(as = "String")]
    pub valid_until: DateTime<Utc>,

    /// Redemption cap. None = unlimited.
    pub max_uses: Option<i64>,

    /// Redemptions so far.
    pub used_count: i64,
}

impl Coupon {
    /// Checks whether `now` falls inside the inclusive validity window.
    pub fn is_within_window(&self, now: DateTime<Utc>) -> bool {
        now >= self.valid_from && now <= self.valid_until
    }

    /// Checks whether the redemption cap still has headroom.
    pub fn has_uses_remaining(&self) -> bool {
        match self.max_uses {
            Some(max) => self.used_count < max,
            None => true,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
