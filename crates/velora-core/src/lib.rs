//! # velora-core: Pure Business Logic for the Velora Cart
//!
//! Everything with a business rule in it lives here, as pure functions and
//! plain data with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Velora Cart Architecture                        │
//! │                                                                     │
//! │  Storefront frontend (TypeScript)                                   │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  velora-cart ── CartStore: locking, persistence, notifications      │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  ★ velora-core (THIS CRATE) ★                                       │
//! │                                                                     │
//! │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────────┐               │
//! │   │  money  │ │  types  │ │ pricing  │ │    cart    │               │
//! │   │  Money  │ │ LineItem│ │ evaluate │ │ Cart +     │               │
//! │   │         │ │ Coupon  │ │ Totals   │ │ CartEvent  │               │
//! │   └─────────┘ └─────────┘ └──────────┘ └────────────┘               │
//! │                                                                     │
//! │   NO I/O • NO DATABASE • NO CLOCK READS • PURE FUNCTIONS            │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  velora-db ── SQLite snapshot of (items, coupon)                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - integer-minor-unit Money type (no floating point)
//! - [`types`] - LineItem, Coupon, ProductDetails
//! - [`pricing`] - the bundle-vs-coupon evaluator
//! - [`cart`] - the Cart aggregate and its transition events
//! - [`error`] - domain error types
//! - [`validation`] - input validation rules
//!
//! ## Example
//!
//! ```rust
//! use velora_core::{BundleOffer, Cart, Money, ProductDetails};
//!
//! let mut cart = Cart::new(BundleOffer::new(Money::from_cents(999)));
//! let serum = ProductDetails {
//!     id: "serum-01".into(),
//!     name: "Vitamin C Serum".into(),
//!     unit_price: Money::from_cents(400),
//!     image_ref: None,
//!     category: Some("serum".into()),
//! };
//!
//! cart.add_item(&serum).unwrap();
//! assert_eq!(cart.totals().final_total, Money::from_cents(400));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEvent};
pub use error::{CartError, CartResult, CouponRejection, ValidationError};
pub use money::Money;
pub use pricing::{evaluate, BundleOffer, Totals};
pub use types::{Coupon, DiscountType, LineItem, ProductDetails};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// Keeps runaway carts (and runaway snapshots) bounded.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// Catches accidental over-ordering (1000 typed instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
