//! # velora-cart: Cart Store Service
//!
//! The orchestration layer over the Velora cart core.
//!
//! ## Module Organization
//! ```text
//! velora_cart/
//! ├── lib.rs      ◄─── module exports
//! ├── store.rs    ◄─── CartStore: state, persistence, redemption, checkout
//! ├── notify.rs   ◄─── CartEvent → user-facing notifications
//! └── error.rs    ◄─── StoreError + frontend error codes
//! ```
//!
//! ## Responsibilities
//! - One `CartStore` per shopper session; all mutations run through its
//!   mutex one at a time, so totals and snapshots never interleave
//! - Persist the snapshot after every mutation (best-effort, ordered)
//! - Rehydrate on open; damaged snapshots mean an empty cart, not a crash
//! - Resolve and validate coupon codes before they reach the cart
//! - Render transition events as notifications for the storefront
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use velora_cart::{CartStore, TracingSink};
//! use velora_core::{BundleOffer, Money, ProductDetails};
//! use velora_db::{Database, DbConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(DbConfig::new("./velora.db")).await?;
//! let store = CartStore::open(&db, BundleOffer::default(), Arc::new(TracingSink)).await?;
//!
//! let view = store
//!     .add_item(&ProductDetails {
//!         id: "serum-01".into(),
//!         name: "Vitamin C Serum".into(),
//!         unit_price: Money::from_cents(129_900),
//!         image_ref: None,
//!         category: Some("serum".into()),
//!     })
//!     .await?;
//! println!("total: {}", view.totals.final_total);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod notify;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ErrorCode, StoreError, StoreResult};
pub use notify::{BufferSink, Notification, NotificationSink, Severity, TracingSink};
pub use store::{CartStore, CartView, CheckoutSummary, CouponLookup, InMemoryCoupons};
