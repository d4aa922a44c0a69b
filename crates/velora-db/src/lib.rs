//! # velora-db: Snapshot Persistence for the Velora Cart
//!
//! SQLite-backed durable storage for the cart snapshot, using sqlx for
//! async access and embedded migrations.
//!
//! ## Position in the Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  CartStore mutation (velora-cart)                                   │
//! │       │  after the in-memory transition commits                     │
//! │       ▼                                                             │
//! │  SnapshotRepository ── save_items / save_coupon / clear             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite  cart_snapshots(key, value, updated_at)                     │
//! │       ▲                                                             │
//! │       │  on startup                                                 │
//! │  load_items / load_coupon ── corrupt rows logged, deleted,          │
//! │                              treated as absent (never a crash)      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pool`] - connection pool creation and configuration
//! - [`migrations`] - embedded schema migrations
//! - [`snapshot`] - the key/value snapshot repository
//! - [`error`] - database error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use snapshot::{PersistedCoupon, SnapshotRepository, COUPON_KEY, ITEMS_KEY};
