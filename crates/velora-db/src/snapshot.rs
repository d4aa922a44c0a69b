//! # Snapshot Repository
//!
//! Durable key/value storage for the cart snapshot.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  cart_snapshots                                                     │
//! │  ┌──────────────┬───────────────────────────────┬────────────────┐  │
//! │  │ key          │ value (JSON text)             │ updated_at     │  │
//! │  ├──────────────┼───────────────────────────────┼────────────────┤  │
//! │  │ cart.items   │ [ {line item}, ... ]          │ RFC 3339       │  │
//! │  │ cart.coupon  │ { "coupon": …, "discount": …} │ RFC 3339       │  │
//! │  └──────────────┴───────────────────────────────┴────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A row that fails to parse on load is logged, deleted (so it cannot fail
//! again on the next startup), and reported as absent. Startup never
//! crashes on a damaged snapshot; the cart simply starts empty.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::DbResult;
use velora_core::{Coupon, LineItem, Money};

/// Snapshot key for the serialized line items.
pub const ITEMS_KEY: &str = "cart.items";

/// Snapshot key for the applied coupon.
pub const COUPON_KEY: &str = "cart.coupon";

// =============================================================================
// Persisted Coupon
// =============================================================================

/// The applied-coupon snapshot: the coupon itself plus the discount it was
/// contributing when persisted. The discount is informational; totals are
/// always recomputed from items and coupon on rehydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCoupon {
    pub coupon: Coupon,
    pub discount: Money,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for cart snapshot rows.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Typed snapshot operations
    // -------------------------------------------------------------------------

    /// Persists the full item list under [`ITEMS_KEY`].
    pub async fn save_items(&self, items: &[LineItem]) -> DbResult<()> {
        let payload = serde_json::to_string(items)?;
        self.put(ITEMS_KEY, &payload).await
    }

    /// Loads the item list. A missing or corrupt row yields `None`.
    pub async fn load_items(&self) -> DbResult<Option<Vec<LineItem>>> {
        self.load_parsed(ITEMS_KEY).await
    }

    /// Persists the applied coupon under [`COUPON_KEY`].
    pub async fn save_coupon(&self, snapshot: &PersistedCoupon) -> DbResult<()> {
        let payload = serde_json::to_string(snapshot)?;
        self.put(COUPON_KEY, &payload).await
    }

    /// Loads the applied coupon. A missing or corrupt row yields `None`.
    pub async fn load_coupon(&self) -> DbResult<Option<PersistedCoupon>> {
        self.load_parsed(COUPON_KEY).await
    }

    /// Deletes the coupon row (coupon removed or superseded).
    pub async fn clear_coupon(&self) -> DbResult<()> {
        self.delete(COUPON_KEY).await
    }

    /// Deletes both snapshot rows (cart cleared or checkout completed).
    pub async fn clear(&self) -> DbResult<()> {
        self.delete(ITEMS_KEY).await?;
        self.delete(COUPON_KEY).await
    }

    // -------------------------------------------------------------------------
    // Raw key/value operations
    // -------------------------------------------------------------------------

    async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing snapshot");

        sqlx::query(
            r#"
            INSERT INTO cart_snapshots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM cart_snapshots WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn delete(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM cart_snapshots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Loads and parses a snapshot row. A corrupt value is logged, deleted,
    /// and treated as absent.
    async fn load_parsed<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> DbResult<Option<T>> {
        let Some(raw) = self.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(err) => {
                warn!(key = %key, error = %err, "Corrupt snapshot row, discarding");
                self.delete(key).await?;
                Ok(None)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
