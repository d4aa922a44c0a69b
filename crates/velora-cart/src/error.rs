//! # Store Error Type
//!
//! Unified error type for cart store operations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  velora-core CartError ──┐                                          │
//! │  velora-db   DbError   ──┼──► StoreError ──► code() + message       │
//! │  redemption checks     ──┘         │                                │
//! │                                    ▼                                │
//! │                     storefront frontend switch on code              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `code()` accessor gives the frontend a stable machine-readable
//! discriminator; the Display message is for humans.

use serde::Serialize;
use thiserror::Error;

use velora_core::{CartError, CouponRejection};
use velora_db::DbError;

/// Errors surfaced by [`crate::CartStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A cart transition was rejected (validation, guard rail, coupon rule).
    #[error(transparent)]
    Cart(#[from] CartError),

    /// No coupon exists for the given code.
    #[error("coupon not found: {code}")]
    CouponNotFound { code: String },

    /// The coupon's validity window has not opened yet.
    #[error("coupon {code} is not active yet")]
    CouponNotYetActive { code: String },

    /// The coupon's validity window has closed.
    #[error("coupon {code} has expired")]
    CouponExpired { code: String },

    /// The coupon's redemption cap is exhausted.
    #[error("coupon {code} has no uses remaining")]
    CouponExhausted { code: String },

    /// The snapshot store failed while opening the cart.
    #[error("snapshot store error: {0}")]
    Db(#[from] DbError),
}

/// Machine-readable error codes for the storefront frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    CartError,
    CouponRejectedBundleActive,
    CouponRejectedMinimumNotMet,
    CouponNotFound,
    CouponNotYetActive,
    CouponExpired,
    CouponExhausted,
    StorageError,
}

impl StoreError {
    /// Stable discriminator for programmatic handling.
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Cart(CartError::Validation(_)) => ErrorCode::ValidationError,
            StoreError::Cart(CartError::CouponRejected {
                reason: CouponRejection::BundleActive,
            }) => ErrorCode::CouponRejectedBundleActive,
            StoreError::Cart(CartError::CouponRejected {
                reason: CouponRejection::MinimumNotMet { .. },
            }) => ErrorCode::CouponRejectedMinimumNotMet,
            StoreError::Cart(_) => ErrorCode::CartError,
            StoreError::CouponNotFound { .. } => ErrorCode::CouponNotFound,
            StoreError::CouponNotYetActive { .. } => ErrorCode::CouponNotYetActive,
            StoreError::CouponExpired { .. } => ErrorCode::CouponExpired,
            StoreError::CouponExhausted { .. } => ErrorCode::CouponExhausted,
            StoreError::Db(_) => ErrorCode::StorageError,
        }
    }
}

/// Convenience alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use velora_core::{Money, ValidationError};

    #[test]
    fn test_error_codes() {
        let err = StoreError::CouponNotFound {
            code: "GHOST".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::CouponNotFound);
        assert_eq!(err.to_string(), "coupon not found: GHOST");

        let err: StoreError = CartError::Validation(ValidationError::Required {
            field: "id".to_string(),
        })
        .into();
        assert_eq!(err.code(), ErrorCode::ValidationError);

        let err: StoreError = CartError::CouponRejected {
            reason: CouponRejection::MinimumNotMet {
                required: Money::from_cents(500),
                subtotal: Money::from_cents(100),
            },
        }
        .into();
        assert_eq!(err.code(), ErrorCode::CouponRejectedMinimumNotMet);
    }

    #[test]
    fn test_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::CouponRejectedBundleActive).unwrap();
        assert_eq!(json, "\"COUPON_REJECTED_BUNDLE_ACTIVE\"");
    }
}
