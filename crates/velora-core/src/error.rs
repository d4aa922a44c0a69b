//! # Error Types
//!
//! Domain errors for velora-core.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  velora-core errors (this file)                                     │
//! │  ├── CartError        - cart transition rejections                  │
//! │  ├── CouponRejection  - why a coupon could not be applied           │
//! │  └── ValidationError  - input validation failures                   │
//! │                                                                     │
//! │  velora-db: DbError      velora-cart: StoreError                    │
//! │                                                                     │
//! │  Flow: ValidationError → CartError → StoreError → frontend          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors are enum variants with context fields, never bare strings. Every
//! rejection leaves the cart unchanged.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart transition rejections.
#[derive(Debug, Error)]
pub enum CartError {
    /// The coupon could not be applied; the cart is unchanged.
    #[error("coupon rejected: {reason}")]
    CouponRejected { reason: CouponRejection },

    /// Cart has reached the maximum number of distinct lines.
    #[error("cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Requested line quantity exceeds the cap.
    #[error("quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Input validation failed; no mutation occurred.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Why a coupon was refused by the cart.
///
/// Temporal and usage failures never appear here: those are checked by the
/// calling layer before the coupon snapshot reaches the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponRejection {
    /// The bundle offer is active; bundle and coupon are mutually exclusive.
    BundleActive,

    /// Subtotal is below the coupon's minimum order amount.
    MinimumNotMet { required: Money, subtotal: Money },
}

impl std::fmt::Display for CouponRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CouponRejection::BundleActive => {
                write!(f, "bundle offer is active")
            }
            CouponRejection::MinimumNotMet { required, subtotal } => {
                write!(f, "minimum order amount {} not met (subtotal {})", required, subtotal)
            }
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any cart mutation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Monetary value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (bad characters, malformed code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_rejection_messages() {
        let err = CartError::CouponRejected {
            reason: CouponRejection::BundleActive,
        };
        assert_eq!(err.to_string(), "coupon rejected: bundle offer is active");

        let err = CartError::CouponRejected {
            reason: CouponRejection::MinimumNotMet {
                required: Money::from_cents(50000),
                subtotal: Money::from_cents(19900),
            },
        };
        assert_eq!(
            err.to_string(),
            "coupon rejected: minimum order amount 500.00 not met (subtotal 199.00)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        };
        assert_eq!(err.to_string(), "unit_price must not be negative");
    }

    #[test]
    fn test_validation_converts_to_cart_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let cart_err: CartError = validation_err.into();
        assert!(matches!(cart_err, CartError::Validation(_)));
    }
}
