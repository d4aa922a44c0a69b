//! # Validation Module
//!
//! Field-level checks run before any cart mutation. A failed check rejects
//! the operation with no state change.

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Field Validators
// =============================================================================

/// Validates a product id.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 64 characters
///
/// ## Example
/// ```rust
/// use velora_core::validation::validate_product_id;
///
/// assert!(validate_product_id("prod-8c1f").is_ok());
/// assert!(validate_product_id("  ").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: 64,
        });
    }

    Ok(())
}

/// Validates a product display name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free samples); negative is not.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Coupon Code
// =============================================================================

/// Canonicalizes a coupon code: trimmed, uppercase.
///
/// Codes are case-insensitive at the boundary; everything downstream
/// compares the canonical form.
///
/// ## Example
/// ```rust
/// use velora_core::validation::canonicalize_coupon_code;
///
/// assert_eq!(canonicalize_coupon_code(" glow10 "), "GLOW10");
/// ```
pub fn canonicalize_coupon_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Validates a coupon code after canonicalization.
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 32,
        });
    }

    if !code.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id() {
        assert!(validate_product_id("prod-1").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_product_name() {
        assert!(validate_product_name("Hyaluronic Acid Serum").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_unit_price() {
        assert!(validate_unit_price(Money::from_cents(0)).is_ok());
        assert!(validate_unit_price(Money::from_cents(49900)).is_ok());
        assert!(validate_unit_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_coupon_code_canonical_form() {
        assert_eq!(canonicalize_coupon_code("glow10"), "GLOW10");
        assert_eq!(canonicalize_coupon_code("  Welcome-5 "), "WELCOME-5");
    }

    #[test]
    fn test_coupon_code_validation() {
        assert!(validate_coupon_code("GLOW10").is_ok());
        assert!(validate_coupon_code("WELCOME_5").is_ok());
        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("TEN PERCENT").is_err());
        assert!(validate_coupon_code(&"A".repeat(33)).is_err());
    }
}
