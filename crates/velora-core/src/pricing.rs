//! # Pricing Rule Evaluator
//!
//! Pure, deterministic computation of all derived cart totals.
//!
//! ## Rule: bundle offer vs. coupon, mutually exclusive, bundle wins
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  evaluate(items, coupon, offer)                                     │
//! │                                                                     │
//! │  1. subtotal, item_count                                            │
//! │          │                                                          │
//! │          ▼                                                          │
//! │  2. item_count >= 3 AND first-three cost > flat price?              │
//! │          │ yes                          │ no                        │
//! │          ▼                              ▼                           │
//! │     BUNDLE BRANCH                  COUPON BRANCH                    │
//! │     discount = first_three         coupon present AND               │
//! │                - flat_price        subtotal >= min_order?           │
//! │     final = flat_price             discount = pct or fixed,         │
//! │             + additional                      clamped to subtotal   │
//! │                                    final = subtotal - discount      │
//! │                                                                     │
//! │  The branches are alternatives: bundle_discount > 0 implies         │
//! │  coupon_discount == 0, always.                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The evaluator holds no state and performs no I/O; calling it twice with
//! the same inputs yields the same totals.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Coupon, DiscountType, LineItem};

// =============================================================================
// Bundle Offer Configuration
// =============================================================================

/// Number of units covered by the bundle offer.
pub const BUNDLE_UNIT_COUNT: i64 = 3;

/// Default flat price for the first three units: 999.00 in minor units.
pub const DEFAULT_BUNDLE_PRICE_CENTS: i64 = 99_900;

/// The "first 3 units for a flat price" promotion.
///
/// Constructor-injected into the cart so tests can vary the flat price
/// without touching globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BundleOffer {
    /// Units covered by the flat price.
    pub unit_count: i64,

    /// Flat price charged for the covered units when the offer activates.
    pub flat_price: Money,
}

impl BundleOffer {
    /// Creates an offer covering [`BUNDLE_UNIT_COUNT`] units at `flat_price`.
    pub const fn new(flat_price: Money) -> Self {
        BundleOffer {
            unit_count: BUNDLE_UNIT_COUNT,
            flat_price,
        }
    }
}

impl Default for BundleOffer {
    fn default() -> Self {
        BundleOffer::new(Money::from_cents(DEFAULT_BUNDLE_PRICE_CENTS))
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Derived cart totals. Never stored independently of items and coupon;
/// always recomputed by [`evaluate`].
///
/// Invariants:
/// - `final_total == subtotal - bundle_discount - coupon_discount`
/// - `bundle_discount > 0` implies `coupon_discount == 0`
/// - `final_total >= 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Totals {
    /// Sum of line totals before any discount.
    pub subtotal: Money,

    /// Total unit count across all lines.
    pub item_count: i64,

    /// Amount saved by the bundle offer (zero when inactive).
    pub bundle_discount: Money,

    /// Whether the bundle offer is currently active.
    pub bundle_active: bool,

    /// Amount saved by the applied coupon (zero when none or bundle active).
    pub coupon_discount: Money,

    /// The amount actually charged.
    pub final_total: Money,
}

// =============================================================================
// Evaluation
// =============================================================================

/// Computes all derived totals from `(items, coupon)` under `offer`.
///
/// The coupon passed here is assumed already resolved and
/// temporally valid; only the minimum-order threshold is re-checked, so a
/// coupon that was applied at a higher subtotal silently contributes zero
/// after items are removed below its minimum.
pub fn evaluate(items: &[LineItem], coupon: Option<&Coupon>, offer: &BundleOffer) -> Totals {
    let subtotal = items
        .iter()
        .fold(Money::zero(), |acc, item| acc + item.line_total());
    let item_count: i64 = items.iter().map(|item| item.quantity).sum();

    // Bundle branch: walk the first `unit_count` units in list order.
    if item_count >= offer.unit_count {
        let (first_units_cost, additional_cost) = split_at_unit_cutoff(items, offer.unit_count);

        // Activates only when the flat price is an actual discount. Three
        // cheap items stay at their organic subtotal.
        if first_units_cost > offer.flat_price {
            let bundle_discount = first_units_cost - offer.flat_price;
            return Totals {
                subtotal,
                item_count,
                bundle_discount,
                bundle_active: true,
                coupon_discount: Money::zero(),
                final_total: offer.flat_price + additional_cost,
            };
        }
    }

    // Coupon branch: only reached while the bundle offer is inactive.
    let coupon_discount = match coupon {
        Some(coupon) if subtotal >= coupon.min_order_amount => {
            let raw = match coupon.discount_type {
                DiscountType::Percentage => subtotal.percent_of(coupon.discount_value),
                DiscountType::Fixed => Money::from_cents(coupon.discount_value),
            };
            // Clamp so the final total never goes negative; the reported
            // discount is the clamped value, keeping the totals invariant.
            raw.min(subtotal)
        }
        _ => Money::zero(),
    };

    Totals {
        subtotal,
        item_count,
        bundle_discount: Money::zero(),
        bundle_active: false,
        coupon_discount,
        final_total: (subtotal - coupon_discount).floor_at_zero(),
    }
}

/// Splits item cost at the bundle unit cutoff, in list order.
///
/// Returns `(cost of the first N units, cost of every unit after them)`.
/// A single line can straddle the cutoff: with lines of quantity 2 and 2
/// and a cutoff of 3, one unit of the second line lands on each side.
fn split_at_unit_cutoff(items: &[LineItem], cutoff: i64) -> (Money, Money) {
    let mut units_taken = 0;
    let mut first_units_cost = Money::zero();
    let mut additional_cost = Money::zero();

    for item in items {
        let take = (cutoff - units_taken).min(item.quantity).max(0);
        first_units_cost += item.unit_price.multiply_quantity(take);
        additional_cost += item.unit_price.multiply_quantity(item.quantity - take);
        units_taken += take;
    }

    (first_units_cost, additional_cost)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn line(id: &str, price_cents: i64, quantity: i64) -> LineItem {
        LineItem {
            id: id.to_string(),
            name: format!("Product {}", id),
            unit_price: Money::from_cents(price_cents),
            image_ref: None,
            category: None,
            quantity,
        }
    }

    fn offer_999() -> BundleOffer {
        BundleOffer::new(Money::from_cents(999))
    }

    fn percent_coupon(value: i64, min_order_cents: i64) -> Coupon {
        Coupon {
            code: "GLOW10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: value,
            min_order_amount: Money::from_cents(min_order_cents),
            valid_from: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            valid_until: Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap(),
            max_uses: None,
            used_count: 0,
        }
    }

    fn fixed_coupon(value_cents: i64, min_order_cents: i64) -> Coupon {
        Coupon {
            discount_type: DiscountType::Fixed,
            discount_value: value_cents,
            code: "FLAT".to_string(),
            ..percent_coupon(0, min_order_cents)
        }
    }

    fn assert_invariants(t: &Totals) {
        assert_eq!(t.final_total, t.subtotal - t.bundle_discount - t.coupon_discount);
        if t.bundle_discount.is_positive() {
            assert!(t.coupon_discount.is_zero());
        }
        assert!(!t.final_total.is_negative());
    }

    #[test]
    fn test_empty_cart_is_all_zeroes() {
        let totals = evaluate(&[], None, &offer_999());
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_subtotal_and_item_count() {
        let items = vec![line("a", 200, 2), line("b", 150, 1)];
        let totals = evaluate(&items, None, &offer_999());

        assert_eq!(totals.subtotal, Money::from_cents(550));
        assert_eq!(totals.item_count, 3);
        assert_invariants(&totals);
    }

    #[test]
    fn test_bundle_not_active_below_three_units() {
        let items = vec![line("a", 400, 2)];
        let totals = evaluate(&items, None, &offer_999());

        assert!(!totals.bundle_active);
        assert_eq!(totals.final_total, Money::from_cents(800));
        assert_invariants(&totals);
    }

    #[test]
    fn test_bundle_not_forced_on_cheap_cart() {
        // Three items at 200: first-three cost 600 <= 999, no raising of price.
        let items = vec![line("a", 200, 1), line("b", 200, 1), line("c", 200, 1)];
        let totals = evaluate(&items, None, &offer_999());

        assert!(!totals.bundle_active);
        assert!(totals.bundle_discount.is_zero());
        assert_eq!(totals.final_total, Money::from_cents(600));
        assert_invariants(&totals);
    }

    #[test]
    fn test_bundle_activates_when_flat_price_is_cheaper() {
        // Three items at 400: first-three cost 1200 > 999.
        let items = vec![line("a", 400, 1), line("b", 400, 1), line("c", 400, 1)];
        let totals = evaluate(&items, None, &offer_999());

        assert!(totals.bundle_active);
        assert_eq!(totals.bundle_discount, Money::from_cents(201));
        assert_eq!(totals.final_total, Money::from_cents(999));
        assert_invariants(&totals);
    }

    #[test]
    fn test_bundle_overflow_charges_extra_units_at_full_price() {
        // Four units at 400: flat 999 covers three, fourth at full price.
        let items = vec![line("a", 400, 4)];
        let totals = evaluate(&items, None, &offer_999());

        assert!(totals.bundle_active);
        assert_eq!(totals.final_total, Money::from_cents(999 + 400));
        assert_invariants(&totals);
    }

    #[test]
    fn test_bundle_cutoff_can_straddle_a_line() {
        // Lines of quantity 2 and 2; the cutoff takes one unit from the
        // second line. first_three = 2*500 + 1*300 = 1300, additional = 300.
        let items = vec![line("a", 500, 2), line("b", 300, 2)];
        let totals = evaluate(&items, None, &offer_999());

        assert!(totals.bundle_active);
        assert_eq!(totals.bundle_discount, Money::from_cents(1300 - 999));
        assert_eq!(totals.final_total, Money::from_cents(999 + 300));
        assert_invariants(&totals);
    }

    #[test]
    fn test_bundle_walk_uses_list_order() {
        // Same multiset, different order, different first-three cost.
        let cheap_first = vec![line("a", 100, 2), line("b", 600, 2)];
        let dear_first = vec![line("b", 600, 2), line("a", 100, 2)];

        let t1 = evaluate(&cheap_first, None, &offer_999());
        let t2 = evaluate(&dear_first, None, &offer_999());

        // cheap first: 100+100+600 = 800 <= 999, inactive
        assert!(!t1.bundle_active);
        // dear first: 600+600+100 = 1300 > 999, active
        assert!(t2.bundle_active);
        assert_eq!(t2.final_total, Money::from_cents(999 + 100));
        assert_invariants(&t1);
        assert_invariants(&t2);
    }

    #[test]
    fn test_percentage_coupon() {
        let items = vec![line("a", 250, 2)];
        let coupon = percent_coupon(10, 100);
        let totals = evaluate(&items, Some(&coupon), &offer_999());

        assert_eq!(totals.coupon_discount, Money::from_cents(50));
        assert_eq!(totals.final_total, Money::from_cents(450));
        assert_invariants(&totals);
    }

    #[test]
    fn test_fixed_coupon() {
        let items = vec![line("a", 300, 2)];
        let coupon = fixed_coupon(150, 100);
        let totals = evaluate(&items, Some(&coupon), &offer_999());

        assert_eq!(totals.coupon_discount, Money::from_cents(150));
        assert_eq!(totals.final_total, Money::from_cents(450));
        assert_invariants(&totals);
    }

    #[test]
    fn test_coupon_below_minimum_contributes_zero() {
        let items = vec![line("a", 300, 1)];
        let coupon = percent_coupon(10, 500);
        let totals = evaluate(&items, Some(&coupon), &offer_999());

        assert!(totals.coupon_discount.is_zero());
        assert_eq!(totals.final_total, Money::from_cents(300));
        assert_invariants(&totals);
    }

    #[test]
    fn test_fixed_coupon_clamped_at_zero_floor() {
        // Fixed discount 1000 on subtotal 500: never negative.
        let items = vec![line("a", 500, 1)];
        let coupon = fixed_coupon(1000, 100);
        let totals = evaluate(&items, Some(&coupon), &offer_999());

        assert_eq!(totals.coupon_discount, Money::from_cents(500));
        assert_eq!(totals.final_total, Money::zero());
        assert_invariants(&totals);
    }

    #[test]
    fn test_bundle_suppresses_coupon_discount() {
        let items = vec![line("a", 400, 3)];
        let coupon = percent_coupon(10, 100);
        let totals = evaluate(&items, Some(&coupon), &offer_999());

        assert!(totals.bundle_active);
        assert!(totals.coupon_discount.is_zero());
        assert_eq!(totals.final_total, Money::from_cents(999));
        assert_invariants(&totals);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let items = vec![line("a", 400, 2), line("b", 150, 3)];
        let coupon = percent_coupon(15, 100);

        let first = evaluate(&items, Some(&coupon), &offer_999());
        let second = evaluate(&items, Some(&coupon), &offer_999());
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_offer() {
        let offer = BundleOffer::default();
        assert_eq!(offer.unit_count, 3);
        assert_eq!(offer.flat_price, Money::from_cents(99_900));
    }
}
