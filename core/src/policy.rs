//! Pricing and ranking policies.
//!
//! The discount formula and the popularity ranking are business
//! heuristics, not laws of the domain. They are value types constructed
//! at configuration time and passed to the code that needs them, so a
//! deployment can swap the numbers without touching call sites.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A fully derived price for a tour that has a base price.
///
/// Either all three fields exist (the tour has a price) or none do —
/// callers hold an `Option<PriceQuote>`, which keeps "price not
/// available" distinct from "price is zero" at the type level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// The undiscounted base price.
    pub base: Money,
    /// Discount applied, in percent (0–100).
    pub discount_percent: f64,
    /// `base × (1 − discount/100)`, rounded to the nearest cent.
    pub final_price: Money,
}

/// Derives final prices from base price and discount percentage.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PricingPolicy {}

impl PricingPolicy {
    /// Quotes a price.
    ///
    /// A missing base price yields `None` (no pricing at all, not a zero
    /// price). A missing discount is treated as 0%.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn quote(&self, base: Option<Money>, discount_percent: Option<f64>) -> Option<PriceQuote> {
        let base = base?;
        let discount = discount_percent.unwrap_or(0.0).clamp(0.0, 100.0);
        let final_cents = (base.cents() as f64 * (1.0 - discount / 100.0)).round();
        Some(PriceQuote {
            base,
            discount_percent: discount,
            final_price: Money::from_cents(final_cents as u64),
        })
    }

    /// Absolute savings for a discounted price, `base × discount/100`.
    ///
    /// Used by the tour listing's `discount=high` ordering.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn savings(&self, base: Money, discount_percent: f64) -> Money {
        let discount = discount_percent.clamp(0.0, 100.0);
        Money::from_cents((base.cents() as f64 * discount / 100.0).round() as u64)
    }
}

/// Ranks tours for the listing endpoints.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct RankingPolicy {}

impl RankingPolicy {
    /// Popularity score: `rating × review_count`. Unrated tours score 0.
    #[must_use]
    pub fn popularity(&self, rating: Option<u8>, review_count: u32) -> u64 {
        u64::from(rating.unwrap_or(0)) * u64::from(review_count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn quote_applies_discount() {
        let policy = PricingPolicy::default();
        let quote = policy
            .quote(Some(Money::from_cents(100_000)), Some(25.0))
            .unwrap();
        assert_eq!(quote.base, Money::from_cents(100_000));
        assert_eq!(quote.discount_percent, 25.0);
        assert_eq!(quote.final_price, Money::from_cents(75_000));
    }

    #[test]
    fn quote_missing_discount_is_zero_percent() {
        let policy = PricingPolicy::default();
        let quote = policy.quote(Some(Money::from_cents(5000)), None).unwrap();
        assert_eq!(quote.final_price, Money::from_cents(5000));
    }

    #[test]
    fn quote_missing_base_is_absent_not_zero() {
        let policy = PricingPolicy::default();
        assert!(policy.quote(None, Some(50.0)).is_none());
    }

    #[test]
    fn zero_price_is_a_real_quote() {
        let policy = PricingPolicy::default();
        let quote = policy.quote(Some(Money::from_cents(0)), Some(10.0));
        assert_eq!(quote.unwrap().final_price, Money::from_cents(0));
    }

    #[test]
    fn savings_ordering_input() {
        let policy = PricingPolicy::default();
        assert_eq!(
            policy.savings(Money::from_cents(20_000), 50.0),
            Money::from_cents(10_000)
        );
    }

    #[test]
    fn popularity_is_rating_times_reviews() {
        let ranking = RankingPolicy::default();
        assert_eq!(ranking.popularity(Some(4), 250), 1000);
        assert_eq!(ranking.popularity(None, 250), 0);
    }

    proptest! {
        /// final = base × (1 − d/100), rounded to the nearest cent, for
        /// every discount in [0, 100].
        #[test]
        fn final_price_formula_holds(cents in 0u64..10_000_000, discount in 0.0f64..=100.0) {
            let policy = PricingPolicy::default();
            let quote = policy.quote(Some(Money::from_cents(cents)), Some(discount)).unwrap();
            let expected = (cents as f64 * (1.0 - discount / 100.0)).round() as u64;
            prop_assert_eq!(quote.final_price.cents(), expected);
            prop_assert!(quote.final_price.cents() <= cents);
        }
    }
}
