//! Discount calculation
//!
//! Cart values are whole numbers of the cart's minimum currency unit. Discounted values are
//! rounded down to that unit and never drop below zero or rise above the original cart value.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

use crate::offers::{Offer, OfferDiscount};

/// Errors specific to discount calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiscountError {
    /// Intermediate arithmetic could not be represented.
    #[error("discount calculation overflowed")]
    Overflow,
}

/// Cart value after applying an optional offer. Without an offer the cart is unchanged.
///
/// # Errors
///
/// Returns `DiscountError::Overflow` if the calculation cannot be represented.
pub fn discounted_cart_value(cart_value: u64, offer: Option<&Offer>) -> Result<u64, DiscountError> {
    match offer {
        Some(offer) => apply_discount(cart_value, offer.discount()),
        None => Ok(cart_value),
    }
}

/// Apply a discount to a cart value.
///
/// - `FlatPercent(v)`: `floor(cart * (100 - v) / 100)`
/// - `FlatAmount(v)`: `floor(max(0, cart - v))`
///
/// # Errors
///
/// Returns `DiscountError::Overflow` if the calculation cannot be represented.
pub fn apply_discount(cart_value: u64, discount: &OfferDiscount) -> Result<u64, DiscountError> {
    let cart = Decimal::from(cart_value);

    let discounted = match *discount {
        OfferDiscount::FlatPercent(percent) => Decimal::ONE_HUNDRED
            .checked_sub(percent)
            .and_then(|remaining| cart.checked_mul(remaining))
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED)),
        OfferDiscount::FlatAmount(amount) => cart.checked_sub(amount),
    }
    .ok_or(DiscountError::Overflow)?;

    discounted
        .clamp(Decimal::ZERO, cart)
        .floor()
        .to_u64()
        .ok_or(DiscountError::Overflow)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn percent(value: i64) -> OfferDiscount {
        OfferDiscount::FlatPercent(Decimal::new(value, 0))
    }

    fn amount(value: i64) -> OfferDiscount {
        OfferDiscount::FlatAmount(Decimal::new(value, 0))
    }

    #[test]
    fn no_offer_leaves_cart_unchanged() -> TestResult {
        assert_eq!(discounted_cart_value(300, None)?, 300);

        Ok(())
    }

    #[test]
    fn percentage_off_is_applied() -> TestResult {
        assert_eq!(apply_discount(100, &percent(15))?, 85);
        assert_eq!(apply_discount(200, &percent(10))?, 180);

        Ok(())
    }

    #[test]
    fn percentage_off_rounds_down() -> TestResult {
        // 199 * 0.85 = 169.15
        assert_eq!(apply_discount(199, &percent(15))?, 169);

        // 99 * (1 - 0.125) = 86.625
        assert_eq!(
            apply_discount(99, &OfferDiscount::FlatPercent(Decimal::new(125, 1)))?,
            86
        );

        Ok(())
    }

    #[test]
    fn percentage_bounds() -> TestResult {
        assert_eq!(apply_discount(250, &percent(0))?, 250);
        assert_eq!(apply_discount(250, &percent(100))?, 0);
        assert_eq!(apply_discount(0, &percent(50))?, 0);

        Ok(())
    }

    #[test]
    fn amount_off_is_applied() -> TestResult {
        assert_eq!(apply_discount(200, &amount(10))?, 190);
        assert_eq!(apply_discount(200, &amount(0))?, 200);

        Ok(())
    }

    #[test]
    fn amount_off_never_goes_below_zero() -> TestResult {
        assert_eq!(apply_discount(5, &amount(10))?, 0);
        assert_eq!(apply_discount(10, &amount(10))?, 0);

        Ok(())
    }

    #[test]
    fn fractional_amount_off_rounds_down() -> TestResult {
        assert_eq!(
            apply_discount(100, &OfferDiscount::FlatAmount(Decimal::new(105, 1)))?,
            89
        );

        Ok(())
    }

    #[test]
    fn largest_cart_values_do_not_overflow() -> TestResult {
        assert_eq!(apply_discount(u64::MAX, &percent(0))?, u64::MAX);
        assert_eq!(apply_discount(u64::MAX, &amount(0))?, u64::MAX);
        assert!(apply_discount(u64::MAX, &percent(50))? < u64::MAX);

        Ok(())
    }

    #[test]
    fn unvalidated_discounts_stay_within_cart_bounds() -> TestResult {
        assert_eq!(apply_discount(100, &percent(150))?, 0);
        assert_eq!(apply_discount(100, &amount(-50))?, 100);

        Ok(())
    }

    #[test]
    fn results_never_exceed_the_cart() -> TestResult {
        for cart in [0_u64, 1, 7, 99, 100, 101, 12_345] {
            for value in [0_i64, 1, 33, 50, 99, 100] {
                let discounted = apply_discount(cart, &percent(value))?;
                let expected = cart * u64::try_from(100 - value)? / 100;

                assert_eq!(discounted, expected, "cart {cart} at {value}%");
            }
        }

        Ok(())
    }
}
