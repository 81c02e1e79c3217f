//! Cart Errors

use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

/// Reasons a wire cart value cannot be priced.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub(crate) enum CartValueError {
    /// Not representable as a decimal (infinite, NaN, or too large).
    #[error("cart value {0} is not representable")]
    NotRepresentable(f64),

    /// Below zero.
    #[error("cart value {0} is negative")]
    Negative(Decimal),

    /// Larger than the largest supported cart.
    #[error("cart value {0} is out of range")]
    OutOfRange(Decimal),
}

/// Whole minimum currency units for a wire cart value, rounding fractions down.
pub(crate) fn cart_value_from_wire(value: f64) -> Result<u64, CartValueError> {
    let decimal =
        Decimal::try_from(value).map_err(|_error| CartValueError::NotRepresentable(value))?;

    if decimal < Decimal::ZERO {
        return Err(CartValueError::Negative(decimal));
    }

    decimal
        .floor()
        .to_u64()
        .ok_or(CartValueError::OutOfRange(decimal))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn integral_and_fractional_values_floor_to_whole_units() -> TestResult {
        assert_eq!(cart_value_from_wire(100.0)?, 100);
        assert_eq!(cart_value_from_wire(99.5)?, 99);
        assert_eq!(cart_value_from_wire(0.99)?, 0);
        assert_eq!(cart_value_from_wire(-0.0)?, 0);

        Ok(())
    }

    #[test]
    fn negative_and_non_finite_values_are_rejected() {
        assert!(matches!(
            cart_value_from_wire(-1.0),
            Err(CartValueError::Negative(_))
        ));
        assert!(matches!(
            cart_value_from_wire(f64::INFINITY),
            Err(CartValueError::NotRepresentable(_))
        ));
        assert!(matches!(
            cart_value_from_wire(f64::NAN),
            Err(CartValueError::NotRepresentable(_))
        ));
    }

    #[test]
    fn values_beyond_u64_are_out_of_range() {
        assert!(matches!(
            cart_value_from_wire(1e25),
            Err(CartValueError::OutOfRange(_))
        ));
    }
}
