//! Offer validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons an offer registration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OfferValidationError {
    /// Offer type was neither `FLATX` nor `FLAT%`.
    #[error("unknown offer type {0:?}, expected \"FLATX\" or \"FLAT%\"")]
    UnknownOfferType(String),

    /// Offer value was below zero.
    #[error("offer value {0} must not be negative")]
    NegativeValue(Decimal),

    /// Percentage offer value was above 100.
    #[error("percentage offer value {0} must be between 0 and 100")]
    PercentOutOfRange(Decimal),

    /// Offer targeted no segments.
    #[error("offer must target at least one customer segment")]
    NoSegments,

    /// A segment label was empty or whitespace.
    #[error("customer segment labels must not be blank")]
    BlankSegment,
}
