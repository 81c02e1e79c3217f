//! Offers
//!
//! An offer is a single discount rule scoped to one restaurant and a set of customer segments.
//! Offers are immutable once registered; the store assigns each one an [`OfferKey`] that orders
//! offers by registration.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::Decimal;

use crate::{ids::RestaurantId, segments::SegmentSet};

mod errors;

pub use errors::OfferValidationError;

/// Registration sequence number. Later registrations have larger keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OfferKey(u64);

impl OfferKey {
    /// Wrap a raw sequence number.
    pub const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// The raw sequence number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for OfferKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Offer type, as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferType {
    /// Subtract a fixed amount from the cart (`FLATX`).
    FlatAmount,

    /// Subtract a percentage of the cart (`FLAT%`).
    FlatPercent,
}

impl OfferType {
    /// Wire name of the offer type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FlatAmount => "FLATX",
            Self::FlatPercent => "FLAT%",
        }
    }
}

impl FromStr for OfferType {
    type Err = OfferValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "FLATX" => Ok(Self::FlatAmount),
            "FLAT%" => Ok(Self::FlatPercent),
            other => Err(OfferValidationError::UnknownOfferType(other.to_owned())),
        }
    }
}

impl Display for OfferType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Offer type together with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferDiscount {
    /// Subtract this amount from the cart value.
    FlatAmount(Decimal),

    /// Subtract this percentage (0 to 100) of the cart value.
    FlatPercent(Decimal),
}

impl OfferDiscount {
    /// Validate a value against its offer type.
    ///
    /// Flat amounts are not checked against any cart value; a flat discount larger than the cart
    /// simply empties it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the value is negative (`OfferValidationError::NegativeValue`).
    /// - a percentage exceeds 100 (`OfferValidationError::PercentOutOfRange`).
    pub fn new(offer_type: OfferType, value: Decimal) -> Result<Self, OfferValidationError> {
        if value < Decimal::ZERO {
            return Err(OfferValidationError::NegativeValue(value));
        }

        match offer_type {
            OfferType::FlatAmount => Ok(Self::FlatAmount(value)),
            OfferType::FlatPercent if value > Decimal::ONE_HUNDRED => {
                Err(OfferValidationError::PercentOutOfRange(value))
            }
            OfferType::FlatPercent => Ok(Self::FlatPercent(value)),
        }
    }

    /// The offer type of this discount.
    pub const fn offer_type(&self) -> OfferType {
        match self {
            Self::FlatAmount(_) => OfferType::FlatAmount,
            Self::FlatPercent(_) => OfferType::FlatPercent,
        }
    }

    /// The raw offer value (an amount or a percentage).
    pub const fn value(&self) -> Decimal {
        match self {
            Self::FlatAmount(value) | Self::FlatPercent(value) => *value,
        }
    }
}

/// Unvalidated offer registration input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOffer {
    /// Restaurant the offer applies to.
    pub restaurant_id: RestaurantId,

    /// Wire name of the offer type (`FLATX` or `FLAT%`).
    pub offer_type: String,

    /// Amount or percentage, depending on the offer type.
    pub offer_value: Decimal,

    /// Customer segment labels the offer targets.
    pub segments: Vec<String>,
}

impl NewOffer {
    /// Validate the registration input.
    ///
    /// # Errors
    ///
    /// Returns the first [`OfferValidationError`] found, checking the offer type, then the
    /// value, then the segments.
    pub fn validate(self) -> Result<OfferTerms, OfferValidationError> {
        let offer_type: OfferType = self.offer_type.parse()?;

        let discount = OfferDiscount::new(offer_type, self.offer_value)?;

        let segments = SegmentSet::try_from_labels(self.segments)?;

        Ok(OfferTerms {
            restaurant_id: self.restaurant_id,
            discount,
            segments,
        })
    }
}

/// Validated offer content, not yet registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferTerms {
    /// Restaurant the offer applies to.
    pub restaurant_id: RestaurantId,

    /// Offer type and value.
    pub discount: OfferDiscount,

    /// Segments the offer targets.
    pub segments: SegmentSet,
}

/// A registered offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    key: OfferKey,
    terms: OfferTerms,
}

impl Offer {
    /// Create an offer from validated terms.
    pub const fn new(key: OfferKey, terms: OfferTerms) -> Self {
        Self { key, terms }
    }

    /// Registration key.
    pub const fn key(&self) -> OfferKey {
        self.key
    }

    /// Restaurant the offer applies to.
    pub const fn restaurant_id(&self) -> RestaurantId {
        self.terms.restaurant_id
    }

    /// Offer type and value.
    pub const fn discount(&self) -> &OfferDiscount {
        &self.terms.discount
    }

    /// Segments the offer targets.
    pub const fn segments(&self) -> &SegmentSet {
        &self.terms.segments
    }
}
