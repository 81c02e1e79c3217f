//! Cart Offers prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    discounts::{DiscountError, apply_discount, discounted_cart_value},
    ids::{RestaurantId, UserId},
    offers::{NewOffer, Offer, OfferDiscount, OfferKey, OfferTerms, OfferType, OfferValidationError},
    resolver::{OfferResolver, ResolutionPolicy},
    segments::{Segment, SegmentSet},
    store::{OfferList, OfferStore},
};
