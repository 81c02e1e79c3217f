//! Offers Models

use cartoffer::{
    ids::{RestaurantId, UserId},
    offers::OfferKey,
};

/// A cart submitted for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartApplication {
    /// Cart value in the cart's minimum currency unit.
    pub cart_value: u64,

    /// Restaurant the cart belongs to.
    pub restaurant_id: RestaurantId,

    /// Owner of the cart.
    pub user_id: UserId,
}

/// Outcome of pricing a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartApplicationResult {
    /// Cart value after the discount, or the original value when no offer applied.
    pub cart_value: u64,

    /// The offer that was applied, if any.
    pub applied_offer: Option<OfferKey>,
}

impl CartApplicationResult {
    /// A result with no offer applied.
    #[must_use]
    pub const fn unchanged(cart_value: u64) -> Self {
        Self {
            cart_value,
            applied_offer: None,
        }
    }
}
