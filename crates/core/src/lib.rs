//! Cart Offers
//!
//! Offer resolution engine for restaurant carts: offers are registered against a restaurant and
//! one or more customer segments, and a cart is priced by resolving the single offer that applies
//! to the cart owner's segment.

pub mod discounts;
pub mod ids;
pub mod offers;
pub mod prelude;
pub mod resolver;
pub mod segments;
pub mod store;
