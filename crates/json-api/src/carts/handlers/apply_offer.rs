//! Apply Offer Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};

use cartoffer::ids::{RestaurantId, UserId};
use cartoffer_app::domain::offers::models::CartApplication;

use crate::{
    carts::errors::{CartValueError, cart_value_from_wire},
    extensions::*,
    observability::{OfferOutcome, record_offer_outcome},
    state::State,
};

/// Apply Offer Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub(crate) struct ApplyOfferRequest {
    /// Cart value before any discount, in minimum currency units; fractions are rounded down
    pub cart_value: f64,

    /// Restaurant the cart belongs to
    pub restaurant_id: i64,

    /// User placing the order
    pub user_id: i64,
}

impl TryFrom<ApplyOfferRequest> for CartApplication {
    type Error = CartValueError;

    fn try_from(request: ApplyOfferRequest) -> Result<Self, Self::Error> {
        Ok(CartApplication {
            cart_value: cart_value_from_wire(request.cart_value)?,
            restaurant_id: RestaurantId::new(request.restaurant_id),
            user_id: UserId::new(request.user_id),
        })
    }
}

/// Apply Offer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyOfferResponse {
    /// Cart value after the best matching offer, if any
    pub cart_value: u64,
}

/// Apply Offer Handler
///
/// Prices a cart with the offer registered for the user's segment at the cart's restaurant.
/// A cart with no matching offer comes back unchanged.
#[endpoint(
    tags("carts"),
    summary = "Apply Offer",
    responses(
        (status_code = StatusCode::OK, description = "Cart priced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ApplyOfferRequest>,
    depot: &mut Depot,
) -> Result<Json<ApplyOfferResponse>, StatusError> {
    let state = State::from_depot(depot)?;

    let cart = CartApplication::try_from(json.into_inner()).or_400("Invalid cart value")?;

    let priced = state.app.offers.apply_offer(cart).await;

    record_offer_outcome(if priced.applied_offer.is_some() {
        OfferOutcome::Applied
    } else {
        OfferOutcome::Unmatched
    });

    Ok(Json(ApplyOfferResponse {
        cart_value: priced.cart_value,
    }))
}
