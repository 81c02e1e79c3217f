//! List Offers Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use cartoffer::{ids::RestaurantId, offers::Offer};

use crate::state::State;

/// Offer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferResponse {
    /// Registration key of the offer
    pub offer_id: u64,

    /// Restaurant the offer applies to
    pub restaurant_id: i64,

    /// Offer type: `FLATX` or `FLAT%`
    pub offer_type: String,

    /// Amount or percentage, as a decimal string
    pub offer_value: String,

    /// Customer segments the offer targets
    pub customer_segment: Vec<String>,
}

impl From<&Offer> for OfferResponse {
    fn from(offer: &Offer) -> Self {
        Self {
            offer_id: offer.key().get(),
            restaurant_id: offer.restaurant_id().get(),
            offer_type: offer.discount().offer_type().to_string(),
            offer_value: offer.discount().value().normalize().to_string(),
            customer_segment: offer
                .segments()
                .iter()
                .map(|segment| segment.as_str().to_owned())
                .collect(),
        }
    }
}

/// List Offers Handler
///
/// Returns every offer registered for a restaurant, earliest first.
#[endpoint(tags("offers"), summary = "List Restaurant Offers")]
pub(crate) async fn handler(
    restaurant_id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Vec<OfferResponse>>, StatusError> {
    let state = State::from_depot(depot)?;

    let offers = state
        .app
        .offers
        .list_offers(RestaurantId::new(restaurant_id.into_inner()))
        .await;

    Ok(Json(
        offers
            .iter()
            .map(|offer| OfferResponse::from(offer.as_ref()))
            .collect(),
    ))
}
