//! Register Offer Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};

use cartoffer::offers::NewOffer;

use crate::{
    extensions::*,
    observability::{OfferOutcome, record_offer_outcome},
    offers::{errors::into_status_error, requests::RegisterOfferRequest},
    state::State,
};

/// Offer Registered Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterOfferResponse {
    /// Always `true` for a registered offer
    pub success: bool,

    /// Registration key of the new offer
    pub offer_id: u64,
}

/// Register Offer Handler
///
/// Registers a discount offer for a restaurant and a set of customer segments.
#[endpoint(
    tags("offers"),
    summary = "Register Offer",
    responses(
        (status_code = StatusCode::OK, description = "Offer registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterOfferRequest>,
    depot: &mut Depot,
) -> Result<Json<RegisterOfferResponse>, StatusError> {
    let state = State::from_depot(depot)?;

    let offer = NewOffer::try_from(json.into_inner())
        .or_400("Invalid offer value")
        .inspect_err(|_error| record_offer_outcome(OfferOutcome::Rejected))?;

    let offer = state
        .app
        .offers
        .register_offer(offer)
        .await
        .map_err(|error| {
            record_offer_outcome(OfferOutcome::Rejected);

            into_status_error(error)
        })?;

    record_offer_outcome(OfferOutcome::Registered);

    Ok(Json(RegisterOfferResponse {
        success: true,
        offer_id: offer.key().get(),
    }))
}
