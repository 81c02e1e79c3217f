//! Engine readiness report.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::state::State;

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` once the engine is serving
    pub status: String,

    /// Offers registered since startup
    pub offers: usize,

    /// Where user segments are looked up: `fixed` or `http`
    pub segment_source: String,
}

/// Healthcheck handler
///
/// Reports that the offer engine is serving, with its offer count and segment source.
#[endpoint(tags("health"), summary = "Offer engine readiness")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = State::from_depot(depot)?;

    Ok(Json(HealthResponse {
        status: "ok".to_owned(),
        offers: state.app.offers.offer_count().await,
        segment_source: state.segment_source.to_string(),
    }))
}
