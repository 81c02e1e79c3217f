//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use cartoffer_app::{context::AppContext, domain::offers::MockOffersService};

use crate::{config::segments::SegmentSource, state::State};

pub(crate) fn state_with_offers(offers: MockOffersService) -> Arc<State> {
    State::shared(
        AppContext::from_offers_service(Arc::new(offers)),
        SegmentSource::Fixed,
    )
}

pub(crate) fn offers_service(offers: MockOffersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_offers(offers)))
            .push(route),
    )
}
