//! App Context

use std::sync::Arc;

use crate::domain::{
    offers::{EngineSettings, OfferEngine, OffersService},
    segments::SegmentResolver,
};

#[derive(Clone)]
pub struct AppContext {
    pub offers: Arc<dyn OffersService>,
}

impl AppContext {
    /// Build application context around a fresh, empty offer engine.
    #[must_use]
    pub fn new(segments: Arc<dyn SegmentResolver>, settings: EngineSettings) -> Self {
        Self::from_offers_service(Arc::new(OfferEngine::new(segments, settings)))
    }

    /// Build application context from an existing offers service.
    #[must_use]
    pub fn from_offers_service(offers: Arc<dyn OffersService>) -> Self {
        Self { offers }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use cartoffer::{
        ids::{RestaurantId, UserId},
        segments::Segment,
    };

    use crate::domain::{
        offers::models::{CartApplication, CartApplicationResult},
        segments::FixedSegmentResolver,
    };

    use super::*;

    #[tokio::test]
    async fn new_context_starts_with_no_offers() -> TestResult {
        let segments =
            FixedSegmentResolver::new().with_assignment(UserId::new(1), Segment::try_from("p1")?);

        let app = AppContext::new(Arc::new(segments), EngineSettings::default());

        let result = app
            .offers
            .apply_offer(CartApplication {
                cart_value: 100,
                restaurant_id: RestaurantId::new(1),
                user_id: UserId::new(1),
            })
            .await;

        assert_eq!(result, CartApplicationResult::unchanged(100));
        assert!(app.offers.list_offers(RestaurantId::new(1)).await.is_empty());

        Ok(())
    }
}
