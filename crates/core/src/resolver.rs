//! Offer Resolution

use std::sync::Arc;

use crate::{ids::RestaurantId, offers::Offer, store::OfferStore};

/// Tie-break policy when several offers target the same (restaurant, segment) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolutionPolicy {
    /// The most recently registered offer wins; later offers supersede earlier ones.
    #[default]
    LatestRegistered,

    /// The first registered offer wins; later offers are ignored while it exists.
    EarliestRegistered,
}

/// Selects the single offer to apply for a restaurant and segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfferResolver {
    policy: ResolutionPolicy,
}

impl OfferResolver {
    /// Create a resolver using the given tie-break policy.
    pub const fn new(policy: ResolutionPolicy) -> Self {
        Self { policy }
    }

    /// The tie-break policy in use.
    pub const fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Resolve the offer to apply, or `None` when no offer targets the pair.
    pub fn resolve(
        &self,
        store: &OfferStore,
        restaurant: RestaurantId,
        segment: &str,
    ) -> Option<Arc<Offer>> {
        let offers = store.offers_for(restaurant, segment);

        let selected = match self.policy {
            ResolutionPolicy::LatestRegistered => offers.latest(),
            ResolutionPolicy::EarliestRegistered => offers.earliest(),
        };

        selected.cloned()
    }
}
