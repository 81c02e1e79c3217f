//! Offer Store
//!
//! In-memory registry of offers, indexed by restaurant and by (restaurant, segment).
//!
//! Every bucket is a copy-on-write list: registration appends under the write lock, and readers
//! clone the bucket's `Arc` under the read lock. A reader therefore holds an immutable snapshot
//! and never observes a partially applied registration.

use std::{
    ops::Deref,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use rustc_hash::FxHashMap;

use crate::{
    ids::RestaurantId,
    offers::{NewOffer, Offer, OfferKey, OfferValidationError},
    segments::Segment,
};

/// Immutable snapshot of offers, earliest registration first.
#[derive(Debug, Clone, Default)]
pub struct OfferList(Arc<Vec<Arc<Offer>>>);

impl OfferList {
    /// Earliest registered offer in the list.
    pub fn earliest(&self) -> Option<&Arc<Offer>> {
        self.0.first()
    }

    /// Most recently registered offer in the list.
    pub fn latest(&self) -> Option<&Arc<Offer>> {
        self.0.last()
    }

    fn push(&mut self, offer: Arc<Offer>) {
        Arc::make_mut(&mut self.0).push(offer);
    }
}

impl Deref for OfferList {
    type Target = [Arc<Offer>];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

#[derive(Debug, Default)]
struct RestaurantOffers {
    all: OfferList,
    by_segment: FxHashMap<Segment, OfferList>,
}

#[derive(Debug, Default)]
struct StoreIndex {
    next_key: u64,
    restaurants: FxHashMap<RestaurantId, RestaurantOffers>,
}

/// Registry of every offer registered during the store's lifetime.
#[derive(Debug, Default)]
pub struct OfferStore {
    index: RwLock<StoreIndex>,
}

impl OfferStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register an offer.
    ///
    /// The offer is appended to its restaurant's list and to the list of every segment it
    /// targets, all under one write lock.
    ///
    /// # Errors
    ///
    /// Returns an [`OfferValidationError`] when the offer is malformed; the store is left
    /// untouched.
    pub fn register(&self, offer: NewOffer) -> Result<Arc<Offer>, OfferValidationError> {
        let terms = offer.validate()?;

        let mut index = self.write();

        let key = OfferKey::new(index.next_key);

        index.next_key += 1;

        let offer = Arc::new(Offer::new(key, terms));

        let restaurant = index.restaurants.entry(offer.restaurant_id()).or_default();

        restaurant.all.push(Arc::clone(&offer));

        for segment in offer.segments() {
            restaurant
                .by_segment
                .entry(segment.clone())
                .or_default()
                .push(Arc::clone(&offer));
        }

        Ok(offer)
    }

    /// Offers registered for the exact (restaurant, segment) pair, earliest first.
    pub fn offers_for(&self, restaurant: RestaurantId, segment: &str) -> OfferList {
        self.read()
            .restaurants
            .get(&restaurant)
            .and_then(|offers| offers.by_segment.get(segment))
            .cloned()
            .unwrap_or_default()
    }

    /// Every offer registered for a restaurant, earliest first.
    pub fn offers_for_restaurant(&self, restaurant: RestaurantId) -> OfferList {
        self.read()
            .restaurants
            .get(&restaurant)
            .map(|offers| offers.all.clone())
            .unwrap_or_default()
    }

    /// Total number of registered offers.
    pub fn len(&self) -> usize {
        self.read()
            .restaurants
            .values()
            .map(|offers| offers.all.len())
            .sum()
    }

    /// Whether no offer has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.read().next_key == 0
    }

    // Appends complete before the guard drops, so a poisoned index is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, StoreIndex> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreIndex> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn new_offer(restaurant: i64, offer_type: &str, value: i64, segments: &[&str]) -> NewOffer {
        NewOffer {
            restaurant_id: RestaurantId::new(restaurant),
            offer_type: offer_type.to_owned(),
            offer_value: Decimal::new(value, 0),
            segments: segments.iter().map(|label| (*label).to_owned()).collect(),
        }
    }

    fn keys(offers: &OfferList) -> Vec<u64> {
        offers.iter().map(|offer| offer.key().get()).collect()
    }

    #[test]
    fn empty_store_returns_empty_lists() {
        let store = OfferStore::new();

        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.offers_for(RestaurantId::new(1), "p1").is_empty());
        assert!(store.offers_for_restaurant(RestaurantId::new(1)).is_empty());
    }

    #[test]
    fn register_assigns_increasing_keys() -> TestResult {
        let store = OfferStore::new();

        let first = store.register(new_offer(1, "FLATX", 10, &["p1"]))?;
        let second = store.register(new_offer(2, "FLAT%", 10, &["p1"]))?;

        assert!(first.key() < second.key());
        assert_eq!(store.len(), 2);

        Ok(())
    }

    #[test]
    fn offers_are_indexed_by_restaurant_and_segment_in_registration_order() -> TestResult {
        let store = OfferStore::new();

        store.register(new_offer(1, "FLATX", 10, &["p2"]))?;
        store.register(new_offer(1, "FLAT%", 10, &["p1"]))?;
        store.register(new_offer(1, "FLAT%", 15, &["p1", "p2"]))?;
        store.register(new_offer(2, "FLAT%", 50, &["p1"]))?;

        let restaurant = RestaurantId::new(1);

        assert_eq!(keys(&store.offers_for(restaurant, "p1")), [1, 2]);
        assert_eq!(keys(&store.offers_for(restaurant, "p2")), [0, 2]);
        assert!(store.offers_for(restaurant, "p3").is_empty());
        assert_eq!(keys(&store.offers_for_restaurant(restaurant)), [0, 1, 2]);
        assert_eq!(keys(&store.offers_for(RestaurantId::new(2), "p1")), [3]);

        Ok(())
    }

    #[test]
    fn rejected_offers_leave_the_store_untouched() {
        let store = OfferStore::new();

        let result = store.register(new_offer(1, "FLAT%", 101, &["p1"]));

        assert!(
            matches!(result, Err(OfferValidationError::PercentOutOfRange(_))),
            "expected PercentOutOfRange, got {result:?}"
        );
        assert!(store.is_empty());
        assert!(store.offers_for(RestaurantId::new(1), "p1").is_empty());
    }

    #[test]
    fn duplicate_offers_are_kept() -> TestResult {
        let store = OfferStore::new();

        store.register(new_offer(1, "FLATX", 10, &["p1"]))?;
        store.register(new_offer(1, "FLATX", 10, &["p1"]))?;

        assert_eq!(keys(&store.offers_for(RestaurantId::new(1), "p1")), [0, 1]);

        Ok(())
    }

    #[test]
    fn snapshots_are_not_affected_by_later_registrations() -> TestResult {
        let store = OfferStore::new();

        store.register(new_offer(1, "FLATX", 10, &["p1"]))?;

        let snapshot = store.offers_for(RestaurantId::new(1), "p1");

        store.register(new_offer(1, "FLATX", 20, &["p1"]))?;

        assert_eq!(keys(&snapshot), [0]);
        assert_eq!(keys(&store.offers_for(RestaurantId::new(1), "p1")), [0, 1]);

        Ok(())
    }
}
