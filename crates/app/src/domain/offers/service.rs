//! Offers Service

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use mockall::automock;
use tokio::time::timeout;
use tracing::{Span, debug, info, warn};

use cartoffer::{
    discounts::discounted_cart_value,
    ids::{RestaurantId, UserId},
    offers::{NewOffer, Offer},
    resolver::{OfferResolver, ResolutionPolicy},
    segments::Segment,
    store::OfferStore,
};

use crate::domain::{
    offers::{
        OffersServiceError,
        models::{CartApplication, CartApplicationResult},
    },
    segments::SegmentResolver,
};

const DEFAULT_SEGMENT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(500);

/// Tunables for the offer engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Tie-break policy for overlapping offers.
    pub resolution_policy: ResolutionPolicy,

    /// Upper bound on a single segment lookup.
    pub segment_lookup_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            resolution_policy: ResolutionPolicy::default(),
            segment_lookup_timeout: DEFAULT_SEGMENT_LOOKUP_TIMEOUT,
        }
    }
}

/// Offer engine: owns the offer store and prices carts against it.
pub struct OfferEngine {
    store: OfferStore,
    resolver: OfferResolver,
    segments: Arc<dyn SegmentResolver>,
    segment_lookup_timeout: Duration,
}

impl OfferEngine {
    #[must_use]
    pub fn new(segments: Arc<dyn SegmentResolver>, settings: EngineSettings) -> Self {
        Self {
            store: OfferStore::new(),
            resolver: OfferResolver::new(settings.resolution_policy),
            segments,
            segment_lookup_timeout: settings.segment_lookup_timeout,
        }
    }

    /// Segment for a user. Unknown users, lookup failures and timeouts all yield `None`.
    async fn lookup_segment(&self, user: UserId) -> Option<Segment> {
        match timeout(self.segment_lookup_timeout, self.segments.resolve(user)).await {
            Ok(Ok(Some(segment))) => Some(segment),
            Ok(Ok(None)) => {
                debug!(user_id = %user, "unknown user, no segment");

                None
            }
            Ok(Err(source)) => {
                warn!(user_id = %user, "segment lookup failed: {source}");

                None
            }
            Err(_elapsed) => {
                warn!(
                    user_id = %user,
                    timeout_ms = self.segment_lookup_timeout.as_millis(),
                    "segment lookup timed out"
                );

                None
            }
        }
    }
}

impl Debug for OfferEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OfferEngine")
            .field("store", &self.store)
            .field("resolver", &self.resolver)
            .field("segment_lookup_timeout", &self.segment_lookup_timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OffersService for OfferEngine {
    #[tracing::instrument(
        name = "offers.engine.register_offer",
        skip(self, offer),
        fields(
            restaurant_id = %offer.restaurant_id,
            offer_type = %offer.offer_type,
            offer_key = tracing::field::Empty
        ),
        err
    )]
    async fn register_offer(&self, offer: NewOffer) -> Result<Arc<Offer>, OffersServiceError> {
        let offer = self.store.register(offer)?;

        Span::current().record("offer_key", tracing::field::display(offer.key()));

        info!(
            offer_key = %offer.key(),
            segment_count = offer.segments().len(),
            "registered offer"
        );

        Ok(offer)
    }

    #[tracing::instrument(
        name = "offers.engine.apply_offer",
        skip(self, cart),
        fields(
            restaurant_id = %cart.restaurant_id,
            user_id = %cart.user_id,
            segment = tracing::field::Empty,
            offer_key = tracing::field::Empty
        )
    )]
    async fn apply_offer(&self, cart: CartApplication) -> CartApplicationResult {
        let span = Span::current();

        let Some(segment) = self.lookup_segment(cart.user_id).await else {
            return CartApplicationResult::unchanged(cart.cart_value);
        };

        span.record("segment", tracing::field::display(&segment));

        let Some(offer) = self
            .resolver
            .resolve(&self.store, cart.restaurant_id, segment.as_str())
        else {
            debug!("no offer for segment");

            return CartApplicationResult::unchanged(cart.cart_value);
        };

        span.record("offer_key", tracing::field::display(offer.key()));

        match discounted_cart_value(cart.cart_value, Some(&offer)) {
            Ok(cart_value) => CartApplicationResult {
                cart_value,
                applied_offer: Some(offer.key()),
            },
            Err(source) => {
                warn!(offer_key = %offer.key(), "failed to apply offer: {source}");

                CartApplicationResult::unchanged(cart.cart_value)
            }
        }
    }

    async fn list_offers(&self, restaurant: RestaurantId) -> Vec<Arc<Offer>> {
        self.store.offers_for_restaurant(restaurant).to_vec()
    }

    async fn offer_count(&self) -> usize {
        self.store.len()
    }
}

#[automock]
#[async_trait]
pub trait OffersService: Send + Sync {
    /// Validate and register a new offer.
    async fn register_offer(&self, offer: NewOffer) -> Result<Arc<Offer>, OffersServiceError>;

    /// Price a cart; never fails, returning the cart unchanged when no offer applies.
    async fn apply_offer(&self, cart: CartApplication) -> CartApplicationResult;

    /// Every offer registered for a restaurant, earliest first.
    async fn list_offers(&self, restaurant: RestaurantId) -> Vec<Arc<Offer>>;

    /// Total number of registered offers across all restaurants.
    async fn offer_count(&self) -> usize;
}
