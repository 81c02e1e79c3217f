//! Offer Handlers

pub(crate) mod list;
pub(crate) mod register;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use cartoffer::{
        ids::RestaurantId,
        offers::{NewOffer, Offer, OfferKey},
    };

    pub(super) fn make_offer(
        key: u64,
        restaurant: i64,
        offer_type: &str,
        value: Decimal,
        segments: &[&str],
    ) -> TestResult<Arc<Offer>> {
        let terms = NewOffer {
            restaurant_id: RestaurantId::new(restaurant),
            offer_type: offer_type.to_owned(),
            offer_value: value,
            segments: segments.iter().map(|label| (*label).to_owned()).collect(),
        }
        .validate()?;

        Ok(Arc::new(Offer::new(OfferKey::new(key), terms)))
    }
}
