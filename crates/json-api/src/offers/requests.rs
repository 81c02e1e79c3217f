//! Offers Requests

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use cartoffer::{ids::RestaurantId, offers::NewOffer};

/// Register Offer Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub(crate) struct RegisterOfferRequest {
    /// Restaurant the offer applies to
    pub restaurant_id: i64,

    /// Offer type: `FLATX` (fixed amount) or `FLAT%` (percentage)
    pub offer_type: String,

    /// Amount or percentage, depending on the offer type
    pub offer_value: f64,

    /// Customer segments the offer targets
    pub customer_segment: Vec<String>,
}

impl TryFrom<RegisterOfferRequest> for NewOffer {
    type Error = rust_decimal::Error;

    fn try_from(request: RegisterOfferRequest) -> Result<Self, Self::Error> {
        Ok(NewOffer {
            restaurant_id: RestaurantId::new(request.restaurant_id),
            offer_type: request.offer_type,
            offer_value: Decimal::try_from(request.offer_value)?,
            segments: request.customer_segment,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn request_converts_into_new_offer() -> TestResult {
        let request: RegisterOfferRequest = serde_json::from_str(
            r#"{
                "restaurant_id": 1,
                "offer_type": "FLAT%",
                "offer_value": 12.5,
                "customer_segment": ["p1", "p2"]
            }"#,
        )?;

        let offer = NewOffer::try_from(request)?;

        assert_eq!(
            offer,
            NewOffer {
                restaurant_id: RestaurantId::new(1),
                offer_type: "FLAT%".to_owned(),
                offer_value: Decimal::new(125, 1),
                segments: vec!["p1".to_owned(), "p2".to_owned()],
            }
        );

        Ok(())
    }

    #[test]
    fn integer_offer_values_are_accepted() -> TestResult {
        let request: RegisterOfferRequest = serde_json::from_str(
            r#"{"restaurant_id": 1, "offer_type": "FLATX", "offer_value": 10, "customer_segment": ["p1"]}"#,
        )?;

        assert_eq!(NewOffer::try_from(request)?.offer_value, Decimal::TEN);

        Ok(())
    }

    #[test]
    fn non_finite_offer_values_are_rejected() {
        let request = RegisterOfferRequest {
            restaurant_id: 1,
            offer_type: "FLATX".to_owned(),
            offer_value: f64::INFINITY,
            customer_segment: vec!["p1".to_owned()],
        };

        assert!(NewOffer::try_from(request).is_err());
    }
}
