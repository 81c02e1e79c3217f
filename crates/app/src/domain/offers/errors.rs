//! Offers service errors.

use thiserror::Error;

use cartoffer::offers::OfferValidationError;

#[derive(Debug, Error)]
pub enum OffersServiceError {
    #[error("invalid offer: {0}")]
    Validation(#[from] OfferValidationError),
}
