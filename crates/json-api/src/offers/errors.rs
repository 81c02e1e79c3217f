//! Offer Errors

use salvo::http::StatusError;
use tracing::warn;

use cartoffer_app::domain::offers::OffersServiceError;

pub(crate) fn into_status_error(error: OffersServiceError) -> StatusError {
    match error {
        OffersServiceError::Validation(source) => {
            warn!("rejected offer: {source}");

            StatusError::bad_request()
                .brief("Invalid offer payload")
                .detail(source.to_string())
        }
    }
}
