//! State

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use cartoffer_app::context::AppContext;

use crate::config::segments::SegmentSource;

/// Shared handler state injected into every request's depot.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) segment_source: SegmentSource,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, segment_source: SegmentSource) -> Self {
        Self {
            app,
            segment_source,
        }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, segment_source: SegmentSource) -> Arc<Self> {
        Arc::new(Self::new(app, segment_source))
    }

    /// The injected state, or `500` when the router was built without it.
    pub(crate) fn from_depot(depot: &Depot) -> Result<&Arc<Self>, StatusError> {
        depot.obtain::<Arc<Self>>().map_err(|_missing| {
            error!("handler state missing from depot");

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use cartoffer_app::domain::offers::MockOffersService;

    use super::*;

    #[handler]
    async fn segment_source(depot: &mut Depot) -> Result<String, StatusError> {
        Ok(State::from_depot(depot)?.segment_source.to_string())
    }

    #[tokio::test]
    async fn injected_state_is_found() -> TestResult {
        let app = AppContext::from_offers_service(Arc::new(MockOffersService::new()));

        let service = Service::new(
            Router::new()
                .hoop(inject(State::shared(app, SegmentSource::Http)))
                .push(Router::with_path("source").get(segment_source)),
        );

        let body = TestClient::get("http://example.com/source")
            .send(&service)
            .await
            .take_string()
            .await?;

        assert_eq!(body, "http");

        Ok(())
    }

    #[tokio::test]
    async fn missing_state_is_a_server_error() {
        let service = Service::new(Router::with_path("source").get(segment_source));

        let res = TestClient::get("http://example.com/source")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
