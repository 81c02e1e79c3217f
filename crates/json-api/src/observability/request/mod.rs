//! Request-level logging and request IDs.

mod request_ids;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, info, warn};

use self::request_ids::RequestId;
use super::{metrics, settings};

/// Tags each request with an id and a span, and records its outcome in logs and metrics.
#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let request_id = RequestId::from_request(req);

    request_id.echo(res);

    let method = req.method().to_string();
    let route = spans::route_template(req.uri().path());
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        request_id = %request_id,
        method = %method,
        route = %route,
        path = %req.uri().path(),
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let duration = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);

    metrics::observe_request(&method, &route, status, duration);

    span.record("status", status.as_u16());
    span.record("duration_ms", duration.as_millis());

    span.in_scope(|| log_completion(status, duration.as_millis()));
}

fn log_completion(status: StatusCode, duration_ms: u128) {
    let code = status.as_u16();

    if status.is_server_error() {
        error!(status = code, duration_ms, "request failed");
    } else if status.is_client_error() {
        warn!(status = code, duration_ms, "request rejected");
    } else {
        info!(status = code, duration_ms, "request completed");
    }

    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    if duration_ms > threshold_ms {
        warn!(duration_ms, threshold_ms, "slow request");
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn hello() -> &'static str {
        "hello"
    }

    fn service() -> Service {
        Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("hello").get(hello)),
        )
    }

    #[tokio::test]
    async fn request_id_header_is_propagated() -> TestResult {
        let mut response = TestClient::get("http://example.com/hello")
            .add_header(request_ids::REQUEST_ID_HEADER, "req-123", true)
            .send(&service())
            .await;

        assert_eq!(
            response
                .headers()
                .get(request_ids::REQUEST_ID_HEADER)
                .map(|value| value.to_str().map(str::to_owned))
                .transpose()?,
            Some("req-123".to_owned())
        );
        assert_eq!(response.take_string().await?, "hello");

        Ok(())
    }

    #[tokio::test]
    async fn request_id_is_generated_when_missing() {
        let response = TestClient::get("http://example.com/hello")
            .send(&service())
            .await;

        let request_id = response
            .headers()
            .get(request_ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        assert!(!request_id.is_empty(), "expected a generated request id");
    }
}
