//! Prometheus metrics for the offer API, exposed on `/metrics`.

use std::{sync::OnceLock, time::Duration};

use prometheus::{
    Encoder as _, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
    core::Collector,
};
use salvo::{
    Response, handler,
    http::{StatusCode, header::CONTENT_TYPE},
};
use tracing::error;

const METRIC_PREFIX: &str = "cartoffer";

// Pricing is in-memory; anything past a second is pathological.
const DURATION_BUCKETS: [f64; 10] = [
    0.000_5, 0.001, 0.002_5, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 1.0,
];

/// Outcome of an offer operation, as counted on `/metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OfferOutcome {
    /// An offer was registered.
    Registered,

    /// An offer registration failed validation.
    Rejected,

    /// A cart was priced with an offer.
    Applied,

    /// A cart was priced without any matching offer.
    Unmatched,
}

impl OfferOutcome {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Rejected => "rejected",
            Self::Applied => "applied",
            Self::Unmatched => "unmatched",
        }
    }
}

struct ApiMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    offer_outcomes_total: IntCounterVec,
}

impl ApiMetrics {
    fn build() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some(METRIC_PREFIX.to_owned()), None)?;

        Ok(Self {
            requests_total: register(
                &registry,
                IntCounterVec::new(
                    Opts::new("http_requests_total", "HTTP requests by route and status class."),
                    &["method", "route", "status_class"],
                )?,
            )?,
            request_duration_seconds: register(
                &registry,
                HistogramVec::new(
                    HistogramOpts::new(
                        "http_request_duration_seconds",
                        "HTTP request latency by route.",
                    )
                    .buckets(DURATION_BUCKETS.to_vec()),
                    &["method", "route"],
                )?,
            )?,
            requests_in_flight: register(
                &registry,
                IntGauge::new("http_requests_in_flight", "HTTP requests being served.")?,
            )?,
            offer_outcomes_total: register(
                &registry,
                IntCounterVec::new(
                    Opts::new(
                        "offer_outcomes_total",
                        "Offer registrations and cart pricings by outcome.",
                    ),
                    &["outcome"],
                )?,
            )?,
            registry,
        })
    }
}

fn register<M>(registry: &Registry, metric: M) -> prometheus::Result<M>
where
    M: Collector + Clone + 'static,
{
    registry.register(Box::new(metric.clone()))?;

    Ok(metric)
}

static METRICS: OnceLock<Option<ApiMetrics>> = OnceLock::new();

fn metrics() -> Option<&'static ApiMetrics> {
    METRICS
        .get_or_init(|| {
            ApiMetrics::build()
                .inspect_err(|source| error!("failed to build metrics registry: {source}"))
                .ok()
        })
        .as_ref()
}

/// Holds the in-flight gauge up for the lifetime of a request.
pub(super) struct InFlightRequestGuard(Option<&'static IntGauge>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| &metrics.requests_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = self.0 {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status: StatusCode, duration: Duration) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class(status)])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration.as_secs_f64());
}

pub(crate) fn record_offer_outcome(outcome: OfferOutcome) {
    if let Some(metrics) = metrics() {
        metrics
            .offer_outcomes_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();

    let body = match encoder.encode_to_string(&metrics.registry.gather()) {
        Ok(body) => body,
        Err(source) => {
            error!("failed to encode metrics: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    };

    if let Err(source) = res.add_header(CONTENT_TYPE, encoder.format_type(), true) {
        error!("failed to set metrics content type: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    res.render(body);
}

fn status_class(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "5xx"
    } else if status.is_client_error() {
        "4xx"
    } else if status.is_redirection() {
        "3xx"
    } else if status.is_success() {
        "2xx"
    } else {
        "1xx"
    }
}
