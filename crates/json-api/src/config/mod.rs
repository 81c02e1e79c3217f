//! Server configuration module

use std::net::SocketAddr;

use clap::Parser;

use cartoffer_app::domain::offers::EngineSettings;

use crate::config::{
    observability::{LoggingConfig, ObservabilityConfig},
    offers::OffersConfig,
    segments::SegmentsConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod observability;
pub(crate) mod offers;
pub(crate) mod segments;
pub(crate) mod server;

/// Cart Offers JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "cartoffer-json", about = "Cart Offers JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Customer segment lookup settings.
    #[command(flatten)]
    pub segments: SegmentsConfig,

    /// Offer resolution settings.
    #[command(flatten)]
    pub offers: OffersConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.server.socket_addr()
    }

    /// Offer engine settings derived from the configuration.
    #[must_use]
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            resolution_policy: self.offers.offer_resolution_policy.into(),
            segment_lookup_timeout: self.segments.lookup_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cartoffer::resolver::ResolutionPolicy;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_match_documented_values() -> TestResult {
        let config = ServerConfig::try_parse_from(["cartoffer-json"])?;

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9001");
        assert_eq!(config.server.shutdown_grace_period(), Duration::from_secs(10));
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);
        assert!(config.segments.segment_service_url.is_none());
        assert_eq!(
            config.engine_settings(),
            EngineSettings {
                resolution_policy: ResolutionPolicy::LatestRegistered,
                segment_lookup_timeout: Duration::from_millis(500),
            }
        );

        Ok(())
    }

    #[test]
    fn flags_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "cartoffer-json",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--offer-resolution-policy",
            "earliest",
            "--segment-lookup-timeout-ms",
            "50",
            "--user-segments",
            "1=p1,2=p2",
        ])?;

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.segments.user_segments.len(), 2);
        assert_eq!(
            config.engine_settings(),
            EngineSettings {
                resolution_policy: ResolutionPolicy::EarliestRegistered,
                segment_lookup_timeout: Duration::from_millis(50),
            }
        );

        Ok(())
    }

    #[test]
    fn malformed_user_segments_are_rejected() {
        let result = ServerConfig::try_parse_from(["cartoffer-json", "--user-segments", "1:p1"]);

        assert!(result.is_err(), "expected a parse error");
    }
}
