//! Segments Config

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::Arc,
    time::Duration,
};

use clap::Args;

use cartoffer_app::domain::segments::{
    FixedSegmentResolver, HttpSegmentResolver, SegmentResolver,
};

/// Where user segments come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentSource {
    /// The `USER_SEGMENTS` table.
    Fixed,

    /// The remote user segment service.
    Http,
}

impl Display for SegmentSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Fixed => "fixed",
            Self::Http => "http",
        })
    }
}

/// Customer segment lookup settings.
#[derive(Debug, Args)]
pub struct SegmentsConfig {
    /// Base URL of the user segment service
    #[arg(long, env = "SEGMENT_SERVICE_URL")]
    pub segment_service_url: Option<String>,

    /// Fixed user segments used when no segment service is set (e.g. "1=p1,2=p2")
    #[arg(long, env = "USER_SEGMENTS", default_value = "")]
    pub user_segments: FixedSegmentResolver,

    /// Segment lookup timeout in milliseconds
    #[arg(long, env = "SEGMENT_LOOKUP_TIMEOUT_MS", default_value_t = 500_u64)]
    pub segment_lookup_timeout_ms: u64,
}

impl SegmentsConfig {
    /// Build the configured segment resolver.
    #[must_use]
    pub fn resolver(&self) -> Arc<dyn SegmentResolver> {
        match &self.segment_service_url {
            Some(url) => Arc::new(HttpSegmentResolver::new(url.clone())),
            None => Arc::new(self.user_segments.clone()),
        }
    }

    /// Which resolver [`Self::resolver`] builds.
    #[must_use]
    pub(crate) fn source(&self) -> SegmentSource {
        if self.segment_service_url.is_some() {
            SegmentSource::Http
        } else {
            SegmentSource::Fixed
        }
    }

    /// Segment lookup timeout.
    #[must_use]
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.segment_lookup_timeout_ms)
    }
}
