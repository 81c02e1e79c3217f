//! HTTP segment service client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use cartoffer::{ids::UserId, segments::Segment};

use super::{SegmentLookupError, SegmentResolver};

/// Segment resolver backed by the user segment service.
///
/// Issues `GET {base_url}/api/v1/user_segment?user_id={id}` and expects `{"segment": "p1"}`.
/// A `404` or a missing/blank segment means the user is unknown.
#[derive(Debug, Clone)]
pub struct HttpSegmentResolver {
    base_url: String,
    http: Client,
}

impl HttpSegmentResolver {
    /// Create a client for the segment service at `base_url`, e.g. `"http://localhost:1080"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();

        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http: Client::new(),
        }
    }

    fn lookup_url(&self) -> String {
        format!("{}/api/v1/user_segment", self.base_url)
    }
}

#[async_trait]
impl SegmentResolver for HttpSegmentResolver {
    #[tracing::instrument(
        name = "segments.http.resolve",
        skip(self),
        fields(user_id = %user),
        err
    )]
    async fn resolve(&self, user: UserId) -> Result<Option<Segment>, SegmentLookupError> {
        let response = self
            .http
            .get(self.lookup_url())
            .query(&[("user_id", user.get())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(SegmentLookupError::UnexpectedResponse(format!(
                "segment request failed with status {status}: {text}"
            )));
        }

        let parsed: SegmentResponse = response.json().await?;

        Ok(parsed.into_segment())
    }
}

#[derive(Debug, Deserialize)]
struct SegmentResponse {
    segment: Option<String>,
}

impl SegmentResponse {
    fn into_segment(self) -> Option<Segment> {
        self.segment.and_then(|label| Segment::try_from(label).ok())
    }
}
