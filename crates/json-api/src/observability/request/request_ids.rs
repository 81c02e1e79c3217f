//! Request IDs.

use std::fmt::{Display, Formatter, Result as FmtResult};

use salvo::{Request, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Caller-supplied `x-request-id`, or a fresh UUIDv7 when absent or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestId(String);

impl RequestId {
    pub(super) fn from_request(req: &Request) -> Self {
        req.header::<String>(REQUEST_ID_HEADER)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map_or_else(|| Self(Uuid::now_v7().to_string()), Self)
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    /// Echo the id on the response.
    pub(super) fn echo(&self, res: &mut Response) {
        if let Err(source) = res.add_header(REQUEST_ID_HEADER, self.as_str(), true) {
            warn!(request_id = %self, "could not echo request id: {source}");
        }
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use super::*;

    #[test]
    fn caller_request_ids_are_trimmed_and_kept() {
        let req = TestClient::get("http://example.com/")
            .add_header(REQUEST_ID_HEADER, " order-42 ", true)
            .build();

        assert_eq!(RequestId::from_request(&req).as_str(), "order-42");
    }

    #[test]
    fn missing_or_blank_request_ids_are_generated() {
        let blank = TestClient::get("http://example.com/")
            .add_header(REQUEST_ID_HEADER, "  ", true)
            .build();
        let missing = TestClient::get("http://example.com/").build();

        for req in [blank, missing] {
            let id = RequestId::from_request(&req);

            assert!(Uuid::parse_str(id.as_str()).is_ok(), "expected a UUID, got {id}");
        }
    }
}
