//! Segment lookup errors.

use thiserror::Error;

/// Failures while asking the segment service for a user's segment.
///
/// An unknown user is not an error; resolvers report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum SegmentLookupError {
    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The segment service returned a non-2xx response.
    #[error("unexpected response from segment service: {0}")]
    UnexpectedResponse(String),
}

/// A fixed user segment table entry could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentTableError {
    /// Entry was not of the form `user_id=segment`.
    #[error("invalid user segment entry {0:?}, expected user_id=segment")]
    InvalidEntry(String),
}
