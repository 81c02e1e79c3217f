//! Segments
//!
//! Customer segment lookup. Classification itself happens elsewhere; this module only asks for
//! the label assigned to a user.

use async_trait::async_trait;
use mockall::automock;

use cartoffer::{ids::UserId, segments::Segment};

mod errors;
mod fixed;
mod http;

pub use errors::{SegmentLookupError, SegmentTableError};
pub use fixed::FixedSegmentResolver;
pub use http::HttpSegmentResolver;

#[automock]
#[async_trait]
pub trait SegmentResolver: Send + Sync {
    /// Look up the segment label for a user, or `Ok(None)` when the user is unknown.
    async fn resolve(&self, user: UserId) -> Result<Option<Segment>, SegmentLookupError>;
}
