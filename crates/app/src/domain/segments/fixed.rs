//! Fixed user segment table.

use std::str::FromStr;

use async_trait::async_trait;
use rustc_hash::FxHashMap;

use cartoffer::{ids::UserId, segments::Segment};

use super::{SegmentLookupError, SegmentResolver, SegmentTableError};

/// Segment resolver backed by a fixed user → segment table.
#[derive(Debug, Clone, Default)]
pub struct FixedSegmentResolver {
    segments: FxHashMap<UserId, Segment>,
}

impl FixedSegmentResolver {
    /// Create an empty table; every user is unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a segment to a user, replacing any previous assignment.
    #[must_use]
    pub fn with_assignment(mut self, user: UserId, segment: Segment) -> Self {
        self.segments.insert(user, segment);
        self
    }

    /// Number of users with an assigned segment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether no user has an assigned segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromIterator<(UserId, Segment)> for FixedSegmentResolver {
    fn from_iter<T: IntoIterator<Item = (UserId, Segment)>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// Parses a comma separated table such as `1=p1,2=p2`. An empty string is an empty table.
impl FromStr for FixedSegmentResolver {
    type Err = SegmentTableError;

    fn from_str(table: &str) -> Result<Self, Self::Err> {
        table
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(parse_entry)
            .collect()
    }
}

fn parse_entry(entry: &str) -> Result<(UserId, Segment), SegmentTableError> {
    let invalid = || SegmentTableError::InvalidEntry(entry.to_owned());

    let (user, segment) = entry.split_once('=').ok_or_else(invalid)?;

    let user = user.trim().parse::<i64>().map_err(|_error| invalid())?;
    let segment = Segment::try_from(segment.trim()).map_err(|_error| invalid())?;

    Ok((UserId::new(user), segment))
}

#[async_trait]
impl SegmentResolver for FixedSegmentResolver {
    async fn resolve(&self, user: UserId) -> Result<Option<Segment>, SegmentLookupError> {
        Ok(self.segments.get(&user).cloned())
    }
}
