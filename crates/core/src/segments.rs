//! Customer Segments

use std::{
    borrow::Borrow,
    fmt::{Display, Formatter, Result as FmtResult},
    slice,
};

use smallvec::SmallVec;

use crate::offers::OfferValidationError;

/// Opaque customer segment label (e.g. `"p1"`).
///
/// Labels are compared verbatim; the only constraint is that they are not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment(String);

impl Segment {
    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Segment {
    type Error = OfferValidationError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        if label.trim().is_empty() {
            return Err(OfferValidationError::BlankSegment);
        }

        Ok(Self(label))
    }
}

impl TryFrom<&str> for Segment {
    type Error = OfferValidationError;

    fn try_from(label: &str) -> Result<Self, Self::Error> {
        Self::try_from(label.to_owned())
    }
}

impl Borrow<str> for Segment {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Non-empty set of segments an offer targets, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSet(SmallVec<[Segment; 4]>);

impl SegmentSet {
    /// Build a segment set from raw labels, dropping repeated labels.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - any label is blank (`OfferValidationError::BlankSegment`).
    /// - no labels are given (`OfferValidationError::NoSegments`).
    pub fn try_from_labels<I, S>(labels: I) -> Result<Self, OfferValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments: SmallVec<[Segment; 4]> = SmallVec::new();

        for label in labels {
            let segment = Segment::try_from(label.into())?;

            if !segments.contains(&segment) {
                segments.push(segment);
            }
        }

        if segments.is_empty() {
            return Err(OfferValidationError::NoSegments);
        }

        Ok(Self(segments))
    }

    /// Iterate the segments in first-seen order.
    pub fn iter(&self) -> slice::Iter<'_, Segment> {
        self.0.iter()
    }

    /// Whether the set holds the given label.
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|segment| segment.as_str() == label)
    }

    /// Number of distinct segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty (never true for a constructed set).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a SegmentSet {
    type Item = &'a Segment;
    type IntoIter = slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
