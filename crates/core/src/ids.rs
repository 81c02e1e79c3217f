//! Identifiers

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Restaurant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RestaurantId(i64);

impl RestaurantId {
    /// Wrap a raw restaurant id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw restaurant id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for RestaurantId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

impl Display for RestaurantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// User identifier, as understood by the segment lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw user id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw user id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}
