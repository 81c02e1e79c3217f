//! Shared application services for cart offers.

pub mod context;
pub mod domain;
