//! Offers

mod errors;
pub mod models;
pub mod service;

pub use errors::OffersServiceError;
pub use service::*;
