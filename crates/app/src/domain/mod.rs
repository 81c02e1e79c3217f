//! Cart Offers Domain Concerns

pub mod offers;
pub mod segments;
