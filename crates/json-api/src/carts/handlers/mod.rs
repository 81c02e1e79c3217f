//! Cart Handlers

pub(crate) mod apply_offer;
