//! Extension traits

mod result;

pub(crate) use result::ResultExt as _;
