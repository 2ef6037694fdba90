//! Helpers shared by the token and sale contracts.
pub(crate) mod math;
