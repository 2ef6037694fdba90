//! Primitives for exchanging value.
pub mod crowdsale;
