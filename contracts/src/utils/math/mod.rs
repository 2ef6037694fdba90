//! Arithmetic helpers.
pub(crate) mod storage;
