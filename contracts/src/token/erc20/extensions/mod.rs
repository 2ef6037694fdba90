//! Common extensions to the ERC-20 standard.
pub mod metadata;

pub use metadata::{Erc20Metadata, IErc20Metadata, DEFAULT_DECIMALS};
