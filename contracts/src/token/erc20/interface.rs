//! Callable view of a deployed ERC-20 ledger.
//!
//! Used by [`crate::finance::crowdsale::Crowdsale`] to query its stock and
//! hand tokens out. Only the calls the sale makes are declared.
pub use callable::*;

mod callable {
    #![allow(missing_docs)]
    #![cfg_attr(coverage_nightly, coverage(off))]

    use alloc::vec;

    use stylus_sdk::prelude::sol_interface;

    sol_interface! {
        /// Ledger calls made by a token sale.
        interface Erc20Interface {
            function balanceOf(address account) external view returns (uint256);
            function transfer(address to, uint256 value) external returns (bool);
        }
    }
}
