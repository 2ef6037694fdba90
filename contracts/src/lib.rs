/*!
# Token Sale Contracts for Stylus

A fixed-supply token ledger and a fixed-rate token sale written in Rust for
[Arbitrum Stylus](https://docs.arbitrum.io/stylus/stylus-gentle-introduction).

The ledger ([`token::erc20::Erc20`]) tracks a balance per account and is
minted exactly once, when [`token::erc20::presets::Erc20FixedSupply`] is
constructed. The sale ([`finance::crowdsale::Crowdsale`]) holds a stock of
ledger tokens and hands them out at a fixed rate in exchange for native
currency, which it forwards to a wallet.

> This project has never been audited nor thoroughly reviewed for security
> vulnerabilities. Do not use in production.

## Usage

Embed the components in your own entrypoint contract:

```rust,ignore
use tokensale_stylus::finance::crowdsale::{self, Crowdsale, ICrowdsale};

#[entrypoint]
#[storage]
struct TokenSale {
    crowdsale: Crowdsale,
}

#[public]
#[implements(ICrowdsale<Error = crowdsale::Error>)]
impl TokenSale {
    #[constructor]
    fn constructor(
        &mut self,
        rate: U256,
        wallet: Address,
        token: Address,
    ) -> Result<(), crowdsale::Error> {
        self.crowdsale.constructor(rate, wallet, token)
    }
}
```
*/

#![allow(
    clippy::module_name_repetitions,
    clippy::used_underscore_items,
    clippy::unreadable_literal
)]
#![cfg_attr(not(any(test, feature = "std")), no_std, no_main)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![deny(rustdoc::broken_intra_doc_links)]
extern crate alloc;

pub mod finance;
pub mod token;
pub(crate) mod utils;
