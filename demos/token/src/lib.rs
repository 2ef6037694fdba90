#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use stylus_sdk::{
    alloy_primitives::{Address, U256},
    prelude::*,
};
use tokensale_stylus::token::erc20::{
    self, extensions::IErc20Metadata, presets::Erc20FixedSupply, IErc20,
};

#[entrypoint]
#[storage]
struct Token {
    token: Erc20FixedSupply,
}

#[public]
#[implements(IErc20<Error = erc20::Error>, IErc20Metadata)]
impl Token {
    #[constructor]
    pub fn constructor(
        &mut self,
        name: String,
        symbol: String,
        initial_supply: U256,
        decimals: u8,
    ) -> Result<(), erc20::Error> {
        self.token.constructor(name, symbol, initial_supply, decimals)
    }

    pub fn get_owner(&self) -> Address {
        self.token.get_owner()
    }
}

#[public]
impl IErc20 for Token {
    type Error = erc20::Error;

    fn total_supply(&self) -> U256 {
        self.token.total_supply()
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.token.balance_of(account)
    }

    fn transfer(
        &mut self,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.token.transfer(to, value)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.token.allowance(owner, spender)
    }

    fn approve(
        &mut self,
        spender: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.token.approve(spender, value)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.token.transfer_from(from, to, value)
    }
}

#[public]
impl IErc20Metadata for Token {
    fn name(&self) -> String {
        self.token.name()
    }

    fn symbol(&self) -> String {
        self.token.symbol()
    }

    fn decimals(&self) -> u8 {
        self.token.decimals()
    }
}
