//! Ready to deploy ERC-20 compositions.
//!
//! [`Erc20FixedSupply`] mints its whole supply to the deployer and never
//! mints or burns again. It also answers the BEP-20 `getOwner` call with the
//! deployer's address.
use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::{Address, U256};
use stylus_sdk::{msg, prelude::*, storage::StorageAddress};

use super::{
    extensions::{Erc20Metadata, IErc20Metadata},
    Erc20, Error, IErc20,
};

/// State of an [`Erc20FixedSupply`] token.
#[storage]
pub struct Erc20FixedSupply {
    /// Balance ledger.
    pub erc20: Erc20,
    /// Name, symbol and decimals.
    pub metadata: Erc20Metadata,
    /// Account that deployed the token and received the supply.
    pub(crate) owner: StorageAddress,
}

#[public]
#[implements(IErc20<Error = Error>, IErc20Metadata)]
impl Erc20FixedSupply {
    /// Constructor. Credits the whole `initial_supply` to the caller.
    ///
    /// Pass [`crate::token::erc20::extensions::DEFAULT_DECIMALS`] as
    /// `decimals` for a token without fractional display.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `name` - Token name.
    /// * `symbol` - Token symbol.
    /// * `initial_supply` - Total supply, owned by the caller.
    /// * `decimals` - Number of decimals used for display.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidReceiver`] - If the caller is [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`super::Transfer`].
    #[constructor]
    pub fn constructor(
        &mut self,
        name: String,
        symbol: String,
        initial_supply: U256,
        decimals: u8,
    ) -> Result<(), Error> {
        let creator = msg::sender();
        self.metadata.constructor(name, symbol);
        self.metadata._set_decimals(decimals);
        self.owner.set(creator);
        self.erc20._mint(creator, initial_supply)
    }

    /// Returns the account that deployed the token.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    pub fn get_owner(&self) -> Address {
        self.owner.get()
    }
}

#[public]
impl IErc20 for Erc20FixedSupply {
    type Error = Error;

    fn total_supply(&self) -> U256 {
        self.erc20.total_supply()
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.erc20.balance_of(account)
    }

    fn transfer(
        &mut self,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.erc20.transfer(to, value)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.erc20.allowance(owner, spender)
    }

    fn approve(
        &mut self,
        spender: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.erc20.approve(spender, value)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.erc20.transfer_from(from, to, value)
    }
}

#[public]
impl IErc20Metadata for Erc20FixedSupply {
    fn name(&self) -> String {
        self.metadata.name()
    }

    fn symbol(&self) -> String {
        self.metadata.symbol()
    }

    fn decimals(&self) -> u8 {
        self.metadata.decimals()
    }
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able to deploy the
/// preset on its own and to call it from other contracts in tests.
unsafe impl TopLevelStorage for Erc20FixedSupply {}

#[cfg(test)]
mod tests {
    use alloy_primitives::{uint, Address, U256};
    use motsu::prelude::*;

    use super::*;
    use crate::token::erc20::{ERC20InsufficientBalance, Transfer};

    const NAME: &str = "SimpleToken";
    const SYMBOL: &str = "SIMP";

    fn supply() -> U256 {
        uint!(10000000000000000000000_U256)
    }

    #[motsu::test]
    fn has_total_supply(contract: Contract<Erc20FixedSupply>, alice: Address) {
        contract
            .sender(alice)
            .constructor(NAME.into(), SYMBOL.into(), supply(), 0)
            .motsu_unwrap();

        assert_eq!(supply(), contract.sender(alice).total_supply());
    }

    #[motsu::test]
    fn has_metadata(contract: Contract<Erc20FixedSupply>, alice: Address) {
        contract
            .sender(alice)
            .constructor(NAME.into(), SYMBOL.into(), supply(), 9)
            .motsu_unwrap();

        assert_eq!(NAME, contract.sender(alice).name());
        assert_eq!(SYMBOL, contract.sender(alice).symbol());
        assert_eq!(9, contract.sender(alice).decimals());
    }

    #[motsu::test]
    fn assigns_initial_supply_to_creator(
        contract: Contract<Erc20FixedSupply>,
        alice: Address,
        bob: Address,
    ) {
        contract
            .sender(alice)
            .constructor(NAME.into(), SYMBOL.into(), supply(), 0)
            .motsu_unwrap();

        assert_eq!(supply(), contract.sender(bob).balance_of(alice));
        assert_eq!(U256::ZERO, contract.sender(bob).balance_of(bob));
        assert_eq!(alice, contract.sender(bob).get_owner());

        contract.assert_emitted(&Transfer {
            from: Address::ZERO,
            to: alice,
            value: supply(),
        });
    }

    #[motsu::test]
    fn constructs_with_zero_supply(
        contract: Contract<Erc20FixedSupply>,
        alice: Address,
    ) {
        contract
            .sender(alice)
            .constructor(NAME.into(), SYMBOL.into(), U256::ZERO, 0)
            .motsu_unwrap();

        assert_eq!(U256::ZERO, contract.sender(alice).total_supply());
        assert_eq!(U256::ZERO, contract.sender(alice).balance_of(alice));
    }

    #[motsu::test]
    fn total_supply_never_changes_on_transfers(
        contract: Contract<Erc20FixedSupply>,
        alice: Address,
        bob: Address,
    ) {
        let supply = uint!(1000000_U256);
        contract
            .sender(alice)
            .constructor(NAME.into(), SYMBOL.into(), supply, 0)
            .motsu_unwrap();

        contract.sender(alice).transfer(bob, uint!(500000_U256)).motsu_unwrap();
        let err = contract
            .sender(bob)
            .transfer(alice, uint!(500001_U256))
            .motsu_unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientBalance(ERC20InsufficientBalance { sender, .. })
                if sender == bob
        ));

        assert_eq!(supply, contract.sender(alice).total_supply());
        assert_eq!(
            uint!(500000_U256),
            contract.sender(alice).balance_of(alice)
        );
        assert_eq!(uint!(500000_U256), contract.sender(alice).balance_of(bob));
    }
}
