#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use stylus_sdk::{
    alloy_primitives::{Address, U256},
    prelude::*,
};
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
    pub fn constructor(
        &mut self,
        rate: U256,
        wallet: Address,
        token: Address,
        rate_divisor: U256,
    ) -> Result<(), crowdsale::Error> {
        self.crowdsale.constructor(rate, wallet, token)?;
        self.crowdsale._set_rate_divisor(rate_divisor)
    }

    #[receive]
    fn receive(&mut self) -> Result<(), Vec<u8>> {
        self.crowdsale.receive()
    }
}

#[public]
impl ICrowdsale for TokenSale {
    type Error = crowdsale::Error;

    fn token(&self) -> Address {
        self.crowdsale.token()
    }

    fn wallet(&self) -> Address {
        self.crowdsale.wallet()
    }

    fn rate(&self) -> U256 {
        self.crowdsale.rate()
    }

    fn rate_divisor(&self) -> U256 {
        self.crowdsale.rate_divisor()
    }

    fn raised(&self) -> U256 {
        self.crowdsale.raised()
    }

    #[payable]
    fn buy_tokens(&mut self, beneficiary: Address) -> Result<(), Self::Error> {
        self.crowdsale.buy_tokens(beneficiary)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{uint, Address, U256};
    use motsu::prelude::*;
    use tokensale_stylus::{
        finance::crowdsale::{Error, TokensPurchased},
        token::erc20::{presets::Erc20FixedSupply, IErc20},
    };

    use super::*;

    const SUPPLY: U256 = uint!(1000000_U256);
    const SALE_STOCK: U256 = uint!(500000_U256);
    const RATE: U256 = uint!(1_U256);

    fn deploy(
        token: &Contract<Erc20FixedSupply>,
        sale: &Contract<TokenSale>,
        creator: Address,
    ) {
        deploy_with_divisor(token, sale, creator, U256::ONE);
    }

    fn deploy_with_divisor(
        token: &Contract<Erc20FixedSupply>,
        sale: &Contract<TokenSale>,
        creator: Address,
        rate_divisor: U256,
    ) {
        token
            .sender(creator)
            .constructor("SimpleToken".into(), "SIMP".into(), SUPPLY, 9)
            .motsu_unwrap();
        sale.sender(creator)
            .constructor(RATE, creator, token.address(), rate_divisor)
            .motsu_unwrap();
        token
            .sender(creator)
            .transfer(sale.address(), SALE_STOCK)
            .motsu_unwrap();
    }

    #[motsu::test]
    fn creates_crowdsale_with_correct_parameters(
        token: Contract<Erc20FixedSupply>,
        sale: Contract<TokenSale>,
        creator: Address,
    ) {
        deploy(&token, &sale, creator);

        assert_eq!(RATE, sale.sender(creator).rate());
        assert_eq!(U256::ONE, sale.sender(creator).rate_divisor());
        assert_eq!(creator, sale.sender(creator).wallet());
        assert_eq!(token.address(), sale.sender(creator).token());
        assert_eq!(
            SALE_STOCK,
            token.sender(creator).balance_of(sale.address())
        );
        assert_eq!(
            SUPPLY - SALE_STOCK,
            token.sender(creator).balance_of(creator)
        );
    }

    #[motsu::test]
    fn accepts_payments(
        token: Contract<Erc20FixedSupply>,
        sale: Contract<TokenSale>,
        creator: Address,
        investor: Address,
    ) {
        deploy(&token, &sale, creator);
        let investment = uint!(10_U256);
        investor.fund(investment);
        let wallet_balance = creator.balance();

        sale.sender_and_value(investor, investment)
            .buy_tokens(investor)
            .motsu_unwrap();

        assert_eq!(investment, token.sender(investor).balance_of(investor));
        assert_eq!(
            uint!(499990_U256),
            token.sender(investor).balance_of(sale.address())
        );
        assert_eq!(investment, sale.sender(investor).raised());
        assert_eq!(wallet_balance + investment, creator.balance());

        sale.assert_emitted(&TokensPurchased {
            purchaser: investor,
            beneficiary: investor,
            value: investment,
            amount: investment,
        });
    }

    #[motsu::test]
    fn accepts_ether_payments_with_rate_divisor(
        token: Contract<Erc20FixedSupply>,
        sale: Contract<TokenSale>,
        creator: Address,
        investor: Address,
    ) {
        let rate_divisor = uint!(1000000000000000_U256);
        deploy_with_divisor(&token, &sale, creator, rate_divisor);
        // 0.01 ether.
        let investment = uint!(10000000000000000_U256);
        investor.fund(investment);

        sale.sender_and_value(investor, investment)
            .buy_tokens(investor)
            .motsu_unwrap();

        assert_eq!(rate_divisor, sale.sender(investor).rate_divisor());
        assert_eq!(uint!(10_U256), token.sender(investor).balance_of(investor));
        assert_eq!(
            SALE_STOCK - uint!(10_U256),
            token.sender(investor).balance_of(sale.address())
        );
        assert_eq!(investment, sale.sender(investor).raised());
    }

    #[motsu::test]
    fn constructor_reverts_when_rate_divisor_is_zero(
        token: Contract<Erc20FixedSupply>,
        sale: Contract<TokenSale>,
        creator: Address,
    ) {
        let err = sale
            .sender(creator)
            .constructor(RATE, creator, token.address(), U256::ZERO)
            .motsu_unwrap_err();
        assert!(matches!(err, Error::InvalidRateDivisor(_)));
    }

    #[motsu::test]
    fn accepts_plain_value_transfers(
        token: Contract<Erc20FixedSupply>,
        sale: Contract<TokenSale>,
        creator: Address,
        investor: Address,
    ) {
        deploy(&token, &sale, creator);
        let investment = uint!(250_U256);
        investor.fund(investment);

        sale.sender_and_value(investor, investment).receive().motsu_unwrap();

        assert_eq!(investment, token.sender(investor).balance_of(investor));
        assert_eq!(investment, sale.sender(investor).raised());
    }

    #[motsu::test]
    fn rejects_purchases_without_payment(
        token: Contract<Erc20FixedSupply>,
        sale: Contract<TokenSale>,
        creator: Address,
        investor: Address,
    ) {
        deploy(&token, &sale, creator);

        let err = sale
            .sender(investor)
            .buy_tokens(investor)
            .motsu_unwrap_err();
        assert!(matches!(err, Error::ZeroPayment(_)));
        assert_eq!(
            SALE_STOCK,
            token.sender(investor).balance_of(sale.address())
        );
    }

    #[motsu::test]
    fn rejects_purchases_beyond_stock(
        token: Contract<Erc20FixedSupply>,
        sale: Contract<TokenSale>,
        creator: Address,
        investor: Address,
    ) {
        deploy(&token, &sale, creator);
        let investment = uint!(500001_U256);
        investor.fund(investment);

        let err = sale
            .sender_and_value(investor, investment)
            .buy_tokens(investor)
            .motsu_unwrap_err();
        assert!(matches!(err, Error::InsufficientSaleBalance(_)));
        assert_eq!(U256::ZERO, token.sender(investor).balance_of(investor));
        assert_eq!(U256::ZERO, sale.sender(investor).raised());
    }
}
