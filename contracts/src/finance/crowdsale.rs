//! A crowdsale sells ERC-20 tokens for native currency at a fixed rate.
//!
//! The sale holds a stock of tokens of a [`crate::token::erc20::Erc20`]
//! ledger: whoever owns tokens funds the sale by transferring them to the
//! sale's address. Buyers then send native currency with
//! [`ICrowdsale::buy_tokens`] and receive
//! `value * rate / rate_divisor` tokens. The paid currency is forwarded to the
//! sale's wallet in the same call.
//!
//! A purchase is all-or-nothing. The raised amount and the token delivery are
//! committed before the currency leaves the contract, and any failure reverts
//! every change of the call.
//!
//! The rate divisor lets a deployment express rates finer than one token per
//! wei. For example, a token with 3 decimals sold at one whole token per ether
//! uses `rate = 1` and `rate_divisor = 10^15`.

use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use alloy_primitives::{Address, U256};
pub use sol::*;
use stylus_sdk::{
    call::{call, Call, MethodError},
    contract, evm, msg,
    prelude::*,
    storage::{StorageAddress, StorageU256},
};

use crate::{
    token::erc20::interface::Erc20Interface,
    utils::math::storage::AddAssignChecked,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when `amount` tokens are bought for `value` wei.
        ///
        /// * `purchaser` - Account that paid for the tokens.
        /// * `beneficiary` - Account that received the tokens.
        /// * `value` - Wei paid for the purchase.
        /// * `amount` - Number of tokens purchased.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event TokensPurchased(
            address indexed purchaser,
            address indexed beneficiary,
            uint256 value,
            uint256 amount
        );
    }

    sol! {
        /// The rate is zero.
        ///
        /// * `rate` - The rejected rate.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error CrowdsaleInvalidRate(uint256 rate);

        /// The rate divisor is zero.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error CrowdsaleInvalidRateDivisor();

        /// The wallet is not a valid account (eg. `Address::ZERO`).
        ///
        /// * `wallet` - The rejected wallet.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error CrowdsaleInvalidWallet(address wallet);

        /// The token is not a valid token address (eg. `Address::ZERO`).
        ///
        /// * `token` - The rejected token.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error CrowdsaleInvalidToken(address token);

        /// The beneficiary is not a valid account (eg. `Address::ZERO`).
        ///
        /// * `beneficiary` - The rejected beneficiary.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error CrowdsaleInvalidBeneficiary(address beneficiary);

        /// A purchase was attempted without paying anything.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error CrowdsaleZeroPayment();

        /// The payment is too small to buy a single token unit.
        ///
        /// * `value` - Wei paid.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error CrowdsaleZeroTokenAmount(uint256 value);

        /// The sale doesn't hold enough tokens for a purchase.
        ///
        /// * `balance` - Tokens held by the sale.
        /// * `needed` - Tokens the purchase requires.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error CrowdsaleInsufficientBalance(uint256 balance, uint256 needed);

        /// A call to the token contract failed or returned `false`.
        ///
        /// * `token` - Address of the token.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error CrowdsaleFailedTokenTransfer(address token);

        /// Forwarding the payment to the wallet failed.
        ///
        /// * `reason` - Revert reason of the forwarding call.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error CrowdsaleForwardFundsFailed(string reason);
    }
}

/// An error that occurred in the [`Crowdsale`] contract.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The rate is zero.
    InvalidRate(CrowdsaleInvalidRate),
    /// The rate divisor is zero.
    InvalidRateDivisor(CrowdsaleInvalidRateDivisor),
    /// The wallet is not a valid account (eg. [`Address::ZERO`]).
    InvalidWallet(CrowdsaleInvalidWallet),
    /// The token is not a valid token address (eg. [`Address::ZERO`]).
    InvalidToken(CrowdsaleInvalidToken),
    /// The beneficiary is not a valid account (eg. [`Address::ZERO`]).
    InvalidBeneficiary(CrowdsaleInvalidBeneficiary),
    /// A purchase was attempted without paying anything.
    ZeroPayment(CrowdsaleZeroPayment),
    /// The payment is too small to buy a single token unit.
    ZeroTokenAmount(CrowdsaleZeroTokenAmount),
    /// The sale doesn't hold enough tokens for a purchase.
    InsufficientSaleBalance(CrowdsaleInsufficientBalance),
    /// A call to the token contract failed or returned `false`.
    FailedTokenTransfer(CrowdsaleFailedTokenTransfer),
    /// Forwarding the payment to the wallet failed.
    ForwardFundsFailed(CrowdsaleForwardFundsFailed),
}

impl From<stylus_sdk::call::Error> for Error {
    fn from(value: stylus_sdk::call::Error) -> Self {
        let reason = match value {
            stylus_sdk::call::Error::Revert(reason) => {
                String::from_utf8_lossy(&reason).to_string()
            }
            stylus_sdk::call::Error::AbiDecodingFailed(e) => e.to_string(),
        };
        Error::ForwardFundsFailed(CrowdsaleForwardFundsFailed { reason })
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> alloc::vec::Vec<u8> {
        self.into()
    }
}

/// State of a [`Crowdsale`] contract.
#[storage]
pub struct Crowdsale {
    /// The token being sold.
    pub(crate) token: StorageAddress,
    /// Account receiving the paid currency.
    pub(crate) wallet: StorageAddress,
    /// Token units per `rate_divisor` wei.
    pub(crate) rate: StorageU256,
    /// Divisor applied to `value * rate`.
    pub(crate) rate_divisor: StorageU256,
    /// Amount of wei raised.
    pub(crate) raised: StorageU256,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`. Should be fixed in the future by the Stylus team.
unsafe impl TopLevelStorage for Crowdsale {}

/// Required interface of a [`Crowdsale`] compliant contract.
pub trait ICrowdsale {
    /// The error type associated to this trait implementation.
    type Error: Into<alloc::vec::Vec<u8>>;

    /// Returns the address of the token being sold.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn token(&self) -> Address;

    /// Returns the address where the paid currency is forwarded.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn wallet(&self) -> Address;

    /// Returns the number of token units a buyer gets per `rate_divisor`
    /// wei.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn rate(&self) -> U256;

    /// Returns the divisor applied to `value * rate`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn rate_divisor(&self) -> U256;

    /// Returns the amount of wei raised.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn raised(&self) -> U256;

    /// Buys tokens for `beneficiary` with the attached value.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `beneficiary` - Account receiving the tokens.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidBeneficiary`] - If `beneficiary` is
    ///   [`Address::ZERO`].
    /// * [`Error::ZeroPayment`] - If no value is attached.
    /// * [`Error::ZeroTokenAmount`] - If the attached value buys zero
    ///   tokens.
    /// * [`Error::InsufficientSaleBalance`] - If the sale holds fewer tokens
    ///   than the purchase requires.
    /// * [`Error::FailedTokenTransfer`] - If a call to the token fails.
    /// * [`Error::ForwardFundsFailed`] - If the payment can't be forwarded to
    ///   the wallet.
    ///
    /// # Events
    ///
    /// * [`TokensPurchased`].
    ///
    /// # Panics
    ///
    /// * If `value * rate` exceeds [`U256::MAX`].
    /// * If the total raised exceeds [`U256::MAX`].
    fn buy_tokens(&mut self, beneficiary: Address) -> Result<(), Self::Error>;
}

#[public]
#[implements(ICrowdsale<Error = Error>)]
impl Crowdsale {
    /// Constructor. The rate divisor starts at one.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `rate` - Token units a buyer gets per wei.
    /// * `wallet` - Account receiving the paid currency.
    /// * `token` - Address of the token being sold.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidRate`] - If `rate` is zero.
    /// * [`Error::InvalidWallet`] - If `wallet` is [`Address::ZERO`].
    /// * [`Error::InvalidToken`] - If `token` is [`Address::ZERO`].
    #[constructor]
    pub fn constructor(
        &mut self,
        rate: U256,
        wallet: Address,
        token: Address,
    ) -> Result<(), Error> {
        if rate.is_zero() {
            return Err(Error::InvalidRate(CrowdsaleInvalidRate { rate }));
        }
        if wallet.is_zero() {
            return Err(Error::InvalidWallet(CrowdsaleInvalidWallet {
                wallet,
            }));
        }
        if token.is_zero() {
            return Err(Error::InvalidToken(CrowdsaleInvalidToken { token }));
        }

        self.rate.set(rate);
        self.rate_divisor.set(U256::ONE);
        self.wallet.set(wallet);
        self.token.set(token);
        Ok(())
    }

    /// Buys tokens for the sender of a plain value transfer.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    ///
    /// # Errors
    ///
    /// Same as [`ICrowdsale::buy_tokens`].
    #[receive]
    pub fn receive(&mut self) -> Result<(), Vec<u8>> {
        Ok(self.buy_tokens(msg::sender())?)
    }
}

#[public]
impl ICrowdsale for Crowdsale {
    type Error = Error;

    fn token(&self) -> Address {
        self.token.get()
    }

    fn wallet(&self) -> Address {
        self.wallet.get()
    }

    fn rate(&self) -> U256 {
        self.rate.get()
    }

    fn rate_divisor(&self) -> U256 {
        self.rate_divisor.get()
    }

    fn raised(&self) -> U256 {
        self.raised.get()
    }

    #[payable]
    fn buy_tokens(&mut self, beneficiary: Address) -> Result<(), Self::Error> {
        let purchaser = msg::sender();
        let value = msg::value();

        let amount = self._process_purchase(beneficiary, value)?;
        self._forward_funds(value)?;

        evm::log(TokensPurchased { purchaser, beneficiary, value, amount });

        Ok(())
    }
}

impl Crowdsale {
    /// Sets the divisor applied to `value * rate`.
    ///
    /// Meant to be called from the constructor of an embedding contract.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `rate_divisor` - The new divisor.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidRateDivisor`] - If `rate_divisor` is zero.
    pub fn _set_rate_divisor(
        &mut self,
        rate_divisor: U256,
    ) -> Result<(), Error> {
        if rate_divisor.is_zero() {
            return Err(Error::InvalidRateDivisor(
                CrowdsaleInvalidRateDivisor {},
            ));
        }
        self.rate_divisor.set(rate_divisor);
        Ok(())
    }

    /// Validates an incoming purchase.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `beneficiary` - Account receiving the tokens.
    /// * `value` - Wei paid.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidBeneficiary`] - If `beneficiary` is
    ///   [`Address::ZERO`].
    /// * [`Error::ZeroPayment`] - If `value` is zero.
    pub fn _pre_validate_purchase(
        &self,
        beneficiary: Address,
        value: U256,
    ) -> Result<(), Error> {
        if beneficiary.is_zero() {
            return Err(Error::InvalidBeneficiary(
                CrowdsaleInvalidBeneficiary { beneficiary },
            ));
        }
        if value.is_zero() {
            return Err(Error::ZeroPayment(CrowdsaleZeroPayment {}));
        }
        Ok(())
    }

    /// Converts a wei `value` into a number of tokens.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `value` - Wei paid.
    ///
    /// # Panics
    ///
    /// * If `value * rate` exceeds [`U256::MAX`].
    #[must_use]
    pub fn _get_token_amount(&self, value: U256) -> U256 {
        token_amount(value, self.rate.get(), self.rate_divisor.get())
            .expect("token amount should not exceed `U256::MAX`")
    }

    /// Validates a purchase, delivers the tokens and records the raised
    /// value. Does not forward the payment.
    ///
    /// Returns the number of tokens delivered.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `beneficiary` - Account receiving the tokens.
    /// * `value` - Wei paid.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidBeneficiary`] - If `beneficiary` is
    ///   [`Address::ZERO`].
    /// * [`Error::ZeroPayment`] - If `value` is zero.
    /// * [`Error::ZeroTokenAmount`] - If `value` buys zero tokens.
    /// * [`Error::InsufficientSaleBalance`] - If the sale holds fewer tokens
    ///   than the purchase requires.
    /// * [`Error::FailedTokenTransfer`] - If a call to the token fails.
    ///
    /// # Panics
    ///
    /// * If `value * rate` exceeds [`U256::MAX`].
    /// * If the total raised exceeds [`U256::MAX`].
    pub fn _process_purchase(
        &mut self,
        beneficiary: Address,
        value: U256,
    ) -> Result<U256, Error> {
        self._pre_validate_purchase(beneficiary, value)?;

        let amount = self._get_token_amount(value);
        if amount.is_zero() {
            return Err(Error::ZeroTokenAmount(CrowdsaleZeroTokenAmount {
                value,
            }));
        }

        self._deliver_tokens(beneficiary, amount)?;

        self.raised.add_assign_checked(
            value,
            "total raised should not exceed `U256::MAX`",
        );

        Ok(amount)
    }

    /// Moves `amount` tokens from the sale to `beneficiary`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `beneficiary` - Account receiving the tokens.
    /// * `amount` - Number of tokens to deliver.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientSaleBalance`] - If the sale holds fewer than
    ///   `amount` tokens.
    /// * [`Error::FailedTokenTransfer`] - If a call to the token fails or
    ///   the transfer returns `false`.
    pub fn _deliver_tokens(
        &mut self,
        beneficiary: Address,
        amount: U256,
    ) -> Result<(), Error> {
        let token_address = self.token.get();
        let token = Erc20Interface::new(token_address);

        let balance = token
            .balance_of(Call::new_in(self), contract::address())
            .map_err(|_| CrowdsaleFailedTokenTransfer {
                token: token_address,
            })?;
        if balance < amount {
            return Err(Error::InsufficientSaleBalance(
                CrowdsaleInsufficientBalance { balance, needed: amount },
            ));
        }

        let transferred = token
            .transfer(Call::new_in(self), beneficiary, amount)
            .map_err(|_| CrowdsaleFailedTokenTransfer {
                token: token_address,
            })?;
        if !transferred {
            return Err(Error::FailedTokenTransfer(
                CrowdsaleFailedTokenTransfer { token: token_address },
            ));
        }

        Ok(())
    }

    /// Sends `value` wei to the wallet.
    ///
    /// An embedding contract that routes payments elsewhere can pair
    /// [`Self::_process_purchase`] with its own forwarding instead.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `value` - Wei to forward.
    ///
    /// # Errors
    ///
    /// * [`Error::ForwardFundsFailed`] - If the transfer to the wallet fails.
    pub fn _forward_funds(&mut self, value: U256) -> Result<(), Error> {
        let wallet = self.wallet.get();
        call(Call::new_in(self).value(value), wallet, &[])?;
        Ok(())
    }
}

/// Computes `value * rate / rate_divisor`, rounding down.
///
/// Returns `None` if `value * rate` overflows or `rate_divisor` is zero.
#[must_use]
pub fn token_amount(
    value: U256,
    rate: U256,
    rate_divisor: U256,
) -> Option<U256> {
    value.checked_mul(rate)?.checked_div(rate_divisor)
}
