//! Optional Metadata of the ERC-20 standard.

use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::U8;
use stylus_sdk::{
    prelude::*,
    storage::{StorageString, StorageU8},
};

/// Number of decimals reported when none has been configured.
pub const DEFAULT_DECIMALS: u8 = 0;

/// State of an [`Erc20Metadata`] contract.
#[storage]
pub struct Erc20Metadata {
    /// Token name.
    pub(crate) name: StorageString,
    /// Token symbol.
    pub(crate) symbol: StorageString,
    /// Number of decimals used for display.
    pub(crate) decimals: StorageU8,
}

/// Interface for the optional metadata functions from the ERC-20 standard.
pub trait IErc20Metadata {
    /// Returns the name of the token.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn name(&self) -> String;

    /// Returns the symbol of the token, usually a shorter version of the name.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn symbol(&self) -> String;

    /// Returns the number of decimals used to get a user-friendly
    /// representation of values of this token.
    ///
    /// For example, if `decimals` equals `2`, a balance of `505` tokens should
    /// be displayed to a user as `5.05` (`505 / 10 ** 2`).
    ///
    /// Returns [`DEFAULT_DECIMALS`] unless configured with
    /// [`Erc20Metadata::_set_decimals`].
    ///
    /// NOTE: This information is only used for *display* purposes: in
    /// no way it affects any of the arithmetic of the contract, including
    /// [`super::super::IErc20::balance_of`] and
    /// [`super::super::IErc20::transfer`].
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn decimals(&self) -> u8;
}

#[public]
#[implements(IErc20Metadata)]
impl Erc20Metadata {
    /// Constructor.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `name` - Token name.
    /// * `symbol` - Token symbol.
    #[constructor]
    pub fn constructor(&mut self, name: String, symbol: String) {
        self.name.set_str(name);
        self.symbol.set_str(symbol);
    }
}

#[public]
impl IErc20Metadata for Erc20Metadata {
    fn name(&self) -> String {
        self.name.get_string()
    }

    fn symbol(&self) -> String {
        self.symbol.get_string()
    }

    fn decimals(&self) -> u8 {
        self.decimals.get().to::<u8>()
    }
}

impl Erc20Metadata {
    /// Sets the number of decimals reported by
    /// [`IErc20Metadata::decimals`].
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `decimals` - Number of decimals.
    pub fn _set_decimals(&mut self, decimals: u8) {
        self.decimals.set(U8::from(decimals));
    }
}
