//! Cross-contract surface of the StakeX token ledger.
//!
//! The staking pool never links against the token crate; it talks to the
//! ledger through the client generated from [`TokenLedgerInterface`] and
//! decodes failures as [`LedgerError`].

use soroban_sdk::{contractclient, contracterror, Address, Env};

use crate::CommonError;

/// Error codes returned by the token ledger.
///
/// Shared here so callers can match on them after a `try_*` invocation.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LedgerError {
    /// Negative amount passed to a transfer, approval or mint.
    InvalidAmount = 100,
    /// Debited account holds less than the requested amount.
    InsufficientBalance = 101,
    /// Spender's approved allowance is below the requested amount.
    InsufficientAllowance = 102,
    /// Caller lacks the role required by a gated entry point.
    Unauthorized = 103,
    /// A balance or the total supply would wrap.
    Overflow = 104,
}

/// Ledger operations consumed by the staking pool.
#[contractclient(name = "TokenLedgerClient")]
pub trait TokenLedgerInterface {
    fn balance(env: Env, id: Address) -> i128;

    fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), LedgerError>;

    fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), LedgerError>;

    fn mint(env: Env, minter: Address, to: Address, amount: i128) -> Result<(), LedgerError>;
}

impl From<CommonError> for LedgerError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::AccessDenied => LedgerError::Unauthorized,
        }
    }
}
