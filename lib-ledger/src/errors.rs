//! Ledger Errors

use lib_fees::FeeError;
use lib_types::{Address, Amount};
use thiserror::Error;

/// Error during ledger operations
///
/// Every failure is synchronous and aborts the whole operation with zero
/// state mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("transfer amount must be greater than zero")]
    InvalidAmount,

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },

    #[error("caller is not the owner: {caller}")]
    Unauthorized { caller: Address },

    #[error("daily spend limit exceeded: attempted {attempted}, cap {cap}")]
    DailyLimitExceeded { attempted: Amount, cap: Amount },

    #[error("account is already excluded from rewards: {0}")]
    AlreadyExcluded(Address),

    #[error("account is not excluded from rewards: {0}")]
    NotExcluded(Address),

    #[error("arithmetic overflow")]
    Overflow,

    #[error(transparent)]
    Fee(#[from] FeeError),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
