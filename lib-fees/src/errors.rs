//! Fee Governance Errors

use lib_types::Pct;
use thiserror::Error;

/// Error during fee schedule validation or update
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeError {
    #[error("fees must not be greater than {max}: got {pct}")]
    FeeTooHigh { pct: Pct, max: Pct },

    #[error("fee change interval has not elapsed: {elapsed_secs}s of {required_secs}s")]
    CooldownNotElapsed {
        elapsed_secs: u64,
        required_secs: u64,
    },
}

/// Result type for fee operations
pub type FeeResult<T> = Result<T, FeeError>;
