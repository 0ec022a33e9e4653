//! Primitive Type Errors

use thiserror::Error;

/// Error parsing an [`crate::Address`] from its hex form
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid hex encoding")]
    InvalidHex,

    #[error("expected 32 bytes, got {0}")]
    BadLength(usize),
}
