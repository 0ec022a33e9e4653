//! Ledger primitives.
//! Stable, behavior-free, serialization-stable.
//!
//! Rule: No String identifiers in ledger state. Ever.

pub mod errors;
pub mod primitives;

pub use errors::AddressError;
pub use primitives::{Address, Amount, Pct, Timestamp};
