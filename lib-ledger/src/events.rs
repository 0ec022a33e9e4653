//! Ledger Notifications
//!
//! Observable records attached to successful commits. The ledger models no
//! event transport: each mutating operation returns its notification inside
//! the `Ok` payload, and nothing may re-enter the mutation path from it.

use serde::{Deserialize, Serialize};

use lib_types::{Address, Amount};

/// Emitted on every successful transfer
///
/// `value` is the gross input amount, not the post-fee amount received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub value: Amount,
}

/// Emitted on every successful approval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    pub owner: Address,
    pub spender: Address,
    pub value: Amount,
}
