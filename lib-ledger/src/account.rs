//! Per-Account State
//!
//! Accounts spring into existence on first reference and are never deleted;
//! a zero balance is a valid terminal state.

use serde::{Deserialize, Serialize};

use lib_types::Amount;

use crate::guard::SpendWindow;

/// State of a single ledger account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Reflection-space holding; authoritative while included in rewards
    pub r_owned: Amount,
    /// Token-space holding; authoritative while excluded from rewards.
    /// Mirrors transfer deltas either way so the pool aggregates stay
    /// consistent.
    pub t_owned: Amount,
    /// Reward exclusion flag: balance reads bypass the reflection factor
    pub excluded_from_reward: bool,
    /// Fee exclusion flag: transfers touching this account levy no fee
    pub excluded_from_fee: bool,
    /// Anti-dump window; `None` until the first guarded outgoing transfer
    pub window: Option<SpendWindow>,
}
