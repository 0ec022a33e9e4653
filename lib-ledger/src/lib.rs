//! Governed Reflection Token Ledger
//!
//! A fixed-supply fungible-value ledger with three transfer policies composed
//! into one atomic state transition:
//!
//! - a governed fee schedule (capped rates, asymmetric change cooldown),
//! - a per-account rolling 24h outflow cap (anti-dump),
//! - an opt-out reward reflection scheme redistributing collected fees to
//!   holders through a global scaling factor.
//!
//! # Key Types
//!
//! - [`Ledger`]: owns all state and orchestrates every operation
//! - [`ReflectionPool`]: reflection-space supply bookkeeping
//! - [`SpendWindow`]: per-account anti-dump window record
//! - [`LedgerError`]: the complete failure taxonomy
//!
//! # Execution Model
//!
//! Single-writer, serialized: one operation runs to completion before the
//! next begins. Every public operation either fully commits or fully aborts
//! with no visible partial effect. Time enters only as the `now` argument of
//! time-sensitive operations; nothing here blocks, schedules, or re-enters.

pub mod account;
pub mod errors;
pub mod events;
pub mod guard;
pub mod ledger;
pub mod reflection;

pub use account::Account;
pub use errors::{LedgerError, LedgerResult};
pub use events::{Approval, Transfer};
pub use guard::{SpendWindow, DUMP_CAP_PCT, DUMP_WINDOW_SECS};
pub use ledger::{Ledger, MAX_GENESIS_SUPPLY};
pub use reflection::ReflectionPool;
