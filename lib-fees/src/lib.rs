//! Transfer Fee Model
//!
//! Deterministic fee computation and fee-governance rules for the ledger.
//!
//! # Design Principles
//!
//! 1. **Pure functions** - No side effects outside [`FeePolicy`] itself
//! 2. **Deterministic** - Same inputs produce identical outputs across all platforms
//! 3. **No floats** - All arithmetic uses integer math
//! 4. **Overflow-safe** - Uses checked/saturating arithmetic
//!
//! # Key Types
//!
//! - [`FeeSchedule`]: The three capped transfer-fee rates
//! - [`FeePolicy`]: Governance state machine around the schedule (rate caps,
//!   asymmetric change cooldown)
//!
//! # Governance Rules
//!
//! Every rate is independently capped at [`MAX_FEE_PCT`]. A schedule update
//! where no rate increases applies immediately; an update raising any rate is
//! allowed only after [`FEE_CHANGE_COOLDOWN_SECS`] since the last change.

pub mod errors;
pub mod policy;
pub mod schedule;

pub use errors::{FeeError, FeeResult};
pub use policy::{FeePolicy, FEE_CHANGE_COOLDOWN_SECS};
pub use schedule::{FeeSchedule, MAX_FEE_PCT};
