//! Fee Schedule
//!
//! Three independent transfer-fee rates, each a whole-number percentage
//! capped at [`MAX_FEE_PCT`]. The levy on a transfer is the combined rate
//! applied to the gross amount.

use serde::{Deserialize, Serialize};

use lib_types::{Amount, Pct};

use crate::errors::{FeeError, FeeResult};

/// Maximum value for any single fee rate (percent)
pub const MAX_FEE_PCT: Pct = 6;

/// Transfer fee schedule
///
/// Rates are named for their intended destination bucket; routing beyond the
/// holder-reward pool is the caller's concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Holder reward rate in percent (0-6)
    pub reward_pct: Pct,
    /// Liquidity rate in percent (0-6)
    pub liquidity_pct: Pct,
    /// Treasury rate in percent (0-6)
    pub treasury_pct: Pct,
}

impl FeeSchedule {
    /// Create a schedule with no fees
    pub const fn zero() -> Self {
        Self {
            reward_pct: 0,
            liquidity_pct: 0,
            treasury_pct: 0,
        }
    }

    /// Create a schedule from the three rates, unvalidated
    pub const fn new(reward_pct: Pct, liquidity_pct: Pct, treasury_pct: Pct) -> Self {
        Self {
            reward_pct,
            liquidity_pct,
            treasury_pct,
        }
    }

    /// Combined rate in percent
    pub fn total_pct(&self) -> u32 {
        self.reward_pct as u32 + self.liquidity_pct as u32 + self.treasury_pct as u32
    }

    /// Whether the schedule levies nothing
    pub fn is_zero(&self) -> bool {
        self.total_pct() == 0
    }

    /// Compute the levy for a gross transfer amount
    ///
    /// Formula: `amount * total_pct / 100`, truncating.
    pub fn levy(&self, amount: Amount) -> Amount {
        let total = self.total_pct();
        if total == 0 {
            return 0;
        }
        amount.saturating_mul(total as Amount) / 100
    }

    /// Validate every rate against [`MAX_FEE_PCT`]
    ///
    /// Rates are checked independently, in declaration order, before any
    /// other update rule is considered.
    pub fn validate(&self) -> FeeResult<()> {
        for pct in [self.reward_pct, self.liquidity_pct, self.treasury_pct] {
            if pct > MAX_FEE_PCT {
                return Err(FeeError::FeeTooHigh {
                    pct,
                    max: MAX_FEE_PCT,
                });
            }
        }
        Ok(())
    }

    /// Whether this schedule raises no rate relative to `current`
    pub fn is_non_increase_of(&self, current: &FeeSchedule) -> bool {
        self.reward_pct <= current.reward_pct
            && self.liquidity_pct <= current.liquidity_pct
            && self.treasury_pct <= current.treasury_pct
    }
}
