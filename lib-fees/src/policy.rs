//! Fee Governance Policy
//!
//! Stateful wrapper around [`FeeSchedule`] enforcing the update rules:
//! per-rate caps, and the asymmetric change cooldown. Decreasing (or holding)
//! every rate is always allowed; raising any rate requires the cooldown to
//! have elapsed since the last successful change. The change timestamp
//! advances on every successful update, decreases included.

use serde::{Deserialize, Serialize};

use lib_types::Timestamp;

use crate::errors::{FeeError, FeeResult};
use crate::schedule::FeeSchedule;

/// Minimum seconds between fee increases (180 days)
pub const FEE_CHANGE_COOLDOWN_SECS: u64 = 180 * 24 * 60 * 60;

/// Fee schedule plus its governance bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
    schedule: FeeSchedule,
    last_changed_at: Timestamp,
}

impl FeePolicy {
    /// Genesis policy: all rates zero, change clock at the epoch so the
    /// first increase is never cooldown-gated
    pub fn new() -> Self {
        Self {
            schedule: FeeSchedule::zero(),
            last_changed_at: 0,
        }
    }

    /// The active schedule
    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Timestamp of the last successful update
    pub fn last_changed_at(&self) -> Timestamp {
        self.last_changed_at
    }

    /// Apply a governance update to the schedule
    ///
    /// Validation order: per-rate caps first, then the cooldown rule, which
    /// only applies when some rate increases.
    pub fn update(&mut self, proposed: FeeSchedule, now: Timestamp) -> FeeResult<()> {
        proposed.validate()?;

        if !proposed.is_non_increase_of(&self.schedule) {
            let elapsed = now.saturating_sub(self.last_changed_at);
            if elapsed < FEE_CHANGE_COOLDOWN_SECS {
                return Err(FeeError::CooldownNotElapsed {
                    elapsed_secs: elapsed,
                    required_secs: FEE_CHANGE_COOLDOWN_SECS,
                });
            }
        }

        self.schedule = proposed;
        self.last_changed_at = now;
        Ok(())
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Far past the cooldown measured from the epoch.
    const T0: Timestamp = 20_000_000;

    #[test]
    fn test_first_increase_allowed() {
        let mut policy = FeePolicy::new();
        assert!(policy.update(FeeSchedule::new(4, 5, 2), T0).is_ok());
        assert_eq!(policy.schedule(), &FeeSchedule::new(4, 5, 2));
        assert_eq!(policy.last_changed_at(), T0);
    }

    #[test]
    fn test_increase_blocked_within_cooldown() {
        let mut policy = FeePolicy::new();
        policy.update(FeeSchedule::new(4, 5, 2), T0).unwrap();

        let result = policy.update(FeeSchedule::new(5, 5, 2), T0 + 100);
        assert_eq!(
            result,
            Err(FeeError::CooldownNotElapsed {
                elapsed_secs: 100,
                required_secs: FEE_CHANGE_COOLDOWN_SECS,
            })
        );
        // rejected update left the schedule alone
        assert_eq!(policy.schedule(), &FeeSchedule::new(4, 5, 2));
    }

    #[test]
    fn test_increase_allowed_after_cooldown() {
        let mut policy = FeePolicy::new();
        policy.update(FeeSchedule::new(4, 5, 2), T0).unwrap();

        let later = T0 + FEE_CHANGE_COOLDOWN_SECS;
        assert!(policy.update(FeeSchedule::new(5, 5, 2), later).is_ok());
    }

    #[test]
    fn test_non_increase_bypasses_cooldown() {
        let mut policy = FeePolicy::new();
        policy.update(FeeSchedule::new(6, 6, 6), T0).unwrap();

        assert!(policy.update(FeeSchedule::new(4, 4, 4), T0 + 1).is_ok());
        assert!(policy.update(FeeSchedule::new(1, 1, 1), T0 + 2).is_ok());
        // equality is a non-increase
        assert!(policy.update(FeeSchedule::new(1, 1, 1), T0 + 3).is_ok());
    }

    #[test]
    fn test_decrease_advances_change_clock() {
        let mut policy = FeePolicy::new();
        policy.update(FeeSchedule::new(6, 6, 6), T0).unwrap();
        policy.update(FeeSchedule::new(1, 1, 1), T0 + 10).unwrap();
        assert_eq!(policy.last_changed_at(), T0 + 10);

        // the decrease reset the cooldown, so a bump right after fails
        let result = policy.update(FeeSchedule::new(2, 2, 2), T0 + 20);
        assert!(matches!(result, Err(FeeError::CooldownNotElapsed { .. })));
    }

    #[test]
    fn test_cap_checked_before_cooldown() {
        let mut policy = FeePolicy::new();
        policy.update(FeeSchedule::new(4, 5, 2), T0).unwrap();

        // over-cap inside the cooldown window still reports FeeTooHigh
        let result = policy.update(FeeSchedule::new(7, 5, 2), T0 + 1);
        assert_eq!(result, Err(FeeError::FeeTooHigh { pct: 7, max: 6 }));
    }
}
