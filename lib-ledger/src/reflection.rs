//! Reward Reflection Pool
//!
//! Global bookkeeping for the O(1) fee redistribution scheme. Every included
//! account stores its holding in reflection space (`r`); the pool supplies
//! the scaling factor that converts it to token space (`t`) on read:
//!
//! ```text
//! rate      = r_supply / t_supply
//! effective = r_owned / rate
//! ```
//!
//! where `r_supply`/`t_supply` exclude the sequestered (reward-excluded)
//! positions. Collecting a fee shrinks `r_total`, lowering the rate and
//! raising every included effective balance proportionally without touching
//! a single account record.
//!
//! # Invariants
//!
//! - `r_total` starts at the largest multiple of `t_total` below
//!   `Amount::MAX`, so the genesis rate is exact and fee-free conversions
//!   round-trip without loss.
//! - `r_excluded <= r_total` and `t_excluded <= t_total` at all times.
//! - Token-space reads truncate; the precision of reflection space keeps the
//!   aggregate truncation below one unit per account.

use serde::{Deserialize, Serialize};

use lib_types::Amount;

/// Reflection-space supply state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionPool {
    /// Fixed token supply, set at genesis
    t_total: Amount,
    /// Reflected supply; shrinks as fees are distributed
    r_total: Amount,
    /// Token-space sum of reward-excluded holdings
    t_excluded: Amount,
    /// Reflection-space sum of reward-excluded holdings
    r_excluded: Amount,
}

impl ReflectionPool {
    /// Create the pool for a fixed supply
    ///
    /// Caller guarantees `total_supply > 0`.
    pub fn new(total_supply: Amount) -> Self {
        let r_total = Amount::MAX - (Amount::MAX % total_supply);
        Self {
            t_total: total_supply,
            r_total,
            t_excluded: 0,
            r_excluded: 0,
        }
    }

    /// Fixed token supply
    pub fn t_total(&self) -> Amount {
        self.t_total
    }

    /// Current reflected supply
    pub fn r_total(&self) -> Amount {
        self.r_total
    }

    /// Current reflection rate (r units per token)
    ///
    /// Falls back to the global ratio when every holder is excluded, which
    /// keeps the rate nonzero for conversions of newly included positions.
    pub fn rate(&self) -> Amount {
        let r_supply = self.r_total.saturating_sub(self.r_excluded);
        let t_supply = self.t_total.saturating_sub(self.t_excluded);
        if t_supply == 0 || r_supply < t_supply {
            return self.r_total / self.t_total;
        }
        r_supply / t_supply
    }

    /// Distribute a collected fee (in reflection space) to included holders
    pub fn distribute(&mut self, r_fee: Amount) {
        self.r_total = self.r_total.saturating_sub(r_fee);
    }

    /// Move a position out of reflected accounting
    pub fn sequester(&mut self, r: Amount, t: Amount) {
        self.r_excluded = self.r_excluded.saturating_add(r);
        self.t_excluded = self.t_excluded.saturating_add(t);
    }

    /// Return a position to reflected accounting
    ///
    /// `mirror_r` is the reflection-space value tracked while excluded;
    /// `new_r` is the re-derived holding at the current rate. `r_total` is
    /// adjusted by the difference so the rate observed by every other
    /// account is unchanged by the toggle.
    pub fn reinstate(&mut self, mirror_r: Amount, t: Amount, new_r: Amount) {
        self.r_excluded = self.r_excluded.saturating_sub(mirror_r);
        self.t_excluded = self.t_excluded.saturating_sub(t);
        self.r_total = self
            .r_total
            .saturating_sub(mirror_r)
            .saturating_add(new_r);
    }

    /// Record an outgoing transfer from a sequestered position
    pub fn debit_sequestered(&mut self, r: Amount, t: Amount) {
        self.r_excluded = self.r_excluded.saturating_sub(r);
        self.t_excluded = self.t_excluded.saturating_sub(t);
    }

    /// Record an incoming transfer to a sequestered position
    pub fn credit_sequestered(&mut self, r: Amount, t: Amount) {
        self.r_excluded = self.r_excluded.saturating_add(r);
        self.t_excluded = self.t_excluded.saturating_add(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPLY: Amount = 1_000;

    #[test]
    fn test_genesis_rate_is_exact() {
        let pool = ReflectionPool::new(SUPPLY);
        assert_eq!(pool.r_total() % SUPPLY, 0);
        assert_eq!(pool.rate(), pool.r_total() / SUPPLY);
    }

    #[test]
    fn test_conversion_round_trips_at_genesis() {
        let pool = ReflectionPool::new(SUPPLY);
        let rate = pool.rate();
        for t in [1, 42, 500, SUPPLY] {
            assert_eq!((t * rate) / rate, t);
        }
    }

    #[test]
    fn test_distribution_raises_included_balances() {
        let mut pool = ReflectionPool::new(SUPPLY);
        let rate0 = pool.rate();

        // two holders, 600 and 400 tokens; a levy of 100 tokens reflects
        let r_a = 600 * rate0;
        let r_b = 400 * rate0;
        pool.distribute(100 * rate0);

        let rate1 = pool.rate();
        assert!(rate1 < rate0);
        assert_eq!(r_a / rate1, 666);
        assert_eq!(r_b / rate1, 444);
    }

    #[test]
    fn test_sequester_leaves_rate_unchanged() {
        let mut pool = ReflectionPool::new(SUPPLY);
        let rate0 = pool.rate();

        pool.sequester(600 * rate0, 600);
        assert_eq!(pool.rate(), rate0);
    }

    #[test]
    fn test_reinstate_restores_rate() {
        let mut pool = ReflectionPool::new(SUPPLY);
        let rate0 = pool.rate();

        pool.sequester(600 * rate0, 600);
        pool.reinstate(600 * rate0, 600, 600 * pool.rate());
        assert_eq!(pool.rate(), rate0);
        assert_eq!(pool.r_total(), SUPPLY * rate0);
    }

    #[test]
    fn test_rate_fallback_when_all_excluded() {
        let mut pool = ReflectionPool::new(SUPPLY);
        let rate0 = pool.rate();

        pool.sequester(pool.r_total(), SUPPLY);
        assert_eq!(pool.rate(), rate0);
    }
}
