//! Anti-Dump Guard
//!
//! Rolling 24-hour outflow cap per sending account. The window is purely
//! reactive: it is (re)opened lazily by the transfer that observes it
//! expired, never by a timer. The cap is snapshotted at window open and is
//! stable for the window's lifetime, so a sequence of transfers inside one
//! window is judged against the ceiling set when it opened.

use serde::{Deserialize, Serialize};

use lib_types::{Amount, Timestamp};

use crate::errors::{LedgerError, LedgerResult};

/// Window length in seconds (24 hours)
pub const DUMP_WINDOW_SECS: u64 = 24 * 60 * 60;

/// Share of the balance spendable per window, in percent
pub const DUMP_CAP_PCT: Amount = 30;

/// Per-account anti-dump window record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendWindow {
    /// When this window opened
    pub started_at: Timestamp,
    /// Cap snapshot: 30% of the account's effective balance at open
    pub cap: Amount,
    /// Cumulative outflow committed since `started_at`
    pub spent: Amount,
}

impl SpendWindow {
    /// Open a fresh window against the given balance
    pub fn open(now: Timestamp, balance: Amount) -> Self {
        Self {
            started_at: now,
            cap: balance.saturating_mul(DUMP_CAP_PCT) / 100,
            spent: 0,
        }
    }

    /// Whether a full window length has passed since open
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.saturating_sub(self.started_at) >= DUMP_WINDOW_SECS
    }
}

/// Charge `amount` against the account's window, returning the window state
/// to commit
///
/// Rolls the window over if expired (or absent), snapshotting the cap from
/// `balance` at this instant. A rejection retains nothing: the caller only
/// stores the returned window on success, so a failed transfer does not even
/// keep the rollover.
pub fn charge_window(
    current: Option<&SpendWindow>,
    now: Timestamp,
    balance: Amount,
    amount: Amount,
) -> LedgerResult<SpendWindow> {
    let mut window = match current {
        Some(w) if !w.is_expired(now) => *w,
        _ => SpendWindow::open(now, balance),
    };

    let attempted = window
        .spent
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;
    if attempted > window.cap {
        return Err(LedgerError::DailyLimitExceeded {
            attempted,
            cap: window.cap,
        });
    }

    window.spent = attempted;
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Timestamp = 1_000_000;

    #[test]
    fn test_cap_is_thirty_percent() {
        let window = SpendWindow::open(T, 100);
        assert_eq!(window.cap, 30);
        assert_eq!(window.spent, 0);
    }

    #[test]
    fn test_spend_up_to_cap() {
        let window = charge_window(None, T, 100, 30).unwrap();
        assert_eq!(window.spent, 30);

        // cap is inclusive, the next unit is not
        let result = charge_window(Some(&window), T + 10, 70, 1);
        assert_eq!(
            result,
            Err(LedgerError::DailyLimitExceeded {
                attempted: 31,
                cap: 30
            })
        );
    }

    #[test]
    fn test_cumulative_spend_within_window() {
        let window = charge_window(None, T, 100, 10).unwrap();
        let window = charge_window(Some(&window), T + 100, 90, 10).unwrap();
        let window = charge_window(Some(&window), T + 200, 80, 10).unwrap();
        assert_eq!(window.spent, 30);

        let result = charge_window(Some(&window), T + 300, 70, 10);
        assert!(matches!(
            result,
            Err(LedgerError::DailyLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_cap_snapshot_stable_within_window() {
        // balance shrinks mid-window but the cap does not move
        let window = charge_window(None, T, 100, 20).unwrap();
        assert_eq!(window.cap, 30);

        let window = charge_window(Some(&window), T + 50, 80, 10).unwrap();
        assert_eq!(window.cap, 30);
        assert_eq!(window.spent, 30);
    }

    #[test]
    fn test_window_rollover_resnapshots_cap() {
        let window = charge_window(None, T, 100, 30).unwrap();

        // a day later the window reopens against the current balance
        let rolled = charge_window(Some(&window), T + DUMP_WINDOW_SECS, 70, 21).unwrap();
        assert_eq!(rolled.started_at, T + DUMP_WINDOW_SECS);
        assert_eq!(rolled.cap, 21);
        assert_eq!(rolled.spent, 21);
    }

    #[test]
    fn test_rejection_does_not_roll_window() {
        let window = charge_window(None, T, 100, 30).unwrap();

        // over-cap attempt right after rollover: the caller keeps the old
        // window because charge_window returned nothing to commit
        let result = charge_window(Some(&window), T + DUMP_WINDOW_SECS, 70, 30);
        assert_eq!(
            result,
            Err(LedgerError::DailyLimitExceeded {
                attempted: 30,
                cap: 21
            })
        );
        assert_eq!(window.started_at, T);
    }
}
