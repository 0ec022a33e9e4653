//! Ledger Orchestration
//!
//! The [`Ledger`] owns every piece of shared state (balances, allowances,
//! fee policy, reflection pool, anti-dump windows) and composes the policy
//! components on each transfer path.
//!
//! # Enforcement
//!
//! Every transfer enforces, in order:
//! - **Amount**: zero transfers are rejected
//! - **Balance**: the sender's effective balance covers the gross amount
//! - **Fee**: computed from the governed schedule unless either party is
//!   fee-excluded
//! - **Anti-dump**: the gross amount charges the sender's 24h window
//!   (the owner is exempt)
//!
//! All checks run before any write; a failure leaves zero visible mutation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use lib_fees::{FeePolicy, FeeSchedule};
use lib_types::{Address, Amount, Timestamp};

use crate::account::Account;
use crate::errors::{LedgerError, LedgerResult};
use crate::events::{Approval, Transfer};
use crate::guard::charge_window;
use crate::reflection::ReflectionPool;

/// Largest admissible genesis supply
///
/// Keeps the genesis reflection rate at or above 2^32, which bounds the
/// token-space truncation of any single balance read below one unit.
pub const MAX_GENESIS_SUPPLY: Amount = 1 << 96;

/// The fixed-supply token ledger with governed transfer policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    owner: Address,
    router: Address,
    fees: FeePolicy,
    pool: ReflectionPool,
    accounts: HashMap<Address, Account>,
    allowances: HashMap<Address, HashMap<Address, Amount>>,
}

impl Ledger {
    /// Create the ledger, minting the whole supply to `creator`
    ///
    /// The creator becomes the owner and is fee-excluded from genesis.
    /// Fails with `InvalidAmount` for a zero supply or one beyond
    /// [`MAX_GENESIS_SUPPLY`].
    pub fn new(creator: Address, total_supply: Amount) -> LedgerResult<Self> {
        if total_supply == 0 || total_supply > MAX_GENESIS_SUPPLY {
            return Err(LedgerError::InvalidAmount);
        }

        let pool = ReflectionPool::new(total_supply);
        let mut accounts = HashMap::new();
        accounts.insert(
            creator,
            Account {
                r_owned: pool.r_total(),
                excluded_from_fee: true,
                ..Account::default()
            },
        );

        Ok(Self {
            owner: creator,
            router: Address::zero(),
            fees: FeePolicy::new(),
            pool,
            accounts,
            allowances: HashMap::new(),
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The fixed total supply
    pub fn total_supply(&self) -> Amount {
        self.pool.t_total()
    }

    /// The governing owner
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The stored router address (opaque; no behavior attached)
    pub fn router(&self) -> Address {
        self.router
    }

    /// The active fee policy
    pub fn fee_policy(&self) -> &FeePolicy {
        &self.fees
    }

    /// Effective balance of an account
    ///
    /// Reflection-scaled for included accounts, direct for reward-excluded
    /// ones. Unknown accounts hold zero.
    pub fn balance_of(&self, account: &Address) -> Amount {
        match self.accounts.get(account) {
            None => 0,
            Some(acct) if acct.excluded_from_reward => acct.t_owned,
            Some(acct) => acct.r_owned / self.pool.rate(),
        }
    }

    /// Remaining allowance for a (owner, spender) pair; 0 when unset
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|per_spender| per_spender.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Whether an account is excluded from reward reflection
    pub fn is_excluded_from_reward(&self, account: &Address) -> bool {
        self.accounts
            .get(account)
            .map(|a| a.excluded_from_reward)
            .unwrap_or(false)
    }

    /// Whether an account is excluded from transfer fees
    pub fn is_excluded_from_fee(&self, account: &Address) -> bool {
        self.accounts
            .get(account)
            .map(|a| a.excluded_from_fee)
            .unwrap_or(false)
    }

    // =========================================================================
    // Transfers
    // =========================================================================

    /// Move `amount` from the caller to `to`
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
        now: Timestamp,
    ) -> LedgerResult<Transfer> {
        self.apply_transfer(caller, to, amount, now)
    }

    /// Move `amount` from `from` to `to`, spending the caller's allowance
    ///
    /// The allowance must cover the gross amount before the pipeline runs;
    /// on success it is decremented by exactly that amount.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
        now: Timestamp,
    ) -> LedgerResult<Transfer> {
        let have = self.allowance(&from, &caller);
        if have < amount {
            return Err(LedgerError::InsufficientAllowance { have, need: amount });
        }

        let event = self.apply_transfer(from, to, amount, now)?;

        self.allowances
            .entry(from)
            .or_default()
            .insert(caller, have - amount);
        Ok(event)
    }

    /// Set the caller's allowance for `spender` to `amount` (absolute set)
    pub fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> Approval {
        self.allowances
            .entry(caller)
            .or_default()
            .insert(spender, amount);

        debug!(owner = %caller, %spender, amount, "approval set");
        Approval {
            owner: caller,
            spender,
            value: amount,
        }
    }

    /// The shared transfer pipeline
    ///
    /// Checks run front-to-back before any write; the writes themselves are
    /// infallible, so a failure anywhere leaves the ledger untouched.
    fn apply_transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
        now: Timestamp,
    ) -> LedgerResult<Transfer> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let from_balance = self.balance_of(&from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }

        let fee = if self.is_excluded_from_fee(&from) || self.is_excluded_from_fee(&to) {
            0
        } else {
            self.fees.schedule().levy(amount)
        };

        // The owner is exempt from the anti-dump guard; everyone else
        // charges the gross amount against their window.
        let window = if from == self.owner {
            None
        } else {
            let current = self.accounts.get(&from).and_then(|a| a.window.as_ref());
            Some(charge_window(current, now, from_balance, amount)?)
        };

        // Convert with the rate captured before distribution so every leg
        // of this transfer shares one scaling factor.
        let rate = self.pool.rate();
        let r_amount = amount.checked_mul(rate).ok_or(LedgerError::Overflow)?;
        let net = amount - fee;
        let r_net = net.checked_mul(rate).ok_or(LedgerError::Overflow)?;
        let r_fee = r_amount - r_net;

        let from_excluded = self.is_excluded_from_reward(&from);
        let to_excluded = self.is_excluded_from_reward(&to);

        // Commit: debit, credit, then distribute the fee.
        let r_debit = {
            let acct = self.accounts.entry(from).or_default();
            let r_debit = acct.r_owned.min(r_amount);
            acct.r_owned -= r_debit;
            if from_excluded {
                acct.t_owned = acct.t_owned.saturating_sub(amount);
            }
            if let Some(w) = window {
                acct.window = Some(w);
            }
            r_debit
        };
        if from_excluded {
            self.pool.debit_sequestered(r_debit, amount);
        }

        {
            let acct = self.accounts.entry(to).or_default();
            acct.r_owned = acct.r_owned.saturating_add(r_net);
            if to_excluded {
                acct.t_owned = acct.t_owned.saturating_add(net);
            }
        }
        if to_excluded {
            self.pool.credit_sequestered(r_net, net);
        }

        if r_fee > 0 {
            self.pool.distribute(r_fee);
        }

        debug!(%from, %to, amount, fee, "transfer committed");
        Ok(Transfer {
            from,
            to,
            value: amount,
        })
    }

    // =========================================================================
    // Governance
    // =========================================================================

    /// Update the fee schedule (owner only)
    pub fn update_fees(
        &mut self,
        caller: Address,
        schedule: FeeSchedule,
        now: Timestamp,
    ) -> LedgerResult<()> {
        self.require_owner(&caller)?;
        self.fees.update(schedule, now)?;

        info!(
            reward_pct = schedule.reward_pct,
            liquidity_pct = schedule.liquidity_pct,
            treasury_pct = schedule.treasury_pct,
            "fee schedule updated"
        );
        Ok(())
    }

    /// Exclude an account from reward reflection (owner only)
    ///
    /// Pins the account's balance at its current effective value; further
    /// reflections pass it by.
    pub fn exclude_from_reward(&mut self, caller: Address, account: Address) -> LedgerResult<()> {
        self.require_owner(&caller)?;

        let rate = self.pool.rate();
        if self.is_excluded_from_reward(&account) {
            return Err(LedgerError::AlreadyExcluded(account));
        }

        let (r, t) = {
            let acct = self.accounts.entry(account).or_default();
            let t = acct.r_owned / rate;
            acct.t_owned = t;
            acct.excluded_from_reward = true;
            (acct.r_owned, t)
        };
        self.pool.sequester(r, t);

        info!(%account, balance = t, "excluded from rewards");
        Ok(())
    }

    /// Return a reward-excluded account to reflected accounting (owner only)
    ///
    /// Re-enters at the current effective balance; no other account's
    /// balance moves.
    pub fn include_in_reward(&mut self, caller: Address, account: Address) -> LedgerResult<()> {
        self.require_owner(&caller)?;

        let rate = self.pool.rate();
        let (mirror_r, t) = match self.accounts.get(&account) {
            Some(acct) if acct.excluded_from_reward => (acct.r_owned, acct.t_owned),
            _ => return Err(LedgerError::NotExcluded(account)),
        };
        let new_r = t.checked_mul(rate).ok_or(LedgerError::Overflow)?;

        {
            let acct = self.accounts.entry(account).or_default();
            acct.r_owned = new_r;
            acct.t_owned = 0;
            acct.excluded_from_reward = false;
        }
        self.pool.reinstate(mirror_r, t, new_r);

        info!(%account, balance = t, "included in rewards");
        Ok(())
    }

    /// Exclude an account from transfer fees (owner only)
    pub fn exclude_from_fee(&mut self, caller: Address, account: Address) -> LedgerResult<()> {
        self.require_owner(&caller)?;
        self.accounts.entry(account).or_default().excluded_from_fee = true;

        info!(%account, "excluded from fees");
        Ok(())
    }

    /// Return an account to fee-paying status (owner only)
    pub fn include_in_fee(&mut self, caller: Address, account: Address) -> LedgerResult<()> {
        self.require_owner(&caller)?;
        self.accounts.entry(account).or_default().excluded_from_fee = false;

        info!(%account, "included in fees");
        Ok(())
    }

    /// Store a new router address (owner only; opaque to the ledger)
    pub fn change_router(&mut self, caller: Address, router: Address) -> LedgerResult<()> {
        self.require_owner(&caller)?;
        self.router = router;

        info!(%router, "router changed");
        Ok(())
    }

    fn require_owner(&self, caller: &Address) -> LedgerResult<()> {
        if *caller != self.owner {
            return Err(LedgerError::Unauthorized { caller: *caller });
        }
        Ok(())
    }
}
