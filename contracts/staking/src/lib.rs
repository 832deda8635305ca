#![no_std]

pub mod events;
pub mod guard;
pub mod rewards;

use common::{ttl, LedgerError, TokenLedgerClient};
use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, Address, Env, InvokeError, Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

// Per-user persistent storage uses tuple keys:  (prefix, user_address)
const USER_STAKE: Symbol = symbol_short!("STK");
const USER_EARNED: Symbol = symbol_short!("ERND");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    InvalidAmount = 200,
    InsufficientBalance = 201,
    InsufficientAllowance = 202,
    AmountExceedsStake = 203,
    NoDepositHistory = 204,
    NoRewardsAccrued = 205,
    Unauthorized = 206,
    Overflow = 207,
    Reentrant = 208,
    NotInitialized = 209,
    /// The token ledger failed in a way that carries no ledger error code.
    LedgerRejected = 210,
}

impl From<LedgerError> for ContractError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidAmount => ContractError::InvalidAmount,
            LedgerError::InsufficientBalance => ContractError::InsufficientBalance,
            LedgerError::InsufficientAllowance => ContractError::InsufficientAllowance,
            LedgerError::Unauthorized => ContractError::Unauthorized,
            LedgerError::Overflow => ContractError::Overflow,
        }
    }
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Construction parameters, fixed for the lifetime of the pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Token ledger holding principal and minting rewards.
    pub token: Address,
    /// Annual reward in whole percent (5 means 5% per year).
    pub reward_rate: u32,
}

/// A staker's position.
///
/// `last_updated == 0` in the value returned by `staked_balances` means
/// the account has never staked.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakeRecord {
    pub balance: i128,
    pub last_updated: u64,
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<PoolConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

fn read_record(env: &Env, staker: &Address) -> Option<StakeRecord> {
    env.storage()
        .persistent()
        .get(&(USER_STAKE, staker.clone()))
}

fn write_record(env: &Env, staker: &Address, record: &StakeRecord) {
    let key = (USER_STAKE, staker.clone());
    env.storage().persistent().set(&key, record);
    ttl::extend_persistent(env, &key);
}

fn read_earned(env: &Env, staker: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(USER_EARNED, staker.clone()))
        .unwrap_or(0)
}

fn write_earned(env: &Env, staker: &Address, amount: i128) {
    let key = (USER_EARNED, staker.clone());
    env.storage().persistent().set(&key, &amount);
    ttl::extend_persistent(env, &key);
}

fn read_total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

/// Unwrap the outcome of a `try_*` ledger call, surfacing ledger error
/// codes as the matching pool error.
fn settle<T, C>(
    outcome: Result<Result<T, C>, Result<LedgerError, InvokeError>>,
) -> Result<T, ContractError> {
    match outcome {
        Ok(Ok(value)) => Ok(value),
        Err(Ok(err)) => Err(err.into()),
        _ => Err(ContractError::LedgerRejected),
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPool;

#[contractimpl]
impl StakingPool {
    // ── Construction ────────────────────────────────────────────────────────

    /// Deploy the pool.
    ///
    /// * `token_contract` – StakeX ledger. The pool must be granted the
    ///                      minter role there before anyone can claim.
    /// * `reward_rate`    – annual reward in whole percent.
    pub fn __constructor(env: Env, token_contract: Address, reward_rate: u32) {
        let config = PoolConfig {
            token: token_contract.clone(),
            reward_rate,
        };
        env.storage().instance().set(&CONFIG, &config);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, token_contract, reward_rate);
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` tokens. The pool must hold an allowance of at least
    /// `amount` from `staker` on the ledger.
    ///
    /// Rewards are accrued on the existing principal first, so the new
    /// deposit earns nothing for time before it arrived.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        staker.require_auth();
        guard::enter(&env)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let config = load_config(&env)?;
        let ledger = TokenLedgerClient::new(&env, &config.token);
        if ledger.balance(&staker) < amount {
            return Err(ContractError::InsufficientBalance);
        }

        // 1. Accrue against the pre-deposit principal.
        let now = env.ledger().timestamp();
        let mut record = Self::accrue(&env, &staker, config.reward_rate, now)?;

        // 2. Effects.
        record.balance = record
            .balance
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        write_record(&env, &staker, &record);

        let new_total = read_total_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        // 3. Interaction: pull the deposit into the pool.
        let pool = env.current_contract_address();
        settle(ledger.try_transfer_from(&pool, &staker, &pool, &amount))?;

        guard::exit(&env);
        ttl::extend_instance(&env);

        events::publish_staked(&env, staker, amount, new_total);
        Ok(())
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Withdraw `amount` of principal back to `staker`.
    ///
    /// A zero amount is accepted and only brings the reward balance up to
    /// date.
    ///
    /// The withdrawn portion still earns rewards up to the current ledger
    /// time; the record keeps its history even when principal reaches zero.
    pub fn unstake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        staker.require_auth();
        guard::enter(&env)?;

        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let config = load_config(&env)?;
        // An account that never staked has nothing to withdraw, not even zero.
        let Some(existing) = read_record(&env, &staker) else {
            return Err(ContractError::AmountExceedsStake);
        };
        if amount > existing.balance {
            return Err(ContractError::AmountExceedsStake);
        }

        // 1. Accrue against the pre-withdrawal principal.
        let now = env.ledger().timestamp();
        let mut record = Self::accrue(&env, &staker, config.reward_rate, now)?;

        // 2. Effects.
        record.balance = record
            .balance
            .checked_sub(amount)
            .ok_or(ContractError::Overflow)?;
        write_record(&env, &staker, &record);

        let new_total = read_total_staked(&env).saturating_sub(amount);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        // 3. Interaction: return principal.
        let ledger = TokenLedgerClient::new(&env, &config.token);
        let pool = env.current_contract_address();
        settle(ledger.try_transfer(&pool, &staker, &amount))?;

        guard::exit(&env);
        ttl::extend_instance(&env);

        events::publish_unstaked(&env, staker, amount, new_total);
        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Mint every accrued reward to `staker` and return the amount paid.
    ///
    /// Fails with `NoDepositHistory` if `staker` never staked and with
    /// `NoRewardsAccrued` if nothing is owed, including a repeat claim in
    /// the same ledger second.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        staker.require_auth();
        guard::enter(&env)?;

        let config = load_config(&env)?;
        if read_record(&env, &staker).is_none() {
            return Err(ContractError::NoDepositHistory);
        }

        // 1. Sync the reward balance.
        let now = env.ledger().timestamp();
        Self::accrue(&env, &staker, config.reward_rate, now)?;

        // 2. Read and reset the user's earned balance.
        let reward = read_earned(&env, &staker);
        if reward <= 0 {
            return Err(ContractError::NoRewardsAccrued);
        }
        write_earned(&env, &staker, 0);

        // 3. Interaction: mint the payout.
        let ledger = TokenLedgerClient::new(&env, &config.token);
        let pool = env.current_contract_address();
        settle(ledger.try_mint(&pool, &staker, &reward))?;

        guard::exit(&env);
        ttl::extend_instance(&env);

        log!(&env, "rewards claimed", staker, reward);
        events::publish_reward_claimed(&env, staker, reward);
        Ok(reward)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Return the staker's principal and last accrual time.
    pub fn staked_balances(env: Env, staker: Address) -> StakeRecord {
        read_record(&env, &staker).unwrap_or_default()
    }

    /// Return rewards accrued so far but not yet claimed.
    ///
    /// Only moves when the staker interacts with the pool; see
    /// `pending_rewards` for a figure projected to the current time.
    pub fn reward_balances(env: Env, staker: Address) -> i128 {
        read_earned(&env, &staker)
    }

    /// Return the stored reward plus what the current principal has earned
    /// since the last accrual, without mutating state.
    pub fn pending_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = load_config(&env)?;
        let stored = read_earned(&env, &staker);
        let Some(record) = read_record(&env, &staker) else {
            return Ok(stored);
        };

        let elapsed = env.ledger().timestamp().saturating_sub(record.last_updated);
        rewards::projected(stored, record.balance, config.reward_rate, elapsed)
            .ok_or(ContractError::Overflow)
    }

    /// Return the annual reward rate in whole percent.
    pub fn reward_rate(env: Env) -> Result<u32, ContractError> {
        load_config(&env).map(|config| config.reward_rate)
    }

    /// Return the token ledger this pool stakes and mints.
    pub fn token_contract(env: Env) -> Result<Address, ContractError> {
        load_config(&env).map(|config| config.token)
    }

    /// Return the sum of all currently staked principal.
    pub fn total_staked(env: Env) -> i128 {
        read_total_staked(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Move everything `staker` has earned since its last update into its
    /// reward balance and stamp the record with `now`.
    ///
    /// A staker without a record gets a fresh, unsaved one; the caller
    /// decides whether it is persisted. Calling this twice at the same `now`
    /// accrues nothing the second time.
    fn accrue(
        env: &Env,
        staker: &Address,
        reward_rate: u32,
        now: u64,
    ) -> Result<StakeRecord, ContractError> {
        let Some(mut record) = read_record(env, staker) else {
            return Ok(StakeRecord {
                balance: 0,
                last_updated: now,
            });
        };

        let elapsed = now.saturating_sub(record.last_updated);
        let accrued = rewards::accrued(record.balance, reward_rate, elapsed)
            .ok_or(ContractError::Overflow)?;

        if accrued > 0 {
            let earned = read_earned(env, staker)
                .checked_add(accrued)
                .ok_or(ContractError::Overflow)?;
            write_earned(env, staker, earned);
            log!(env, "accrued", staker.clone(), accrued, elapsed);
        }

        record.last_updated = record.last_updated.max(now);
        write_record(env, staker, &record);
        Ok(record)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
