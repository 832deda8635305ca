#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Model-based tests over random sequences of pool operations.
//!
//! A plain-Rust model replays every operation, including the rollback of
//! failed ones, and the contract must agree with it after each step.
//!
//! Invariants tested:
//! - Principal equals net stake minus unstake and never goes negative
//! - Reward balances match the model exactly, dust included
//! - Sum of all ledger balances equals total supply (conservation)
//! - The pool's ledger balance always equals `total_staked`
//! - Every rejected operation reports the expected error

use proptest::prelude::*;
use soroban_sdk::Address;
use staking_pool::{rewards::accrued, ContractError};

use crate::helpers::{advance, funded_staker, setup, TestContext, UNIT};

const STAKERS: usize = 3;
const RATE: u32 = 5;
const FUNDING: i128 = 1_000 * UNIT;

#[derive(Clone, Debug, proptest_derive::Arbitrary)]
enum Op {
    Stake(
        #[proptest(strategy = "0usize..STAKERS")] usize,
        #[proptest(strategy = "0i128..=600i128")] i128,
    ),
    Unstake(
        #[proptest(strategy = "0usize..STAKERS")] usize,
        #[proptest(strategy = "0i128..=600i128")] i128,
    ),
    Claim(#[proptest(strategy = "0usize..STAKERS")] usize),
    Advance(#[proptest(strategy = "0u64..=(60 * 86_400)")] u64),
}

#[derive(Clone, Debug, Default)]
struct Position {
    principal: i128,
    last_updated: u64,
    reward: i128,
    has_history: bool,
}

impl Position {
    fn accrue(&mut self, now: u64) {
        if !self.has_history {
            self.last_updated = now;
            return;
        }
        self.reward += accrued(self.principal, RATE, now - self.last_updated).unwrap();
        self.last_updated = now;
    }
}

fn expect_err<T, C, I>(
    result: Result<Result<T, C>, Result<ContractError, I>>,
    expected: ContractError,
) -> Result<(), TestCaseError>
where
    T: core::fmt::Debug,
    C: core::fmt::Debug,
    I: core::fmt::Debug,
{
    match result {
        Err(Ok(e)) => prop_assert_eq!(e, expected),
        other => prop_assert!(false, "expected {:?}, got {:?}", expected, other),
    }
    Ok(())
}

fn apply(
    ctx: &TestContext,
    stakers: &[Address],
    model: &mut [Position],
    op: &Op,
) -> Result<(), TestCaseError> {
    let now = ctx.env.ledger().timestamp();
    match *op {
        Op::Stake(i, tokens) => {
            let amount = tokens * UNIT;
            let balance = ctx.token.balance(&stakers[i]);
            let allowance = ctx.token.allowance(&stakers[i], &ctx.pool.address);
            let result = ctx.pool.try_stake(&stakers[i], &amount);
            if amount <= 0 {
                expect_err(result, ContractError::InvalidAmount)?;
            } else if balance < amount {
                expect_err(result, ContractError::InsufficientBalance)?;
            } else if allowance < amount {
                expect_err(result, ContractError::InsufficientAllowance)?;
            } else {
                prop_assert!(result.is_ok());
                let position = &mut model[i];
                position.accrue(now);
                position.principal += amount;
                position.has_history = true;
            }
        }
        Op::Unstake(i, tokens) => {
            let amount = tokens * UNIT;
            let result = ctx.pool.try_unstake(&stakers[i], &amount);
            if !model[i].has_history || amount > model[i].principal {
                expect_err(result, ContractError::AmountExceedsStake)?;
            } else {
                prop_assert!(result.is_ok());
                let position = &mut model[i];
                position.accrue(now);
                position.principal -= amount;
            }
        }
        Op::Claim(i) => {
            let result = ctx.pool.try_claim_rewards(&stakers[i]);
            if !model[i].has_history {
                expect_err(result, ContractError::NoDepositHistory)?;
                return Ok(());
            }
            // A failed claim rolls back its own accrual, so work on a copy.
            let mut next = model[i].clone();
            next.accrue(now);
            if next.reward == 0 {
                expect_err(result, ContractError::NoRewardsAccrued)?;
            } else {
                match result {
                    Ok(Ok(paid)) => prop_assert_eq!(paid, next.reward),
                    other => prop_assert!(false, "claim failed: {:?}", other),
                }
                next.reward = 0;
                model[i] = next;
            }
        }
        Op::Advance(seconds) => advance(&ctx.env, seconds),
    }
    Ok(())
}

fn check_invariants(
    ctx: &TestContext,
    stakers: &[Address],
    model: &[Position],
) -> Result<(), TestCaseError> {
    let mut sum = ctx.token.balance(&ctx.admin) + ctx.token.balance(&ctx.pool.address);
    let mut staked = 0;

    for (staker, position) in stakers.iter().zip(model) {
        let record = ctx.pool.staked_balances(staker);
        prop_assert!(record.balance >= 0);
        prop_assert_eq!(record.balance, position.principal);
        if position.has_history {
            prop_assert_eq!(record.last_updated, position.last_updated);
        } else {
            prop_assert_eq!(record.last_updated, 0);
        }
        prop_assert_eq!(ctx.pool.reward_balances(staker), position.reward);

        sum += ctx.token.balance(staker);
        staked += position.principal;
    }

    prop_assert_eq!(sum, ctx.token.total_supply());
    prop_assert_eq!(ctx.pool.total_staked(), staked);
    prop_assert_eq!(ctx.token.balance(&ctx.pool.address), staked);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any interleaving of stake / unstake / claim / time travel keeps the
    /// contract in lockstep with the model.
    #[test]
    fn prop_random_sequences_match_model(
        ops in proptest::collection::vec(any::<Op>(), 1..40),
    ) {
        let ctx = setup(RATE);
        let stakers: std::vec::Vec<Address> =
            (0..STAKERS).map(|_| funded_staker(&ctx, FUNDING)).collect();
        let mut model = vec![Position::default(); STAKERS];

        for op in &ops {
            apply(&ctx, &stakers, &mut model, op)?;
            check_invariants(&ctx, &stakers, &model)?;
        }
    }
}
