#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for reward accrual.
//!
//! Invariants tested:
//! - One full year on principal `P` at `r`% pays exactly `P * r / 100`
//! - Accrual at an unchanged timestamp adds nothing
//! - Splitting an interval never pays more than the whole interval
//! - `pending_rewards` agrees with what a claim actually mints

use proptest::prelude::*;
use staking_pool::rewards::{accrued, SECONDS_PER_YEAR};

use crate::helpers::{advance, funded_staker, setup, UNIT};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A whole year pays the nominal rate with no rounding loss.
    #[test]
    fn prop_one_year_pays_nominal_rate(
        tokens in 1i128..=1_000_000i128,
        rate in 0u32..=100u32,
    ) {
        let principal = tokens * UNIT;
        let expected = principal * i128::from(rate) / 100;
        prop_assert_eq!(accrued(principal, rate, SECONDS_PER_YEAR), Some(expected));
    }

    /// Splitting one interval in two can only lose flooring dust.
    #[test]
    fn prop_split_interval_never_overpays(
        principal in 1i128..=1_000_000_000_000_000i128,
        rate in 1u32..=100u32,
        first in 0u64..=SECONDS_PER_YEAR,
        second in 0u64..=SECONDS_PER_YEAR,
    ) {
        let whole = accrued(principal, rate, first + second).unwrap();
        let split = accrued(principal, rate, first).unwrap()
            + accrued(principal, rate, second).unwrap();
        prop_assert!(split <= whole);
        prop_assert!(whole - split <= 1);
    }

    /// Reward is monotone in elapsed time.
    #[test]
    fn prop_accrual_monotone_in_time(
        principal in 1i128..=1_000_000_000_000_000i128,
        rate in 0u32..=100u32,
        shorter in 0u64..=SECONDS_PER_YEAR,
        extra in 0u64..=SECONDS_PER_YEAR,
    ) {
        let a = accrued(principal, rate, shorter).unwrap();
        let b = accrued(principal, rate, shorter + extra).unwrap();
        prop_assert!(a <= b);
    }

    /// Interacting twice in the same ledger second accrues nothing extra.
    #[test]
    fn prop_same_timestamp_accrues_once(
        tokens in 2i128..=10_000i128,
        rate in 1u32..=50u32,
        days in 1u64..=720u64,
    ) {
        let ctx = setup(rate);
        let staker = funded_staker(&ctx, tokens * UNIT);
        ctx.pool.stake(&staker, &(tokens * UNIT));

        advance(&ctx.env, days * 86_400);
        ctx.pool.unstake(&staker, &UNIT);
        let first = ctx.pool.reward_balances(&staker);

        ctx.pool.unstake(&staker, &UNIT);
        prop_assert_eq!(ctx.pool.reward_balances(&staker), first);
        prop_assert_eq!(first, accrued(tokens * UNIT, rate, days * 86_400).unwrap());
    }

    /// The read-only projection matches the amount the next claim mints.
    #[test]
    fn prop_pending_matches_claim(
        tokens in 1i128..=10_000i128,
        rate in 1u32..=50u32,
        seconds in 1_000u64..=(2 * SECONDS_PER_YEAR),
    ) {
        let ctx = setup(rate);
        let staker = funded_staker(&ctx, tokens * UNIT);
        ctx.pool.stake(&staker, &(tokens * UNIT));

        advance(&ctx.env, seconds);
        let pending = ctx.pool.pending_rewards(&staker);
        let claimed = ctx.pool.claim_rewards(&staker);

        prop_assert_eq!(pending, claimed);
        prop_assert_eq!(ctx.token.balance(&staker), claimed);
        prop_assert_eq!(ctx.pool.reward_balances(&staker), 0);
    }
}
