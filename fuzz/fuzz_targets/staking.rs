#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env,
};
use staking_pool::{StakingPool, StakingPoolClient};
use stakex_token::{Role, StakeXToken, StakeXTokenClient};

const STAKERS: usize = 4;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { staker: u8, amount: i64 },
    Unstake { staker: u8, amount: i64 },
    ClaimRewards { staker: u8 },
    Approve { staker: u8, amount: i64 },
    Advance { seconds: u32 },
}

#[derive(Arbitrary, Debug)]
pub struct FuzzInput {
    reward_rate: u8,
    actions: Vec<FuzzAction>,
}

fuzz_target!(|input: FuzzInput| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let admin = Address::generate(&env);
    let token_id = env.register(StakeXToken, (admin.clone(), admin.clone()));
    let token = StakeXTokenClient::new(&env, &token_id);

    let pool_id = env.register(StakingPool, (token_id, u32::from(input.reward_rate)));
    let pool = StakingPoolClient::new(&env, &pool_id);
    token.grant_role(&admin, &Role::Minter, &pool_id);

    let stakers: Vec<Address> = (0..STAKERS)
        .map(|_| {
            let staker = Address::generate(&env);
            token.transfer(&admin, &staker, &1_000_000_000_000i128);
            staker
        })
        .collect();
    let pick = |index: u8| &stakers[usize::from(index) % STAKERS];

    // Only panics and broken invariants are findings; rejected calls are expected.
    for action in input.actions {
        match action {
            FuzzAction::Stake { staker, amount } => {
                let _ = pool.try_stake(pick(staker), &i128::from(amount));
            }
            FuzzAction::Unstake { staker, amount } => {
                let _ = pool.try_unstake(pick(staker), &i128::from(amount));
            }
            FuzzAction::ClaimRewards { staker } => {
                let _ = pool.try_claim_rewards(pick(staker));
            }
            FuzzAction::Approve { staker, amount } => {
                let _ = token.try_approve(pick(staker), &pool_id, &i128::from(amount));
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(seconds));
            }
        }

        let mut staked = 0i128;
        let mut supply = token.balance(&admin) + token.balance(&pool_id);
        for staker in &stakers {
            let record = pool.staked_balances(staker);
            assert!(record.balance >= 0);
            staked += record.balance;
            supply += token.balance(staker);
        }
        assert_eq!(supply, token.total_supply());
        assert_eq!(staked, pool.total_staked());
        assert_eq!(token.balance(&pool_id), staked);
    }
});
