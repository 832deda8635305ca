//! Storage TTL management shared by every StakeX contract.
//!
//! Persistent entries (balances, roles, stake records) and the instance
//! entry are bumped on every write so live positions never get archived.

use soroban_sdk::{Env, IntoVal, Val};

/// Ledgers closed per day at a ~5 second close time.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Remaining TTL below which an entry is extended.
pub const TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;

/// TTL an entry is extended to once it drops below the threshold.
pub const TTL_EXTEND_TO: u32 = 60 * DAY_IN_LEDGERS;

pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
