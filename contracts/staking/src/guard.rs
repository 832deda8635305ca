//! Reentrancy lock for state-changing entry points.
//!
//! Every entry point finishes its own record writes before calling the
//! token ledger. The lock additionally rejects any call that reaches the
//! pool while another pool entry point is still on the stack.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::ContractError;

const LOCKED: Symbol = symbol_short!("LOCKED");

/// Take the lock, failing with [`ContractError::Reentrant`] if it is held.
pub fn enter(env: &Env) -> Result<(), ContractError> {
    if is_locked(env) {
        return Err(ContractError::Reentrant);
    }
    env.storage().instance().set(&LOCKED, &true);
    Ok(())
}

/// Release the lock. A failed invocation rolls the lock write back with
/// everything else, so this only has to run on the success path.
pub fn exit(env: &Env) {
    env.storage().instance().remove(&LOCKED);
}

pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().get(&LOCKED).unwrap_or(false)
}
