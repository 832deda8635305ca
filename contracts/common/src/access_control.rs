use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{ttl, CommonError};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");
const ROLE_LIST: Symbol = symbol_short!("ROLE_LST");

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Roles recognised by the StakeX contracts.
///
/// - `Admin`  – May grant and revoke every role, including its own.
/// - `Minter` – May increase token supply via `mint`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 0,
    Minter = 1,
}

/// Returns the role whose holders administer `role`.
///
/// The hierarchy is flat: `Admin` administers every role.
pub fn role_admin(_role: Role) -> Role {
    Role::Admin
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn role_key(role: Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role, account.clone())
}

fn role_list_key(role: Role) -> (Symbol, Role) {
    (ROLE_LIST, role)
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Returns true if `account` currently holds `role`.
pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    let key = role_key(role, account);
    let held: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if held {
        ttl::extend_persistent(env, &key);
    }
    held
}

/// Adds `account` to `role` without any authorization check.
/// Only callable internally, e.g. from a constructor bootstrapping the
/// first admin. Returns `true` if membership changed.
pub fn set_role(env: &Env, role: Role, account: &Address) -> bool {
    if has_role(env, role, account) {
        return false;
    }
    let key = role_key(role, account);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);
    track_member(env, role, account);
    true
}

/// Removes `account` from `role` without any authorization check.
/// Returns `true` if membership changed.
pub fn remove_role(env: &Env, role: Role, account: &Address) -> bool {
    if !has_role(env, role, account) {
        return false;
    }
    env.storage().persistent().remove(&role_key(role, account));
    untrack_member(env, role, account);
    true
}

// ── Gated Grant / Revoke ─────────────────────────────────────────────────────

/// Grants `role` to `account` on behalf of `caller`.
///
/// The caller must have been authenticated via `require_auth()` and must
/// hold the admin role of `role`. Granting a role that is already held is
/// a successful no-op.
///
/// # Errors
/// [`CommonError::AccessDenied`] if `caller` is not an administrator.
pub fn grant_role(
    env: &Env,
    caller: &Address,
    role: Role,
    account: &Address,
) -> Result<bool, CommonError> {
    if !has_role(env, role_admin(role), caller) {
        return Err(CommonError::AccessDenied);
    }
    Ok(set_role(env, role, account))
}

/// Revokes `role` from `account` on behalf of `caller`.
///
/// Symmetric to [`grant_role`]; revoking a role that is not held is a
/// successful no-op.
pub fn revoke_role(
    env: &Env,
    caller: &Address,
    role: Role,
    account: &Address,
) -> Result<bool, CommonError> {
    if !has_role(env, role_admin(role), caller) {
        return Err(CommonError::AccessDenied);
    }
    Ok(remove_role(env, role, account))
}

/// Drops `role` from `account` itself. The account must have been
/// authenticated by the caller.
pub fn renounce_role(env: &Env, account: &Address, role: Role) -> bool {
    remove_role(env, role, account)
}

// ── Member Tracking ──────────────────────────────────────────────────────────

/// Returns every address currently holding `role`.
pub fn role_members(env: &Env, role: Role) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&role_list_key(role))
        .unwrap_or(Vec::new(env))
}

fn track_member(env: &Env, role: Role, account: &Address) {
    let key = role_list_key(role);
    let mut members = role_members(env, role);
    if !members.contains(account) {
        members.push_back(account.clone());
        env.storage().persistent().set(&key, &members);
        ttl::extend_persistent(env, &key);
    }
}

fn untrack_member(env: &Env, role: Role, account: &Address) {
    let key = role_list_key(role);
    let members = role_members(env, role);

    let mut remaining = Vec::new(env);
    for member in members.iter() {
        if member != *account {
            remaining.push_back(member);
        }
    }
    env.storage().persistent().set(&key, &remaining);
}
