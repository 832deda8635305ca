#![no_std]

pub mod events;

use common::access_control;
use common::ttl;
use soroban_sdk::{contract, contractimpl, log, symbol_short, Address, Env, String, Symbol, Vec};

pub use common::{LedgerError, Role};

// ── Token metadata ───────────────────────────────────────────────────────────

pub const DECIMALS: u32 = 8;
pub const NAME: &str = "StakeX";
pub const SYMBOL: &str = "STX";

/// Supply minted to the initial recipient at construction: 5,000,000 STX.
pub const INITIAL_SUPPLY: i128 = 5_000_000 * 10i128.pow(DECIMALS);

// ── Storage key constants ────────────────────────────────────────────────────

const TOTAL_SUPPLY: Symbol = symbol_short!("SUPPLY");

// Per-account persistent storage uses tuple keys:  (prefix, address[, address])
const BALANCE: Symbol = symbol_short!("BAL");
const ALLOWANCE: Symbol = symbol_short!("ALLOW");

// ── Helpers ──────────────────────────────────────────────────────────────────

fn balance_key(id: &Address) -> (Symbol, Address) {
    (BALANCE, id.clone())
}

fn allowance_key(from: &Address, spender: &Address) -> (Symbol, Address, Address) {
    (ALLOWANCE, from.clone(), spender.clone())
}

fn read_balance(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&balance_key(id))
        .unwrap_or(0)
}

fn write_balance(env: &Env, id: &Address, amount: i128) {
    let key = balance_key(id);
    env.storage().persistent().set(&key, &amount);
    ttl::extend_persistent(env, &key);
}

fn read_allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&allowance_key(from, spender))
        .unwrap_or(0)
}

fn write_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    let key = allowance_key(from, spender);
    env.storage().persistent().set(&key, &amount);
    ttl::extend_persistent(env, &key);
}

fn read_total_supply(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_SUPPLY).unwrap_or(0)
}

fn check_nonnegative(amount: i128) -> Result<(), LedgerError> {
    if amount < 0 {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

/// Debit `from` and credit `to`. Both new balances are computed before
/// either is written.
fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), LedgerError> {
    let from_balance = read_balance(env, from);
    if from_balance < amount {
        return Err(LedgerError::InsufficientBalance);
    }
    if from == to {
        return Ok(());
    }
    let to_balance = read_balance(env, to)
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;

    write_balance(env, from, from_balance - amount);
    write_balance(env, to, to_balance);
    Ok(())
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakeXToken;

#[contractimpl]
impl StakeXToken {
    // ── Construction ────────────────────────────────────────────────────────

    /// Deploy the ledger.
    ///
    /// * `admin`             – receives both the admin and the minter role.
    /// * `initial_recipient` – credited with [`INITIAL_SUPPLY`].
    pub fn __constructor(env: Env, admin: Address, initial_recipient: Address) {
        access_control::set_role(&env, Role::Admin, &admin);
        access_control::set_role(&env, Role::Minter, &admin);

        write_balance(&env, &initial_recipient, INITIAL_SUPPLY);
        env.storage().instance().set(&TOTAL_SUPPLY, &INITIAL_SUPPLY);
        ttl::extend_instance(&env);

        events::publish_mint(&env, admin, initial_recipient, INITIAL_SUPPLY, INITIAL_SUPPLY);
    }

    // ── Metadata ────────────────────────────────────────────────────────────

    pub fn name(env: Env) -> String {
        String::from_str(&env, NAME)
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, SYMBOL)
    }

    /// Number of fractional digits in every amount (1 STX = 10^8 units).
    pub fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    pub fn total_supply(env: Env) -> i128 {
        read_total_supply(&env)
    }

    // ── Balances & allowances ───────────────────────────────────────────────

    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        read_allowance(&env, &from, &spender)
    }

    /// Let `spender` move up to `amount` out of `from` via `transfer_from`.
    ///
    /// Overwrites any prior allowance; it is not additive.
    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), LedgerError> {
        from.require_auth();
        check_nonnegative(amount)?;

        write_allowance(&env, &from, &spender, amount);
        ttl::extend_instance(&env);

        events::publish_approve(&env, from, spender, amount);
        Ok(())
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), LedgerError> {
        from.require_auth();
        check_nonnegative(amount)?;

        move_balance(&env, &from, &to, amount)?;
        ttl::extend_instance(&env);

        events::publish_transfer(&env, from, to, amount);
        Ok(())
    }

    /// Move `amount` from `from` to `to` against the allowance `from`
    /// granted `spender`. The allowance shrinks by `amount`.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), LedgerError> {
        spender.require_auth();
        check_nonnegative(amount)?;

        let allowance = read_allowance(&env, &from, &spender);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance);
        }
        write_allowance(&env, &from, &spender, allowance - amount);

        move_balance(&env, &from, &to, amount)?;
        ttl::extend_instance(&env);

        events::publish_transfer(&env, from, to, amount);
        Ok(())
    }

    // ── Minting ─────────────────────────────────────────────────────────────

    /// Create `amount` new units for `to`. `minter` must hold the minter role.
    pub fn mint(env: Env, minter: Address, to: Address, amount: i128) -> Result<(), LedgerError> {
        minter.require_auth();
        if !access_control::has_role(&env, Role::Minter, &minter) {
            return Err(LedgerError::Unauthorized);
        }
        check_nonnegative(amount)?;

        let new_supply = read_total_supply(&env)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let new_balance = read_balance(&env, &to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        env.storage().instance().set(&TOTAL_SUPPLY, &new_supply);
        write_balance(&env, &to, new_balance);
        ttl::extend_instance(&env);

        log!(&env, "mint", to, amount, new_supply);
        events::publish_mint(&env, minter, to, amount, new_supply);
        Ok(())
    }

    // ── Access control ──────────────────────────────────────────────────────

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        access_control::has_role(&env, role, &account)
    }

    pub fn admin_role(_env: Env) -> Role {
        Role::Admin
    }

    pub fn minter_role(_env: Env) -> Role {
        Role::Minter
    }

    /// Returns the role whose holders may grant and revoke `role`.
    pub fn role_admin(_env: Env, role: Role) -> Role {
        access_control::role_admin(role)
    }

    pub fn role_members(env: Env, role: Role) -> Vec<Address> {
        access_control::role_members(&env, role)
    }

    /// Grant `role` to `account`. Requires `caller` to hold the admin role.
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), LedgerError> {
        caller.require_auth();
        if access_control::grant_role(&env, &caller, role, &account)? {
            events::publish_role_granted(&env, role, account, caller);
        }
        Ok(())
    }

    /// Revoke `role` from `account`. Requires `caller` to hold the admin role.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), LedgerError> {
        caller.require_auth();
        if access_control::revoke_role(&env, &caller, role, &account)? {
            events::publish_role_revoked(&env, role, account, caller);
        }
        Ok(())
    }

    /// Give up `role` held by `account` itself.
    pub fn renounce_role(env: Env, account: Address, role: Role) {
        account.require_auth();
        if access_control::renounce_role(&env, &account, role) {
            events::publish_role_revoked(&env, role, account.clone(), account);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
