//! Shared building blocks for the StakeX contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: error codes shared by every contract.
//! - [`access_control`]: role membership (admin, minter) kept in the
//!   calling contract's storage.
//! - [`ledger`]: the token ledger's cross-contract client and error codes.
//! - [`ttl`]: storage TTL extension helpers.
//!
//! Contract-specific errors extend the range starting at code **100** and
//! above.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod access_control;
pub mod ledger;
pub mod ttl;

pub use access_control::Role;
pub use ledger::{LedgerError, TokenLedgerClient};

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by every StakeX contract.
///
/// # Code ranges
/// | Range   | Purpose                          |
/// |---------|----------------------------------|
/// | 10 – 19 | Authentication & authorisation   |
/// | 100–199 | Token ledger ([`LedgerError`])   |
/// | 200+    | Staking pool                     |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Auth (10–19) ─────────────────────────────────────────
    /// The caller lacks the role required for the requested operation.
    AccessDenied = 10,
}
