//! Linear reward arithmetic.
//!
//! Rewards are simple (non-compounding) interest on the principal held over
//! an interval, quoted as a whole-percent annual rate:
//!
//! ```text
//! reward = floor(principal × rate_percent × elapsed / (100 × SECONDS_PER_YEAR))
//! ```
//!
//! Everything is integer math in ledger base units. Multiplication happens
//! before the single division so the only loss is the final floor.

/// Length of the accrual year: 365 days, no leap handling.
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Denominator for whole-percent rates.
pub const PERCENT: i128 = 100;

/// Reward earned by `principal` over `elapsed` seconds at `rate_percent`
/// per year.
///
/// Returns `None` if an intermediate product overflows `i128`.
pub fn accrued(principal: i128, rate_percent: u32, elapsed: u64) -> Option<i128> {
    if principal <= 0 || rate_percent == 0 || elapsed == 0 {
        return Some(0);
    }

    principal
        .checked_mul(i128::from(rate_percent))?
        .checked_mul(i128::from(elapsed))?
        .checked_div(PERCENT * i128::from(SECONDS_PER_YEAR))
}

/// Stored reward plus what `principal` has earned since it was last
/// accrued.
pub fn projected(stored: i128, principal: i128, rate_percent: u32, elapsed: u64) -> Option<i128> {
    stored.checked_add(accrued(principal, rate_percent, elapsed)?)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure math, no Soroban environment.
