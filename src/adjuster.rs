// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Risk-Pool Sizing Engine - Damped Pool Adjustment

//! Damped growth and shrink of the risk pool.
//!
//! ```text
//! grow(p, a)   = p + a * p / (p + k)
//! shrink(p, a) = p - a * p / (p + k)
//! ```
//!
//! Small pools move sub-linearly, large pools (p >> k) move nearly 1:1.
//! `grow` is fractional-linear in `a`, so the amount that carries a pool to
//! a given target has a closed form ([`amount_to_reach`]).

/// Damped growth. `pool + k` must be non-zero.
pub fn grow(pool: f64, amount: f64, k: f64) -> f64 {
    pool + amount * pool / (pool + k)
}

/// Damped shrink. `pool + k` must be non-zero.
pub fn shrink(pool: f64, amount: f64, k: f64) -> f64 {
    pool - amount * pool / (pool + k)
}

/// Amount `x` such that `grow(pool, x, k) == target`.
///
/// Only meaningful for `pool > 0`; a zero pool never grows.
pub fn amount_to_reach(pool: f64, target: f64, k: f64) -> f64 {
    (target - pool) * (pool + k) / pool
}
