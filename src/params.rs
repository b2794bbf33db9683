// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Risk-Pool Sizing Engine - Sizing Parameters

//! Tunable constants of the sizing fold.
//!
//! The dashboard may pass a partial JSON object; missing fields fall back to
//! the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Normal pool size as a fraction of the account (0.5%).
pub const THRESHOLD_PCT: f64 = 0.005;
/// Hard ceiling on the pool as a fraction of the account (5%).
pub const MAX_POOL_PCT: f64 = 0.05;
/// Damping constant K used by `grow` / `shrink`.
pub const DAMPING_K: f64 = 20.0;
/// Minimum trailing win rate to count as trading well (3 of 8).
pub const WIN_RATE_GATE: f64 = 0.375;
/// Number of most recent outcomes kept in the trailing window.
pub const TRAILING_WINDOW: usize = 8;
/// Largest trailing window `validate` accepts.
pub const MAX_TRAILING_WINDOW: usize = 10_000;

// ---------------------------------------------------------------------------
// SizingParams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SizingParams {
    pub threshold_pct: f64,
    pub max_pool_pct: f64,
    pub damping_k: f64,
    pub win_rate_gate: f64,
    pub trailing_window: usize,
}

impl Default for SizingParams {
    fn default() -> Self {
        Self {
            threshold_pct: THRESHOLD_PCT,
            max_pool_pct: MAX_POOL_PCT,
            damping_k: DAMPING_K,
            win_rate_gate: WIN_RATE_GATE,
            trailing_window: TRAILING_WINDOW,
        }
    }
}

impl SizingParams {
    /// Check every field is in range. Returns the params unchanged on success.
    pub fn validate(self) -> Result<Self> {
        if !self.threshold_pct.is_finite() || self.threshold_pct <= 0.0 {
            return Err(invalid(format!(
                "threshold_pct must be > 0, got {}",
                self.threshold_pct
            )));
        }
        if !self.max_pool_pct.is_finite() || self.max_pool_pct > 1.0 {
            return Err(invalid(format!(
                "max_pool_pct must be <= 1, got {}",
                self.max_pool_pct
            )));
        }
        if self.threshold_pct > self.max_pool_pct {
            return Err(invalid(format!(
                "threshold_pct ({}) exceeds max_pool_pct ({})",
                self.threshold_pct, self.max_pool_pct
            )));
        }
        if !self.damping_k.is_finite() || self.damping_k <= 0.0 {
            return Err(invalid(format!(
                "damping_k must be > 0, got {}",
                self.damping_k
            )));
        }
        if !(0.0..=1.0).contains(&self.win_rate_gate) {
            return Err(invalid(format!(
                "win_rate_gate must be within [0, 1], got {}",
                self.win_rate_gate
            )));
        }
        if self.trailing_window == 0 {
            return Err(invalid("trailing_window must hold at least one outcome".into()));
        }
        if self.trailing_window > MAX_TRAILING_WINDOW {
            return Err(invalid(format!(
                "trailing_window must be <= {}, got {}",
                MAX_TRAILING_WINDOW, self.trailing_window
            )));
        }
        Ok(self)
    }

    /// `account * threshold_pct`
    pub fn threshold_for(&self, account_size: f64) -> f64 {
        account_size * self.threshold_pct
    }

    /// `account * max_pool_pct`
    pub fn cap_for(&self, account_size: f64) -> f64 {
        account_size * self.max_pool_pct
    }
}

fn invalid(msg: String) -> SimulationError {
    SimulationError::InvalidParams(msg)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_constants() {
        let p = SizingParams::default();
        assert_eq!(p.threshold_pct, 0.005);
        assert_eq!(p.max_pool_pct, 0.05);
        assert_eq!(p.damping_k, 20.0);
        assert_eq!(p.win_rate_gate, 0.375);
        assert_eq!(p.trailing_window, 8);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn threshold_and_cap_scale_with_account() {
        let p = SizingParams::default();
        assert!((p.threshold_for(1000.0) - 5.0).abs() < 1e-12);
        assert!((p.cap_for(1050.0) - 52.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_damping() {
        let p = SizingParams { damping_k: 0.0, ..Default::default() };
        assert!(matches!(p.validate(), Err(SimulationError::InvalidParams(_))));

        let p = SizingParams { damping_k: f64::NAN, ..Default::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_threshold_above_cap() {
        let p = SizingParams {
            threshold_pct: 0.1,
            max_pool_pct: 0.05,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_gate_outside_unit_interval_and_empty_window() {
        let p = SizingParams { win_rate_gate: 1.5, ..Default::default() };
        assert!(p.validate().is_err());

        let p = SizingParams { trailing_window: 0, ..Default::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_oversized_window() {
        let p = SizingParams { trailing_window: usize::MAX, ..Default::default() };
        assert!(matches!(p.validate(), Err(SimulationError::InvalidParams(_))));

        let p = SizingParams { trailing_window: MAX_TRAILING_WINDOW + 1, ..Default::default() };
        assert!(p.validate().is_err());

        let p = SizingParams { trailing_window: MAX_TRAILING_WINDOW, ..Default::default() };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let p: SizingParams = serde_json::from_str(r#"{"dampingK": 10.0}"#).unwrap();
        assert_eq!(p.damping_k, 10.0);
        assert_eq!(p.threshold_pct, THRESHOLD_PCT);
        assert_eq!(p.trailing_window, TRAILING_WINDOW);
    }
}
