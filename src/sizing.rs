// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Risk-Pool Sizing Engine - Position Sizing

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Shares the current risk pool allows for a trade with a given stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSize {
    pub shares: u64,
    pub risk_per_share: f64,
    /// `shares * risk_per_share`, never above the pool.
    pub dollars_at_risk: f64,
    /// `shares * entry`
    pub capital_required: f64,
}

/// Whole shares such that hitting the stop loses at most `risk_pool`.
///
/// Works for shorts too: risk per share is `|entry - stop|`.
pub fn position_size(risk_pool: f64, entry: f64, stop: f64) -> Result<PositionSize> {
    let risk_per_share = (entry - stop).abs();
    if !entry.is_finite() || entry <= 0.0 || !risk_per_share.is_finite() || risk_per_share <= 0.0 {
        return Err(SimulationError::InvalidStop { entry, stop });
    }

    let shares = if risk_pool.is_finite() && risk_pool > 0.0 {
        (risk_pool / risk_per_share).floor() as u64
    } else {
        0
    };

    Ok(PositionSize {
        shares,
        risk_per_share,
        dollars_at_risk: shares as f64 * risk_per_share,
        capital_required: shares as f64 * entry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_position_floors_to_whole_shares() {
        // 52.5 / 2.0 = 26.25 -> 26 shares
        let size = position_size(52.5, 100.0, 98.0).unwrap();
        assert_eq!(size.shares, 26);
        assert!((size.dollars_at_risk - 52.0).abs() < 1e-12);
        assert!((size.capital_required - 2600.0).abs() < 1e-12);
        assert!(size.dollars_at_risk <= 52.5);
    }

    #[test]
    fn short_position_uses_absolute_distance() {
        let size = position_size(10.0, 50.0, 52.5).unwrap();
        assert_eq!(size.shares, 4);
    }

    #[test]
    fn empty_pool_buys_nothing() {
        let size = position_size(0.0, 100.0, 99.0).unwrap();
        assert_eq!(size.shares, 0);
        assert_eq!(size.capital_required, 0.0);
    }

    #[test]
    fn stop_at_entry_is_rejected() {
        assert!(matches!(
            position_size(10.0, 100.0, 100.0),
            Err(SimulationError::InvalidStop { .. })
        ));
        assert!(position_size(10.0, -1.0, -2.0).is_err());
        assert!(position_size(10.0, 100.0, f64::NAN).is_err());
    }
}
