// Scenario Definitions: synthetic trading regimes for the sizing fold
// All scenario logic lives in curve functions; the engine is untouched

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub initial_balance: f64,
    pub trades: usize,
    pub win_prob: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub unknown_prob: f64,
    /// Overrides `win_prob` per trade index
    pub win_prob_curve: Option<fn(usize) -> f64>,
    /// Reverse history to newest first before handing it to the engine
    pub newest_first: bool,
    pub criteria: PassCriteria,
}

pub struct PassCriteria {
    pub require_bounds: bool,
    pub require_determinism: bool,
    pub require_window_consistency: bool,
    pub min_gate_snaps: Option<u32>,
    pub require_skips_match_gaps: bool,
    pub require_order_repaired: bool,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            require_bounds: true,
            require_determinism: true,
            require_window_consistency: true,
            min_gate_snaps: None,
            require_skips_match_gaps: false,
            require_order_repaired: false,
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "",
            label: "",
            category: "",
            initial_balance: 25_000.0,
            trades: 250,
            win_prob: 0.45,
            avg_win: 180.0,
            avg_loss: 120.0,
            unknown_prob: 0.0,
            win_prob_curve: None,
            newest_first: false,
            criteria: PassCriteria::default(),
        }
    }
}

// ─── Curve Functions ────────────────────────────────────────────────────────

fn drawdown_then_recovery(index: usize) -> f64 {
    if index < 80 { 0.15 } else { 0.60 }
}

fn alternating_regimes(index: usize) -> f64 {
    if (index / 40) % 2 == 0 { 0.25 } else { 0.55 }
}

// ─── Scenario List ──────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "HOT_STREAK",
            label: "Hot streak (65% winners)",
            category: "regime",
            win_prob: 0.65,
            ..Default::default()
        },
        Scenario {
            name: "COLD_STREAK",
            label: "Cold streak (20% winners)",
            category: "regime",
            win_prob: 0.20,
            ..Default::default()
        },
        Scenario {
            name: "CHOPPY",
            label: "Choppy (45% winners, 1.5R)",
            category: "regime",
            ..Default::default()
        },
        Scenario {
            name: "DRAWDOWN_RECOVERY",
            label: "Drawdown then recovery",
            category: "gate",
            win_prob_curve: Some(drawdown_then_recovery),
            criteria: PassCriteria {
                min_gate_snaps: Some(1),
                ..Default::default()
            },
            ..Default::default()
        },
        Scenario {
            name: "REGIME_SWITCHING",
            label: "Alternating 25%/55% regimes",
            category: "gate",
            trades: 400,
            win_prob_curve: Some(alternating_regimes),
            ..Default::default()
        },
        Scenario {
            name: "DATA_GAPS",
            label: "30% trades missing P&L",
            category: "data",
            unknown_prob: 0.30,
            criteria: PassCriteria {
                require_skips_match_gaps: true,
                ..Default::default()
            },
            ..Default::default()
        },
        Scenario {
            name: "NEWEST_FIRST",
            label: "History delivered newest first",
            category: "data",
            newest_first: true,
            criteria: PassCriteria {
                require_order_repaired: true,
                ..Default::default()
            },
            ..Default::default()
        },
        Scenario {
            name: "BLOWUP",
            label: "Small account, oversized losses",
            category: "stress",
            initial_balance: 2_000.0,
            win_prob: 0.30,
            avg_win: 150.0,
            avg_loss: 400.0,
            ..Default::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_names_unique() {
        let all = scenarios();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_curves_stay_probabilities() {
        for i in 0..1000 {
            for p in [drawdown_then_recovery(i), alternating_regimes(i)] {
                assert!((0.0..=1.0).contains(&p));
            }
        }
    }
}
