// Per-Step Invariant Trackers: pool bounds and win-rate consistency

use riskpool_engine::{PoolAction, StepRecord};

/// Slack for floating-point comparisons against the cap.
const CAP_TOLERANCE: f64 = 1e-9;

// ─── Pool Bounds Tracker ────────────────────────────────────────────────────

/// Counts steps that leave `0 <= pool <= account * max_pool_pct`.
pub struct PoolBoundsTracker {
    pub max_pool_pct: f64,
    pub steps: u64,
    pub cap_breaches: u32,
    pub negative_pools: u32,
    pub cap_hits: u32,
    pub gate_snaps: u32,
    pub depleted_steps: u32,
    pub peak_pool_pct: f64,
}

impl PoolBoundsTracker {
    pub fn new(max_pool_pct: f64) -> Self {
        Self {
            max_pool_pct,
            steps: 0,
            cap_breaches: 0,
            negative_pools: 0,
            cap_hits: 0,
            gate_snaps: 0,
            depleted_steps: 0,
            peak_pool_pct: 0.0,
        }
    }

    pub fn record_step(&mut self, rec: &StepRecord) {
        self.steps += 1;
        if rec.pool_after < 0.0 {
            self.negative_pools += 1;
        }
        if rec.account_after > 0.0 {
            let cap = rec.account_after * self.max_pool_pct;
            if rec.pool_after > cap + CAP_TOLERANCE {
                self.cap_breaches += 1;
            }
            self.peak_pool_pct = self.peak_pool_pct.max(rec.pool_after / rec.account_after);
        } else if rec.pool_after != 0.0 {
            self.cap_breaches += 1;
        }
        if rec.capped {
            self.cap_hits += 1;
        }
        if rec.gate_snapped {
            self.gate_snaps += 1;
        }
        if rec.action == PoolAction::AccountDepleted {
            self.depleted_steps += 1;
        }
    }

    pub fn holds(&self) -> bool {
        self.cap_breaches == 0 && self.negative_pools == 0
    }
}

// ─── Window Tracker ─────────────────────────────────────────────────────────

/// Replays outcomes through an independent window to cross-check the
/// engine's reported win rate.
pub struct WindowTracker {
    pub window_size: usize,
    outcomes: Vec<bool>,
    pub mismatches: u32,
}

impl WindowTracker {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            outcomes: Vec::new(),
            mismatches: 0,
        }
    }

    pub fn record_step(&mut self, rec: &StepRecord) {
        let pnl = match (rec.action.is_skip(), rec.realized_pnl) {
            (false, Some(p)) => p,
            _ => return,
        };
        self.outcomes.push(pnl > 0.0);
        let start = self.outcomes.len().saturating_sub(self.window_size);
        let window = &self.outcomes[start..];
        let expected = window.iter().filter(|&&w| w).count() as f64 / window.len() as f64;
        if (expected - rec.win_rate).abs() > f64::EPSILON {
            self.mismatches += 1;
        }
    }
}
