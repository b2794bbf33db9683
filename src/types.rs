// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Risk-Pool Sizing Engine - Type Definitions

use serde::{Deserialize, Serialize};

// ─── TradeOutcome ────────────────────────────────────────────────────────────

/// One closed trade as supplied by the dashboard's trade history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOutcome {
    pub ticker: String,
    /// Realized dollar P&L. `None` when the outcome is unknown.
    #[serde(default, rename = "realizedPnL")]
    pub realized_pnl: Option<f64>,
    /// Close time in Unix millis, used only to check ordering.
    #[serde(default)]
    pub closed_at: Option<i64>,
}

impl TradeOutcome {
    pub fn new(ticker: impl Into<String>, realized_pnl: Option<f64>) -> Self {
        Self {
            ticker: ticker.into(),
            realized_pnl,
            closed_at: None,
        }
    }

    pub fn win(ticker: impl Into<String>, pnl: f64) -> Self {
        Self::new(ticker, Some(pnl.abs()))
    }

    pub fn loss(ticker: impl Into<String>, pnl: f64) -> Self {
        Self::new(ticker, Some(-pnl.abs()))
    }

    pub fn unknown(ticker: impl Into<String>) -> Self {
        Self::new(ticker, None)
    }

    pub fn closed_at(mut self, millis: i64) -> Self {
        self.closed_at = Some(millis);
        self
    }
}

// ─── Step Action ─────────────────────────────────────────────────────────────

/// Why a trade contributed nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SkipReason {
    /// `realizedPnL` was null
    UnknownOutcome,
    /// NaN or infinite P&L
    NonFiniteOutcome,
}

/// Which branch of the adjustment a step took.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PoolAction {
    /// Pool already at or above threshold: credited 1:1
    WinLinear,
    /// Pool stayed below threshold after damped growth
    WinDamped,
    /// Damped growth to the threshold, remainder 1:1
    WinCrossed,
    /// Pool at or below threshold: whole loss damped
    LossDamped,
    /// Loss absorbed 1:1 within the headroom above threshold
    LossLinear,
    /// Headroom consumed 1:1, remainder damped from the threshold
    LossCrossed,
    /// Account is no longer positive; pool forced to zero
    AccountDepleted,
    Skipped(SkipReason),
}

impl PoolAction {
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::WinLinear => "win 1:1",
            Self::WinDamped => "win damped",
            Self::WinCrossed => "win crossed threshold",
            Self::LossDamped => "loss damped",
            Self::LossLinear => "loss 1:1",
            Self::LossCrossed => "loss crossed threshold",
            Self::AccountDepleted => "account depleted",
            Self::Skipped(SkipReason::UnknownOutcome) => "skipped: unknown outcome",
            Self::Skipped(SkipReason::NonFiniteOutcome) => "skipped: non-finite outcome",
        }
    }
}

// ─── StepRecord ──────────────────────────────────────────────────────────────

/// Audit record for one trade of the fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub index: usize,
    pub ticker: String,
    pub realized_pnl: Option<f64>,
    pub action: PoolAction,
    pub account_before: f64,
    pub account_after: f64,
    pub pool_before: f64,
    /// Pool after the win-rate gate check, before the trade's own P&L.
    pub pool_after_gate: f64,
    pub pool_after: f64,
    /// Pool was snapped up to threshold on a gate recovery.
    pub gate_snapped: bool,
    pub capped: bool,
    pub win_rate: f64,
    pub trading_well: bool,
}

// ─── SimulationSummary ───────────────────────────────────────────────────────

/// Final numbers handed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub account_size: f64,
    pub risk_pool: f64,
    pub win_rate: f64,
    pub trading_well: bool,
    pub threshold: f64,
    pub cap: f64,
    pub trades_applied: u32,
    pub trades_skipped: u32,
}

impl SimulationSummary {
    /// Pool as a fraction of the account, 0.0 for a depleted account.
    pub fn risk_pct(&self) -> f64 {
        if self.account_size > 0.0 {
            self.risk_pool / self.account_size
        } else {
            0.0
        }
    }
}
