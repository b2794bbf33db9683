// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Risk-Pool Sizing Engine - Simulation Core

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::adjuster::{amount_to_reach, grow, shrink};
use crate::audit::AuditLog;
use crate::error::{Result, SimulationError};
use crate::ordering::{prepare_history, OrderingReport};
use crate::params::SizingParams;
use crate::types::*;
use crate::win_rate::WinRateTracker;

// ─── SimulationState ─────────────────────────────────────────────────────────

/// State threaded through the fold. Rebuilt from scratch on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub account_size: f64,
    pub risk_pool: f64,
    pub trailing: WinRateTracker,
    pub trading_well: bool,
}

impl SimulationState {
    /// Starting state: pool at the normal threshold, empty window.
    pub fn initial(initial_balance: f64, params: &SizingParams) -> Result<Self> {
        if !initial_balance.is_finite() || initial_balance <= 0.0 {
            return Err(SimulationError::InvalidInitialBalance(initial_balance));
        }
        Ok(Self {
            account_size: initial_balance,
            risk_pool: params.threshold_for(initial_balance),
            trailing: WinRateTracker::new(params.trailing_window, params.win_rate_gate),
            trading_well: false,
        })
    }
}

// ─── SimulationReport ────────────────────────────────────────────────────────

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub state: SimulationState,
    pub summary: SimulationSummary,
    pub log: AuditLog,
    pub ordering: OrderingReport,
}

// ─── Simulator ───────────────────────────────────────────────────────────────

/// Pure left fold over trade history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulator {
    params: SizingParams,
}

impl Default for Simulator {
    fn default() -> Self {
        Self { params: SizingParams::default() }
    }
}

impl Simulator {
    pub fn new(params: SizingParams) -> Result<Self> {
        Ok(Self { params: params.validate()? })
    }

    pub fn params(&self) -> &SizingParams {
        &self.params
    }

    /// Fold the whole history from `initial_balance`.
    ///
    /// History is brought into chronological order first (see [`prepare_history`]).
    /// Bad trades are skipped and logged; only bad inputs to the run itself fail.
    pub fn run(&self, initial_balance: f64, trades: &[TradeOutcome]) -> Result<SimulationReport> {
        let initial = SimulationState::initial(initial_balance, &self.params)?;
        let (history, ordering) = prepare_history(trades);

        let (state, log) = history.iter().enumerate().fold(
            (initial, AuditLog::with_capacity(history.len())),
            |(state, mut log), (index, trade)| {
                let (next, record) = self.step(state, index, trade);
                log.push(record);
                (next, log)
            },
        );

        let summary = self.summarize(&state, &log);
        tracing::debug!(
            account = summary.account_size,
            pool = summary.risk_pool,
            win_rate = summary.win_rate,
            applied = summary.trades_applied,
            skipped = summary.trades_skipped,
            "simulation complete"
        );

        Ok(SimulationReport { state, summary, log, ordering })
    }

    /// Apply one trade. Returns the next state and its audit record.
    pub fn step(
        &self,
        mut state: SimulationState,
        index: usize,
        trade: &TradeOutcome,
    ) -> (SimulationState, StepRecord) {
        let pnl = match trade.realized_pnl {
            None => return self.skip(state, index, trade, SkipReason::UnknownOutcome),
            Some(v) if !v.is_finite() => {
                return self.skip(state, index, trade, SkipReason::NonFiniteOutcome)
            }
            Some(v) => v,
        };

        let account_before = state.account_size;
        let pool_before = state.risk_pool;

        // 1. Trailing window and gate, before the trade's own P&L
        let is_win = pnl > 0.0;
        let was_trading_well = state.trading_well;
        state.trailing.record_outcome(is_win);
        state.trading_well = state.trailing.is_trading_well();

        let gate_threshold = self.params.threshold_for(state.account_size);
        let gate_snapped =
            !was_trading_well && state.trading_well && state.risk_pool < gate_threshold;
        if gate_snapped {
            tracing::info!(
                ticker = %trade.ticker,
                from = state.risk_pool,
                to = gate_threshold,
                "win rate recovered; pool snapped to threshold"
            );
            state.risk_pool = gate_threshold;
        }
        let pool_after_gate = state.risk_pool;

        // 2. Account and pool
        let mut action = if is_win {
            self.apply_win(&mut state, pnl)
        } else {
            self.apply_loss(&mut state, -pnl)
        };

        // 3. Bounds
        let mut capped = false;
        if state.account_size <= 0.0 {
            state.risk_pool = 0.0;
            action = PoolAction::AccountDepleted;
        } else {
            let cap = self.params.cap_for(state.account_size);
            if state.risk_pool > cap {
                state.risk_pool = cap;
                capped = true;
            }
            if state.risk_pool < 0.0 {
                state.risk_pool = 0.0;
            }
        }

        let record = StepRecord {
            index,
            ticker: trade.ticker.clone(),
            realized_pnl: Some(pnl),
            action,
            account_before,
            account_after: state.account_size,
            pool_before,
            pool_after_gate,
            pool_after: state.risk_pool,
            gate_snapped,
            capped,
            win_rate: state.trailing.win_rate(),
            trading_well: state.trading_well,
        };
        tracing::debug!(
            index,
            ticker = %trade.ticker,
            pnl,
            account = state.account_size,
            pool = state.risk_pool,
            win_rate = record.win_rate,
            action = action.label(),
            "trade applied"
        );

        (state, record)
    }

    fn apply_win(&self, state: &mut SimulationState, amount: f64) -> PoolAction {
        let k = self.params.damping_k;
        state.account_size += amount;
        let threshold = self.params.threshold_for(state.account_size);

        if state.risk_pool >= threshold {
            state.risk_pool += amount;
            return PoolAction::WinLinear;
        }

        let potential = grow(state.risk_pool, amount, k);
        if potential < threshold {
            state.risk_pool = potential;
            return PoolAction::WinDamped;
        }

        // potential >= threshold > pool, so pool > 0 here
        let to_threshold = amount_to_reach(state.risk_pool, threshold, k);
        state.risk_pool = grow(state.risk_pool, to_threshold, k) + (amount - to_threshold);
        PoolAction::WinCrossed
    }

    fn apply_loss(&self, state: &mut SimulationState, amount: f64) -> PoolAction {
        let k = self.params.damping_k;
        state.account_size -= amount;
        let threshold = self.params.threshold_for(state.account_size);

        if state.risk_pool <= threshold {
            state.risk_pool = shrink(state.risk_pool, amount, k);
            return PoolAction::LossDamped;
        }

        let headroom = state.risk_pool - threshold;
        if amount <= headroom {
            state.risk_pool -= amount;
            return PoolAction::LossLinear;
        }

        state.risk_pool = shrink(threshold, amount - headroom, k);
        PoolAction::LossCrossed
    }

    fn skip(
        &self,
        state: SimulationState,
        index: usize,
        trade: &TradeOutcome,
        reason: SkipReason,
    ) -> (SimulationState, StepRecord) {
        tracing::warn!(index, ticker = %trade.ticker, ?reason, "trade skipped");
        let record = StepRecord {
            index,
            ticker: trade.ticker.clone(),
            realized_pnl: trade.realized_pnl.filter(|p| p.is_finite()),
            action: PoolAction::Skipped(reason),
            account_before: state.account_size,
            account_after: state.account_size,
            pool_before: state.risk_pool,
            pool_after_gate: state.risk_pool,
            pool_after: state.risk_pool,
            gate_snapped: false,
            capped: false,
            win_rate: state.trailing.win_rate(),
            trading_well: state.trading_well,
        };
        (state, record)
    }

    fn summarize(&self, state: &SimulationState, log: &AuditLog) -> SimulationSummary {
        let skipped = log.skipped().count() as u32;
        SimulationSummary {
            account_size: state.account_size,
            risk_pool: state.risk_pool,
            win_rate: state.trailing.win_rate(),
            trading_well: state.trading_well,
            threshold: self.params.threshold_for(state.account_size).max(0.0),
            cap: self.params.cap_for(state.account_size).max(0.0),
            trades_applied: log.len() as u32 - skipped,
            trades_skipped: skipped,
        }
    }
}

/// Run a full simulation with the given parameters.
pub fn simulate(
    initial_balance: f64,
    trades: &[TradeOutcome],
    params: SizingParams,
) -> Result<SimulationReport> {
    Simulator::new(params)?.run(initial_balance, trades)
}

// ─── RiskPoolSimulation (JS-facing handle) ───────────────────────────────────

#[wasm_bindgen]
pub struct RiskPoolSimulation {
    pub(crate) simulator: Simulator,
    pub(crate) initial_balance: f64,
    pub(crate) report: SimulationReport,
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl RiskPoolSimulation {
    pub fn try_new(initial_balance: f64, params: SizingParams) -> Result<Self> {
        let simulator = Simulator::new(params)?;
        let report = simulator.run(initial_balance, &[])?;
        Ok(Self { simulator, initial_balance, report })
    }

    /// Replace the current result with a full re-fold over `trades`.
    pub fn run_core(&mut self, trades: &[TradeOutcome]) -> Result<&SimulationSummary> {
        self.report = self.simulator.run(self.initial_balance, trades)?;
        Ok(&self.report.summary)
    }

    pub fn report(&self) -> &SimulationReport {
        &self.report
    }

    pub fn summary(&self) -> &SimulationSummary {
        &self.report.summary
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sim() -> Simulator {
        Simulator::default()
    }

    fn start(balance: f64) -> SimulationState {
        SimulationState::initial(balance, &SizingParams::default()).unwrap()
    }

    #[test]
    fn initial_pool_is_threshold() {
        let state = start(1000.0);
        assert!((state.risk_pool - 5.0).abs() < EPS);
        assert!(!state.trading_well);
        assert!(state.trailing.is_empty());
    }

    #[test]
    fn rejects_non_positive_or_non_finite_balance() {
        let p = SizingParams::default();
        for bad in [0.0, -100.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                SimulationState::initial(bad, &p),
                Err(SimulationError::InvalidInitialBalance(_))
            ));
        }
    }

    #[test]
    fn win_above_threshold_is_linear() {
        let mut state = start(1000.0);
        state.risk_pool = 20.0;
        let (next, rec) = sim().step(state, 0, &TradeOutcome::win("A", 10.0));
        assert_eq!(rec.action, PoolAction::WinLinear);
        assert!((next.risk_pool - 30.0).abs() < EPS);
        assert!((next.account_size - 1010.0).abs() < EPS);
    }

    #[test]
    fn small_win_below_threshold_stays_damped() {
        let mut state = start(1000.0);
        state.risk_pool = 1.0;
        // Already trading well, so no gate snap on this win
        state.trading_well = true;
        state.trailing.record_outcome(true);
        // grow(1, 2) = 1 + 2/21
        let (next, rec) = sim().step(state, 0, &TradeOutcome::win("A", 2.0));
        assert_eq!(rec.action, PoolAction::WinDamped);
        assert!((next.risk_pool - (1.0 + 2.0 / 21.0)).abs() < EPS);
    }

    #[test]
    fn win_crossing_threshold_lands_on_it_then_goes_linear() {
        let mut state = start(1000.0);
        state.risk_pool = 4.0;
        state.trading_well = true;
        state.trailing.record_outcome(true);
        let (next, rec) = sim().step(state, 0, &TradeOutcome::win("A", 10.0));
        assert_eq!(rec.action, PoolAction::WinCrossed);

        let threshold = 1010.0 * 0.005;
        let x = (threshold - 4.0) * (4.0 + 20.0) / 4.0;
        assert!((next.risk_pool - (threshold + 10.0 - x)).abs() < EPS);
    }

    #[test]
    fn loss_at_or_below_threshold_is_damped() {
        let mut state = start(1000.0);
        state.risk_pool = 2.0;
        // shrink(2, 10) = 2 - 10*2/22
        let (next, rec) = sim().step(state, 0, &TradeOutcome::loss("A", 10.0));
        assert_eq!(rec.action, PoolAction::LossDamped);
        assert!((next.risk_pool - (2.0 - 20.0 / 22.0)).abs() < EPS);
        assert!((next.account_size - 990.0).abs() < EPS);
    }

    #[test]
    fn loss_past_headroom_is_damped_from_threshold() {
        let mut state = start(1000.0);
        state.risk_pool = 6.0;
        let (next, rec) = sim().step(state, 0, &TradeOutcome::loss("A", 10.0));
        assert_eq!(rec.action, PoolAction::LossCrossed);

        let threshold = 990.0 * 0.005;
        let rest = 10.0 - (6.0 - threshold);
        let expected = threshold - rest * threshold / (threshold + 20.0);
        assert!((next.risk_pool - expected).abs() < EPS);
    }

    #[test]
    fn zero_pnl_counts_as_a_loss_without_moving_money() {
        let state = start(1000.0);
        let (next, rec) = sim().step(state, 0, &TradeOutcome::new("A", Some(0.0)));
        assert_eq!(rec.action, PoolAction::LossDamped);
        assert_eq!(next.account_size, 1000.0);
        assert!((next.risk_pool - 5.0).abs() < EPS);
        assert_eq!(next.trailing.wins(), 0);
        assert_eq!(next.trailing.len(), 1);
    }

    #[test]
    fn oversized_loss_floors_pool_at_zero() {
        let mut state = start(1000.0);
        state.risk_pool = 1.0;
        // shrink(1, 500) would be negative
        let (next, _) = sim().step(state, 0, &TradeOutcome::loss("A", 500.0));
        assert_eq!(next.risk_pool, 0.0);
        assert!((next.account_size - 500.0).abs() < EPS);
    }

    #[test]
    fn blown_account_zeroes_pool() {
        let state = start(100.0);
        let (next, rec) = sim().step(state, 0, &TradeOutcome::loss("A", 150.0));
        assert_eq!(rec.action, PoolAction::AccountDepleted);
        assert_eq!(next.risk_pool, 0.0);
        assert!(next.account_size < 0.0);

        let (next, rec) = sim().step(next, 1, &TradeOutcome::win("B", 10.0));
        assert_eq!(rec.action, PoolAction::AccountDepleted);
        assert_eq!(next.risk_pool, 0.0);
    }

    #[test]
    fn non_finite_pnl_is_skipped() {
        let state = start(1000.0);
        let before = state.clone();
        let (next, rec) = sim().step(state, 3, &TradeOutcome::new("A", Some(f64::NAN)));
        assert_eq!(rec.action, PoolAction::Skipped(SkipReason::NonFiniteOutcome));
        assert_eq!(next, before);
        assert_eq!(rec.index, 3);
        assert_eq!(rec.realized_pnl, None);
    }

    #[test]
    fn non_finite_runs_compare_equal() {
        let trades = vec![
            TradeOutcome::new("X", Some(f64::NAN)),
            TradeOutcome::new("Y", Some(f64::INFINITY)),
            TradeOutcome::win("Z", 10.0),
        ];
        let a = sim().run(1000.0, &trades).unwrap();
        let b = sim().run(1000.0, &trades).unwrap();
        assert_eq!(a.state, b.state);
        assert_eq!(a.log, b.log);
        assert_eq!(a, b);
    }

    #[test]
    fn oversized_window_is_rejected_before_folding() {
        let params = SizingParams { trailing_window: usize::MAX, ..Default::default() };
        let result = simulate(1000.0, &[TradeOutcome::win("A", 10.0)], params);
        assert!(matches!(result, Err(SimulationError::InvalidParams(_))));
        assert!(RiskPoolSimulation::try_new(1000.0, params).is_err());
    }

    #[test]
    fn summary_counts_applied_and_skipped() {
        let trades = vec![
            TradeOutcome::win("A", 10.0),
            TradeOutcome::unknown("B"),
            TradeOutcome::loss("C", 5.0),
        ];
        let report = sim().run(1000.0, &trades).unwrap();
        assert_eq!(report.summary.trades_applied, 2);
        assert_eq!(report.summary.trades_skipped, 1);
        assert_eq!(report.log.len(), 3);
        assert!((report.summary.account_size - 1005.0).abs() < EPS);
    }

    #[test]
    fn handle_rerun_replaces_state() {
        let mut handle = RiskPoolSimulation::try_new(1000.0, SizingParams::default()).unwrap();
        handle.run_core(&[TradeOutcome::win("A", 50.0)]).unwrap();
        assert!((handle.summary().account_size - 1050.0).abs() < EPS);

        handle.run_core(&[TradeOutcome::loss("A", 50.0)]).unwrap();
        assert!((handle.summary().account_size - 950.0).abs() < EPS);
        assert_eq!(handle.report().log.len(), 1);
    }
}
