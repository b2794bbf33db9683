// Monte Carlo Infrastructure: N runs per scenario with statistical aggregation
// Each scenario runs N times with seeds base..base+N, computing mean ± 95% CI

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use riskpool_engine::*;

use crate::history::HistoryGenerator;
use crate::invariants::{PoolBoundsTracker, WindowTracker};
use crate::report::*;
use crate::scenarios::Scenario;
use crate::time_series::TimeSeriesRecorder;

use std::time::Instant;

/// Run a single scenario iteration with a specific seed.
pub fn run_single(
    scenario: &Scenario,
    seed: u64,
    trade_override: Option<usize>,
    time_series_dir: Option<&std::path::Path>,
) -> Result<BenchResult> {
    let params = SizingParams::default();
    let simulator = Simulator::new(params)?;
    let n_trades = trade_override.unwrap_or(scenario.trades);

    let mut gen = HistoryGenerator::new(ChaCha8Rng::seed_from_u64(seed));
    let mut trades: Vec<TradeOutcome> = (0..n_trades)
        .map(|i| {
            let win_prob = scenario.win_prob_curve.map_or(scenario.win_prob, |curve| curve(i));
            gen.next_trade(i, win_prob, scenario.avg_win, scenario.avg_loss, scenario.unknown_prob)
        })
        .collect();
    if scenario.newest_first {
        trades.reverse();
    }

    let start = Instant::now();
    let report = simulator.run(scenario.initial_balance, &trades)?;
    let elapsed_us = start.elapsed().as_micros();

    // Same inputs must give bit-identical output
    let rerun = simulator.run(scenario.initial_balance, &trades)?;
    let deterministic = rerun.summary.risk_pool.to_bits() == report.summary.risk_pool.to_bits()
        && rerun.summary.account_size.to_bits() == report.summary.account_size.to_bits()
        && rerun.log == report.log;

    let mut bounds = PoolBoundsTracker::new(params.max_pool_pct);
    let mut window = WindowTracker::new(params.trailing_window);
    let mut time_series = time_series_dir.map(|_| TimeSeriesRecorder::new());
    for rec in report.log.records() {
        bounds.record_step(rec);
        window.record_step(rec);
        if let Some(ref mut ts) = time_series {
            ts.record(rec);
        }
    }

    if let (Some(ts), Some(dir)) = (&time_series, time_series_dir) {
        let path = dir.join(format!("seed-{}.jsonl", seed));
        if let Err(e) = ts.write_jsonl(&path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write time series");
        }
    }

    let summary = &report.summary;
    let criteria = &scenario.criteria;
    let order_repaired = report.ordering.reordered;

    let mut pass = true;
    if criteria.require_bounds && !bounds.holds() {
        pass = false;
    }
    if criteria.require_determinism && !deterministic {
        pass = false;
    }
    if criteria.require_window_consistency && window.mismatches > 0 {
        pass = false;
    }
    if let Some(min) = criteria.min_gate_snaps {
        if bounds.gate_snaps < min {
            pass = false;
        }
    }
    if criteria.require_skips_match_gaps && summary.trades_skipped != gen.unknown_count {
        pass = false;
    }
    if criteria.require_order_repaired && !order_repaired {
        pass = false;
    }

    Ok(BenchResult {
        scenario: scenario.label.to_string(),
        name: scenario.name.to_string(),
        category: scenario.category.to_string(),
        seed,
        pass,
        trades: n_trades,
        wins: gen.win_count,
        losses: gen.loss_count,
        gaps: gen.unknown_count,
        trades_applied: summary.trades_applied,
        trades_skipped: summary.trades_skipped,
        final_account: summary.account_size,
        final_pool: summary.risk_pool,
        final_win_rate: summary.win_rate,
        peak_pool_pct: bounds.peak_pool_pct,
        cap_hits: bounds.cap_hits,
        cap_breaches: bounds.cap_breaches,
        negative_pools: bounds.negative_pools,
        gate_snaps: bounds.gate_snaps,
        depleted_steps: bounds.depleted_steps,
        window_mismatches: window.mismatches,
        deterministic,
        order_repaired,
        elapsed_us,
    })
}

/// Run Monte Carlo: N runs of a scenario, aggregate stats.
pub fn run_monte_carlo(
    scenario: &Scenario,
    n_runs: usize,
    base_seed: u64,
    trade_override: Option<usize>,
    time_series_base: Option<&std::path::Path>,
) -> Result<MonteCarloReport> {
    let ts_dir = time_series_base.map(|base| base.join(scenario.name.to_lowercase()));

    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed + i as u64;
        results.push(run_single(scenario, seed, trade_override, ts_dir.as_deref())?);
    }

    Ok(aggregate(scenario, results))
}

/// Aggregate individual runs into a MonteCarloReport.
fn aggregate(scenario: &Scenario, results: Vec<BenchResult>) -> MonteCarloReport {
    let n = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let pass_rate = if n > 0 { passed as f64 / n as f64 } else { 0.0 };

    let stat = |f: fn(&BenchResult) -> f64| {
        Stats::from_samples(&results.iter().map(f).collect::<Vec<_>>())
    };

    MonteCarloReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        n_runs: n,
        pass_rate,
        final_account: stat(|r| r.final_account),
        final_pool: stat(|r| r.final_pool),
        final_win_rate: stat(|r| r.final_win_rate),
        peak_pool_pct: stat(|r| r.peak_pool_pct),
        cap_hits: stat(|r| r.cap_hits as f64),
        gate_snaps: stat(|r| r.gate_snaps as f64),
        elapsed_us: stat(|r| r.elapsed_us as f64),
        individual_runs: results,
    }
}
