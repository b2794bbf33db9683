// Benchmark Report Types
// Structured output for offline analysis of the sizing fold

use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let half_width = 1.96 * std_dev / (n as f64).sqrt(); // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - half_width,
            ci_upper: mean + half_width,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BenchResult {
    pub scenario: String,
    pub name: String,
    pub category: String,
    pub seed: u64,
    pub pass: bool,
    pub trades: usize,
    pub wins: u32,
    pub losses: u32,
    pub gaps: u32,
    pub trades_applied: u32,
    pub trades_skipped: u32,
    pub final_account: f64,
    pub final_pool: f64,
    pub final_win_rate: f64,
    pub peak_pool_pct: f64,
    pub cap_hits: u32,
    pub cap_breaches: u32,
    pub negative_pools: u32,
    pub gate_snaps: u32,
    pub depleted_steps: u32,
    pub window_mismatches: u32,
    pub deterministic: bool,
    pub order_repaired: bool,
    pub elapsed_us: u128,
}

// ─── Monte Carlo Report (per-scenario aggregation) ──────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloReport {
    pub scenario_name: String,
    pub label: String,
    pub category: String,
    pub n_runs: usize,
    pub pass_rate: f64,
    pub final_account: Stats,
    pub final_pool: Stats,
    pub final_win_rate: Stats,
    pub peak_pool_pct: Stats,
    pub cap_hits: Stats,
    pub gate_snaps: Stats,
    pub elapsed_us: Stats,
    pub individual_runs: Vec<BenchResult>,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub summary: Summary,
    pub scenarios: Vec<MonteCarloReport>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}
