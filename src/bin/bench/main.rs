// Risk-Pool Benchmark Runner: Monte Carlo over synthetic trade histories
// Seedable PRNG, per-step invariant checks, optional per-step audit trail
//
// Usage:
//   cargo run --release --bin bench                     # Run all scenarios (30 runs each)
//   cargo run --release --bin bench -- --runs 5         # Quick mode (5 runs each)
//   cargo run --release --bin bench -- --trades 1000    # Longer histories
//   cargo run --release --bin bench -- DRAWDOWN         # Filter by name
//   cargo run --release --bin bench -- --time-series    # Enable JSONL output
//   cargo run --release --bin bench -- --seed 42        # Custom base seed

#[cfg(not(target_arch = "wasm32"))]
mod history;
#[cfg(not(target_arch = "wasm32"))]
mod invariants;
#[cfg(not(target_arch = "wasm32"))]
mod monte_carlo;
#[cfg(not(target_arch = "wasm32"))]
mod report;
#[cfg(not(target_arch = "wasm32"))]
mod runner;
#[cfg(not(target_arch = "wasm32"))]
mod scenarios;
#[cfg(not(target_arch = "wasm32"))]
mod time_series;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    runner::run();
}

// The bench is native only.
#[cfg(target_arch = "wasm32")]
fn main() {}
