// Benchmark Runner: CLI parsing, scenario loop, results table, JSON report

use crate::monte_carlo;
use crate::report::*;
use crate::scenarios::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

/// Share of runs that must pass for a scenario to pass.
const SCENARIO_PASS_RATE: f64 = 0.933;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    trades: Option<usize>,
    time_series: bool,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 30,
        seed: 0,
        trades: None,
        time_series: false,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(30);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--trades" => {
                i += 1;
                if i < args.len() {
                    cli.trades = args[i].parse().ok();
                }
            }
            "--time-series" => {
                cli.time_series = true;
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("riskpool_engine=warn,bench=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

// ─── Runner ─────────────────────────────────────────────────────────────────

pub fn run() {
    init_tracing();
    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    let ts_dir = if cli.time_series {
        Some(std::path::Path::new("benchmark-results/time-series").to_path_buf())
    } else {
        None
    };

    println!("\n  Risk-Pool Benchmark Runner v0.1.0");
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {}", cli.runs, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<34} {:>5} {:>12} {:>10} {:>8} {:>6} {:>8}",
        "Scenario", "Pass%", "Account", "Pool", "Peak%", "Snaps", "Time");
    println!("  {}", "-".repeat(90));

    let suite_start = Instant::now();
    let mut mc_reports = Vec::new();

    for scenario in &to_run {
        let report = match monte_carlo::run_monte_carlo(
            scenario,
            cli.runs,
            cli.seed,
            cli.trades,
            ts_dir.as_deref(),
        ) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(scenario = scenario.name, error = %e, "scenario aborted");
                std::process::exit(2);
            }
        };

        let pass_pct = report.pass_rate * 100.0;
        let status = if report.pass_rate >= SCENARIO_PASS_RATE { "PASS" } else { "FAIL" };

        println!("  {:<34} {:>4}% {:>12.2} {:>10.2} {:>7.2}% {:>6.1} {:>6.0}us  {}",
            report.label,
            pass_pct as u32,
            report.final_account.mean,
            report.final_pool.mean,
            report.peak_pool_pct.max * 100.0,
            report.gate_snaps.mean,
            report.elapsed_us.mean,
            status,
        );

        mc_reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Summary ────────────────────────────────────────────────────────

    let total = mc_reports.len();
    let passed = mc_reports.iter().filter(|r| r.pass_rate >= SCENARIO_PASS_RATE).count();
    let failed = total - passed;

    println!("  {}", "-".repeat(90));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total, passed, failed, suite_elapsed.as_secs_f64());

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let timestamp = format!("{}", ts);

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: "0.1.0",
        prng: "ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total as f64,
        },
        scenarios: mc_reports,
    };

    let dir = std::path::Path::new("benchmark-results");
    let path = dir.join(format!("bench-{}.json", timestamp));
    let written = std::fs::create_dir_all(dir)
        .and_then(|_| {
            serde_json::to_string_pretty(&report)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
        })
        .and_then(|json| std::fs::write(&path, json));
    match written {
        Ok(()) => println!("  Results saved to: {}\n", path.display()),
        Err(e) => tracing::error!(path = %path.display(), error = %e, "failed to write benchmark report"),
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
