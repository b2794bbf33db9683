// Per-Step JSONL Time Series Recorder
// One JSON line per trade for charting the pool outside the dashboard

use riskpool_engine::StepRecord;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct StepSnapshot {
    pub index: usize,
    pub ticker: String,
    pub realized_pnl: Option<f64>,
    pub action: &'static str,
    pub account: f64,
    pub pool: f64,
    pub pool_pct: f64,
    pub win_rate: f64,
    pub trading_well: bool,
    pub gate_snapped: bool,
    pub capped: bool,
}

impl StepSnapshot {
    pub fn from_record(rec: &StepRecord) -> Self {
        let pool_pct = if rec.account_after > 0.0 {
            rec.pool_after / rec.account_after
        } else {
            0.0
        };
        Self {
            index: rec.index,
            ticker: rec.ticker.clone(),
            realized_pnl: rec.realized_pnl.filter(|p| p.is_finite()),
            action: rec.action.label(),
            account: rec.account_after,
            pool: rec.pool_after,
            pool_pct,
            win_rate: rec.win_rate,
            trading_well: rec.trading_well,
            gate_snapped: rec.gate_snapped,
            capped: rec.capped,
        }
    }
}

/// Time series recorder that accumulates snapshots and writes JSONL
pub struct TimeSeriesRecorder {
    snapshots: Vec<StepSnapshot>,
}

impl TimeSeriesRecorder {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub fn record(&mut self, rec: &StepRecord) {
        self.snapshots.push(StepSnapshot::from_record(rec));
    }

    /// Write all snapshots to a JSONL file
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        for snapshot in &self.snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}
