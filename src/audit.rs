// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Risk-Pool Sizing Engine - Audit Log

use serde::{Deserialize, Serialize};

use crate::types::{PoolAction, StepRecord};

/// Per-step audit trail of one simulation run.
///
/// Records are kept in fold order. Lines are rendered on demand so the log
/// stays cheap when the display layer only wants the numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    records: Vec<StepRecord>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { records: Vec::with_capacity(n) }
    }

    pub fn push(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &StepRecord> {
        self.records.iter().filter(|r| r.action.is_skip())
    }

    pub fn gate_snaps(&self) -> impl Iterator<Item = &StepRecord> {
        self.records.iter().filter(|r| r.gate_snapped)
    }

    /// Human-readable lines, one per record.
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(format_line).collect()
    }
}

/// Render one record as a single audit line.
pub fn format_line(r: &StepRecord) -> String {
    if let PoolAction::Skipped(_) = r.action {
        return format!(
            "#{} {}: {} (balance {:.2}, pool {:.2})",
            r.index,
            r.ticker,
            r.action.label(),
            r.account_after,
            r.pool_after,
        );
    }

    let mut line = format!(
        "#{} {}: pnl {:+.2} | balance {:.2} -> {:.2} | pool {:.2} -> {:.2} | win rate {:.1}% [{}]",
        r.index,
        r.ticker,
        r.realized_pnl.unwrap_or(0.0),
        r.account_before,
        r.account_after,
        r.pool_before,
        r.pool_after,
        r.win_rate * 100.0,
        r.action.label(),
    );
    if r.gate_snapped {
        line.push_str(&format!(" (gate recovered, pool snapped to {:.2})", r.pool_after_gate));
    }
    if r.capped {
        line.push_str(" (capped)");
    }
    line
}
