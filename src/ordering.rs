// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Risk-Pool Sizing Engine - History Ordering

//! The fold compounds trade by trade, so it must see history oldest first.
//!
//! The dashboard lists trades newest first for display. When every trade
//! carries a close timestamp the history is stable-sorted ascending here;
//! otherwise the caller's order is trusted and only reported on.

use std::borrow::Cow;

use crate::types::TradeOutcome;

/// What [`prepare_history`] found and did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderingReport {
    /// Every trade had a `closed_at` timestamp.
    pub fully_timestamped: bool,
    /// The input was re-sorted by timestamp.
    pub reordered: bool,
    /// Timestamped trades appear out of ascending order and could not be
    /// repaired because some trades have no timestamp.
    pub out_of_order: bool,
}

/// Return the history in chronological order, borrowing when no sort is needed.
pub fn prepare_history(trades: &[TradeOutcome]) -> (Cow<'_, [TradeOutcome]>, OrderingReport) {
    let fully_timestamped = !trades.is_empty() && trades.iter().all(|t| t.closed_at.is_some());
    let ascending = is_ascending(trades);

    let mut report = OrderingReport {
        fully_timestamped,
        ..Default::default()
    };

    if ascending {
        return (Cow::Borrowed(trades), report);
    }

    if fully_timestamped {
        let mut sorted = trades.to_vec();
        sorted.sort_by_key(|t| t.closed_at);
        report.reordered = true;
        tracing::warn!(trades = trades.len(), "trade history was not chronological; sorted by close time");
        return (Cow::Owned(sorted), report);
    }

    report.out_of_order = true;
    tracing::warn!(
        trades = trades.len(),
        "timestamped trades are out of order but history is only partly timestamped; using given order"
    );
    (Cow::Borrowed(trades), report)
}

/// Timestamped trades are non-decreasing; untimestamped trades are ignored.
pub fn is_ascending(trades: &[TradeOutcome]) -> bool {
    let mut last: Option<i64> = None;
    for ts in trades.iter().filter_map(|t| t.closed_at) {
        if let Some(prev) = last {
            if ts < prev {
                return false;
            }
        }
        last = Some(ts);
    }
    true
}
