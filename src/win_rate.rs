// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Risk-Pool Sizing Engine - Trailing Win-Rate Gate

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::params::{TRAILING_WINDOW, WIN_RATE_GATE};

const PREALLOCATED_OUTCOMES: usize = 64;

// ---------------------------------------------------------------------------
// WinRateTracker - rolling window of win/loss outcomes
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WinRateTracker {
    window: VecDeque<bool>,
    capacity: usize,
    gate: f64,
}

impl Default for WinRateTracker {
    fn default() -> Self {
        Self::new(TRAILING_WINDOW, WIN_RATE_GATE)
    }
}

impl WinRateTracker {
    /// A zero capacity is bumped to one so the window can always hold the
    /// latest outcome. Storage grows on demand; only a small window is
    /// preallocated.
    pub fn new(capacity: usize, gate: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity.min(PREALLOCATED_OUTCOMES)),
            capacity,
            gate,
        }
    }

    /// Push the newest outcome, evicting the oldest once full.
    pub fn record_outcome(&mut self, is_win: bool) {
        self.window.push_back(is_win);
        while self.window.len() > self.capacity {
            self.window.pop_front();
        }
    }

    /// Wins over window length, 0.0 when empty.
    pub fn win_rate(&self) -> f64 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.wins() as f64 / self.window.len() as f64
    }

    pub fn is_trading_well(&self) -> bool {
        !self.window.is_empty() && self.win_rate() >= self.gate
    }

    pub fn wins(&self) -> usize {
        self.window.iter().filter(|&&w| w).count()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Outcomes oldest first.
    pub fn outcomes(&self) -> impl Iterator<Item = bool> + '_ {
        self.window.iter().copied()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window_is_not_trading_well() {
        let tracker = WinRateTracker::default();
        assert_eq!(tracker.win_rate(), 0.0);
        assert!(!tracker.is_trading_well());
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_zero_gate_still_requires_an_outcome() {
        let mut tracker = WinRateTracker::new(8, 0.0);
        assert!(!tracker.is_trading_well());
        tracker.record_outcome(false);
        assert!(tracker.is_trading_well());
    }

    #[test]
    fn test_three_of_eight_meets_gate() {
        let mut tracker = WinRateTracker::default();
        for _ in 0..5 {
            tracker.record_outcome(false);
        }
        tracker.record_outcome(true);
        tracker.record_outcome(true);
        assert!(!tracker.is_trading_well());
        tracker.record_outcome(true);
        assert_eq!(tracker.len(), 8);
        assert!((tracker.win_rate() - 0.375).abs() < f64::EPSILON);
        assert!(tracker.is_trading_well());
    }

    #[test]
    fn test_window_evicts_oldest_first() {
        let mut tracker = WinRateTracker::default();
        tracker.record_outcome(true);
        for _ in 0..8 {
            tracker.record_outcome(false);
        }
        // The single win was the oldest entry and is gone
        assert_eq!(tracker.len(), 8);
        assert_eq!(tracker.wins(), 0);
        assert!(tracker.outcomes().all(|w| !w));
    }

    #[test]
    fn test_window_never_exceeds_capacity() {
        let mut tracker = WinRateTracker::new(3, 0.5);
        for i in 0..50 {
            tracker.record_outcome(i % 3 == 0);
            assert!(tracker.len() <= 3);
            let expected = tracker.wins() as f64 / tracker.len() as f64;
            assert_eq!(tracker.win_rate(), expected);
        }
    }

    #[test]
    fn test_zero_capacity_is_bumped() {
        let mut tracker = WinRateTracker::new(0, 0.5);
        tracker.record_outcome(true);
        tracker.record_outcome(false);
        assert_eq!(tracker.capacity(), 1);
        assert_eq!(tracker.len(), 1);
        assert!(!tracker.is_trading_well());
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut tracker = WinRateTracker::new(usize::MAX, 0.375);
        tracker.record_outcome(true);
        tracker.record_outcome(false);
        assert_eq!(tracker.capacity(), usize::MAX);
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.win_rate(), 0.5);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut tracker = WinRateTracker::default();
        tracker.record_outcome(true);
        tracker.record_outcome(false);
        let json = serde_json::to_string(&tracker).unwrap();
        let back: WinRateTracker = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tracker);
    }
}
