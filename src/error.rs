// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Risk-Pool Sizing Engine - Errors

use thiserror::Error;

/// Errors raised by the sizing engine.
///
/// Per-trade data problems are never errors: they are recorded as skipped
/// steps in the audit log and the fold keeps going.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("initial balance must be a positive finite amount, got {0}")]
    InvalidInitialBalance(f64),

    #[error("invalid sizing parameters: {0}")]
    InvalidParams(String),

    #[error("stop {stop} leaves no risk per share against entry {entry}")]
    InvalidStop { entry: f64, stop: f64 },

    #[error("could not decode input: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_offending_values() {
        let err = SimulationError::InvalidInitialBalance(-5.0);
        assert_eq!(
            err.to_string(),
            "initial balance must be a positive finite amount, got -5"
        );

        let err = SimulationError::InvalidStop { entry: 100.0, stop: 100.0 };
        assert!(err.to_string().contains("100"));
    }
}
