//! Adapter layer: converts the engine's f64 results into cent-rounded
//! `Decimal` values for display.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::SimulationSummary;

/// Convert f64 to Decimal (lossy but sufficient for display).
pub fn to_decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

/// Round a dollar amount to cents, half away from zero.
pub fn to_cents(v: f64) -> Decimal {
    to_decimal(v).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Summary as the dashboard shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySummary {
    pub account_size: Decimal,
    pub risk_pool: Decimal,
    pub threshold: Decimal,
    pub cap: Decimal,
    /// Percent, one decimal place.
    pub win_rate_pct: Decimal,
    /// Pool as percent of account, two decimal places.
    pub risk_pct: Decimal,
    pub trading_well: bool,
}

pub fn to_display(summary: &SimulationSummary) -> DisplaySummary {
    DisplaySummary {
        account_size: to_cents(summary.account_size),
        risk_pool: to_cents(summary.risk_pool),
        threshold: to_cents(summary.threshold),
        cap: to_cents(summary.cap),
        win_rate_pct: to_decimal(summary.win_rate * 100.0)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        risk_pct: to_decimal(summary.risk_pct() * 100.0)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        trading_well: summary.trading_well,
    }
}
