// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Risk-Pool Sizing Engine

pub mod types;
pub mod params;
pub mod error;
pub mod win_rate;
pub mod adjuster;
pub mod ordering;
pub mod audit;
pub mod simulation;
pub mod sizing;
pub mod adapter;

pub use types::*;
pub use error::{Result, SimulationError};
pub use params::SizingParams;
pub use simulation::{simulate, RiskPoolSimulation, SimulationReport, SimulationState, Simulator};
pub use win_rate::WinRateTracker;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

fn to_js_error(err: SimulationError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl RiskPoolSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(initial_balance: f64) -> std::result::Result<RiskPoolSimulation, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Self::try_new(initial_balance, SizingParams::default()).map_err(to_js_error)
    }

    /// Construct with a (possibly partial) parameter object.
    pub fn with_params(
        initial_balance: f64,
        params: JsValue,
    ) -> std::result::Result<RiskPoolSimulation, JsValue> {
        let params: SizingParams = if params.is_undefined() || params.is_null() {
            SizingParams::default()
        } else {
            serde_wasm_bindgen::from_value(params)
                .map_err(|e| to_js_error(SimulationError::Decode(e.to_string())))?
        };
        Self::try_new(initial_balance, params).map_err(to_js_error)
    }

    /// Re-fold the whole trade list (oldest first) and return the summary.
    pub fn run(&mut self, trades: JsValue) -> std::result::Result<JsValue, JsValue> {
        let trades: Vec<TradeOutcome> = serde_wasm_bindgen::from_value(trades)
            .map_err(|e| to_js_error(SimulationError::Decode(e.to_string())))?;
        let summary = self.run_core(&trades).map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(summary).unwrap_or(JsValue::NULL))
    }

    pub fn get_summary(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.summary()).unwrap_or(JsValue::NULL)
    }

    /// Summary with money rounded to cents.
    pub fn get_display_summary(&self) -> JsValue {
        let display = adapter::to_display(self.summary());
        serde_wasm_bindgen::to_value(&display).unwrap_or(JsValue::NULL)
    }

    /// Per-trade audit records, for charting the pool over time.
    pub fn get_history(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.report.log.records()).unwrap_or(JsValue::NULL)
    }

    pub fn get_log_lines(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.report.log.lines()).unwrap_or(JsValue::NULL)
    }

    /// Echo the audit lines to the browser console.
    pub fn dump_log(&self) {
        for line in self.report.log.lines() {
            log(&line);
        }
    }

    pub fn get_account_size(&self) -> f64 { self.report.summary.account_size }
    pub fn get_risk_pool(&self) -> f64 { self.report.summary.risk_pool }
    pub fn get_win_rate(&self) -> f64 { self.report.summary.win_rate }
    pub fn is_trading_well(&self) -> bool { self.report.summary.trading_well }

    /// Whole shares the current pool allows between `entry` and `stop`.
    pub fn position_size(&self, entry: f64, stop: f64) -> std::result::Result<JsValue, JsValue> {
        let size = sizing::position_size(self.report.summary.risk_pool, entry, stop)
            .map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&size).unwrap_or(JsValue::NULL))
    }

    /// Drop the last result and return to the initial balance.
    pub fn reset(&mut self) {
        if let Ok(summary) = self.run_core(&[]) {
            tracing::info!(balance = summary.account_size, pool = summary.risk_pool, "risk pool reset");
        }
    }
}
