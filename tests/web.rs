#![cfg(target_arch = "wasm32")]

// Run with: wasm-pack test --node

use riskpool_engine::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

const EPS: f64 = 1e-9;

fn js_trades(trades: &[TradeOutcome]) -> JsValue {
    serde_wasm_bindgen::to_value(trades).unwrap()
}

#[wasm_bindgen_test]
fn run_decodes_js_trade_array() {
    let mut sim = RiskPoolSimulation::new(1000.0).unwrap();
    let trades = js_trades(&[TradeOutcome::win("AAPL", 50.0)]);
    sim.run(trades).unwrap();

    assert!((sim.get_account_size() - 1050.0).abs() < EPS);
    assert!((sim.get_risk_pool() - 52.5).abs() < EPS);
    assert!(sim.is_trading_well());
}

#[wasm_bindgen_test]
fn run_skips_missing_pnl_from_js() {
    let mut sim = RiskPoolSimulation::new(1000.0).unwrap();
    let trades = js_trades(&[TradeOutcome::unknown("MSFT"), TradeOutcome::loss("AAPL", 30.0)]);
    sim.run(trades).unwrap();

    assert!((sim.get_account_size() - 970.0).abs() < EPS);
    assert_eq!(sim.summary().trades_skipped, 1);
}

#[wasm_bindgen_test]
fn run_rejects_malformed_input() {
    let mut sim = RiskPoolSimulation::new(1000.0).unwrap();
    assert!(sim.run(JsValue::from_str("not a trade list")).is_err());
    assert!((sim.get_risk_pool() - 5.0).abs() < EPS);
}

#[wasm_bindgen_test]
fn with_params_rejects_oversized_window() {
    let params = SizingParams { trailing_window: 1_000_000, ..Default::default() };
    let js = serde_wasm_bindgen::to_value(&params).unwrap();
    assert!(RiskPoolSimulation::with_params(1000.0, js).is_err());
    assert!(RiskPoolSimulation::with_params(1000.0, JsValue::NULL).is_ok());
}
