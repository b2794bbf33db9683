// Synthetic Trade History Generator (seedable)
// Win/loss draws with exponential P&L sizes and optional data gaps

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use riskpool_engine::TradeOutcome;

const TICKERS: [&str; 8] = ["AAPL", "MSFT", "NVDA", "AMZN", "META", "TSLA", "AMD", "NFLX"];

pub struct HistoryGenerator {
    rng: ChaCha8Rng,
    pub win_count: u32,
    pub loss_count: u32,
    pub unknown_count: u32,
}

impl HistoryGenerator {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            win_count: 0,
            loss_count: 0,
            unknown_count: 0,
        }
    }

    /// Draw one closed trade.
    /// `win_prob` is the chance of a winner, `unknown_prob` the chance the
    /// P&L is missing altogether.
    pub fn next_trade(
        &mut self,
        index: usize,
        win_prob: f64,
        avg_win: f64,
        avg_loss: f64,
        unknown_prob: f64,
    ) -> TradeOutcome {
        let ticker = TICKERS[self.rng.gen_range(0..TICKERS.len())];

        if unknown_prob > 0.0 && self.rng.gen::<f64>() < unknown_prob {
            self.unknown_count += 1;
            return TradeOutcome::unknown(ticker).closed_at(index as i64);
        }

        let trade = if self.rng.gen::<f64>() < win_prob {
            self.win_count += 1;
            TradeOutcome::win(ticker, exponential_sample(&mut self.rng, avg_win))
        } else {
            self.loss_count += 1;
            TradeOutcome::loss(ticker, exponential_sample(&mut self.rng, avg_loss))
        };
        trade.closed_at(index as i64)
    }
}

/// Exponential draw with the given mean, via inverse CDF.
fn exponential_sample(rng: &mut ChaCha8Rng, mean: f64) -> f64 {
    let u: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    -mean * u.ln()
}
