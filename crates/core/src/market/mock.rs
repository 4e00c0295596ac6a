use crate::domain::market::{ChartPoint, FundamentalData, Ohlc};
use crate::market::companies;
use crate::market::round2;
use crate::time::window::{trailing_window, CHART_WINDOW_DAYS};
use chrono::NaiveDate;
use rand::Rng;

const METRIC_JITTER: f64 = 0.10;

const SEED_CLOSE_MIN: f64 = 3000.0;
const SEED_CLOSE_MAX: f64 = 5000.0;
const OPEN_GAP: f64 = 0.025;
const INTRADAY_MOVE: f64 = 0.03;
const WICK_MAX: f64 = 0.03;
const RSI_MIN: f64 = 30.0;
const RSI_MAX: f64 = 70.0;

fn jitter<R: Rng>(rng: &mut R, base: f64) -> f64 {
    round2(base * (1.0 + rng.gen_range(-METRIC_JITTER..=METRIC_JITTER)))
}

/// Fresh fundamentals for `ticker`; every call draws new jitter.
pub fn generate_fundamentals<R: Rng>(ticker: &str, rng: &mut R) -> FundamentalData {
    let profile = companies::lookup(ticker);
    let base = profile.base;
    FundamentalData {
        company_name: profile.name.to_string(),
        eps: jitter(rng, base.eps),
        per: jitter(rng, base.per),
        pbv: jitter(rng, base.pbv),
        roe: jitter(rng, base.roe),
        der: jitter(rng, base.der),
        dividend_yield: jitter(rng, base.dividend_yield),
    }
}

/// Daily candles for the trailing chart window ending on `end`, oldest first.
pub fn generate_chart_series<R: Rng>(end: NaiveDate, rng: &mut R) -> Vec<ChartPoint> {
    let mut last_close = rng.gen_range(SEED_CLOSE_MIN..=SEED_CLOSE_MAX);

    trailing_window(end, CHART_WINDOW_DAYS)
        .into_iter()
        .map(|date| {
            let open = last_close * (1.0 + rng.gen_range(-OPEN_GAP..=OPEN_GAP));
            let close = open * (1.0 + rng.gen_range(-INTRADAY_MOVE..=INTRADAY_MOVE));
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..=WICK_MAX));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..=WICK_MAX));
            let rsi = rng.gen_range(RSI_MIN..=RSI_MAX);
            last_close = close;

            // Rounding is monotonic, so low/high still bracket open/close afterwards.
            ChartPoint {
                date,
                price: Ohlc {
                    open: round2(open),
                    high: round2(high),
                    low: round2(low),
                    close: round2(close),
                },
                rsi: round2(rsi),
            }
        })
        .collect()
}
