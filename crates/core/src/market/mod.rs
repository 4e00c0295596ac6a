//! Synthetic market data. Fundamentals come from a small table of known IDX issuers with random
//! jitter applied; the price series is a random walk.

pub mod companies;
pub mod mock;

pub use mock::{generate_chart_series, generate_fundamentals};

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
