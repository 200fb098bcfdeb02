//! Technical indicators over a close-price series.
//!
//! Everything here is a pure function of its arguments. Missing values are
//! reported as `None` so callers can show "N/A" rather than a fake zero.

pub mod indicators;

pub use indicators::{
    moving_average, rsi, Rsi, Sma, DEFAULT_MA_WINDOW, DEFAULT_RSI_PERIOD, ZERO_LOSS_EPSILON,
};

use crate::types::Indicators;

/// Compute every indicator for a time-ascending price series.
pub fn compute_indicators(prices: &[f64], ma_window: usize, rsi_period: usize) -> Indicators {
    Indicators {
        moving_average: Sma::new(ma_window).calculate(prices),
        rsi: Rsi::new(rsi_period).calculate(prices),
    }
}
