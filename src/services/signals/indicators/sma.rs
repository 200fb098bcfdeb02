//! Simple Moving Average (SMA) indicator.

/// Default lookback for the moving average (one week of daily closes).
pub const DEFAULT_MA_WINDOW: usize = 7;

/// Arithmetic mean of the last `window` prices.
///
/// When fewer than `window` prices are available the whole series is
/// averaged instead. Returns None for an empty series or a zero window.
pub fn moving_average(prices: &[f64], window: usize) -> Option<f64> {
    if prices.is_empty() || window == 0 {
        return None;
    }

    let take = window.min(prices.len());
    let sum: f64 = prices[prices.len() - take..].iter().sum();
    Some(sum / take as f64)
}

/// SMA (Simple Moving Average) indicator with a fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sma {
    window: usize,
}

impl Default for Sma {
    fn default() -> Self {
        Self {
            window: DEFAULT_MA_WINDOW,
        }
    }
}

impl Sma {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn calculate(&self, prices: &[f64]) -> Option<f64> {
        moving_average(prices, self.window)
    }
}
