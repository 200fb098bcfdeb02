//! Relative Strength Index (RSI) indicator.

/// Default RSI lookback.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Average loss used when the lookback contains no losses at all.
///
/// This keeps the ratio finite so a pure uptrend reads just under 100
/// instead of dividing by zero. It is an approximation, not Wilder's
/// treatment of the zero-loss case.
pub const ZERO_LOSS_EPSILON: f64 = 0.001;

/// RSI over the last `period` price changes, using simple (unsmoothed)
/// averages of gains and losses.
///
/// Returns None when there are fewer than `period + 1` prices or the period
/// is zero. The result is in `[0, 100]`: exactly 0 when the window holds no
/// gains (a flat series included). A pure uptrend stays below 100 because of
/// the epsilon substitution.
pub fn rsi(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period + 1 {
        return None;
    }

    let window = &prices[prices.len() - (period + 1)..];
    let mut gains = 0.0;
    let mut losses = 0.0;

    for pair in window.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = if losses == 0.0 {
        ZERO_LOSS_EPSILON
    } else {
        losses / period as f64
    };

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self {
            period: DEFAULT_RSI_PERIOD,
        }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn min_periods(&self) -> usize {
        self.period + 1
    }

    pub fn calculate(&self, prices: &[f64]) -> Option<f64> {
        rsi(prices, self.period)
    }
}
