//! Technical indicator implementations.

pub mod rsi;
pub mod sma;

pub use rsi::{rsi, Rsi, DEFAULT_RSI_PERIOD, ZERO_LOSS_EPSILON};
pub use sma::{moving_average, Sma, DEFAULT_MA_WINDOW};
