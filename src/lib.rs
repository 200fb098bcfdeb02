//! Signalbot - trading signal pipeline.
//!
//! Fetches prices and headlines, computes a moving average and RSI, asks a
//! scoring model for a buy/sell/hold decision and turns it into take-profit
//! and stop-loss levels.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod services;
pub mod sources;
pub mod types;
