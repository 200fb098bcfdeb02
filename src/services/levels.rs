//! Take-profit and stop-loss price levels.

use crate::error::{AppError, Result};
use crate::types::{DecisionLabel, TradeLevels};

/// Compute take-profit and stop-loss prices for a decision at `price`.
///
/// Percentages are fractions (0.02 = 2%). A buy places the target above the
/// price and the stop below it, a sell mirrors that, and a hold collapses
/// both levels onto the price. No rounding is applied.
///
/// Rejects a price that is not a positive finite number and percentages
/// that are negative or not finite.
pub fn compute_levels(
    label: DecisionLabel,
    price: f64,
    take_profit_pct: f64,
    stop_loss_pct: f64,
) -> Result<TradeLevels> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "price must be positive, got {}",
            price
        )));
    }
    check_pct("take-profit", take_profit_pct)?;
    check_pct("stop-loss", stop_loss_pct)?;

    let levels = match label {
        DecisionLabel::Buy => TradeLevels {
            take_profit: price * (1.0 + take_profit_pct),
            stop_loss: price * (1.0 - stop_loss_pct),
        },
        DecisionLabel::Sell => TradeLevels {
            take_profit: price * (1.0 - take_profit_pct),
            stop_loss: price * (1.0 + stop_loss_pct),
        },
        DecisionLabel::Hold => TradeLevels {
            take_profit: price,
            stop_loss: price,
        },
    };

    Ok(levels)
}

fn check_pct(name: &str, pct: f64) -> Result<()> {
    if !pct.is_finite() || pct < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "{} percentage must be non-negative, got {}",
            name, pct
        )));
    }
    Ok(())
}
