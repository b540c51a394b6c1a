use crate::errors::CoreError;
use crate::models::analytics::RoiResult;
use crate::models::price::PricePoint;

/// Naive lump-sum return estimate.
///
/// Buys as many whole shares as one year of savings affords at the first
/// price of the window and values them at the last price. No fees, no
/// dividends, no compounding.
pub struct RoiService;

impl RoiService {
    pub fn new() -> Self {
        Self
    }

    /// Estimate the ROI of investing `yearly_savings` over `series`.
    ///
    /// Errors:
    /// - `NoData` when the series is empty.
    /// - `InvalidInput` when the first or last price is not finite, or the
    ///   share count does not fit an `i64`.
    /// - `DivisionByZero` when the first price is zero or no whole share is
    ///   bought (e.g., savings below one share price).
    pub fn estimate(
        &self,
        symbol: &str,
        series: &[PricePoint],
        yearly_savings: f64,
    ) -> Result<RoiResult, CoreError> {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first.price, last.price),
            _ => {
                return Err(CoreError::NoData {
                    symbol: symbol.to_string(),
                })
            }
        };

        if !first.is_finite() || !last.is_finite() {
            return Err(CoreError::InvalidInput(format!(
                "prices of {symbol} must be finite (first {first}, last {last})"
            )));
        }

        if first == 0.0 {
            return Err(CoreError::DivisionByZero(format!(
                "first price of {symbol} is zero; cannot size the purchase"
            )));
        }

        // Whole shares only, sign preserved. `as` would saturate silently.
        let quotient = (yearly_savings / first).floor();
        if !quotient.is_finite() || quotient < i64::MIN as f64 || quotient >= i64::MAX as f64 {
            return Err(CoreError::InvalidInput(format!(
                "cannot size a purchase of {symbol}: {yearly_savings} / {first} is out of range"
            )));
        }
        let shares_held = quotient as i64;

        if shares_held == 0 {
            return Err(CoreError::DivisionByZero(format!(
                "savings of {yearly_savings} buy no shares of {symbol} at {first}"
            )));
        }

        let initial_investment = shares_held as f64 * first;
        let final_value = shares_held as f64 * last;

        let roi_percent = round_to_cents(
            (final_value - initial_investment) / initial_investment * 100.0,
        );
        if !roi_percent.is_finite() {
            return Err(CoreError::InvalidInput(format!(
                "ROI of {symbol} overflows ({initial_investment} -> {final_value})"
            )));
        }

        tracing::debug!(
            symbol,
            shares_held,
            initial_investment,
            final_value,
            roi_percent,
            "roi estimated"
        );

        Ok(RoiResult {
            shares_held,
            initial_investment,
            final_value,
            roi_percent,
        })
    }
}

impl Default for RoiService {
    fn default() -> Self {
        Self::new()
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to_cents(12.345_000_1), 12.35);
        assert_eq!(round_to_cents(-3.333), -3.33);
        assert_eq!(round_to_cents(20.0), 20.0);
    }
}
