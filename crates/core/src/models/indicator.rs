use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One value of a rolling statistic, aligned to a price date.
///
/// `value` is `None` for the leading points where the window has not
/// filled yet. It is never zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Bollinger bounds for one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBand {
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
}

impl BollingerBand {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Bollinger bands aligned to a price date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerPoint {
    pub date: NaiveDate,
    pub price: f64,
    /// `None` until the window has filled
    pub band: Option<BollingerBand>,
}

/// %B value for a date whose band is defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentBPoint {
    pub date: NaiveDate,
    pub percent_b: f64,
}

/// One row of the joined indicator table.
///
/// Rows only exist for dates where both the SMA and the Bollinger band are
/// defined. `percent_b` is `None` when the band has zero width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub price: f64,
    pub sma: f64,
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
    pub percent_b: Option<f64>,
}
