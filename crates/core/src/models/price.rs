use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single closing-price data point (date → price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Inclusive date window for a price request, anchored at an explicit
/// reference date instead of the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl PriceWindow {
    /// `[today - lookback_days, today]`
    pub fn trailing(today: NaiveDate, lookback_days: u32) -> Self {
        Self {
            from: today - Duration::days(i64::from(lookback_days)),
            to: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// Sort points ascending by date and keep one point per date.
///
/// When a provider returns the same date twice, the later entry wins.
pub fn normalize_series(mut points: Vec<PricePoint>) -> Vec<PricePoint> {
    // Stable sort keeps provider order among equal dates.
    points.sort_by_key(|p| p.date);
    let mut out: Vec<PricePoint> = Vec::with_capacity(points.len());
    for point in points {
        match out.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => out.push(point),
        }
    }
    out
}

/// Extract the bare closing prices of a series.
pub fn closing_prices(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.price).collect()
}
