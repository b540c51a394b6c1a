use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::expense::Expense;
use super::indicator::IndicatorRow;
use super::price::PricePoint;

/// Snapshot of the ledger and its derived figures at one moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Currency label for every amount (from settings; never converted)
    pub currency: String,

    /// Declared monthly budget
    pub budget: f64,

    /// Expenses in insertion order
    pub expenses: Vec<Expense>,

    /// Sum of all expense amounts
    pub total_expenses: f64,

    /// budget - total_expenses (may be negative)
    pub remaining_budget: f64,

    /// remaining_budget × 12
    pub yearly_savings: f64,
}

/// Cumulative savings at the end of a given year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// 1-based year index
    pub year: u32,

    /// yearly_savings × year
    pub savings: f64,
}

/// Linear multi-year savings projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsProjection {
    /// Savings per year the projection is built from
    pub yearly_savings: f64,

    /// One point per year, ascending
    pub points: Vec<ProjectionPoint>,
}

impl SavingsProjection {
    /// Just the cumulative amounts, in year order.
    pub fn amounts(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.savings).collect()
    }
}

/// Outcome of buying whole shares with a year of savings at the start of
/// the price window and valuing them at its end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    /// floor(yearly_savings / first price); negative when savings are negative
    pub shares_held: i64,

    /// shares_held × first price
    pub initial_investment: f64,

    /// shares_held × last price
    pub final_value: f64,

    /// Percentage return, rounded to 2 decimals
    pub roi_percent: f64,
}

/// Everything the stock page needs for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentReport {
    /// Uppercased ticker symbol
    pub ticker: String,

    /// Currency label of the savings and ROI amounts (from settings)
    pub currency: String,

    /// First date requested
    pub from: NaiveDate,

    /// Reference date (last date requested)
    pub to: NaiveDate,

    /// Closing prices, ascending by date
    pub prices: Vec<PricePoint>,

    /// Joined SMA / Bollinger / %B table
    pub indicators: Vec<IndicatorRow>,

    /// Savings projection the ROI is based on
    pub projection: SavingsProjection,

    /// Naive ROI of investing one year of savings
    pub roi: RoiResult,
}
