pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use models::{
    analytics::{InvestmentReport, LedgerSummary, RoiResult, SavingsProjection},
    expense::{Expense, ExpenseShare},
    indicator::{BollingerPoint, IndicatorPoint, IndicatorRow, PercentBPoint},
    ledger::{Ledger, SharedLedger},
    price::PricePoint,
    settings::Settings,
};
use providers::registry::PriceProviderRegistry;
use services::{
    indicator_service::IndicatorService,
    ledger_service::{parse_amount, LedgerService},
    price_service::PriceService,
    roi_service::RoiService,
    savings_service::SavingsService,
};
use std::sync::Arc;
use std::time::Duration;

use errors::CoreError;

/// Maximum length of a ticker symbol.
const MAX_TICKER_LEN: usize = 12;

/// Main entry point for the Budget Tracker core library.
///
/// Owns the ledger handle, the settings and every service. Cloning a tracker
/// is cheap and every clone shares the same ledger, so a server can hand one
/// clone to each request handler. Settings and the provider registry are per
/// clone: `set_api_key` and `remove_api_key` only affect the tracker they are
/// called on.
#[must_use]
#[derive(Clone)]
pub struct BudgetTracker {
    ledger: SharedLedger,
    settings: Settings,
    price_service: Arc<PriceService>,
    ledger_service: Arc<LedgerService>,
    savings_service: Arc<SavingsService>,
    indicator_service: Arc<IndicatorService>,
    roi_service: Arc<RoiService>,
}

impl std::fmt::Debug for BudgetTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ledger = self.ledger.snapshot();
        f.debug_struct("BudgetTracker")
            .field("budget", &ledger.budget)
            .field("expenses", &ledger.expenses.len())
            .field("settings", &self.settings)
            .field("providers", &self.price_service.get_provider_names())
            .finish()
    }
}

impl BudgetTracker {
    /// Create an empty tracker with default settings and default providers.
    pub fn create_new() -> Self {
        let settings = Settings::default();
        let registry = Self::default_registry(&settings);
        Self::build(Ledger::default(), settings, registry)
    }

    /// Create an empty tracker with custom settings and default providers.
    pub fn with_settings(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let registry = Self::default_registry(&settings);
        Ok(Self::build(Ledger::default(), settings, registry))
    }

    /// Create a tracker with an explicit provider registry (tests, offline use).
    pub fn with_registry(
        settings: Settings,
        registry: PriceProviderRegistry,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(Ledger::default(), settings, registry))
    }

    // ── Ledger ──────────────────────────────────────────────────────

    /// Add an expense. The amount must be finite; negative amounts are kept as-is.
    pub fn add_expense(&self, name: impl Into<String>, amount: f64) -> Result<Expense, CoreError> {
        let name = name.into();
        self.ledger
            .with(|ledger| self.ledger_service.add_expense(ledger, name, amount))
    }

    /// Add an expense from user-typed text (e.g., a form field).
    pub fn add_expense_str(
        &self,
        name: impl Into<String>,
        amount: &str,
    ) -> Result<Expense, CoreError> {
        let amount = parse_amount(amount)?;
        self.add_expense(name, amount)
    }

    /// Overwrite the monthly budget.
    pub fn set_budget(&self, amount: f64) -> Result<(), CoreError> {
        self.ledger
            .with(|ledger| self.ledger_service.set_budget(ledger, amount))
    }

    /// Overwrite the monthly budget from user-typed text.
    pub fn set_budget_str(&self, amount: &str) -> Result<(), CoreError> {
        let amount = parse_amount(amount)?;
        self.set_budget(amount)
    }

    /// Clear all expenses and zero the budget. Nothing can be recovered.
    pub fn reset(&self) {
        self.ledger.with(|ledger| self.ledger_service.reset(ledger));
    }

    #[must_use]
    pub fn budget(&self) -> f64 {
        self.ledger.with(|ledger| ledger.budget)
    }

    /// All expenses in insertion order.
    #[must_use]
    pub fn get_expenses(&self) -> Vec<Expense> {
        self.ledger.with(|ledger| ledger.expenses.clone())
    }

    #[must_use]
    pub fn total_expenses(&self) -> f64 {
        self.ledger
            .with(|ledger| self.ledger_service.total_expenses(ledger))
    }

    #[must_use]
    pub fn remaining_budget(&self) -> f64 {
        self.ledger
            .with(|ledger| self.ledger_service.remaining_budget(ledger))
    }

    /// Per-expense share of total spending. `DivisionByZero` when nothing is spent.
    pub fn expense_shares(&self) -> Result<Vec<ExpenseShare>, CoreError> {
        self.ledger
            .with(|ledger| self.ledger_service.expense_shares(ledger))
    }

    /// Everything the overview page shows, read under one lock.
    #[must_use]
    pub fn ledger_summary(&self) -> LedgerSummary {
        self.ledger.with(|ledger| LedgerSummary {
            currency: self.settings.currency.clone(),
            budget: ledger.budget,
            expenses: ledger.expenses.clone(),
            total_expenses: self.ledger_service.total_expenses(ledger),
            remaining_budget: self.ledger_service.remaining_budget(ledger),
            yearly_savings: self.savings_service.yearly_savings(ledger),
        })
    }

    /// Handle to the shared ledger, for callers that compose their own services.
    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    // ── Savings ─────────────────────────────────────────────────────

    /// remaining_budget × 12 (negative when over budget).
    #[must_use]
    pub fn yearly_savings(&self) -> f64 {
        self.ledger
            .with(|ledger| self.savings_service.yearly_savings(ledger))
    }

    /// Linear projection over the configured horizon (5 years by default).
    #[must_use]
    pub fn savings_projection(&self) -> SavingsProjection {
        self.project_savings(self.settings.projection_years)
    }

    /// Linear projection over `years` years.
    #[must_use]
    pub fn project_savings(&self, years: u32) -> SavingsProjection {
        self.ledger
            .with(|ledger| self.savings_service.project_ledger(ledger, years))
    }

    // ── Indicators ──────────────────────────────────────────────────

    /// SMA with the configured window.
    pub fn sma(&self, series: &[PricePoint]) -> Result<Vec<IndicatorPoint>, CoreError> {
        self.indicator_service.sma(series, self.settings.sma_window)
    }

    /// Bollinger bands with the configured window and multiplier.
    pub fn bollinger_bands(&self, series: &[PricePoint]) -> Result<Vec<BollingerPoint>, CoreError> {
        self.indicator_service.bollinger_bands(
            series,
            self.settings.bollinger_window,
            self.settings.bollinger_k,
        )
    }

    /// %B with the configured band. `DivisionByZero` on any zero-width band.
    pub fn percent_b(&self, series: &[PricePoint]) -> Result<Vec<PercentBPoint>, CoreError> {
        self.indicator_service.percent_b(
            series,
            self.settings.bollinger_window,
            self.settings.bollinger_k,
        )
    }

    /// Joined SMA / Bollinger / %B table with the configured windows.
    pub fn indicator_table(&self, series: &[PricePoint]) -> Result<Vec<IndicatorRow>, CoreError> {
        self.indicator_service.indicator_table(
            series,
            self.settings.sma_window,
            self.settings.bollinger_window,
            self.settings.bollinger_k,
        )
    }

    // ── Market data & ROI ───────────────────────────────────────────

    /// Closing prices for the trailing lookback window ending at `today`.
    pub async fn fetch_price_series(
        &self,
        ticker: &str,
        today: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        let ticker = normalize_ticker(ticker)?;
        let (_, points) = self
            .price_service
            .get_trailing_series(&ticker, today, self.settings.lookback_days)
            .await?;
        Ok(points)
    }

    /// ROI of investing the current yearly savings over an already-fetched series.
    pub fn estimate_roi_for(
        &self,
        ticker: &str,
        series: &[PricePoint],
    ) -> Result<RoiResult, CoreError> {
        self.roi_service
            .estimate(ticker, series, self.yearly_savings())
    }

    /// Fetch the trailing window for `ticker` and estimate the ROI of
    /// investing the current yearly savings at its start.
    pub async fn estimate_roi(&self, ticker: &str, today: NaiveDate) -> Result<RoiResult, CoreError> {
        let ticker = normalize_ticker(ticker)?;
        let series = self.fetch_price_series(&ticker, today).await?;
        self.estimate_roi_for(&ticker, &series)
    }

    /// Full stock analysis for one ticker: prices, indicators, projection, ROI.
    ///
    /// Fails as a whole when any step fails, e.g. `DivisionByZero` when the
    /// savings buy no share. Callers that want to show the indicators anyway
    /// compose `fetch_price_series`, `indicator_table` and `estimate_roi_for`.
    pub async fn analyze_ticker(
        &self,
        ticker: &str,
        today: NaiveDate,
    ) -> Result<InvestmentReport, CoreError> {
        let ticker = normalize_ticker(ticker)?;
        let (window, prices) = self
            .price_service
            .get_trailing_series(&ticker, today, self.settings.lookback_days)
            .await?;

        let indicators = self.indicator_table(&prices)?;
        let projection = self.savings_projection();
        let roi = self
            .roi_service
            .estimate(&ticker, &prices, projection.yearly_savings)?;

        Ok(InvestmentReport {
            ticker,
            currency: self.settings.currency.clone(),
            from: window.from,
            to: window.to,
            prices,
            indicators,
            projection,
            roi,
        })
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Get current settings.
    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Set an API key for a provider (e.g., "alphavantage").
    /// Rebuilds the provider registry so the new key takes effect immediately.
    pub fn set_api_key(&mut self, provider: String, key: String) {
        self.settings.api_keys.insert(provider, key);
        self.price_service = Arc::new(PriceService::new(Self::default_registry(&self.settings)));
    }

    /// Remove an API key for a provider.
    /// Rebuilds the provider registry so the removal takes effect immediately.
    pub fn remove_api_key(&mut self, provider: &str) -> bool {
        let removed = self.settings.api_keys.remove(provider).is_some();
        if removed {
            self.price_service =
                Arc::new(PriceService::new(Self::default_registry(&self.settings)));
        }
        removed
    }

    // ── Provider Availability ───────────────────────────────────────

    #[must_use]
    pub fn is_provider_available(&self) -> bool {
        self.price_service.has_provider()
    }

    #[must_use]
    pub fn get_provider_names(&self) -> Vec<String> {
        self.price_service.get_provider_names()
    }

    // ── Internal ────────────────────────────────────────────────────

    fn default_registry(settings: &Settings) -> PriceProviderRegistry {
        PriceProviderRegistry::new_with_defaults(
            &settings.api_keys,
            Duration::from_secs(settings.provider_timeout_secs),
        )
    }

    fn build(ledger: Ledger, settings: Settings, registry: PriceProviderRegistry) -> Self {
        Self {
            ledger: SharedLedger::new(ledger),
            settings,
            price_service: Arc::new(PriceService::new(registry)),
            ledger_service: Arc::new(LedgerService::new()),
            savings_service: Arc::new(SavingsService::new()),
            indicator_service: Arc::new(IndicatorService::new()),
            roi_service: Arc::new(RoiService::new()),
        }
    }
}

/// Trim and uppercase a ticker, rejecting anything that cannot be a symbol.
///
/// Accepts ASCII letters, digits and `.`, `-`, `^`, `=` (e.g., "BRK.B",
/// "^GSPC", "EURUSD=X").
pub fn normalize_ticker(ticker: &str) -> Result<String, CoreError> {
    let trimmed = ticker.trim();
    let valid = !trimmed.is_empty()
        && trimmed.len() <= MAX_TICKER_LEN
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
    if !valid {
        return Err(CoreError::InvalidInput(format!(
            "Invalid ticker '{ticker}': expected 1-{MAX_TICKER_LEN} letters, digits or . - ^ ="
        )));
    }
    Ok(trimmed.to_uppercase())
}
