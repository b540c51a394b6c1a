use crate::models::analytics::{ProjectionPoint, SavingsProjection};
use crate::models::ledger::Ledger;
use crate::services::ledger_service::LedgerService;

/// Months in the simplistic annualization of one month's leftover budget.
const MONTHS_PER_YEAR: f64 = 12.0;

/// Annualizes the remaining budget and projects it linearly.
///
/// No compounding, no clamping: a monthly shortfall becomes negative
/// "savings" and is carried through as-is.
pub struct SavingsService {
    ledger_service: LedgerService,
}

impl SavingsService {
    pub fn new() -> Self {
        Self {
            ledger_service: LedgerService::new(),
        }
    }

    /// remaining_budget × 12
    pub fn yearly_savings(&self, ledger: &Ledger) -> f64 {
        self.ledger_service.remaining_budget(ledger) * MONTHS_PER_YEAR
    }

    /// `[yearly_savings × 1, …, yearly_savings × years]`
    pub fn project(&self, yearly_savings: f64, years: u32) -> SavingsProjection {
        let points = (1..=years)
            .map(|year| ProjectionPoint {
                year,
                savings: yearly_savings * f64::from(year),
            })
            .collect();

        SavingsProjection {
            yearly_savings,
            points,
        }
    }

    /// Projection of the ledger's current yearly savings.
    pub fn project_ledger(&self, ledger: &Ledger, years: u32) -> SavingsProjection {
        self.project(self.yearly_savings(ledger), years)
    }
}

impl Default for SavingsService {
    fn default() -> Self {
        Self::new()
    }
}
