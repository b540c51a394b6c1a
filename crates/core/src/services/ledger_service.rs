use crate::errors::CoreError;
use crate::models::expense::{Expense, ExpenseShare};
use crate::models::ledger::Ledger;

/// Budget and expense bookkeeping on a `Ledger`.
///
/// Pure business logic — no I/O, no locking. Callers sharing a ledger go
/// through `SharedLedger`.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Append an expense. The amount must be finite; its sign is not checked.
    pub fn add_expense(
        &self,
        ledger: &mut Ledger,
        name: impl Into<String>,
        amount: f64,
    ) -> Result<Expense, CoreError> {
        let amount = ensure_finite(amount, "expense amount")?;
        let expense = Expense::new(name, amount);
        ledger.expenses.push(expense.clone());
        tracing::debug!(
            name = %expense.name,
            amount,
            count = ledger.expenses.len(),
            "expense added"
        );
        Ok(expense)
    }

    /// Overwrite the budget. Zero and negative budgets are accepted.
    pub fn set_budget(&self, ledger: &mut Ledger, amount: f64) -> Result<(), CoreError> {
        ledger.budget = ensure_finite(amount, "budget")?;
        tracing::debug!(budget = ledger.budget, "budget set");
        Ok(())
    }

    /// Drop every expense and zero the budget. Nothing is kept.
    pub fn reset(&self, ledger: &mut Ledger) {
        let dropped = ledger.expenses.len();
        ledger.expenses.clear();
        ledger.budget = 0.0;
        tracing::debug!(dropped, "ledger reset");
    }

    pub fn total_expenses(&self, ledger: &Ledger) -> f64 {
        ledger.expenses.iter().map(|e| e.amount).sum()
    }

    /// budget - total_expenses, not clamped.
    pub fn remaining_budget(&self, ledger: &Ledger) -> f64 {
        ledger.budget - self.total_expenses(ledger)
    }

    /// Each expense's percentage of total spending, in insertion order.
    ///
    /// Fails with `DivisionByZero` when total spending is zero, including
    /// an empty ledger and entries that cancel each other out.
    pub fn expense_shares(&self, ledger: &Ledger) -> Result<Vec<ExpenseShare>, CoreError> {
        let total = self.total_expenses(ledger);
        if total == 0.0 {
            return Err(CoreError::DivisionByZero(
                "total expenses are zero; expense shares are undefined".into(),
            ));
        }

        Ok(ledger
            .expenses
            .iter()
            .map(|e| ExpenseShare {
                name: e.name.clone(),
                amount: e.amount,
                percent: e.amount / total * 100.0,
            })
            .collect())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a user-typed amount ("1200", " 49.99 ", "-5").
///
/// Anything that is not a finite number is `InvalidInput`.
pub fn parse_amount(input: &str) -> Result<f64, CoreError> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| CoreError::InvalidInput(format!("'{input}' is not a number")))?;
    ensure_finite(value, "amount")
}

fn ensure_finite(value: f64, what: &str) -> Result<f64, CoreError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::InvalidInput(format!(
            "{what} must be a finite number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  49.99\n").unwrap(), 49.99);
    }

    #[test]
    fn parse_amount_keeps_sign() {
        assert_eq!(parse_amount("-5").unwrap(), -5.0);
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        for bad in ["", "abc", "1,200", "12 34", "NaN", "inf", "-infinity"] {
            assert!(
                matches!(parse_amount(bad), Err(CoreError::InvalidInput(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
