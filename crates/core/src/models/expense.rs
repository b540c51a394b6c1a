use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single monthly expense entry.
///
/// Expenses are immutable once added to the ledger. The only way to
/// remove one is a full ledger reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: Uuid,

    /// Free-text label (e.g., "rent", "groceries")
    pub name: String,

    /// Amount spent. Not sign-checked: negative entries are stored verbatim.
    pub amount: f64,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
        }
    }
}

/// One expense's share of total spending, ready for a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub name: String,
    pub amount: f64,
    /// `amount / total_expenses × 100`
    pub percent: f64,
}
