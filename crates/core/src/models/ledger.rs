use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use super::expense::Expense;

/// The in-memory budget ledger: one budget scalar plus the expense list.
///
/// Nothing here is persisted. Dropping the ledger (or calling reset)
/// loses every entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Declared monthly budget
    pub budget: f64,

    /// Expenses in insertion order
    pub expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(budget: f64) -> Self {
        Self {
            budget,
            expenses: Vec::new(),
        }
    }
}

/// Cloneable handle to a ledger shared between callers.
///
/// Every clone points at the same ledger. Each operation takes the single
/// lock for its own duration only. All handles see one global budget and
/// expense list: there is no per-session isolation.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn with<R>(&self, f: impl FnOnce(&mut Ledger) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    /// Clone the current ledger state.
    pub fn snapshot(&self) -> Ledger {
        self.lock().clone()
    }

    // A panic inside `with` cannot leave the ledger half-updated (every
    // mutation is a single push or assignment), so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
