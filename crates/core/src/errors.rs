use thiserror::Error;

/// Unified error type for the entire budget-tracker-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input ───────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ── Computation ─────────────────────────────────────────────────
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("No price data for {symbol}")]
    NoData { symbol: String },

    // ── Market data ─────────────────────────────────────────────────
    #[error("Price data unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    // ── API / Network (provider layer) ──────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// Wrap a provider-level failure as `DataUnavailable` for `symbol`.
    /// Errors that already carry a core meaning pass through untouched.
    pub fn into_data_unavailable(self, symbol: &str) -> CoreError {
        match self {
            e @ (CoreError::DataUnavailable { .. }
            | CoreError::NoData { .. }
            | CoreError::InvalidInput(_)
            | CoreError::DivisionByZero(_)) => e,
            other => CoreError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters from URLs: they carry API keys.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
