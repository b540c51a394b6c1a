use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::CoreError;

/// User-configurable settings for the tracker and its indicators.
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The currency amounts are labelled in (e.g., "USD"). No conversion is done.
    pub currency: String,

    /// Window of the simple moving average.
    pub sma_window: usize,

    /// Window of the Bollinger band moving average and standard deviation.
    pub bollinger_window: usize,

    /// Band half-width in standard deviations.
    pub bollinger_k: f64,

    /// Horizon of the savings projection, in years.
    pub projection_years: u32,

    /// Length of the trailing price window, in calendar days.
    pub lookback_days: u32,

    /// HTTP timeout applied by providers that make direct requests.
    pub provider_timeout_secs: u64,

    /// Optional API keys for providers that require them.
    /// Keys: provider name (e.g., "alphavantage").
    pub api_keys: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            sma_window: 18,
            bollinger_window: 20,
            bollinger_k: 2.0,
            projection_years: 5,
            lookback_days: 365,
            provider_timeout_secs: 30,
            api_keys: HashMap::new(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the indicator and projection math cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        let currency = self.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::InvalidInput(format!(
                "Invalid currency code '{}': must be exactly 3 ASCII letters",
                self.currency
            )));
        }
        if self.sma_window == 0 {
            return Err(CoreError::InvalidInput("sma_window must be at least 1".into()));
        }
        // Sample standard deviation needs two points.
        if self.bollinger_window < 2 {
            return Err(CoreError::InvalidInput(
                "bollinger_window must be at least 2".into(),
            ));
        }
        if !self.bollinger_k.is_finite() || self.bollinger_k < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "bollinger_k must be finite and non-negative, got {}",
                self.bollinger_k
            )));
        }
        if self.lookback_days == 0 {
            return Err(CoreError::InvalidInput("lookback_days must be at least 1".into()));
        }
        if self.provider_timeout_secs == 0 {
            return Err(CoreError::InvalidInput(
                "provider_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
