use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::price::{normalize_series, PricePoint, PriceWindow};
use crate::providers::registry::PriceProviderRegistry;

/// Fetches closing-price series from the registered providers.
///
/// - Providers are tried in registration order; the first success wins.
/// - Output is ascending by date with one point per date.
/// - A provider that returns a non-finite or non-positive price has failed;
///   the next provider is tried.
/// - Any provider failure reaches the caller as `DataUnavailable`.
///
/// Nothing is cached: every call goes to the providers.
pub struct PriceService {
    registry: PriceProviderRegistry,
}

impl PriceService {
    pub fn new(registry: PriceProviderRegistry) -> Self {
        Self { registry }
    }

    /// Check if at least one provider is registered.
    pub fn has_provider(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Names of the registered providers, in fallback order.
    pub fn get_provider_names(&self) -> Vec<String> {
        self.registry.provider_names()
    }

    /// Closing prices for the trailing `lookback_days` ending at `today`.
    pub async fn get_trailing_series(
        &self,
        symbol: &str,
        today: NaiveDate,
        lookback_days: u32,
    ) -> Result<(PriceWindow, Vec<PricePoint>), CoreError> {
        let window = PriceWindow::trailing(today, lookback_days);
        let points = self.get_price_range(symbol, window.from, window.to).await?;
        Ok((window, points))
    }

    /// Closing prices for `symbol` between `from` and `to` (inclusive).
    ///
    /// An empty result is returned as-is; deciding whether that is an error
    /// is up to the computation that consumes it.
    pub async fn get_price_range(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        if from > to {
            return Err(CoreError::InvalidInput(format!(
                "'from' date ({from}) must not be after 'to' date ({to})"
            )));
        }

        let providers = self.registry.providers();
        if providers.is_empty() {
            return Err(CoreError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "no price provider registered".into(),
            });
        }

        tracing::debug!(symbol, %from, %to, "fetching price range");

        let mut last_error = None;
        for provider in &providers {
            let result = provider
                .get_price_range(symbol, from, to)
                .await
                .and_then(|points| Self::validate(symbol, provider.name(), points));

            match result {
                Ok(points) => {
                    tracing::debug!(
                        symbol,
                        provider = provider.name(),
                        points = points.len(),
                        "price range fetched"
                    );
                    return Ok(points);
                }
                Err(e) => {
                    tracing::warn!(
                        symbol,
                        provider = provider.name(),
                        error = %e,
                        "price provider failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(e) => e.into_data_unavailable(symbol),
            None => CoreError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "no price provider registered".into(),
            },
        })
    }

    /// Reject the whole series on any unusable price, then sort and
    /// de-duplicate by date.
    fn validate(
        symbol: &str,
        provider: &str,
        points: Vec<PricePoint>,
    ) -> Result<Vec<PricePoint>, CoreError> {
        if let Some(bad) = points.iter().find(|p| !p.price.is_finite() || p.price <= 0.0) {
            return Err(CoreError::Api {
                provider: provider.to_string(),
                message: format!(
                    "Invalid price returned for {symbol} on {}: {} (must be finite and positive)",
                    bad.date, bad.price
                ),
            });
        }
        Ok(normalize_series(points))
    }
}
