use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::price::PricePoint;

/// Source of historical closing prices for a ticker.
///
/// Each market-data API implements this trait. The rest of the crate only
/// sees date-indexed closing prices, so swapping an API touches one file.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Closing prices for `symbol` between `from` and `to` (inclusive).
    /// Returns an empty Vec when the symbol has no data in the range.
    async fn get_price_range(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError>;
}
