use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::price::PricePoint;
use super::traits::PriceProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_NAME: &str = "Alpha Vantage";

/// Alpha Vantage provider for stock closing prices.
///
/// - **Free tier**: 25 requests/day (across ALL endpoints).
/// - **Requires**: API key (set via settings as "alphavantage").
/// - **Strategy**: one `TIME_SERIES_DAILY` call per range, filtered locally.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self::with_base_url(api_key, timeout, BASE_URL)
    }

    /// Point the provider at a different endpoint (e.g., a local stub server).
    pub fn with_base_url(api_key: String, timeout: Duration, base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(timeout);
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
            base_url: base_url.into(),
        }
    }
}

// ── Alpha Vantage API response types ────────────────────────────────

#[derive(Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyData>>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    #[serde(rename = "4. close")]
    close: String,
}

/// Turn a parsed daily time series into points inside `[from, to]`, ascending.
/// Rows with unparseable dates or prices are skipped.
fn points_in_range(
    time_series: &HashMap<String, DailyData>,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = time_series
        .iter()
        .filter_map(|(date_str, data)| {
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
            if date >= from && date <= to {
                let price: f64 = data.close.parse().ok()?;
                Some(PricePoint { date, price })
            } else {
                None
            }
        })
        .collect();

    points.sort_by_key(|p| p.date);
    points
}

fn parse_time_series(
    body: &str,
    symbol: &str,
) -> Result<HashMap<String, DailyData>, CoreError> {
    let resp: TimeSeriesResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER_NAME.into(),
        message: format!("Failed to parse time series for {symbol}: {e}"),
    })?;

    if let Some(message) = resp.error_message {
        return Err(CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message,
        });
    }

    resp.time_series.ok_or_else(|| CoreError::Api {
        provider: PROVIDER_NAME.into(),
        message: resp.note.unwrap_or_else(|| {
            format!("No time series data for {symbol}. API limit may be exceeded.")
        }),
    })
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PriceProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn get_price_range(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        let upper = symbol.to_uppercase();
        let body = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", upper.as_str()),
                // compact only covers ~100 trading days
                ("outputsize", "full"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let time_series = parse_time_series(&body, symbol)?;
        Ok(points_in_range(&time_series, from, to))
    }
}
