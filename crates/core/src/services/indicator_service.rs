use crate::errors::CoreError;
use crate::models::indicator::{
    BollingerBand, BollingerPoint, IndicatorPoint, IndicatorRow, PercentBPoint,
};
use crate::models::price::PricePoint;

/// Rolling statistics over an ascending closing-price series.
///
/// Every output is aligned to the input dates. Points before a window has
/// filled are `None`, never zero. Bands use the sample standard deviation
/// (divides by N - 1).
pub struct IndicatorService;

impl IndicatorService {
    pub fn new() -> Self {
        Self
    }

    /// Simple moving average over the trailing `window` closes.
    pub fn sma(
        &self,
        series: &[PricePoint],
        window: usize,
    ) -> Result<Vec<IndicatorPoint>, CoreError> {
        if window == 0 {
            return Err(CoreError::InvalidInput("SMA window must be at least 1".into()));
        }

        Ok(rolling(series, window, mean)
            .into_iter()
            .zip(series)
            .map(|(value, point)| IndicatorPoint {
                date: point.date,
                value,
            })
            .collect())
    }

    /// Bollinger bands: SMA(window) ± k × sample stddev of the same window.
    pub fn bollinger_bands(
        &self,
        series: &[PricePoint],
        window: usize,
        k: f64,
    ) -> Result<Vec<BollingerPoint>, CoreError> {
        if window < 2 {
            return Err(CoreError::InvalidInput(
                "Bollinger window must be at least 2".into(),
            ));
        }

        Ok(rolling(series, window, |slice| {
            let middle = mean(slice);
            let deviation = k * sample_std_dev(slice, middle);
            BollingerBand {
                middle,
                upper: middle + deviation,
                lower: middle - deviation,
            }
        })
        .into_iter()
        .zip(series)
        .map(|(band, point)| BollingerPoint {
            date: point.date,
            price: point.price,
            band,
        })
        .collect())
    }

    /// %B for every point whose band is defined. Leading points are dropped.
    ///
    /// Fails with `DivisionByZero` if any band has zero width, which happens
    /// whenever a whole window of closes is constant.
    pub fn percent_b(
        &self,
        series: &[PricePoint],
        window: usize,
        k: f64,
    ) -> Result<Vec<PercentBPoint>, CoreError> {
        self.bollinger_bands(series, window, k)?
            .iter()
            .filter_map(|p| p.band.map(|band| (p, band)))
            .map(|(p, band)| -> Result<PercentBPoint, CoreError> {
                let percent_b = percent_b_at(p.price, &band).map_err(|_| {
                    CoreError::DivisionByZero(format!(
                        "Bollinger band on {} has zero width",
                        p.date
                    ))
                })?;
                Ok(PercentBPoint {
                    date: p.date,
                    percent_b,
                })
            })
            .collect()
    }

    /// Joined SMA / Bollinger / %B table.
    ///
    /// Only dates where both the SMA and the band are defined appear.
    /// Zero-width bands keep their row with `percent_b: None`.
    pub fn indicator_table(
        &self,
        series: &[PricePoint],
        sma_window: usize,
        bollinger_window: usize,
        k: f64,
    ) -> Result<Vec<IndicatorRow>, CoreError> {
        let sma = self.sma(series, sma_window)?;
        let bands = self.bollinger_bands(series, bollinger_window, k)?;

        Ok(sma
            .iter()
            .zip(&bands)
            .filter_map(|(avg, bb)| {
                let sma_value = avg.value?;
                let band = bb.band?;
                Some(IndicatorRow {
                    date: bb.date,
                    price: bb.price,
                    sma: sma_value,
                    middle: band.middle,
                    upper: band.upper,
                    lower: band.lower,
                    percent_b: percent_b_at(bb.price, &band).ok(),
                })
            })
            .collect())
    }
}

impl Default for IndicatorService {
    fn default() -> Self {
        Self::new()
    }
}

/// `(price - lower) / (upper - lower)`; `DivisionByZero` on a zero-width band.
pub fn percent_b_at(price: f64, band: &BollingerBand) -> Result<f64, CoreError> {
    let width = band.width();
    if width == 0.0 {
        return Err(CoreError::DivisionByZero(
            "Bollinger band has zero width".into(),
        ));
    }
    Ok((price - band.lower) / width)
}

/// Apply `f` to every full trailing window; `None` while the window fills.
fn rolling<T>(series: &[PricePoint], window: usize, f: impl Fn(&[f64]) -> T) -> Vec<Option<T>> {
    let closes: Vec<f64> = series.iter().map(|p| p.price).collect();
    (0..closes.len())
        .map(|i| (i + 1 >= window).then(|| f(&closes[i + 1 - window..=i])))
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation around a precomputed mean. Needs 2+ values.
///
/// A constant window is exactly 0.0 even when the float mean drifts from
/// the repeated value.
fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.windows(2).all(|w| w[0] == w[1]) {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}
