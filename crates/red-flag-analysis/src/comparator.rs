use crate::extractor::MetricSeries;
use analysis_core::FormType;
use serde::{Deserialize, Serialize};

/// How many periods back the positional fallback reaches
const FALLBACK_INDEX: usize = 4;

/// Latest value and the value one fiscal year earlier
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct YearOverYear {
    pub current: Option<f64>,
    pub previous: Option<f64>,
}

impl YearOverYear {
    pub fn new(current: Option<f64>, previous: Option<f64>) -> Self {
        Self { current, previous }
    }

    pub fn both(&self) -> Option<(f64, f64)> {
        Some((self.current?, self.previous?))
    }
}

/// Year-over-year pair for a series.
///
/// The previous value is the first observation tagged with the same fiscal period
/// one fiscal year before the latest, which keeps seasonal quarters comparable.
/// Without such a match, a series of five or more periods falls back to the value
/// four periods back.
pub fn yoy(series: &MetricSeries) -> YearOverYear {
    if series.len() < 2 {
        return YearOverYear::default();
    }
    let latest = match series.get(0) {
        Some(o) => o,
        None => return YearOverYear::default(),
    };

    let exact = match (&latest.fiscal_period, latest.fiscal_year.and_then(|y| y.checked_sub(1))) {
        (Some(period), Some(prior_year)) => series.iter().skip(1).find(|o| {
            o.fiscal_period.as_ref() == Some(period) && o.fiscal_year == Some(prior_year)
        }),
        _ => None,
    };

    let previous = exact
        .or_else(|| series.get(FALLBACK_INDEX))
        .map(|o| o.value);

    YearOverYear::new(Some(latest.value), previous)
}

/// Values of the `n` most recent quarterly (10-Q) observations, newest first
pub fn latest_quarters(series: &MetricSeries, n: usize) -> Vec<f64> {
    series
        .iter()
        .filter(|o| o.form == FormType::TenQ)
        .take(n)
        .map(|o| o.value)
        .collect()
}
