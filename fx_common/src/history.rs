//! Synthetic historical rate series for the dashboard.
//!
//! Each day's rate is the pair's baseline plus uniform noise bounded by the
//! pair's volatility. The series ends on the requested day and contains one
//! point per day of the time frame plus the end day itself.
use chrono::{Duration, NaiveDate};
use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::currency::Currency;
use crate::pair::CurrencyPair;
use crate::round_to;

/// Number of points kept when sampling a series for a chart.
pub const CHART_POINTS: usize = 8;

/// Length of the history window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize, Deserialize)]
pub enum TimeFrame {
    /// One week.
    #[default]
    #[value(name = "7days")]
    #[strum(serialize = "7days")]
    #[serde(rename = "7days")]
    Week,
    /// One month.
    #[value(name = "30days")]
    #[strum(serialize = "30days")]
    #[serde(rename = "30days")]
    Month,
    /// One quarter.
    #[value(name = "90days")]
    #[strum(serialize = "90days")]
    #[serde(rename = "90days")]
    Quarter,
    /// One year.
    #[value(name = "1year")]
    #[strum(serialize = "1year")]
    #[serde(rename = "1year")]
    Year,
}

impl TimeFrame {
    /// Days covered by the window.
    pub fn days(&self) -> i64 {
        match self {
            TimeFrame::Week => 7,
            TimeFrame::Month => 30,
            TimeFrame::Quarter => 90,
            TimeFrame::Year => 365,
        }
    }
}

/// One day of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    /// Day of the observation.
    pub date: NaiveDate,
    /// Rate, rounded to 4 places.
    pub rate: f64,
}

/// Baseline rate and volatility of `pair`.
pub fn profile(pair: &CurrencyPair) -> (f64, f64) {
    match (pair.from, pair.to) {
        (Currency::USD, Currency::EUR) => (0.9, 0.01),
        (Currency::USD, Currency::GBP) => (0.6, 0.015),
        (Currency::USD, Currency::NGN) => (1609.27, 30.0),
        (Currency::USD, Currency::GHS) => (14.1, 0.3),
        _ => (1.0, 0.02),
    }
}

/// Generates the series for `pair` over `frame`, ending on `end`.
pub fn generate<R: Rng>(
    pair: &CurrencyPair,
    frame: TimeFrame,
    end: NaiveDate,
    rng: &mut R,
) -> Vec<RatePoint> {
    let (base_rate, volatility) = profile(pair);
    (0..=frame.days())
        .rev()
        .map(|days_back| {
            let random_factor = (rng.random_range(0.0..1.0) - 0.5) * 2.0 * volatility;
            RatePoint {
                date: end - Duration::days(days_back),
                rate: round_to(base_rate + random_factor, 4),
            }
        })
        .collect()
}

/// Every `ceil(len / CHART_POINTS)`-th point of `series`.
pub fn sample_for_chart(series: &[RatePoint]) -> Vec<RatePoint> {
    if series.is_empty() {
        return Vec::new();
    }
    let step = series.len().div_ceil(CHART_POINTS);
    series.iter().step_by(step).copied().collect()
}
