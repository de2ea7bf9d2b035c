//! Remittance providers, their fee schedules and transfer speeds.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::compare::Offer;
use crate::conversion::{indicative_fee, FeeModel};
use crate::error::FxError;
use crate::pair::CurrencyPair;
use crate::rate_source::{RateSource, RateTable};
use crate::result::Result;

/// Nominal transfer speed advertised by a provider.
#[derive(Debug, Clone, Copy, Display, EnumString, EnumIter, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Speed {
    /// A few minutes at most.
    #[strum(to_string = "instant")]
    Instant,
    /// Tens of minutes.
    #[strum(to_string = "minutes")]
    Minutes,
    /// Around one hour.
    #[strum(to_string = "1 hour")]
    OneHour,
    /// One to two hours.
    #[strum(to_string = "1–2 hours", serialize = "1-2 hours")]
    OneToTwoHours,
    /// A few hours.
    #[strum(to_string = "within hours")]
    WithinHours,
    /// Later the same day.
    #[strum(to_string = "same day")]
    SameDay,
    /// Up to a day.
    #[strum(to_string = "within a day")]
    WithinADay,
    /// One to two days.
    #[strum(to_string = "1–2 days", serialize = "1-2 days")]
    OneToTwoDays,
}

impl Speed {
    /// Base transfer time in minutes and the width of the random window
    /// added on top of it.
    pub fn window(&self) -> (u32, u32) {
        match self {
            Speed::Instant => (2, 8),
            Speed::Minutes => (10, 20),
            Speed::OneHour => (45, 30),
            Speed::OneToTwoHours => (60, 60),
            Speed::WithinHours => (120, 180),
            Speed::SameDay => (180, 360),
            Speed::WithinADay => (360, 720),
            Speed::OneToTwoDays => (1440, 1440),
        }
    }
}

/// Percentage fee plus a flat fee in the source currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Percentage of the sent amount, e.g. `1.2` for 1.2 %.
    pub fee_percent: f64,
    /// Flat fee charged per transfer.
    pub base_fee: f64,
}

impl FeeSchedule {
    /// Validates and creates a schedule.
    pub fn new(fee_percent: f64, base_fee: f64) -> Result<Self> {
        for value in [fee_percent, base_fee] {
            if !value.is_finite() || value < 0.0 {
                return Err(FxError::InvalidFee(value));
            }
        }
        Ok(FeeSchedule {
            fee_percent,
            base_fee,
        })
    }

    /// The fee model used when quoting this schedule for an amount.
    pub fn model(&self) -> FeeModel {
        FeeModel::Platform {
            fee_percent: self.fee_percent,
            base_fee: self.base_fee,
        }
    }
}

/// A simulated remittance or exchange service.
#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    /// Display name, unique within a catalog.
    pub name: String,
    /// Fee schedule applied to every pair.
    pub schedule: FeeSchedule,
    /// Advertised transfer speed.
    pub speed: Speed,
    /// Website of the service.
    pub link: String,
    /// Per-pair rates offered by the provider.
    pub rates: RateTable,
    /// Per-pair transfer time in minutes.
    pub minutes: HashMap<CurrencyPair, u32>,
}

impl Provider {
    /// Rate the provider applies to `pair`; a same-currency pair converts at 1.
    pub fn rate_for(&self, pair: &CurrencyPair) -> Option<f64> {
        if pair.is_identity() {
            return Some(1.0);
        }
        self.rates.get_rate(pair)
    }

    /// The provider's offer for `pair`, if it quotes a rate for it.
    pub fn offer(&self, pair: &CurrencyPair) -> Option<Offer> {
        let rate = self.rate_for(pair)?;
        Some(Offer {
            provider: self.name.clone(),
            rate,
            fee: indicative_fee(rate, &self.schedule),
            minutes: self.minutes.get(pair).copied().unwrap_or(0),
            schedule: self.schedule,
        })
    }
}

/// Human readable transfer time: minutes below an hour, whole hours below a
/// day, whole days otherwise.
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{} min", minutes);
    }
    if minutes < 24 * 60 {
        let hours = minutes / 60;
        return format!("{} {}", hours, if hours == 1 { "hour" } else { "hours" });
    }
    let days = minutes / (24 * 60);
    format!("{} {}", days, if days == 1 { "day" } else { "days" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Speed::Instant, "instant")]
    #[case(Speed::OneToTwoHours, "1–2 hours")]
    #[case(Speed::WithinADay, "within a day")]
    fn test_speed_labels(#[case] speed: Speed, #[case] label: &str) {
        assert_eq!(speed.to_string(), label);
        assert_eq!(label.parse::<Speed>().unwrap(), speed);
    }

    #[test]
    fn test_speed_accepts_ascii_dash() {
        assert_eq!("1-2 days".parse::<Speed>().unwrap(), Speed::OneToTwoDays);
    }

    #[rstest]
    #[case(0, "0 min")]
    #[case(59, "59 min")]
    #[case(60, "1 hour")]
    #[case(179, "2 hours")]
    #[case(1440, "1 day")]
    #[case(3000, "2 days")]
    fn test_format_minutes(#[case] minutes: u32, #[case] expected: &str) {
        assert_eq!(format_minutes(minutes), expected);
    }

    #[test]
    fn test_same_currency_offer_converts_at_par() {
        let wise = Provider {
            name: "Wise".to_string(),
            schedule: FeeSchedule::new(1.2, 3.5).unwrap(),
            speed: Speed::OneHour,
            link: "https://wise.com".to_string(),
            rates: RateTable::new(),
            minutes: HashMap::new(),
        };
        let usd: CurrencyPair = "USD-USD".parse().unwrap();

        assert_eq!(wise.rate_for(&usd), Some(1.0));
        let offer = wise.offer(&usd).unwrap();
        assert_eq!(offer.rate, 1.0);
        assert_eq!(offer.fee, 4.7);
        assert!(wise.offer(&"USD-GHS".parse().unwrap()).is_none());
    }

    #[test]
    fn test_fee_schedule_validation() {
        assert!(FeeSchedule::new(1.2, 3.5).is_ok());
        assert!(matches!(FeeSchedule::new(-0.1, 3.5), Err(FxError::InvalidFee(_))));
        assert!(FeeSchedule::new(1.0, f64::INFINITY).is_err());
    }
}
