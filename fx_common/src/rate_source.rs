//! Rate lookup capability and the static tables behind it.
//!
//! Every view asks a `RateSource` for the rate of a `CurrencyPair`. A missing
//! rate is reported as `None`; callers decide whether that excludes an offer
//! or surfaces `FxError::RateUnavailable`.
use std::collections::HashMap;

use crate::currency::Currency;
use crate::error::FxError;
use crate::pair::CurrencyPair;
use crate::result::Result;
use crate::round_to;

/// Capability to quote a rate for a currency pair.
pub trait RateSource {
    /// Units of `pair.to` received for one unit of `pair.from`.
    fn get_rate(&self, pair: &CurrencyPair) -> Option<f64>;

    /// Like [`RateSource::get_rate`] but a missing rate is an error.
    fn require_rate(&self, pair: &CurrencyPair) -> Result<f64> {
        self.get_rate(pair).ok_or(FxError::RateUnavailable(*pair))
    }
}

/// Explicit per-pair rate table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<CurrencyPair, f64>,
}

impl RateTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(from, to, rate)` triples.
    pub fn from_entries(entries: &[(Currency, Currency, f64)]) -> Result<Self> {
        let mut table = Self::new();
        for &(from, to, rate) in entries {
            table.insert(CurrencyPair::new(from, to), rate)?;
        }
        Ok(table)
    }

    /// Stores `rate` for `pair`, replacing any previous value.
    ///
    /// Rates must be finite and non-negative; a zero rate is kept but is
    /// treated as "not offered" by the comparison.
    pub fn insert(&mut self, pair: CurrencyPair, rate: f64) -> Result<()> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(FxError::InvalidRate(rate));
        }
        self.rates.insert(pair, rate);
        Ok(())
    }

    /// True when the table holds an entry for `pair`.
    pub fn contains(&self, pair: &CurrencyPair) -> bool {
        self.rates.contains_key(pair)
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when no pair is stored.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Direct rate, else the inverse of the opposite pair rounded to 4 places.
    pub fn get_rate_or_inverse(&self, pair: &CurrencyPair) -> Option<f64> {
        if let Some(rate) = self.get_rate(pair) {
            return Some(rate);
        }
        self.rates
            .get(&pair.inverse())
            .filter(|rate| **rate > 0.0)
            .map(|rate| round_to(1.0 / rate, 4))
    }

    /// Entries ordered by pair.
    pub fn entries(&self) -> Vec<(CurrencyPair, f64)> {
        let mut entries: Vec<(CurrencyPair, f64)> =
            self.rates.iter().map(|(pair, rate)| (*pair, *rate)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl RateSource for RateTable {
    fn get_rate(&self, pair: &CurrencyPair) -> Option<f64> {
        self.rates.get(pair).copied()
    }
}

/// Rates derived from a single "units per USD" table.
///
/// The cross rate of `FROM-TO` is `per_usd[TO] / per_usd[FROM]`.
#[derive(Debug, Clone, PartialEq)]
pub struct UsdCrossRates {
    per_usd: Vec<(Currency, f64)>,
}

impl UsdCrossRates {
    /// Builds a cross-rate table; non-positive entries are dropped.
    pub fn new(per_usd: Vec<(Currency, f64)>) -> Self {
        let per_usd = per_usd.into_iter().filter(|(_, rate)| *rate > 0.0).collect();
        Self { per_usd }
    }

    /// Base table the provider catalog derives its synthetic rates from.
    pub fn market() -> Self {
        Self::new(vec![
            (Currency::USD, 1.0),
            (Currency::EUR, 0.92),
            (Currency::GBP, 0.79),
            (Currency::JPY, 145.0),
            (Currency::AUD, 1.5),
            (Currency::CAD, 1.35),
            (Currency::CHF, 0.9),
            (Currency::CNY, 7.2),
            (Currency::SEK, 11.0),
            (Currency::NZD, 1.6),
            (Currency::MXN, 17.0),
            (Currency::SGD, 1.35),
            (Currency::HKD, 7.8),
            (Currency::NOK, 10.0),
            (Currency::KRW, 1300.0),
            (Currency::TRY, 30.0),
            (Currency::INR, 83.0),
            (Currency::RUB, 95.0),
            (Currency::BRL, 5.0),
            (Currency::ZAR, 19.0),
            (Currency::NGN, 1500.0),
            (Currency::GHS, 14.5),
            (Currency::KES, 130.0),
            (Currency::EGP, 47.0),
            (Currency::MAD, 10.0),
            (Currency::TND, 3.1),
            (Currency::PKR, 280.0),
            (Currency::BDT, 110.0),
            (Currency::IDR, 16000.0),
            (Currency::THB, 36.0),
        ])
    }

    /// Daily rate board shown on the basic rates page.
    pub fn daily() -> Self {
        Self::new(vec![
            (Currency::USD, 1.0),
            (Currency::EUR, 0.94),
            (Currency::GBP, 0.81),
            (Currency::GHS, 14.6),
            (Currency::NGN, 1420.0),
            (Currency::ZAR, 18.2),
            (Currency::KES, 130.0),
            (Currency::INR, 83.3),
            (Currency::JPY, 155.0),
            (Currency::CNY, 7.2),
            (Currency::CAD, 1.36),
            (Currency::AUD, 1.52),
            (Currency::BRL, 5.1),
            (Currency::EGP, 48.5),
            (Currency::TZS, 2520.0),
            (Currency::UGX, 3820.0),
            (Currency::XAF, 612.0),
            (Currency::XOF, 610.0),
            (Currency::PKR, 278.0),
            (Currency::BDT, 117.0),
            (Currency::LKR, 305.0),
            (Currency::MAD, 10.1),
            (Currency::TND, 3.1),
            (Currency::GMD, 67.5),
            (Currency::ETB, 57.2),
        ])
    }

    /// Units of `currency` per USD.
    pub fn per_usd(&self, currency: Currency) -> Option<f64> {
        self.per_usd
            .iter()
            .find(|(c, _)| *c == currency)
            .map(|(_, rate)| *rate)
    }

    /// Board entries whose code or country contains `term`, in table order.
    pub fn search(&self, term: &str) -> Vec<(Currency, f64)> {
        self.per_usd
            .iter()
            .filter(|(currency, _)| currency.matches(term))
            .copied()
            .collect()
    }
}

impl RateSource for UsdCrossRates {
    fn get_rate(&self, pair: &CurrencyPair) -> Option<f64> {
        if pair.is_identity() {
            return Some(1.0);
        }
        let from = self.per_usd(pair.from)?;
        let to = self.per_usd(pair.to)?;
        Some(to / from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pair(s: &str) -> CurrencyPair {
        s.parse().unwrap()
    }

    #[test]
    fn test_table_rejects_negative_rates() {
        let mut table = RateTable::new();
        assert!(matches!(
            table.insert(pair("USD-GHS"), -1.0),
            Err(FxError::InvalidRate(_))
        ));
        assert!(table.insert(pair("USD-GHS"), f64::NAN).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_rate_is_none_not_synthetic() {
        let table = RateTable::from_entries(&[(Currency::USD, Currency::GHS, 11.05)]).unwrap();
        assert_eq!(table.get_rate(&pair("USD-GHS")), Some(11.05));
        assert_eq!(table.get_rate(&pair("USD-KES")), None);
        assert!(matches!(
            table.require_rate(&pair("USD-KES")),
            Err(FxError::RateUnavailable(p)) if p == pair("USD-KES")
        ));
    }

    #[test]
    fn test_inverse_lookup() {
        let table = RateTable::from_entries(&[(Currency::GHS, Currency::USD, 0.074)]).unwrap();
        assert_eq!(table.get_rate_or_inverse(&pair("USD-GHS")), Some(13.5135));
        assert_eq!(table.get_rate_or_inverse(&pair("USD-EUR")), None);
    }

    #[test]
    fn test_cross_rates() {
        let market = UsdCrossRates::market();
        assert_abs_diff_eq!(market.get_rate(&pair("USD-GHS")).unwrap(), 14.5);
        assert_abs_diff_eq!(
            market.get_rate(&pair("EUR-GHS")).unwrap(),
            14.5 / 0.92,
            epsilon = 1e-12
        );
        assert_eq!(market.get_rate(&pair("GHS-GHS")), Some(1.0));
        assert_eq!(market.get_rate(&pair("USD-UGX")), None);
    }

    #[test]
    fn test_daily_search() {
        let daily = UsdCrossRates::daily();
        let hits = daily.search("af");
        assert_eq!(
            hits.iter().map(|(c, _)| *c).collect::<Vec<_>>(),
            vec![Currency::ZAR, Currency::XAF, Currency::XOF]
        );
        assert_eq!(daily.search("").len(), 25);
    }
}
