//! Intra-Africa transfer quotes.
//!
//! Rates come from a short list of direct corridors, else are crossed via
//! USD. The fee depends on the delivery method and is charged on top of the
//! sent amount (`FeeModel::SendSurcharge`).
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::conversion::{quote, FeeModel};
use crate::currency::Currency;
use crate::error::FxError;
use crate::pair::CurrencyPair;
use crate::rate_source::{RateSource, RateTable};
use crate::result::Result;
use crate::round_to;

/// A sending or receiving country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// Country name.
    pub name: &'static str,
    /// Local currency.
    pub currency: Currency,
}

/// Countries served by intra-Africa transfers.
pub const COUNTRIES: [Country; 12] = [
    Country { name: "Nigeria", currency: Currency::NGN },
    Country { name: "Ghana", currency: Currency::GHS },
    Country { name: "Kenya", currency: Currency::KES },
    Country { name: "South Africa", currency: Currency::ZAR },
    Country { name: "Uganda", currency: Currency::UGX },
    Country { name: "Tanzania", currency: Currency::TZS },
    Country { name: "Rwanda", currency: Currency::RWF },
    Country { name: "Senegal", currency: Currency::XOF },
    Country { name: "Côte d'Ivoire", currency: Currency::XOF },
    Country { name: "Zimbabwe", currency: Currency::ZWL },
    Country { name: "Botswana", currency: Currency::BWP },
    Country { name: "Zambia", currency: Currency::ZMW },
];

/// Country by name, ignoring case.
pub fn country(name: &str) -> Option<Country> {
    COUNTRIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
        .copied()
}

/// A route recommended for a sending country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Corridor {
    /// Sending country.
    pub from: &'static str,
    /// Receiving country.
    pub to: &'static str,
    /// Volume label.
    pub volume: &'static str,
    /// Growth label.
    pub growth: &'static str,
}

const STRATEGIC_CORRIDORS: [Corridor; 6] = [
    Corridor { from: "Nigeria", to: "Ghana", volume: "High", growth: "+12%" },
    Corridor { from: "Senegal", to: "Côte d'Ivoire", volume: "Medium", growth: "+8%" },
    Corridor { from: "Kenya", to: "Uganda", volume: "High", growth: "+15%" },
    Corridor { from: "Tanzania", to: "Rwanda", volume: "Medium", growth: "+9%" },
    Corridor { from: "South Africa", to: "Zimbabwe", volume: "Very High", growth: "+14%" },
    Corridor { from: "Botswana", to: "Zambia", volume: "Medium", growth: "+7%" },
];

/// Strategic corridors starting in `sending_country`.
pub fn corridors_from(sending_country: &str) -> Vec<Corridor> {
    STRATEGIC_CORRIDORS
        .iter()
        .filter(|c| c.from.eq_ignore_ascii_case(sending_country.trim()))
        .copied()
        .collect()
}

/// How the recipient receives the money.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// Mobile money (M-Pesa, Orange Money, MTN Money).
    #[default]
    Mobile,
    /// Digital wallet.
    Wallet,
    /// Bank transfer.
    Bank,
    /// Cash pickup at a local agent.
    Cash,
}

impl DeliveryMethod {
    /// Fee percentage of the sent amount.
    pub fn fee_percent(&self) -> f64 {
        match self {
            DeliveryMethod::Mobile => 2.2,
            DeliveryMethod::Wallet => 0.8,
            DeliveryMethod::Bank => 3.5,
            DeliveryMethod::Cash => 2.5,
        }
    }

    /// Advertised delivery time.
    pub fn delivery_time(&self) -> &'static str {
        match self {
            DeliveryMethod::Mobile => "Instant - 1 hour",
            DeliveryMethod::Wallet => "Instant",
            DeliveryMethod::Bank => "1-2 business days",
            DeliveryMethod::Cash => "Same day",
        }
    }
}

/// Rate resolution for intra-Africa transfers.
#[derive(Debug, Clone, PartialEq)]
pub struct AfricaRates {
    direct: RateTable,
    to_usd: RateTable,
}

impl AfricaRates {
    /// Built-in direct corridors and USD legs.
    pub fn builtin() -> Result<Self> {
        use crate::currency::Currency::{BWP, GHS, KES, NGN, RWF, TZS, UGX, USD, XOF, ZAR, ZMW, ZWL};
        let direct = RateTable::from_entries(&[
            (NGN, GHS, 0.009),
            (NGN, KES, 0.085),
            (NGN, ZAR, 0.011),
            (GHS, NGN, 111.0),
            (KES, NGN, 11.8),
            (ZAR, NGN, 90.0),
        ])?;
        let to_usd = RateTable::from_entries(&[
            (NGN, USD, 0.00069),
            (GHS, USD, 0.081),
            (KES, USD, 0.0078),
            (ZAR, USD, 0.052),
            (UGX, USD, 0.00027),
            (TZS, USD, 0.00040),
            (RWF, USD, 0.00087),
            (XOF, USD, 0.0017),
            (ZWL, USD, 0.0031),
            (BWP, USD, 0.075),
            (ZMW, USD, 0.041),
        ])?;
        Ok(Self { direct, to_usd })
    }

    fn usd_leg(&self, currency: Currency) -> Option<f64> {
        self.to_usd
            .get_rate(&CurrencyPair::new(currency, Currency::USD))
            .filter(|rate| *rate > 0.0)
    }
}

impl RateSource for AfricaRates {
    /// Direct corridor, else identity, else `send→USD / receive→USD`.
    fn get_rate(&self, pair: &CurrencyPair) -> Option<f64> {
        if let Some(rate) = self.direct.get_rate(pair) {
            return Some(rate);
        }
        if pair.is_identity() {
            return Some(1.0);
        }
        let send_to_usd = self.usd_leg(pair.from)?;
        let receive_to_usd = self.usd_leg(pair.to)?;
        Some(send_to_usd / receive_to_usd)
    }
}

/// A priced intra-Africa transfer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransferQuote {
    /// Currency pair of the transfer.
    pub pair: CurrencyPair,
    /// Rate applied.
    pub rate: f64,
    /// Amount sent, before fees.
    pub send_amount: f64,
    /// Amount received, rounded to cents.
    pub receive_amount: f64,
    /// Delivery method chosen.
    pub method: DeliveryMethod,
    /// Fee percentage of the delivery method.
    pub fee_percent: f64,
    /// Fee in the sending currency, rounded to cents.
    pub fee_amount: f64,
    /// `send_amount + fee_amount`.
    pub total: f64,
}

/// Prices sending `send_amount` over `pair` with `method`.
pub fn quote_transfer(
    rates: &impl RateSource,
    pair: &CurrencyPair,
    send_amount: f64,
    method: DeliveryMethod,
) -> Result<TransferQuote> {
    let rate = rates.require_rate(pair)?;
    let fee_percent = method.fee_percent();
    let q = quote(send_amount, rate, FeeModel::SendSurcharge { fee_percent })?;
    let fee_amount = round_to(q.fee, 2);

    Ok(TransferQuote {
        pair: *pair,
        rate,
        send_amount,
        receive_amount: round_to(q.net, 2),
        method,
        fee_percent,
        fee_amount,
        total: round_to(send_amount + fee_amount, 2),
    })
}

/// Prices a transfer between two countries by name.
pub fn quote_between(
    rates: &impl RateSource,
    sending_country: &str,
    receiving_country: &str,
    send_amount: f64,
    method: DeliveryMethod,
) -> Result<TransferQuote> {
    let from = country(sending_country)
        .ok_or_else(|| FxError::UnknownCountry(sending_country.to_string()))?;
    let to = country(receiving_country)
        .ok_or_else(|| FxError::UnknownCountry(receiving_country.to_string()))?;
    quote_transfer(
        rates,
        &CurrencyPair::new(from.currency, to.currency),
        send_amount,
        method,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn pair(s: &str) -> CurrencyPair {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_transfer_nigeria_to_ghana() {
        let rates = AfricaRates::builtin().unwrap();
        let q = quote_between(&rates, "Nigeria", "Ghana", 1000.0, DeliveryMethod::Mobile).unwrap();
        assert_abs_diff_eq!(q.rate, 0.009);
        assert_abs_diff_eq!(q.receive_amount, 9.0);
        assert_abs_diff_eq!(q.fee_amount, 22.0);
        assert_abs_diff_eq!(q.total, 1022.0);
    }

    #[test]
    fn test_cross_rate_via_usd() {
        let rates = AfricaRates::builtin().unwrap();
        let rate = rates.get_rate(&pair("KES-UGX")).unwrap();
        assert_abs_diff_eq!(rate, 0.0078 / 0.00027, epsilon = 1e-9);
    }

    #[test]
    fn test_same_currency_is_identity() {
        let rates = AfricaRates::builtin().unwrap();
        let q = quote_between(&rates, "Senegal", "Côte d'Ivoire", 500.0, DeliveryMethod::Wallet)
            .unwrap();
        assert_abs_diff_eq!(q.rate, 1.0);
        assert_abs_diff_eq!(q.receive_amount, 500.0);
        assert_abs_diff_eq!(q.fee_amount, 4.0);
    }

    #[test]
    fn test_missing_leg_is_unavailable() {
        let rates = AfricaRates::builtin().unwrap();
        let err = quote_transfer(&rates, &pair("USD-GHS"), 10.0, DeliveryMethod::Bank).unwrap_err();
        assert!(matches!(err, FxError::RateUnavailable(_)));
    }

    #[rstest]
    #[case(DeliveryMethod::Mobile, 2.2)]
    #[case(DeliveryMethod::Wallet, 0.8)]
    #[case(DeliveryMethod::Bank, 3.5)]
    #[case(DeliveryMethod::Cash, 2.5)]
    fn test_method_fees(#[case] method: DeliveryMethod, #[case] pct: f64) {
        assert_abs_diff_eq!(method.fee_percent(), pct);
    }

    #[test]
    fn test_corridors_from() {
        let corridors = corridors_from("kenya");
        assert_eq!(corridors.len(), 1);
        assert_eq!(corridors[0].to, "Uganda");
        assert!(corridors_from("Ghana").is_empty());
    }
}
