//! Currency codes and their display labels.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Set of supported currency codes.
#[allow(missing_docs, clippy::upper_case_acronyms)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[clap(rename_all = "UPPER")]
#[strum(ascii_case_insensitive)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    AUD,
    CAD,
    CHF,
    CNY,
    SEK,
    NZD,
    MXN,
    SGD,
    HKD,
    NOK,
    KRW,
    TRY,
    INR,
    RUB,
    BRL,
    ZAR,
    NGN,
    GHS,
    KES,
    EGP,
    MAD,
    TND,
    PKR,
    BDT,
    IDR,
    THB,
    UGX,
    TZS,
    RWF,
    XOF,
    XAF,
    ZWL,
    BWP,
    ZMW,
    LKR,
    GMD,
    ETB,
}

/// Currencies traded by every provider of the built-in catalog.
pub const MARKET_CURRENCIES: [Currency; 30] = [
    Currency::USD,
    Currency::EUR,
    Currency::GBP,
    Currency::JPY,
    Currency::AUD,
    Currency::CAD,
    Currency::CHF,
    Currency::CNY,
    Currency::SEK,
    Currency::NZD,
    Currency::MXN,
    Currency::SGD,
    Currency::HKD,
    Currency::NOK,
    Currency::KRW,
    Currency::TRY,
    Currency::INR,
    Currency::RUB,
    Currency::BRL,
    Currency::ZAR,
    Currency::NGN,
    Currency::GHS,
    Currency::KES,
    Currency::EGP,
    Currency::MAD,
    Currency::TND,
    Currency::PKR,
    Currency::BDT,
    Currency::IDR,
    Currency::THB,
];

impl Currency {
    /// Country or region the currency belongs to.
    pub fn country(&self) -> &'static str {
        match self {
            Currency::USD => "United States",
            Currency::EUR => "European Union",
            Currency::GBP => "United Kingdom",
            Currency::JPY => "Japan",
            Currency::AUD => "Australia",
            Currency::CAD => "Canada",
            Currency::CHF => "Switzerland",
            Currency::CNY => "China",
            Currency::SEK => "Sweden",
            Currency::NZD => "New Zealand",
            Currency::MXN => "Mexico",
            Currency::SGD => "Singapore",
            Currency::HKD => "Hong Kong",
            Currency::NOK => "Norway",
            Currency::KRW => "South Korea",
            Currency::TRY => "Turkey",
            Currency::INR => "India",
            Currency::RUB => "Russia",
            Currency::BRL => "Brazil",
            Currency::ZAR => "South Africa",
            Currency::NGN => "Nigeria",
            Currency::GHS => "Ghana",
            Currency::KES => "Kenya",
            Currency::EGP => "Egypt",
            Currency::MAD => "Morocco",
            Currency::TND => "Tunisia",
            Currency::PKR => "Pakistan",
            Currency::BDT => "Bangladesh",
            Currency::IDR => "Indonesia",
            Currency::THB => "Thailand",
            Currency::UGX => "Uganda",
            Currency::TZS => "Tanzania",
            Currency::RWF => "Rwanda",
            Currency::XOF => "West African CFA",
            Currency::XAF => "Central African CFA",
            Currency::ZWL => "Zimbabwe",
            Currency::BWP => "Botswana",
            Currency::ZMW => "Zambia",
            Currency::LKR => "Sri Lanka",
            Currency::GMD => "Gambia",
            Currency::ETB => "Ethiopia",
        }
    }

    /// Major currencies with tight spreads.
    pub fn is_common(&self) -> bool {
        matches!(
            self,
            Currency::USD
                | Currency::EUR
                | Currency::GBP
                | Currency::JPY
                | Currency::CAD
                | Currency::AUD
                | Currency::CHF
                | Currency::CNY
        )
    }

    /// Currencies whose corridors settle slowly.
    pub fn is_exotic(&self) -> bool {
        matches!(
            self,
            Currency::IDR
                | Currency::THB
                | Currency::PKR
                | Currency::BDT
                | Currency::KES
                | Currency::TND
                | Currency::MAD
        )
    }

    /// True when the code or the country label contains `term`, ignoring case.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        self.to_string().to_lowercase().contains(&term)
            || self.country().to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("ghs".parse::<Currency>().unwrap(), Currency::GHS);
        assert_eq!("Usd".parse::<Currency>().unwrap(), Currency::USD);
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_every_currency_is_labelled() {
        assert_eq!(Currency::iter().count(), 41);
        assert!(Currency::iter().all(|c| !c.country().is_empty()));
    }

    #[rstest]
    #[case("gh", true)]
    #[case("Ghana", true)]
    #[case("ghs", true)]
    #[case("kenya", false)]
    fn test_matches(#[case] term: &str, #[case] expected: bool) {
        assert_eq!(Currency::GHS.matches(term), expected);
    }

    #[test]
    fn test_classification() {
        assert!(Currency::USD.is_common());
        assert!(!Currency::GHS.is_common());
        assert!(Currency::KES.is_exotic());
        assert!(!Currency::NGN.is_exotic());
    }
}
