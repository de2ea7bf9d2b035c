//! Currency pair lookup key and pairs-file parsing.
//!
//! A pair is written `FROM-TO` (e.g. `USD-GHS`) everywhere it is shown or
//! stored: in rate tables, preference files and pairs files.
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::FxError;

/// Ordered pair of currencies denoting a conversion direction.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    /// Currency being sold.
    pub from: Currency,
    /// Currency being bought.
    pub to: Currency,
}

const MAJOR_PAIRS: [(Currency, Currency); 6] = [
    (Currency::USD, Currency::EUR),
    (Currency::USD, Currency::GBP),
    (Currency::USD, Currency::JPY),
    (Currency::USD, Currency::CAD),
    (Currency::USD, Currency::CHF),
    (Currency::EUR, Currency::GBP),
];

impl CurrencyPair {
    /// Creates a pair converting `from` into `to`.
    pub fn new(from: Currency, to: Currency) -> Self {
        CurrencyPair { from, to }
    }

    /// Same currency on both sides.
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }

    /// The pair in the opposite direction.
    pub fn inverse(&self) -> Self {
        CurrencyPair::new(self.to, self.from)
    }

    /// Major corridor in either direction.
    pub fn is_high_volume(&self) -> bool {
        MAJOR_PAIRS
            .iter()
            .any(|&(a, b)| (self.from == a && self.to == b) || (self.from == b && self.to == a))
    }

    /// Either side is an exotic currency.
    pub fn is_exotic(&self) -> bool {
        self.from.is_exotic() || self.to.is_exotic()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for CurrencyPair {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .trim()
            .split_once(['-', '/'])
            .ok_or_else(|| FxError::ParsePair(s.to_string()))?;
        let from = from
            .trim()
            .parse::<Currency>()
            .map_err(|_| FxError::UnknownCurrency(from.trim().to_string()))?;
        let to = to
            .trim()
            .parse::<Currency>()
            .map_err(|_| FxError::UnknownCurrency(to.trim().to_string()))?;
        Ok(CurrencyPair::new(from, to))
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = FxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}

/// Trait providing file parsing for currency pairs.
pub trait PairParser {
    /// Parses pairs from a buffered reader.
    ///
    /// Each non-empty line is parsed as a single `CurrencyPair` using `FromStr`.
    /// Returns an error if any line cannot be parsed.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<CurrencyPair>, FxError>;
}

impl PairParser for CurrencyPair {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, FxError> {
        let mut pairs = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(FxError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                continue;
            }

            match trimmed_line.parse::<Self>() {
                Ok(pair) => pairs.push(pair),
                Err(e) => return Err(FxError::ParsePairsFile(e.to_string())),
            }
        }
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_display_and_parse() {
        let pair: CurrencyPair = "usd-ghs".parse().unwrap();
        assert_eq!(pair, CurrencyPair::new(Currency::USD, Currency::GHS));
        assert_eq!(pair.to_string(), "USD-GHS");
        assert_eq!("EUR/NGN".parse::<CurrencyPair>().unwrap().to_string(), "EUR-NGN");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("USDGHS".parse::<CurrencyPair>(), Err(FxError::ParsePair(_))));
        assert!(matches!(
            "USD-XXX".parse::<CurrencyPair>(),
            Err(FxError::UnknownCurrency(code)) if code == "XXX"
        ));
    }

    #[test]
    fn test_serde_uses_text_form() {
        let pair = CurrencyPair::new(Currency::GBP, Currency::GHS);
        let ser = serde_json::to_string(&pair).unwrap();
        assert_eq!(ser, "\"GBP-GHS\"");
        let de: CurrencyPair = serde_json::from_str(&ser).unwrap();
        assert_eq!(de, pair);
        assert!(serde_json::from_str::<CurrencyPair>("\"GBP\"").is_err());
    }

    #[test]
    fn test_corridor_classes() {
        let gbp_usd = CurrencyPair::new(Currency::GBP, Currency::USD);
        assert!(gbp_usd.is_high_volume());
        assert!(!gbp_usd.is_exotic());
        let usd_kes = CurrencyPair::new(Currency::USD, Currency::KES);
        assert!(!usd_kes.is_high_volume());
        assert!(usd_kes.is_exotic());
        assert_eq!(usd_kes.inverse().to_string(), "KES-USD");
    }

    #[test]
    fn test_parse_from_file_skips_blank_lines() {
        let input = Cursor::new("USD-GHS\n\n  EUR-NGN  \n");
        let pairs = CurrencyPair::parse_from_file(input).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].to_string(), "EUR-NGN");
    }

    #[test]
    fn test_parse_from_file_rejects_bad_line() {
        let input = Cursor::new("USD-GHS\nnonsense\n");
        let err = CurrencyPair::parse_from_file(input).unwrap_err();
        assert!(matches!(err, FxError::ParsePairsFile(_)));
    }
}
