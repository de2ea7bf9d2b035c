//! Built-in catalog of remittance providers.
//!
//! Each provider publishes explicit rates for a few corridors. The remaining
//! pairs between the market currencies are filled in from a seeded
//! `SyntheticMarket`, and every pair gets a transfer time drawn from the
//! provider's speed.
use std::collections::HashMap;

use log::debug;

use crate::compare::Offer;
use crate::currency::{Currency, MARKET_CURRENCIES};
use crate::error::FxError;
use crate::pair::CurrencyPair;
use crate::provider::{FeeSchedule, Provider, Speed};
use crate::rate_source::{RateTable, UsdCrossRates};
use crate::result::Result;
use crate::synthetic::SyntheticMarket;

use crate::currency::Currency::{EUR, GBP, GHS, KES, NGN, USD, ZAR};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

struct ProviderEntry {
    name: &'static str,
    fee_percent: f64,
    base_fee: f64,
    speed: Speed,
    link: &'static str,
    rates: &'static [(Currency, Currency, f64)],
}

const PROVIDERS: &[ProviderEntry] = &[
    ProviderEntry {
        name: "Wise",
        fee_percent: 1.2,
        base_fee: 3.50,
        speed: Speed::OneHour,
        link: "https://wise.com",
        rates: &[
            (USD, GHS, 11.05),
            (EUR, GHS, 13.10),
            (USD, KES, 132.30),
            (USD, NGN, 1609.75),
            (GBP, GHS, 14.25),
            (USD, ZAR, 18.20),
            (EUR, NGN, 1725.80),
        ],
    },
    ProviderEntry {
        name: "Remitly",
        fee_percent: 1.8,
        base_fee: 2.99,
        speed: Speed::Minutes,
        link: "https://remitly.com",
        rates: &[
            (USD, GHS, 10.90),
            (EUR, GHS, 12.95),
            (USD, KES, 130.50),
            (USD, NGN, 1600.50),
            (GBP, GHS, 14.00),
            (USD, ZAR, 18.00),
            (EUR, NGN, 1715.60),
        ],
    },
    ProviderEntry {
        name: "WorldRemit",
        fee_percent: 2.0,
        base_fee: 3.99,
        speed: Speed::OneToTwoHours,
        link: "https://worldremit.com",
        rates: &[
            (USD, GHS, 11.00),
            (EUR, GHS, 12.88),
            (USD, KES, 131.90),
            (USD, NGN, 1590.25),
            (GBP, GHS, 14.05),
            (USD, ZAR, 17.90),
            (EUR, NGN, 1698.50),
        ],
    },
    ProviderEntry {
        name: "PaySend",
        fee_percent: 1.5,
        base_fee: 2.00,
        speed: Speed::WithinADay,
        link: "https://paysend.com",
        rates: &[
            (USD, GHS, 10.80),
            (EUR, GHS, 12.75),
            (USD, KES, 129.90),
            (USD, NGN, 1580.00),
            (GBP, GHS, 13.85),
            (USD, ZAR, 17.85),
            (EUR, NGN, 1690.30),
        ],
    },
    ProviderEntry {
        name: "SendWave",
        fee_percent: 1.0,
        base_fee: 1.50,
        speed: Speed::Instant,
        link: "https://sendwave.com",
        rates: &[
            (USD, GHS, 11.00),
            (USD, KES, 132.00),
            (USD, NGN, 1605.60),
            (USD, ZAR, 18.10),
        ],
    },
    ProviderEntry {
        name: "Xoom",
        fee_percent: 2.2,
        base_fee: 4.99,
        speed: Speed::Minutes,
        link: "https://xoom.com",
        rates: &[
            (USD, GHS, 10.85),
            (USD, NGN, 1595.75),
            (USD, KES, 131.20),
            (EUR, GHS, 12.90),
            (USD, ZAR, 17.95),
            (EUR, NGN, 1705.60),
        ],
    },
    ProviderEntry {
        name: "Western Union",
        fee_percent: 3.0,
        base_fee: 5.99,
        speed: Speed::SameDay,
        link: "https://westernunion.com",
        rates: &[
            (USD, GHS, 10.70),
            (USD, KES, 129.80),
            (USD, NGN, 1570.00),
            (USD, ZAR, 17.60),
        ],
    },
    ProviderEntry {
        name: "MoneyGram",
        fee_percent: 3.5,
        base_fee: 4.99,
        speed: Speed::WithinHours,
        link: "https://moneygram.com",
        rates: &[
            (USD, GHS, 10.60),
            (USD, KES, 129.00),
            (USD, NGN, 1565.00),
            (USD, ZAR, 17.55),
        ],
    },
    ProviderEntry {
        name: "Azimo",
        fee_percent: 1.7,
        base_fee: 2.49,
        speed: Speed::OneToTwoHours,
        link: "https://azimo.com",
        rates: &[
            (USD, GHS, 10.95),
            (USD, KES, 130.70),
            (USD, NGN, 1585.00),
            (EUR, NGN, 1700.00),
            (USD, ZAR, 17.80),
        ],
    },
    ProviderEntry {
        name: "Skrill",
        fee_percent: 2.3,
        base_fee: 3.99,
        speed: Speed::OneToTwoDays,
        link: "https://skrill.com",
        rates: &[
            (USD, GHS, 10.75),
            (USD, KES, 130.10),
            (USD, NGN, 1582.50),
            (EUR, NGN, 1702.20),
            (USD, ZAR, 18.05),
        ],
    },
    ProviderEntry {
        name: "Revolut",
        fee_percent: 1.4,
        base_fee: 4.00,
        speed: Speed::SameDay,
        link: "https://revolut.com",
        rates: &[
            (USD, GHS, 11.02),
            (EUR, GHS, 13.05),
            (USD, KES, 131.50),
            (USD, NGN, 1608.10),
            (GBP, GHS, 14.10),
            (USD, ZAR, 18.15),
            (EUR, NGN, 1720.00),
        ],
    },
    ProviderEntry {
        name: "XE",
        fee_percent: 1.9,
        base_fee: 3.50,
        speed: Speed::Minutes,
        link: "https://xe.com",
        rates: &[
            (USD, GHS, 10.92),
            (EUR, GHS, 12.98),
            (USD, KES, 130.80),
            (USD, NGN, 1598.00),
            (GBP, GHS, 13.95),
            (USD, ZAR, 18.00),
            (EUR, NGN, 1710.90),
        ],
    },
    ProviderEntry {
        name: "XTransfer",
        fee_percent: 1.3,
        base_fee: 2.75,
        speed: Speed::SameDay,
        link: "https://xtransfer.com",
        rates: &[
            (USD, GHS, 11.10),
            (USD, KES, 133.00),
            (USD, NGN, 1612.50),
            (USD, ZAR, 18.25),
        ],
    },
    ProviderEntry {
        name: "Nium",
        fee_percent: 1.6,
        base_fee: 3.25,
        speed: Speed::WithinHours,
        link: "https://nium.com",
        rates: &[
            (USD, GHS, 11.00),
            (EUR, GHS, 13.00),
            (USD, KES, 132.50),
            (USD, NGN, 1609.27),
            (GBP, GHS, 14.20),
            (USD, ZAR, 18.10),
            (EUR, NGN, 1723.80),
        ],
    },
];

/// The providers available for comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    providers: Vec<Provider>,
}

impl Catalog {
    /// Wraps an explicit provider list.
    pub fn new(providers: Vec<Provider>) -> Self {
        Self { providers }
    }

    /// Builds the built-in providers, synthesizing the missing pairs with `seed`.
    pub fn builtin(seed: u64) -> Result<Self> {
        let mut market = SyntheticMarket::new(UsdCrossRates::market(), seed);
        let mut providers = Vec::with_capacity(PROVIDERS.len());

        for entry in PROVIDERS {
            let schedule = FeeSchedule::new(entry.fee_percent, entry.base_fee)?;
            let mut rates = RateTable::from_entries(entry.rates)?;
            let mut minutes = HashMap::new();

            for from in MARKET_CURRENCIES {
                for to in MARKET_CURRENCIES {
                    if from == to {
                        continue;
                    }
                    let pair = CurrencyPair::new(from, to);
                    if !rates.contains(&pair) {
                        if let Some(rate) = market.provider_rate(&pair, entry.fee_percent) {
                            rates.insert(pair, rate)?;
                        }
                    }
                    minutes.insert(pair, market.transfer_minutes(entry.speed, &pair));
                }
            }
            debug!("{}: {} pairs quoted", entry.name, rates.len());

            providers.push(Provider {
                name: entry.name.to_string(),
                schedule,
                speed: entry.speed,
                link: entry.link.to_string(),
                rates,
                minutes,
            });
        }
        Ok(Self::new(providers))
    }

    /// All providers, in catalog order.
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Provider by name, ignoring case.
    pub fn find(&self, name: &str) -> Result<&Provider> {
        self.providers
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| FxError::ProviderNotFound(name.to_string()))
    }

    /// Offers of every provider quoting `pair`, in catalog order.
    pub fn offers(&self, pair: &CurrencyPair) -> Vec<Offer> {
        self.providers.iter().filter_map(|p| p.offer(pair)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_source::RateSource;

    fn pair(s: &str) -> CurrencyPair {
        s.parse().unwrap()
    }

    #[test]
    fn test_builtin_has_every_provider() {
        let catalog = Catalog::builtin(DEFAULT_SEED).unwrap();
        assert_eq!(catalog.providers().len(), 14);
        assert_eq!(catalog.find("western union").unwrap().speed, Speed::SameDay);
        assert!(matches!(
            catalog.find("Acme"),
            Err(FxError::ProviderNotFound(_))
        ));
    }

    #[test]
    fn test_explicit_rates_win_over_synthetic() {
        let catalog = Catalog::builtin(DEFAULT_SEED).unwrap();
        let wise = catalog.find("Wise").unwrap();
        assert_eq!(wise.rates.get_rate(&pair("USD-GHS")), Some(11.05));
        assert_eq!(wise.rates.get_rate(&pair("EUR-NGN")), Some(1725.80));
    }

    #[test]
    fn test_every_market_pair_is_filled() {
        let catalog = Catalog::builtin(DEFAULT_SEED).unwrap();
        for provider in catalog.providers() {
            assert_eq!(provider.rates.len(), 30 * 29);
            assert_eq!(provider.minutes.len(), 30 * 29);
        }
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        assert_eq!(Catalog::builtin(9).unwrap(), Catalog::builtin(9).unwrap());
    }

    #[test]
    fn test_offers_skip_unquoted_pairs() {
        let catalog = Catalog::builtin(DEFAULT_SEED).unwrap();
        assert_eq!(catalog.offers(&pair("USD-GHS")).len(), 14);
        assert!(catalog.offers(&pair("USD-UGX")).is_empty());
    }

    #[test]
    fn test_same_currency_offers_from_every_provider() {
        let catalog = Catalog::builtin(DEFAULT_SEED).unwrap();
        let offers = catalog.offers(&pair("GHS-GHS"));
        assert_eq!(offers.len(), 14);
        assert!(offers.iter().all(|o| o.rate == 1.0 && o.minutes == 0));
    }
}
