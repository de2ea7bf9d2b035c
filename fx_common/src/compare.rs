//! Filtering and ordering of provider offers for one currency pair.
//!
//! An offer survives the filter when its rate exists and is non-zero and,
//! for the `fee` and `time` criteria, when it stays within the threshold.
//! Survivors are ordered by the composite "best value" score or by the
//! criterion's field. Sorting is stable, so ties keep catalog order.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::conversion::{quote, Quote};
use crate::pair::CurrencyPair;
use crate::catalog::Catalog;
use crate::provider::FeeSchedule;
use crate::result::Result;

/// A provider's terms for one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Provider name.
    pub provider: String,
    /// Rate quoted for the pair.
    pub rate: f64,
    /// Indicative fee, see [`crate::conversion::indicative_fee`].
    pub fee: f64,
    /// Transfer time in minutes.
    pub minutes: u32,
    /// Fee schedule used to quote a concrete amount.
    pub schedule: FeeSchedule,
}

impl Offer {
    /// Composite score: `rate - fee - minutes / 1000`. Higher is better.
    pub fn score(&self) -> f64 {
        self.rate - self.fee - self.minutes as f64 / 1000.0
    }

    /// Quote for sending `amount` through this offer.
    pub fn quote(&self, amount: f64) -> Result<Quote> {
        quote(amount, self.rate, self.schedule.model())
    }

    fn field(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::All | Criterion::Rate => self.rate,
            Criterion::Fee => self.fee,
            Criterion::Time => self.minutes as f64,
        }
    }
}

/// Field the filter and the single-field orderings act on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize, Deserialize)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// No threshold; single-field orderings use the rate.
    #[default]
    All,
    /// No threshold; order by rate.
    Rate,
    /// Exclude fees above the fee threshold; order by fee.
    Fee,
    /// Exclude transfers slower than the time threshold; order by time.
    Time,
}

/// Ordering of the surviving offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize, Deserialize)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Descending composite score.
    #[default]
    Best,
    /// Ascending by the criterion's field.
    Lowest,
    /// Descending by the criterion's field.
    Highest,
}

/// Filter and ordering settings of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonQuery {
    /// Field to filter and order on.
    pub criterion: Criterion,
    /// Ordering of the result.
    pub order: SortOrder,
    /// Maximum indicative fee when filtering by fee.
    pub fee_threshold: f64,
    /// Maximum transfer minutes when filtering by time.
    pub time_threshold: u32,
}

impl Default for ComparisonQuery {
    fn default() -> Self {
        Self {
            criterion: Criterion::All,
            order: SortOrder::Best,
            fee_threshold: 100.0,
            time_threshold: 24 * 60,
        }
    }
}

impl ComparisonQuery {
    fn admits(&self, offer: &Offer) -> bool {
        if offer.rate == 0.0 {
            return false;
        }
        match self.criterion {
            Criterion::Fee => offer.fee <= self.fee_threshold,
            Criterion::Time => offer.minutes <= self.time_threshold,
            Criterion::All | Criterion::Rate => true,
        }
    }
}

/// Filters and orders `offers` according to `query`.
pub fn rank(offers: Vec<Offer>, query: &ComparisonQuery) -> Vec<Offer> {
    let mut ranked: Vec<Offer> = offers.into_iter().filter(|o| query.admits(o)).collect();
    match query.order {
        SortOrder::Best => ranked.sort_by(|a, b| b.score().total_cmp(&a.score())),
        SortOrder::Lowest => ranked.sort_by(|a, b| {
            a.field(query.criterion).total_cmp(&b.field(query.criterion))
        }),
        SortOrder::Highest => ranked.sort_by(|a, b| {
            b.field(query.criterion).total_cmp(&a.field(query.criterion))
        }),
    }
    ranked
}

/// Offers of the catalog's providers for `pair`, filtered and ordered by `query`.
pub fn compare(catalog: &Catalog, pair: &CurrencyPair, query: &ComparisonQuery) -> Vec<Offer> {
    rank(catalog.offers(pair), query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, DEFAULT_SEED};
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn offer(provider: &str, rate: f64, fee: f64, minutes: u32) -> Offer {
        Offer {
            provider: provider.to_string(),
            rate,
            fee,
            minutes,
            schedule: FeeSchedule::new(1.0, 1.0).unwrap(),
        }
    }

    fn sample() -> Vec<Offer> {
        vec![
            offer("A", 11.0, 40.0, 60),
            offer("B", 10.0, 20.0, 2000),
            offer("C", 0.0, 1.0, 5),
            offer("D", 12.0, 60.0, 10),
            offer("E", 11.0, 40.0, 60),
        ]
    }

    fn names(offers: &[Offer]) -> Vec<&str> {
        offers.iter().map(|o| o.provider.as_str()).collect()
    }

    #[test]
    fn test_best_orders_by_score() {
        let ranked = rank(sample(), &ComparisonQuery::default());
        assert_eq!(names(&ranked), vec!["B", "A", "E", "D"]);
        assert_abs_diff_eq!(ranked[0].score(), 10.0 - 20.0 - 2.0);
    }

    #[test]
    fn test_zero_rate_is_dropped() {
        let ranked = rank(sample(), &ComparisonQuery::default());
        assert!(ranked.iter().all(|o| o.provider != "C"));
    }

    #[test]
    fn test_fee_threshold() {
        let query = ComparisonQuery {
            criterion: Criterion::Fee,
            order: SortOrder::Lowest,
            fee_threshold: 40.0,
            ..Default::default()
        };
        let ranked = rank(sample(), &query);
        assert_eq!(names(&ranked), vec!["B", "A", "E"]);
    }

    #[test]
    fn test_time_threshold() {
        let query = ComparisonQuery {
            criterion: Criterion::Time,
            order: SortOrder::Highest,
            ..Default::default()
        };
        let ranked = rank(sample(), &query);
        assert_eq!(names(&ranked), vec!["A", "E", "D"]);
    }

    #[test]
    fn test_all_sorts_by_rate() {
        let query = ComparisonQuery {
            order: SortOrder::Highest,
            ..Default::default()
        };
        assert_eq!(names(&rank(sample(), &query)), vec!["D", "A", "E", "B"]);
    }

    #[rstest]
    #[case(Criterion::Rate)]
    #[case(Criterion::Fee)]
    #[case(Criterion::Time)]
    fn test_orderings_are_monotonic(#[case] criterion: Criterion) {
        let catalog = Catalog::builtin(DEFAULT_SEED).unwrap();
        let pair = "USD-NGN".parse().unwrap();
        let lowest = ComparisonQuery {
            criterion,
            order: SortOrder::Lowest,
            fee_threshold: f64::MAX,
            time_threshold: u32::MAX,
        };
        let ranked = compare(&catalog, &pair, &lowest);
        assert!(ranked.windows(2).all(|w| w[0].field(criterion) <= w[1].field(criterion)));

        let highest = ComparisonQuery {
            order: SortOrder::Highest,
            ..lowest
        };
        let ranked = compare(&catalog, &pair, &highest);
        assert!(ranked.windows(2).all(|w| w[0].field(criterion) >= w[1].field(criterion)));
    }

    #[test]
    fn test_fee_filter_on_catalog() {
        let catalog = Catalog::builtin(DEFAULT_SEED).unwrap();
        let pair = "USD-GHS".parse().unwrap();
        let query = ComparisonQuery {
            criterion: Criterion::Fee,
            fee_threshold: 40.0,
            ..Default::default()
        };
        let ranked = compare(&catalog, &pair, &query);
        assert!(!ranked.is_empty());
        assert!(ranked.iter().all(|o| o.fee <= 40.0));
        assert!(ranked.len() < catalog.providers().len());
    }

    #[test]
    fn test_offer_quote_uses_schedule() {
        let catalog = Catalog::builtin(DEFAULT_SEED).unwrap();
        let wise = catalog.find("Wise").unwrap();
        let q = wise.offer(&"USD-GHS".parse().unwrap()).unwrap().quote(100.0).unwrap();
        assert_abs_diff_eq!(q.net, 1053.065, epsilon = 1e-9);
    }

    #[test]
    fn test_same_currency_pair_is_compared_at_par() {
        let catalog = Catalog::builtin(DEFAULT_SEED).unwrap();
        let pair = "USD-USD".parse().unwrap();
        let ranked = compare(&catalog, &pair, &ComparisonQuery::default());
        assert_eq!(ranked.len(), catalog.providers().len());
        assert!(ranked.iter().all(|o| o.rate == 1.0));

        let wise = ranked.iter().find(|o| o.provider == "Wise").unwrap();
        let q = wise.quote(100.0).unwrap();
        assert_abs_diff_eq!(q.net, 100.0 - 3.5 - 1.2, epsilon = 1e-9);
    }
}
