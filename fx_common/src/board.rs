//! Provider rate board: every provider's rate for one pair and what a
//! typical transfer delivers once the percentage fee is taken off the
//! converted amount.
//!
//! The board lists providers without a rate for the pair too, so the user
//! sees who does not serve it. The quick filters and the two orderings
//! mirror the board's drop-downs.
use clap::ValueEnum;
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::catalog::Catalog;
use crate::conversion::{FeeModel, TYPICAL_AMOUNT, quote};
use crate::pair::CurrencyPair;
use crate::provider::{Provider, Speed};
use crate::result::Result;
use crate::round_to;

/// Fee percentages under this count as low.
pub const LOW_FEE_PERCENT: f64 = 2.5;

/// Rates above this count as good.
pub const GOOD_RATE: f64 = 10.8;

const FAST_SPEEDS: [&str; 4] = ["minutes", "within minutes", "1 hour", "instant"];

/// Quick filter of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize)]
#[clap(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum BoardFilter {
    /// Fee percentage below [`LOW_FEE_PERCENT`].
    LowestFee,
    /// Rate above [`GOOD_RATE`].
    BestRate,
    /// Delivery in minutes or within the hour.
    Fastest,
}

/// Ordering of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BoardSort {
    /// Highest rate first; providers without a rate last.
    Rate,
    /// Lowest fee percentage first.
    Fee,
}

/// One provider on the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardRow {
    /// Provider name.
    pub provider: String,
    /// Rate for the pair, if the provider serves it.
    pub rate: Option<f64>,
    /// Percentage fee.
    pub fee_percent: f64,
    /// Advertised speed.
    pub speed: Speed,
    /// Provider website.
    pub link: String,
    /// Amount received for [`TYPICAL_AMOUNT`], rounded to cents.
    pub received: Option<f64>,
}

fn is_fast(speed: Speed) -> bool {
    let label = speed.to_string().to_lowercase();
    FAST_SPEEDS.iter().any(|fast| label.contains(fast))
}

fn admits(filter: BoardFilter, provider: &Provider, rate: Option<f64>) -> bool {
    match filter {
        BoardFilter::LowestFee => provider.schedule.fee_percent < LOW_FEE_PERCENT,
        BoardFilter::BestRate => rate.is_some_and(|r| r > GOOD_RATE),
        BoardFilter::Fastest => is_fast(provider.speed),
    }
}

/// Board of the catalog's providers for `pair`.
pub fn rate_board(
    catalog: &Catalog,
    pair: &CurrencyPair,
    filter: Option<BoardFilter>,
    sort: Option<BoardSort>,
) -> Result<Vec<BoardRow>> {
    let mut rows = Vec::new();
    for provider in catalog.providers() {
        let rate = provider.rate_for(pair).filter(|r| *r > 0.0);
        if filter.is_some_and(|f| !admits(f, provider, rate)) {
            continue;
        }
        let fee_percent = provider.schedule.fee_percent;
        let received = match rate {
            Some(rate) => {
                let q = quote(TYPICAL_AMOUNT, rate, FeeModel::Deducted { fee_percent })?;
                Some(round_to(q.net, 2))
            }
            None => None,
        };
        rows.push(BoardRow {
            provider: provider.name.clone(),
            rate,
            fee_percent,
            speed: provider.speed,
            link: provider.link.clone(),
            received,
        });
    }

    match sort {
        Some(BoardSort::Rate) => rows.sort_by(|a, b| {
            b.rate.unwrap_or(0.0).total_cmp(&a.rate.unwrap_or(0.0))
        }),
        Some(BoardSort::Fee) => rows.sort_by(|a, b| a.fee_percent.total_cmp(&b.fee_percent)),
        None => {}
    }
    Ok(rows)
}
