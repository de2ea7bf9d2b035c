//!
//! Currency exchange core shared by the rate feed and the command line tool.
//!
//! This crate aggregates:
//! - `error`: unified error type `FxError` used across the workspace.
//! - `result`: handy `Result<T, FxError>` alias.
//! - `currency`: supported currency codes and their labels.
//! - `pair`: `CurrencyPair` lookup key and pairs-file parsing.
//! - `rate_source`: the `RateSource` capability and static rate tables.
//! - `provider`: providers, fee schedules and transfer speeds.
//! - `conversion`: fee models and quote computation.
//! - `synthetic`: seeded synthetic market used to fill provider tables.
//! - `catalog`: the built-in list of remittance providers.
//! - `compare`: filtering and ordering of provider offers.
//! - `board`: provider rate board with quick filters.
//! - `remittance`: intra-Africa transfer quotes.
//! - `alerts`: rate alert book.
//! - `expenses`: multi-currency business expense ledger.
//! - `history`: synthetic historical rate series.
//! - `prefs`: persisted user preferences.
#![warn(missing_docs)]
pub mod alerts;
pub mod board;
pub mod catalog;
pub mod compare;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod expenses;
pub mod history;
pub mod pair;
pub mod prefs;
pub mod provider;
pub mod rate_source;
pub mod remittance;
pub mod result;
pub mod synthetic;

pub use currency::Currency;
pub use error::FxError;
pub use pair::CurrencyPair;
pub use rate_source::RateSource;
pub use result::Result;

/// Round to `places` decimal digits, the way the views display amounts.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
