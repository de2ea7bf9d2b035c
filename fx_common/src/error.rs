//! Error types shared by the library, the rate feed and the CLI.
//!
//! The `FxError` enum unifies I/O and serialization failures, parsing of
//! currencies and pairs, contract violations of the conversion engine and
//! channel failures of the rate feed, so every crate can propagate a single
//! error type with `?`.
use std::io;

use thiserror::Error;

use crate::pair::CurrencyPair;

/// Unified error type shared by every crate of the workspace.
#[derive(Error, Debug)]
pub enum FxError {
    /// I/O error originating from preference or pairs files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A currency code that is not part of the supported set.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// A country name that is not served.
    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    /// A pair that is not of the `FROM-TO` form.
    #[error("Invalid currency pair: {0}")]
    ParsePair(String),

    /// Error while parsing a pairs file into `CurrencyPair` values.
    #[error("Parse pairs file error: {0}")]
    ParsePairsFile(String),

    /// Amount is negative or not a finite number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// Rate is non-positive or not a finite number.
    #[error("Invalid rate: {0}")]
    InvalidRate(f64),

    /// Fee percentage or base fee is negative or not a finite number.
    #[error("Invalid fee: {0}")]
    InvalidFee(f64),

    /// No rate is known for the requested pair.
    #[error("No rate available for {0}")]
    RateUnavailable(CurrencyPair),

    /// Lookup by provider name failed.
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// Lookup by alert id failed.
    #[error("Alert not found: {0}")]
    AlertNotFound(u32),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// Installing the Ctrl+C handler failed.
    #[error("Signal handler error: {0}")]
    SignalHandler(String),
}
