//! Rate tick data model and JSON encoding helpers.
//!
//! A `RateTick` is the payload the feed broadcasts: the pair, its latest rate
//! and a millisecond UTC timestamp. This module also provides the random walk
//! the feed uses to move rates between ticks.

use chrono::Utc;
use fx_common::{CurrencyPair, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lowest rate the random walk may reach.
pub const MIN_RATE: f64 = 0.0001;

/// Latest rate of a single pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTick {
    /// Pair the rate belongs to.
    pub pair: CurrencyPair,
    /// Units of `pair.to` per unit of `pair.from`.
    pub rate: f64,
    /// UTC timestamp in milliseconds since Unix epoch.
    pub timestamp: u64,
}

impl RateTick {
    /// Calculate the next synthetic rate using a small random walk around `current_rate`.
    ///
    /// The change is sampled uniformly from `[-1%, +1%]` and the result is
    /// clamped to [`MIN_RATE`] so a rate never reaches zero.
    pub fn next_rate<R: Rng>(current_rate: f64, rng: &mut R) -> f64 {
        let change: f64 = rng.random_range(-0.01..0.01);
        let new_rate = current_rate * (1.0 + change);
        new_rate.max(MIN_RATE)
    }

    /// Generate the next tick for `pair`, moving from `current_rate`.
    pub fn generate_new<R: Rng>(pair: CurrencyPair, current_rate: f64, rng: &mut R) -> RateTick {
        RateTick {
            pair,
            rate: Self::next_rate(current_rate, rng),
            timestamp: Utc::now().timestamp_millis() as u64,
        }
    }

    /// Encode the tick to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let json = serde_json::to_vec(self)?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_next_rate_moves_at_most_one_percent() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1000 {
            let next = RateTick::next_rate(14.5, &mut rng);
            assert!((next - 14.5).abs() <= 0.145 + 1e-12);
        }
    }

    #[test]
    fn test_next_rate_never_reaches_zero() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut rate = MIN_RATE;
        for _ in 0..100 {
            rate = RateTick::next_rate(rate, &mut rng);
            assert!(rate >= MIN_RATE);
        }
    }

    #[test]
    fn test_json_bytes() {
        let mut rng = StdRng::seed_from_u64(5);
        let tick = RateTick::generate_new("USD-GHS".parse().unwrap(), 11.05, &mut rng);
        let json: serde_json::Value = serde_json::from_slice(&tick.to_json_bytes().unwrap()).unwrap();
        assert_eq!(json["pair"], "USD-GHS");
        assert!(json["timestamp"].as_u64().unwrap() > 0);
    }
}
