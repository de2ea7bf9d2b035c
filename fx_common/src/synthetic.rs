//! Seeded synthetic market used to fill in provider rate tables.
//!
//! Providers only publish explicit rates for a handful of corridors. Every
//! other pair is derived from the USD cross rate, shifted by the provider's
//! fee level and a random market spread. Transfer times are drawn from the
//! provider's speed window and adjusted for the corridor.
//!
//! All draws come from a `StdRng` seeded by the caller, so a market created
//! with the same seed produces the same tables.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pair::CurrencyPair;
use crate::provider::Speed;
use crate::rate_source::{RateSource, UsdCrossRates};
use crate::round_to;

/// Extra spread applied when either side is not a common currency.
const EXOTIC_SPREAD: f64 = 0.98;

/// Random rate and transfer-time generator.
pub struct SyntheticMarket {
    base: UsdCrossRates,
    rng: StdRng,
}

impl SyntheticMarket {
    /// Creates a market over `base` cross rates, seeded with `seed`.
    pub fn new(base: UsdCrossRates, seed: u64) -> Self {
        Self {
            base,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Rate a provider charging `fee_percent` would offer for `pair`.
    ///
    /// Higher-fee providers quote slightly better rates; the market spread is
    /// drawn from `[0.5 %, 2 %)`. Returns `None` when the base table has no
    /// rate for either side.
    pub fn provider_rate(&mut self, pair: &CurrencyPair, fee_percent: f64) -> Option<f64> {
        let base_rate = self.base.get_rate(pair)?;
        let platform_variation = 1.0 + (fee_percent - 2.0) / 100.0;
        let market_spread = self.rng.random_range(0.005..0.02);

        let mut rate = round_to(base_rate * platform_variation * (1.0 - market_spread), 4);
        if !pair.from.is_common() || !pair.to.is_common() {
            rate *= EXOTIC_SPREAD;
        }
        Some(rate)
    }

    /// Transfer time in minutes for a provider advertising `speed` on `pair`.
    ///
    /// High-volume corridors are 30 % faster (at least one minute), exotic
    /// corridors 50 % slower.
    pub fn transfer_minutes(&mut self, speed: Speed, pair: &CurrencyPair) -> u32 {
        let (base, span) = speed.window();
        let minutes = base + self.rng.random_range(0..span);

        if pair.is_high_volume() {
            ((minutes as f64 * 0.7).floor() as u32).max(1)
        } else if pair.is_exotic() {
            (minutes as f64 * 1.5).floor() as u32
        } else {
            minutes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use strum::IntoEnumIterator;

    fn pair(s: &str) -> CurrencyPair {
        s.parse().unwrap()
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = SyntheticMarket::new(UsdCrossRates::market(), 7);
        let mut b = SyntheticMarket::new(UsdCrossRates::market(), 7);
        for p in ["USD-EUR", "JPY-THB", "GBP-NGN"] {
            assert_eq!(a.provider_rate(&pair(p), 1.5), b.provider_rate(&pair(p), 1.5));
            assert_eq!(
                a.transfer_minutes(Speed::SameDay, &pair(p)),
                b.transfer_minutes(Speed::SameDay, &pair(p))
            );
        }
    }

    #[test]
    fn test_rate_stays_within_spread() {
        let mut market = SyntheticMarket::new(UsdCrossRates::market(), 1);
        for _ in 0..100 {
            let rate = market.provider_rate(&pair("USD-EUR"), 2.0).unwrap();
            assert!(rate <= 0.92 * 0.995 + 1e-4, "rate {rate}");
            assert!(rate >= 0.92 * 0.98 - 1e-4, "rate {rate}");
        }
    }

    #[test]
    fn test_exotic_pairs_carry_extra_spread() {
        let mut market = SyntheticMarket::new(UsdCrossRates::market(), 1);
        for _ in 0..100 {
            let rate = market.provider_rate(&pair("USD-GHS"), 2.0).unwrap();
            assert!(rate <= 14.5 * 0.995 * EXOTIC_SPREAD + 1e-3, "rate {rate}");
        }
    }

    #[test]
    fn test_unknown_currency_has_no_rate() {
        let mut market = SyntheticMarket::new(UsdCrossRates::market(), 1);
        assert_eq!(market.provider_rate(&pair("USD-UGX"), 2.0), None);
    }

    #[test]
    fn test_minutes_follow_speed_window() {
        let mut market = SyntheticMarket::new(UsdCrossRates::market(), 3);
        let plain = CurrencyPair::new(Currency::USD, Currency::NGN);
        for speed in Speed::iter() {
            let (base, span) = speed.window();
            for _ in 0..20 {
                let minutes = market.transfer_minutes(speed, &plain);
                assert!(minutes >= base && minutes < base + span);
            }
        }
    }

    #[test]
    fn test_corridor_adjustments() {
        let mut market = SyntheticMarket::new(UsdCrossRates::market(), 3);
        for _ in 0..20 {
            let fast = market.transfer_minutes(Speed::OneToTwoDays, &pair("EUR-USD"));
            assert!((1008..2016).contains(&fast), "{fast}");
            let slow = market.transfer_minutes(Speed::Instant, &pair("USD-KES"));
            assert!((3..15).contains(&slow), "{slow}");
        }
    }
}
