//! Fee models and quote computation.
//!
//! Three fee formulas are in use across the views, each modelled as a
//! `FeeModel` variant:
//!
//! - `Platform`: flat fee plus percentage, both converted at the rate and
//!   deducted from the converted amount (provider comparison).
//! - `SendSurcharge`: percentage of the sent amount charged on top, in the
//!   source currency (intra-Africa remittance).
//! - `Deducted`: percentage of the converted amount deducted (provider rate
//!   board).
//!
//! A `Quote` is never stored; it is derived on demand from an amount, a rate
//! and a fee model.
use serde::{Deserialize, Serialize};

use crate::error::FxError;
use crate::provider::FeeSchedule;
use crate::result::Result;
use crate::round_to;

/// Amount in source units the indicative comparison fee is computed for.
pub const TYPICAL_AMOUNT: f64 = 100.0;

/// How a provider charges for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeeModel {
    /// `base_fee * rate + amount * pct * rate`, deducted from the converted amount.
    Platform {
        /// Percentage of the amount.
        fee_percent: f64,
        /// Flat fee in the source currency.
        base_fee: f64,
    },
    /// `amount * pct` charged on top of the amount, in the source currency.
    SendSurcharge {
        /// Percentage of the amount.
        fee_percent: f64,
    },
    /// `amount * rate * pct` deducted from the converted amount.
    Deducted {
        /// Percentage of the converted amount.
        fee_percent: f64,
    },
}

/// Currency a quote's fee is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeCurrency {
    /// Charged in the currency being sold.
    Source,
    /// Deducted from the currency being bought.
    Target,
}

/// Result of converting an amount at a rate under a fee model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Amount sent, in source units.
    pub amount: f64,
    /// Rate applied.
    pub rate: f64,
    /// `amount * rate`.
    pub gross: f64,
    /// Fee, in `fee_currency`.
    pub fee: f64,
    /// Currency of `fee`.
    pub fee_currency: FeeCurrency,
    /// Amount received, in target units; never negative.
    pub net: f64,
    /// Amount the sender pays, in source units.
    pub total_cost: f64,
}

impl FeeModel {
    fn fee_percent(&self) -> f64 {
        match *self {
            FeeModel::Platform { fee_percent, .. }
            | FeeModel::SendSurcharge { fee_percent }
            | FeeModel::Deducted { fee_percent } => fee_percent,
        }
    }

    fn validate(&self) -> Result<()> {
        let mut values = vec![self.fee_percent()];
        if let FeeModel::Platform { base_fee, .. } = *self {
            values.push(base_fee);
        }
        match values.into_iter().find(|v| !v.is_finite() || *v < 0.0) {
            Some(bad) => Err(FxError::InvalidFee(bad)),
            None => Ok(()),
        }
    }
}

/// Computes the quote for `amount` at `rate` under `model`.
///
/// Rejects a negative or non-finite amount, a non-positive or non-finite
/// rate and negative fee inputs.
pub fn quote(amount: f64, rate: f64, model: FeeModel) -> Result<Quote> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(FxError::InvalidAmount(amount));
    }
    if !rate.is_finite() || rate <= 0.0 {
        return Err(FxError::InvalidRate(rate));
    }
    model.validate()?;

    let gross = amount * rate;
    let quote = match model {
        FeeModel::Platform {
            fee_percent,
            base_fee,
        } => {
            let fee = base_fee * rate + amount * (fee_percent / 100.0) * rate;
            Quote {
                amount,
                rate,
                gross,
                fee,
                fee_currency: FeeCurrency::Target,
                net: (gross - fee).max(0.0),
                total_cost: amount,
            }
        }
        FeeModel::SendSurcharge { fee_percent } => {
            let fee = amount * fee_percent / 100.0;
            Quote {
                amount,
                rate,
                gross,
                fee,
                fee_currency: FeeCurrency::Source,
                net: gross,
                total_cost: amount + fee,
            }
        }
        FeeModel::Deducted { fee_percent } => {
            let fee = gross * fee_percent / 100.0;
            Quote {
                amount,
                rate,
                gross,
                fee,
                fee_currency: FeeCurrency::Target,
                net: (gross - fee).max(0.0),
                total_cost: amount,
            }
        }
    };
    Ok(quote)
}

/// Fee shown in the comparison list: the flat fee converted at `rate` plus
/// the percentage of [`TYPICAL_AMOUNT`], rounded to cents.
///
/// The percentage part is not converted at the rate; the comparison ranks
/// providers on this figure, not on an amount-specific quote.
pub fn indicative_fee(rate: f64, schedule: &FeeSchedule) -> f64 {
    let base_fee_to_currency = schedule.base_fee * rate;
    let percentage_fee_amount = TYPICAL_AMOUNT * (schedule.fee_percent / 100.0);
    round_to(base_fee_to_currency + percentage_fee_amount, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    const WISE: FeeModel = FeeModel::Platform {
        fee_percent: 1.2,
        base_fee: 3.5,
    };

    #[test]
    fn test_platform_quote_usd_ghs() {
        let q = quote(100.0, 11.05, WISE).unwrap();
        assert_abs_diff_eq!(q.gross, 1105.0, epsilon = 1e-9);
        assert_abs_diff_eq!(q.fee, 51.935, epsilon = 1e-9);
        assert_abs_diff_eq!(q.net, 1053.065, epsilon = 1e-9);
        assert_eq!(q.fee_currency, FeeCurrency::Target);
        assert_abs_diff_eq!(q.total_cost, 100.0);
    }

    #[test]
    fn test_identity_rate_deducts_fees_in_same_currency() {
        let q = quote(100.0, 1.0, WISE).unwrap();
        assert_abs_diff_eq!(q.net, 100.0 - 3.5 - 1.2, epsilon = 1e-9);
    }

    #[test]
    fn test_net_is_clamped_at_zero() {
        let q = quote(1.0, 2.0, WISE).unwrap();
        assert_eq!(q.net, 0.0);
        let q = quote(0.0, 2.0, WISE).unwrap();
        assert_eq!(q.net, 0.0);
    }

    #[rstest]
    #[case(WISE)]
    #[case(FeeModel::SendSurcharge { fee_percent: 2.2 })]
    #[case(FeeModel::Deducted { fee_percent: 1.7 })]
    fn test_gross_scales_linearly(#[case] model: FeeModel) {
        let one = quote(250.0, 13.1, model).unwrap();
        let three = quote(750.0, 13.1, model).unwrap();
        assert_abs_diff_eq!(three.gross, one.gross * 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_send_surcharge() {
        let q = quote(1000.0, 0.009, FeeModel::SendSurcharge { fee_percent: 2.2 }).unwrap();
        assert_abs_diff_eq!(q.net, 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(q.fee, 22.0, epsilon = 1e-12);
        assert_abs_diff_eq!(q.total_cost, 1022.0, epsilon = 1e-12);
        assert_eq!(q.fee_currency, FeeCurrency::Source);
    }

    #[test]
    fn test_deducted() {
        let q = quote(100.0, 10.95, FeeModel::Deducted { fee_percent: 1.7 }).unwrap();
        assert_abs_diff_eq!(q.net, 1076.385, epsilon = 1e-9);
    }

    #[rstest]
    #[case(-1.0, 1.0)]
    #[case(f64::NAN, 1.0)]
    #[case(1.0, 0.0)]
    #[case(1.0, -2.0)]
    #[case(1.0, f64::INFINITY)]
    fn test_rejects_bad_inputs(#[case] amount: f64, #[case] rate: f64) {
        assert!(quote(amount, rate, WISE).is_err());
    }

    #[test]
    fn test_rejects_negative_fee() {
        let model = FeeModel::Platform {
            fee_percent: 1.0,
            base_fee: -1.0,
        };
        assert!(matches!(quote(1.0, 1.0, model), Err(FxError::InvalidFee(_))));
    }

    #[test]
    fn test_indicative_fee() {
        let schedule = FeeSchedule::new(1.0, 1.5).unwrap();
        assert_abs_diff_eq!(indicative_fee(11.0, &schedule), 17.5, epsilon = 1e-9);
    }
}
