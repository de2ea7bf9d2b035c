//! Rate alerts.
//!
//! An alert watches one pair and fires when the rate crosses its target in
//! the chosen direction. The book also reports how close the current rate is
//! to each target and can suggest a target 5 % away from the current rate.
use std::collections::HashSet;

use clap::ValueEnum;
use log::info;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::currency::Currency;
use crate::error::FxError;
use crate::pair::CurrencyPair;
use crate::rate_source::RateTable;
use crate::result::Result;
use crate::round_to;

/// Side of the target that fires the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize, Deserialize)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Fires when the rate reaches or exceeds the target.
    Above,
    /// Fires when the rate reaches or falls under the target.
    Below,
}

/// Lifecycle of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    /// Watching the rate.
    Active,
    /// Switched off by the user.
    Paused,
    /// Target was reached.
    Triggered,
}

/// Channel the user is notified on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize, Deserialize)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Notification {
    /// E-mail message.
    #[default]
    Email,
    /// Text message.
    Sms,
    /// Push notification.
    Push,
}

/// A target rate on a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateAlert {
    /// Identifier, unique within a book.
    pub id: u32,
    /// Watched pair.
    pub pair: CurrencyPair,
    /// Target rate.
    pub target: f64,
    /// Side of the target that fires.
    pub direction: Direction,
    /// Current state.
    pub status: AlertStatus,
    /// Notification channel.
    #[serde(default)]
    pub notification: Notification,
}

impl RateAlert {
    /// True when `rate` satisfies the alert's condition.
    pub fn is_met_by(&self, rate: f64) -> bool {
        match self.direction {
            Direction::Above => rate >= self.target,
            Direction::Below => rate <= self.target,
        }
    }
}

/// Distance between the current rate and an alert's target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Proximity {
    /// `|current - target| / target * 100`.
    pub percentage: f64,
    /// Within 5 % of the target.
    pub is_close: bool,
    /// Within 1 % of the target.
    pub is_very_close: bool,
    /// Rate the distance was measured from.
    pub current_rate: f64,
}

/// Alerts plus the rates they are measured against.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertBook {
    alerts: Vec<RateAlert>,
    rates: RateTable,
}

impl AlertBook {
    /// Creates a book over `rates`.
    pub fn new(alerts: Vec<RateAlert>, rates: RateTable) -> Self {
        Self { alerts, rates }
    }

    /// Sample alerts and the mock current rates.
    pub fn builtin() -> Result<Self> {
        use crate::currency::Currency::{EUR, GBP, GHS, NGN, USD};
        let rates = RateTable::from_entries(&[
            (USD, EUR, 0.92),
            (EUR, GBP, 0.87),
            (USD, GHS, 13.5),
            (EUR, USD, 1.08),
            (GBP, EUR, 1.15),
            (GHS, USD, 0.074),
            (USD, NGN, 1450.75),
            (GBP, USD, 1.28),
        ])?;
        let alert = |id, from: Currency, to: Currency, target, direction, status| RateAlert {
            id,
            pair: CurrencyPair::new(from, to),
            target,
            direction,
            status,
            notification: Notification::Email,
        };
        let alerts = vec![
            alert(1, USD, EUR, 0.90, Direction::Below, AlertStatus::Active),
            alert(2, EUR, GBP, 0.85, Direction::Above, AlertStatus::Active),
            alert(3, USD, GHS, 15.00, Direction::Above, AlertStatus::Triggered),
        ];
        Ok(Self::new(alerts, rates))
    }

    /// All alerts, in creation order.
    pub fn alerts(&self) -> &[RateAlert] {
        &self.alerts
    }

    /// Current rate of `pair`: direct, else inverted from the opposite pair.
    pub fn current_rate(&self, pair: &CurrencyPair) -> Option<f64> {
        self.rates.get_rate_or_inverse(pair)
    }

    /// Records the latest rate observed for `pair`.
    pub fn update_rate(&mut self, pair: CurrencyPair, rate: f64) -> Result<()> {
        self.rates.insert(pair, rate)
    }

    /// Adds an active alert; its id is one more than the largest id in use.
    pub fn create(
        &mut self,
        pair: CurrencyPair,
        target: f64,
        direction: Direction,
        notification: Notification,
    ) -> Result<&RateAlert> {
        if !target.is_finite() || target <= 0.0 {
            return Err(FxError::InvalidRate(target));
        }
        let id = self.alerts.iter().map(|a| a.id).max().map_or(1, |max| max + 1);
        self.alerts.push(RateAlert {
            id,
            pair,
            target,
            direction,
            status: AlertStatus::Active,
            notification,
        });
        Ok(&self.alerts[self.alerts.len() - 1])
    }

    /// Removes and returns the alert with `id`.
    pub fn delete(&mut self, id: u32) -> Result<RateAlert> {
        let index = self
            .alerts
            .iter()
            .position(|a| a.id == id)
            .ok_or(FxError::AlertNotFound(id))?;
        Ok(self.alerts.remove(index))
    }

    /// Pauses an active alert; any other alert becomes active again.
    pub fn toggle(&mut self, id: u32) -> Result<AlertStatus> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(FxError::AlertNotFound(id))?;
        alert.status = match alert.status {
            AlertStatus::Active => AlertStatus::Paused,
            AlertStatus::Paused | AlertStatus::Triggered => AlertStatus::Active,
        };
        Ok(alert.status)
    }

    /// How close the current rate is to the alert's target.
    pub fn proximity(&self, alert: &RateAlert) -> Option<Proximity> {
        let current_rate = self.current_rate(&alert.pair)?;
        let percentage = (current_rate - alert.target).abs() / alert.target * 100.0;
        Some(Proximity {
            percentage,
            is_close: percentage < 5.0,
            is_very_close: percentage < 1.0,
            current_rate,
        })
    }

    /// Target 5 % below or above the current rate, rounded to 4 places.
    pub fn suggest_target(&self, pair: &CurrencyPair, direction: Direction) -> Option<f64> {
        let current_rate = self.current_rate(pair)?;
        let factor = match direction {
            Direction::Below => 0.95,
            Direction::Above => 1.05,
        };
        Some(round_to(current_rate * factor, 4))
    }

    /// Pairs watched by active alerts.
    pub fn watched_pairs(&self) -> HashSet<CurrencyPair> {
        self.alerts
            .iter()
            .filter(|a| a.status == AlertStatus::Active)
            .map(|a| a.pair)
            .collect()
    }

    /// Marks active alerts on `pair` met by `rate` as triggered and returns them.
    pub fn evaluate(&mut self, pair: &CurrencyPair, rate: f64) -> Vec<RateAlert> {
        let mut fired = Vec::new();
        for alert in self
            .alerts
            .iter_mut()
            .filter(|a| a.status == AlertStatus::Active && a.pair == *pair)
        {
            if alert.is_met_by(rate) {
                alert.status = AlertStatus::Triggered;
                info!(
                    "Alert {} triggered: {} {} {} (rate {:.4})",
                    alert.id, alert.pair, alert.direction, alert.target, rate
                );
                fired.push(alert.clone());
            }
        }
        fired
    }
}
