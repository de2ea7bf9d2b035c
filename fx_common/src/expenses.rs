//! Multi-currency business expense ledger.
//!
//! Every rate in the ledger is quoted as units of the quote currency (GHS)
//! per unit of the foreign currency. An expense keeps the rate of the day it
//! was booked, so totals in the base currency are stable while the impact of
//! later rate moves can be reported separately.
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use log::warn;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::currency::Currency;
use crate::error::FxError;
use crate::pair::CurrencyPair;
use crate::result::Result;

/// Currency every ledger rate is quoted in.
pub const QUOTE_CURRENCY: Currency = Currency::GHS;

/// Expense category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[clap(rename_all = "lower")]
#[strum(ascii_case_insensitive)]
pub enum Category {
    /// Licences and hosting.
    Software,
    /// Contractors and consultants.
    Services,
    /// Rent and utilities.
    Facilities,
    /// Salaries.
    Personnel,
    /// Business trips.
    Travel,
    /// Anything else.
    Other,
}

/// Reporting period label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize, Deserialize)]
#[clap(rename_all = "lower")]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Current week.
    #[strum(to_string = "This Week")]
    Week,
    /// Current month.
    #[default]
    #[strum(to_string = "This Month")]
    Month,
    /// Current quarter.
    #[strum(to_string = "This Quarter")]
    Quarter,
    /// Current year.
    #[strum(to_string = "This Year")]
    Year,
}

/// A booked expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Identifier, `exp<n>`.
    pub id: String,
    /// Free text.
    pub description: String,
    /// Amount in `currency`.
    pub amount: f64,
    /// Currency the expense was paid in.
    pub currency: Currency,
    /// Category.
    pub category: Category,
    /// Booking date.
    pub date: NaiveDate,
    /// Quote-currency rate on the booking date.
    pub historical_rate: f64,
}

/// Effect of the rate move since booking on the value of the expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Rate moved by less than half a percent.
    Neutral,
    /// Rate rose; the expenses cost more today.
    Negative,
    /// Rate fell; the expenses cost less today.
    Positive,
}

/// Rate move analysis for one foreign currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateImpact {
    /// Foreign currency.
    pub currency: Currency,
    /// Direction the rate is read in, e.g. `1 USD to GHS`.
    pub rate_direction: String,
    /// Average rate the expenses were booked at.
    pub average_historical_rate: f64,
    /// Rate today.
    pub current_rate: f64,
    /// Percentage change from the average historical rate.
    pub change_percent: f64,
    /// Change in quote-currency value of the expenses.
    pub value_change: f64,
    /// Classification of the move.
    pub effect: Effect,
    /// Summary sentence.
    pub message: String,
}

/// Snapshot of the ledger for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseReport {
    /// Sum of all expenses in the base currency.
    pub total_expenses: f64,
    /// Base currency of the totals.
    pub base_currency: Currency,
    /// Raw amounts per currency, unconverted.
    pub currency_breakdown: BTreeMap<Currency, f64>,
    /// Base-currency amounts per category.
    pub category_breakdown: BTreeMap<Category, f64>,
    /// Share of the total paid in foreign currencies.
    pub foreign_currency_percentage: f64,
    /// Period label.
    pub time_range: TimeRange,
    /// Every expense.
    pub expenses: Vec<Expense>,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
}

/// Expenses, current rates and dated historical rates.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseLedger {
    base: Currency,
    expenses: Vec<Expense>,
    current: HashMap<Currency, f64>,
    history: BTreeMap<NaiveDate, HashMap<Currency, f64>>,
}

fn rate_or_fallback(rate: Option<f64>) -> f64 {
    match rate {
        Some(rate) if rate != 0.0 && rate.is_finite() => rate,
        _ => {
            warn!("Invalid exchange rate detected, using fallback");
            1.0
        }
    }
}

impl ExpenseLedger {
    /// Creates an empty ledger.
    pub fn new(
        base: Currency,
        current: HashMap<Currency, f64>,
        history: BTreeMap<NaiveDate, HashMap<Currency, f64>>,
    ) -> Self {
        Self {
            base,
            expenses: Vec::new(),
            current,
            history,
        }
    }

    /// Sample ledger with December 2023 expenses in GHS.
    pub fn builtin() -> Self {
        use crate::currency::Currency::{EUR, GBP, GHS, NGN, USD};
        let table = |usd, eur, gbp, ngn| {
            HashMap::from([(USD, usd), (EUR, eur), (GBP, gbp), (GHS, 1.0), (NGN, ngn)])
        };
        let day = |d| NaiveDate::from_ymd_opt(2023, 12, d).unwrap_or_default();
        let history = BTreeMap::from([
            (day(1), table(12.35, 13.40, 15.65, 0.0079)),
            (day(5), table(12.40, 13.42, 15.70, 0.0080)),
            (day(10), table(12.45, 13.55, 15.75, 0.0081)),
            (day(15), table(12.48, 13.60, 15.80, 0.0080)),
            (day(20), table(12.50, 13.62, 15.85, 0.0082)),
            (day(25), table(12.47, 13.59, 15.82, 0.0081)),
            (day(28), table(12.52, 13.63, 15.86, 0.0082)),
        ]);
        let mut ledger = Self::new(GHS, table(12.5, 13.6, 15.8, 0.008), history);

        let samples = [
            ("AWS Hosting", 500.0, USD, Category::Software, 1, 12.35),
            ("Marketing Consultant", 1200.0, EUR, Category::Services, 5, 13.42),
            ("Office Rent", 8000.0, GHS, Category::Facilities, 1, 1.0),
            ("Staff Salaries", 15000.0, GHS, Category::Personnel, 28, 1.0),
            ("Business Trip", 750.0, USD, Category::Travel, 15, 12.48),
            ("Software Licenses", 300.0, EUR, Category::Software, 10, 13.55),
        ];
        for (description, amount, currency, category, d, historical_rate) in samples {
            let id = format!("exp{}", ledger.expenses.len() + 1);
            ledger.expenses.push(Expense {
                id,
                description: description.to_string(),
                amount,
                currency,
                category,
                date: day(d),
                historical_rate,
            });
        }
        ledger
    }

    /// Base currency of the totals.
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Changes the base currency of the totals.
    pub fn set_base(&mut self, base: Currency) {
        self.base = base;
    }

    /// All expenses, in booking order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Currencies with a current rate, in code order.
    pub fn currencies(&self) -> Vec<Currency> {
        let mut currencies: Vec<Currency> = self.current.keys().copied().collect();
        currencies.sort();
        currencies
    }

    /// Quote-currency rate of `currency` on `date`.
    ///
    /// Uses the latest table dated on or before `date`, else the earliest
    /// table; a currency missing from that table falls back to the current
    /// rate. The base currency is always 1.
    pub fn historical_rate(&self, date: NaiveDate, currency: Currency) -> Option<f64> {
        if currency == self.base {
            return Some(1.0);
        }
        let table = self
            .history
            .range(..=date)
            .next_back()
            .or_else(|| self.history.iter().next())
            .map(|(_, table)| table);

        table
            .and_then(|t| t.get(&currency).copied())
            .or_else(|| self.current.get(&currency).copied())
    }

    /// Books an expense at the historical rate of its date.
    pub fn add_expense(
        &mut self,
        description: &str,
        amount: f64,
        currency: Currency,
        category: Category,
        date: NaiveDate,
    ) -> Result<&Expense> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(FxError::InvalidAmount(amount));
        }
        let historical_rate = self
            .historical_rate(date, currency)
            .ok_or(FxError::RateUnavailable(CurrencyPair::new(currency, QUOTE_CURRENCY)))?;

        let expense = Expense {
            id: format!("exp{}", self.expenses.len() + 1),
            description: description.to_string(),
            amount,
            currency,
            category,
            date,
            historical_rate,
        };
        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Converts `amount` from `from` into `to`.
    ///
    /// `historical_rate` is the quote-currency rate of `from`; `to` is valued
    /// at its current rate. Zero or missing rates are replaced with 1.
    pub fn convert_amount(
        &self,
        amount: f64,
        from: Currency,
        to: Currency,
        historical_rate: Option<f64>,
    ) -> f64 {
        if from == to {
            return amount;
        }
        if to == QUOTE_CURRENCY {
            return amount * rate_or_fallback(historical_rate);
        }
        let target_rate = rate_or_fallback(self.current.get(&to).copied());
        if from == QUOTE_CURRENCY {
            return amount / target_rate;
        }
        amount * rate_or_fallback(historical_rate) / target_rate
    }

    fn in_base(&self, expense: &Expense) -> f64 {
        self.convert_amount(
            expense.amount,
            expense.currency,
            self.base,
            Some(expense.historical_rate),
        )
    }

    /// Sum of all expenses in the base currency.
    pub fn total_in_base(&self) -> f64 {
        self.expenses.iter().map(|e| self.in_base(e)).sum()
    }

    /// Base-currency amounts per expense currency.
    pub fn distribution_by_currency(&self) -> BTreeMap<Currency, f64> {
        let mut acc = BTreeMap::new();
        for expense in &self.expenses {
            *acc.entry(expense.currency).or_insert(0.0) += self.in_base(expense);
        }
        acc
    }

    /// Base-currency amounts per category.
    pub fn distribution_by_category(&self) -> BTreeMap<Category, f64> {
        let mut acc = BTreeMap::new();
        for expense in &self.expenses {
            *acc.entry(expense.category).or_insert(0.0) += self.in_base(expense);
        }
        acc
    }

    /// Raw amounts per currency, unconverted.
    pub fn totals_by_currency(&self) -> BTreeMap<Currency, f64> {
        let mut acc = BTreeMap::new();
        for expense in &self.expenses {
            *acc.entry(expense.currency).or_insert(0.0) += expense.amount;
        }
        acc
    }

    /// Share of the base-currency total paid in foreign currencies.
    pub fn foreign_currency_percentage(&self) -> f64 {
        let total = self.total_in_base();
        if total == 0.0 {
            return 0.0;
        }
        self.distribution_by_currency()
            .iter()
            .filter(|(currency, _)| **currency != self.base)
            .map(|(_, amount)| amount / total * 100.0)
            .sum()
    }

    /// Rate move analysis for every foreign currency with a current rate.
    pub fn rate_impact(&self) -> Vec<RateImpact> {
        let mut by_currency: BTreeMap<Currency, Vec<&Expense>> = BTreeMap::new();
        for expense in self.expenses.iter().filter(|e| e.currency != self.base) {
            by_currency.entry(expense.currency).or_default().push(expense);
        }

        let base = self.base;
        by_currency
            .into_iter()
            .filter_map(|(currency, exps)| {
                let current_rate = self.current.get(&currency).copied()?;
                let total_amount: f64 = exps.iter().map(|e| e.amount).sum();
                let average_historical_rate =
                    exps.iter().map(|e| e.historical_rate).sum::<f64>() / exps.len() as f64;

                let rate_direction = if base == QUOTE_CURRENCY {
                    format!("1 {} to {}", currency, base)
                } else {
                    format!("1 {} to {}", base, currency)
                };
                let change_percent =
                    (current_rate - average_historical_rate) / average_historical_rate * 100.0;
                let value_change = total_amount * current_rate - total_amount * average_historical_rate;

                let (effect, message) = if change_percent.abs() < 0.5 {
                    (
                        Effect::Neutral,
                        format!(
                            "Current rate ({:.2}) is very similar to your historical average ({:.2}). No significant impact.",
                            current_rate, average_historical_rate
                        ),
                    )
                } else if change_percent > 0.0 {
                    (
                        Effect::Negative,
                        format!(
                            "Rate has increased from {:.2} to {:.2} ({:.1}%) since your transactions. This has raised the value of these expenses by {:.2} {}.",
                            average_historical_rate,
                            current_rate,
                            change_percent,
                            value_change.abs(),
                            base
                        ),
                    )
                } else {
                    (
                        Effect::Positive,
                        format!(
                            "Rate has decreased from {:.2} to {:.2} ({:.1}%) since your transactions. This has reduced the value of these expenses by {:.2} {}.",
                            average_historical_rate,
                            current_rate,
                            change_percent.abs(),
                            value_change.abs(),
                            base
                        ),
                    )
                };

                Some(RateImpact {
                    currency,
                    rate_direction,
                    average_historical_rate,
                    current_rate,
                    change_percent,
                    value_change,
                    effect,
                    message,
                })
            })
            .collect()
    }

    /// Full report for `time_range`, stamped with the current time.
    pub fn report(&self, time_range: TimeRange) -> ExpenseReport {
        ExpenseReport {
            total_expenses: self.total_in_base(),
            base_currency: self.base,
            currency_breakdown: self.totals_by_currency(),
            category_breakdown: self.distribution_by_category(),
            foreign_currency_percentage: self.foreign_currency_percentage(),
            time_range,
            expenses: self.expenses.clone(),
            generated_at: Utc::now(),
        }
    }
}
