//! Command-line arguments for the FX tool.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};
use fx_common::alerts::{Direction, Notification};
use fx_common::board::{BoardFilter, BoardSort};
use fx_common::catalog::DEFAULT_SEED;
use fx_common::compare::{Criterion, SortOrder};
use fx_common::expenses::TimeRange;
use fx_common::history::TimeFrame;
use fx_common::prefs::{ChartType, DEFAULT_PREFS_FILE};
use fx_common::remittance::DeliveryMethod;
use fx_common::{Currency, CurrencyPair};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON file holding theme, dashboard and login preferences.
    #[clap(long, global = true, default_value = DEFAULT_PREFS_FILE)]
    pub prefs: String,

    /// Seed for the synthesized provider rates, so runs are reproducible.
    #[clap(long, global = true, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Top level actions.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Daily USD rate board, optionally filtered by code or country.
    Rates {
        /// Case-insensitive search on currency code or country.
        #[clap(long)]
        search: Option<String>,
    },
    /// Compare provider offers for a pair, e.g. `USD-GHS`.
    Compare {
        /// Pair to compare.
        pair: CurrencyPair,
        /// Field to filter and order on.
        #[clap(long, value_enum, default_value_t)]
        criterion: Criterion,
        /// Ordering of the result.
        #[clap(long, value_enum, default_value_t)]
        order: SortOrder,
        /// Highest indicative fee kept when the criterion is `fee`.
        #[clap(long, default_value_t = 100.0)]
        fee_threshold: f64,
        /// Slowest transfer, in minutes, kept when the criterion is `time`.
        #[clap(long, default_value_t = 1440)]
        time_threshold: u32,
    },
    /// Every provider's rate for a pair and what 100 units deliver after fees.
    Board {
        /// Pair to list.
        pair: CurrencyPair,
        /// Quick filter.
        #[clap(long, value_enum)]
        filter: Option<BoardFilter>,
        /// Ordering of the rows.
        #[clap(long, value_enum)]
        sort: Option<BoardSort>,
    },
    /// Quote an amount through one provider.
    Convert {
        /// Pair to convert.
        pair: CurrencyPair,
        /// Amount in the source currency.
        amount: f64,
        /// Provider name, case-insensitive.
        #[clap(long, default_value = "Wise")]
        provider: String,
    },
    /// Price a transfer between two African countries.
    Remit {
        /// Sending country, e.g. `Nigeria`.
        from: String,
        /// Receiving country, e.g. `Ghana`.
        to: String,
        /// Amount in the sending currency.
        amount: f64,
        /// Delivery method.
        #[clap(long, value_enum, default_value_t)]
        method: DeliveryMethod,
    },
    /// Manage rate alerts.
    Alerts {
        /// Alert action; lists the alerts when omitted.
        #[command(subcommand)]
        action: Option<AlertAction>,
    },
    /// Business expense report.
    Expenses {
        /// Currency totals are expressed in.
        #[clap(long, value_enum)]
        base: Option<Currency>,
        /// Period label of the report.
        #[clap(long, value_enum, default_value_t)]
        range: TimeRange,
        /// Print the report as JSON.
        #[clap(long)]
        json: bool,
    },
    /// Synthetic rate history for a pair.
    History {
        /// Pair to chart.
        pair: CurrencyPair,
        /// Window length.
        #[clap(long, value_enum, default_value_t)]
        frame: TimeFrame,
        /// Print only the points sampled for a chart.
        #[clap(long)]
        chart: bool,
    },
    /// Show or change saved preferences.
    Prefs {
        /// Preference action; shows the preferences when omitted.
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },
    /// Stream live rates and report alerts as they trigger.
    Watch {
        /// Path to a text file with extra pairs to stream, one `FROM-TO` per line.
        #[clap(long)]
        path: Option<String>,
        /// Milliseconds between rate updates.
        #[clap(long, default_value_t = 1000)]
        interval_ms: u64,
        /// Print each tick as a JSON line.
        #[clap(long)]
        json: bool,
    },
}

/// Alert sub-actions.
#[derive(Debug, Subcommand)]
pub enum AlertAction {
    /// List alerts with their distance to the target.
    List,
    /// Add an active alert.
    Create {
        /// Pair to watch.
        pair: CurrencyPair,
        /// Target rate.
        target: f64,
        /// Side of the target that fires the alert.
        #[clap(long, value_enum)]
        direction: Direction,
        /// Notification channel.
        #[clap(long, value_enum, default_value_t)]
        notification: Notification,
    },
    /// Remove an alert.
    Delete {
        /// Alert id.
        id: u32,
    },
    /// Pause or resume an alert.
    Toggle {
        /// Alert id.
        id: u32,
    },
    /// Suggest a target 5% away from the current rate.
    Suggest {
        /// Pair to watch.
        pair: CurrencyPair,
        /// Side of the target.
        #[clap(long, value_enum)]
        direction: Direction,
    },
}

/// Preference sub-actions.
#[derive(Debug, Subcommand)]
pub enum PrefsAction {
    /// Print the saved preferences.
    Show,
    /// Switch between light and dark theme.
    ToggleTheme,
    /// Remember an e-mail for login; forget it when omitted.
    Email {
        /// Address to remember.
        email: Option<String>,
    },
    /// Update the dashboard layout.
    Dashboard {
        /// Default display currency.
        #[clap(long, value_enum)]
        default_currency: Option<Currency>,
        /// Comma separated favourite pairs, e.g. `USD-EUR,USD-GHS`.
        #[clap(long, value_delimiter = ',')]
        favorites: Option<Vec<CurrencyPair>>,
        /// Show the market news panel.
        #[clap(long)]
        show_market_news: Option<bool>,
        /// Show the recent trends panel.
        #[clap(long)]
        show_recent_trends: Option<bool>,
        /// Chart style.
        #[clap(long, value_enum)]
        chart_type: Option<ChartType>,
    },
}
