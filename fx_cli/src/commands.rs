//! Handlers for each subcommand. Every handler prints to stdout and returns
//! the first library error it hits.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use chrono::Utc;
use crossbeam_channel::never;
use fx_common::alerts::{AlertBook, RateAlert};
use fx_common::board::{BoardFilter, BoardSort, rate_board};
use fx_common::catalog::Catalog;
use fx_common::compare::{ComparisonQuery, Offer, compare};
use fx_common::conversion::{FeeCurrency, Quote, TYPICAL_AMOUNT};
use fx_common::expenses::{ExpenseLedger, TimeRange};
use fx_common::history::{self, TimeFrame};
use fx_common::pair::PairParser;
use fx_common::prefs::{DashboardUpdate, PreferenceStore};
use fx_common::provider::format_minutes;
use fx_common::rate_source::UsdCrossRates;
use fx_common::remittance::{AfricaRates, DeliveryMethod, corridors_from, quote_between};
use fx_common::{Currency, CurrencyPair, FxError, Result};
use fx_feed::{RateFeed, seed_rates, watch_alerts};
use log::{error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::args::{AlertAction, PrefsAction};
use crate::{is_file_exist, normalize_path};

pub fn rates(search: Option<&str>) {
    let board = UsdCrossRates::daily();
    let entries = board.search(search.unwrap_or(""));
    if entries.is_empty() {
        println!("No currency matches {:?}", search.unwrap_or(""));
        return;
    }
    for (currency, per_usd) in entries {
        println!("{:<4} {:<24} {:>12.4}", currency, currency.country(), per_usd);
    }
}

pub fn compare_offers(catalog: &Catalog, pair: CurrencyPair, query: ComparisonQuery) {
    let offers = compare(catalog, &pair, &query);
    if offers.is_empty() {
        println!("No provider quotes {} for this filter", pair);
        return;
    }
    println!("{} ({} by {})", pair, query.order, query.criterion);
    for (rank, offer) in offers.iter().enumerate() {
        println!(
            "{:>2}. {:<20} rate {:>12.4}  fee {:>10.2}  time {}",
            rank + 1,
            offer.provider,
            offer.rate,
            offer.fee,
            format_minutes(offer.minutes)
        );
    }
}

pub fn board(
    catalog: &Catalog,
    pair: CurrencyPair,
    filter: Option<BoardFilter>,
    sort: Option<BoardSort>,
) -> Result<()> {
    let rows = rate_board(catalog, &pair, filter, sort)?;
    if rows.is_empty() {
        println!("No provider matches this filter");
        return Ok(());
    }
    println!("{}: received for {} {}", pair, TYPICAL_AMOUNT, pair.from);
    for row in rows {
        let rate = row.rate.map_or("N/A".to_string(), |r| format!("{:.4}", r));
        let received = row.received.map_or("N/A".to_string(), |r| format!("{:.2} {}", r, pair.to));
        println!(
            "  {:<20} rate {:>12}  fee {:>4}%  {:<14} {}",
            row.provider, rate, row.fee_percent, row.speed, received
        );
    }
    Ok(())
}

fn quote_through(catalog: &Catalog, pair: CurrencyPair, amount: f64, provider: &str) -> Result<(Offer, Quote)> {
    let provider = catalog.find(provider)?;
    let offer = provider.offer(&pair).ok_or(FxError::RateUnavailable(pair))?;
    let quote = offer.quote(amount)?;
    Ok((offer, quote))
}

pub fn convert(catalog: &Catalog, pair: CurrencyPair, amount: f64, provider: &str) -> Result<()> {
    let (offer, quote) = quote_through(catalog, pair, amount, provider)?;
    let fee_code = match quote.fee_currency {
        FeeCurrency::Source => pair.from,
        FeeCurrency::Target => pair.to,
    };

    println!("{} via {}", pair, offer.provider);
    println!("  amount     {:.2} {}", quote.amount, pair.from);
    println!("  rate       {:.4}", quote.rate);
    println!("  gross      {:.2} {}", quote.gross, pair.to);
    println!("  fee        {:.2} {}", quote.fee, fee_code);
    println!("  you get    {:.2} {}", quote.net, pair.to);
    println!("  you pay    {:.2} {}", quote.total_cost, pair.from);
    println!("  arrives in {}", format_minutes(offer.minutes));
    Ok(())
}

pub fn remit(from: &str, to: &str, amount: f64, method: DeliveryMethod) -> Result<()> {
    let rates = AfricaRates::builtin()?;
    let quote = quote_between(&rates, from, to, amount, method)?;
    let pair = quote.pair;

    println!("{} -> {} ({})", from, to, pair);
    println!("  rate      {:.4}", quote.rate);
    println!("  send      {:.2} {}", quote.send_amount, pair.from);
    println!("  fee       {:.2} {} ({}%)", quote.fee_amount, pair.from, quote.fee_percent);
    println!("  total     {:.2} {}", quote.total, pair.from);
    println!("  receive   {:.2} {}", quote.receive_amount, pair.to);
    println!("  delivery  {} by {}", method.delivery_time(), method);

    let corridors = corridors_from(from);
    if !corridors.is_empty() {
        println!("Strategic corridors from {}:", from);
        for c in corridors {
            println!("  {} -> {}  volume {}  growth {}", c.from, c.to, c.volume, c.growth);
        }
    }
    Ok(())
}

fn print_alert(book: &AlertBook, alert: &RateAlert) {
    let mut line = format!(
        "#{} {} {} {:.4} [{}] via {}",
        alert.id, alert.pair, alert.direction, alert.target, alert.status, alert.notification
    );
    if let Some(p) = book.proximity(alert) {
        line.push_str(&format!("  current {:.4}, {:.2}% away", p.current_rate, p.percentage));
        if p.is_very_close {
            line.push_str(" (very close)");
        } else if p.is_close {
            line.push_str(" (close)");
        }
    }
    println!("{}", line);
}

pub fn alerts(action: Option<AlertAction>) -> Result<()> {
    let mut book = AlertBook::builtin()?;

    match action.unwrap_or(AlertAction::List) {
        AlertAction::List => {}
        AlertAction::Create {
            pair,
            target,
            direction,
            notification,
        } => {
            let id = book.create(pair, target, direction, notification)?.id;
            println!("Created alert #{}", id);
        }
        AlertAction::Delete { id } => {
            let removed = book.delete(id)?;
            println!("Deleted alert #{} on {}", removed.id, removed.pair);
        }
        AlertAction::Toggle { id } => {
            let status = book.toggle(id)?;
            println!("Alert #{} is now {}", id, status);
        }
        AlertAction::Suggest { pair, direction } => {
            let target = book
                .suggest_target(&pair, direction)
                .ok_or(FxError::RateUnavailable(pair))?;
            println!("Suggested {} target for {}: {:.4}", direction, pair, target);
            return Ok(());
        }
    }

    for alert in book.alerts() {
        print_alert(&book, alert);
    }
    Ok(())
}

pub fn expenses(base: Option<Currency>, range: TimeRange, json: bool) -> Result<()> {
    let mut ledger = ExpenseLedger::builtin();
    if let Some(base) = base {
        ledger.set_base(base);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&ledger.report(range))?);
        return Ok(());
    }

    let base = ledger.base();
    println!("{}: {:.2} {} across {} expenses", range, ledger.total_in_base(), base, ledger.expenses().len());
    println!("By category:");
    for (category, total) in ledger.distribution_by_category() {
        println!("  {:<12} {:>12.2} {}", category, total, base);
    }
    println!("By currency:");
    for (currency, total) in ledger.distribution_by_currency() {
        println!("  {:<12} {:>12.2} {}", currency, total, base);
    }
    println!("Foreign currency share: {:.1}%", ledger.foreign_currency_percentage());
    for impact in ledger.rate_impact() {
        println!("  [{}] {}", impact.effect, impact.message);
    }
    Ok(())
}

pub fn history(pair: CurrencyPair, frame: TimeFrame, chart: bool, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let series = history::generate(&pair, frame, Utc::now().date_naive(), &mut rng);
    let points = if chart { history::sample_for_chart(&series) } else { series };

    println!("{} over {}", pair, frame);
    for point in points {
        println!("  {}  {:.4}", point.date, point.rate);
    }
}

pub fn prefs(store: &PreferenceStore, action: Option<PrefsAction>) -> Result<()> {
    let mut prefs = store.load()?;

    match action.unwrap_or(PrefsAction::Show) {
        PrefsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&prefs)?);
            return Ok(());
        }
        PrefsAction::ToggleTheme => {
            let theme = prefs.toggle_theme();
            println!("Theme: {}", theme);
        }
        PrefsAction::Email { email } => {
            prefs.remember_email(email.as_deref());
            match &prefs.remembered_email {
                Some(email) => println!("Remembering {}", email),
                None => println!("Forgot remembered e-mail"),
            }
        }
        PrefsAction::Dashboard {
            default_currency,
            favorites,
            show_market_news,
            show_recent_trends,
            chart_type,
        } => {
            prefs.merge_dashboard(DashboardUpdate {
                default_currency,
                favorite_currency_pairs: favorites,
                show_market_news,
                show_recent_trends,
                chart_type,
            });
            println!("{}", serde_json::to_string_pretty(&prefs.dashboard)?);
        }
    }
    store.save(&prefs)
}

fn load_pairs(path: &str) -> Result<HashSet<CurrencyPair>> {
    let file_path = normalize_path(path);
    if !is_file_exist(&file_path) {
        warn!("Pairs file {} not found, streaming alert pairs only", file_path.display());
        return Ok(HashSet::new());
    }
    let file = File::open(&file_path)?;
    let pairs = CurrencyPair::parse_from_file(BufReader::new(file))?;
    info!("Pairs: {:?}", pairs);
    Ok(pairs.into_iter().collect())
}

pub fn watch(path: Option<&str>, interval_ms: u64, json: bool) -> Result<()> {
    let mut book = AlertBook::builtin()?;
    let extra = match path {
        Some(path) => load_pairs(path)?,
        None => HashSet::new(),
    };

    let streamed: HashSet<CurrencyPair> = book.watched_pairs().union(&extra).copied().collect();
    let seeds = seed_rates(&book, &streamed, &UsdCrossRates::market());
    let feed = RateFeed::start(seeds, Duration::from_millis(interval_ms));
    let data_rx = feed.subscribe()?;

    let stop_tx = feed.stop_handle();
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Stopping rate feed...");
        let _ = stop_tx.send(());
    })
    .map_err(|e| FxError::SignalHandler(e.to_string()))?;

    info!("Watching rates. Press Ctrl+C to exit.");
    let fired = watch_alerts(&mut book, &extra, data_rx, never(), |tick, fired| {
        if json {
            match tick.to_json_bytes() {
                Ok(bytes) => println!("{}", String::from_utf8_lossy(&bytes)),
                Err(e) => error!("Failed to serialize tick to JSON: {}", e),
            }
        } else {
            println!("{} {:.4} at {}", tick.pair, tick.rate, tick.timestamp);
        }
        for alert in fired {
            println!(
                "ALERT #{}: {} is {} {:.4} (now {:.4}), notifying by {}",
                alert.id, alert.pair, alert.direction, alert.target, tick.rate, alert.notification
            );
        }
    })?;
    feed.stop()?;

    println!("{} alert(s) triggered", fired.len());
    Ok(())
}
