//! Alert watching over a stream of rate events.

use std::collections::HashSet;

use crossbeam_channel::{Receiver, select};
use fx_common::alerts::{AlertBook, RateAlert};
use fx_common::{CurrencyPair, FxError, RateSource, Result};
use log::{debug, info, warn};

use crate::feed::RateEvent;
use crate::tick::RateTick;

/// Starting rates for `pairs`, taken from the alert book and then `fallback`.
///
/// Pairs with no known rate are skipped.
pub fn seed_rates(
    book: &AlertBook,
    pairs: &HashSet<CurrencyPair>,
    fallback: &dyn RateSource,
) -> Vec<(CurrencyPair, f64)> {
    let mut seeds: Vec<(CurrencyPair, f64)> = pairs
        .iter()
        .filter_map(|pair| {
            let rate = book.current_rate(pair).or_else(|| fallback.get_rate(pair));
            if rate.is_none() {
                warn!("No starting rate for {pair}, not streaming it");
            }
            rate.map(|rate| (*pair, rate))
        })
        .collect();
    seeds.sort_by_key(|(pair, _)| *pair);
    seeds
}

/// Consume rate events and evaluate the active alerts of `book`.
///
/// Every tick for a watched pair (or one of `extra_pairs`) updates the book and
/// is passed to `on_tick` together with the alerts it fired. Returns all fired
/// alerts when a stop signal or `Shutdown` arrives, or once no active alert is
/// left and there are no extra pairs to follow.
pub fn watch_alerts<F>(
    book: &mut AlertBook,
    extra_pairs: &HashSet<CurrencyPair>,
    data_rx: Receiver<RateEvent>,
    stop_rx: Receiver<()>,
    mut on_tick: F,
) -> Result<Vec<RateAlert>>
where
    F: FnMut(&RateTick, &[RateAlert]),
{
    let mut fired_total = Vec::new();
    let mut watched = book.watched_pairs();
    info!("Watching {} alert pairs", watched.len());

    loop {
        if watched.is_empty() && extra_pairs.is_empty() {
            info!("No active alerts left");
            break;
        }

        select! {
            recv(stop_rx) -> _ => {
                info!("Stop signal received, ending watch");
                break;
            }
            recv(data_rx) -> msg => {
                match msg {
                    Ok(RateEvent::Tick(tick)) => {
                        if !watched.contains(&tick.pair) && !extra_pairs.contains(&tick.pair) {
                            continue;
                        }
                        book.update_rate(tick.pair, tick.rate)?;
                        let fired = book.evaluate(&tick.pair, tick.rate);
                        on_tick(&tick, &fired);
                        if !fired.is_empty() {
                            watched = book.watched_pairs();
                            fired_total.extend(fired);
                        }
                    }
                    Ok(RateEvent::Shutdown) => {
                        debug!("Feed shut down, ending watch");
                        break;
                    }
                    Err(e) => return Err(FxError::ChannelRecv(e.to_string())),
                }
            }
        }
    }

    Ok(fired_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use fx_common::alerts::AlertStatus;
    use fx_common::rate_source::UsdCrossRates;

    fn pair(s: &str) -> CurrencyPair {
        s.parse().unwrap()
    }

    fn tick(p: &str, rate: f64) -> RateEvent {
        RateEvent::Tick(RateTick {
            pair: pair(p),
            rate,
            timestamp: 0,
        })
    }

    #[test]
    fn test_alert_fires_once_and_watch_ends() {
        let mut book = AlertBook::builtin().unwrap();
        let (data_tx, data_rx) = unbounded();
        let (_stop_tx, stop_rx) = unbounded();

        data_tx.send(tick("USD-GHS", 16.0)).unwrap();
        data_tx.send(tick("USD-EUR", 0.91)).unwrap();
        data_tx.send(tick("USD-EUR", 0.89)).unwrap();
        data_tx.send(tick("USD-EUR", 0.88)).unwrap();
        data_tx.send(tick("EUR-GBP", 0.86)).unwrap();

        let mut seen = 0;
        let fired = watch_alerts(&mut book, &HashSet::new(), data_rx, stop_rx, |_, _| seen += 1).unwrap();

        assert_eq!(fired.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(seen, 3);
        assert!(book.alerts().iter().all(|a| a.status == AlertStatus::Triggered));
        assert_eq!(book.current_rate(&pair("USD-EUR")), Some(0.89));
    }

    #[test]
    fn test_shutdown_ends_watch() {
        let mut book = AlertBook::builtin().unwrap();
        let (data_tx, data_rx) = unbounded();
        let (_stop_tx, stop_rx) = unbounded();
        data_tx.send(tick("USD-EUR", 0.95)).unwrap();
        data_tx.send(RateEvent::Shutdown).unwrap();

        let fired = watch_alerts(&mut book, &HashSet::new(), data_rx, stop_rx, |_, _| {}).unwrap();
        assert!(fired.is_empty());
    }

    #[test]
    fn test_disconnected_feed_is_an_error() {
        let mut book = AlertBook::builtin().unwrap();
        let (data_tx, data_rx) = unbounded::<RateEvent>();
        let (_stop_tx, stop_rx) = unbounded();
        drop(data_tx);

        let result = watch_alerts(&mut book, &HashSet::new(), data_rx, stop_rx, |_, _| {});
        assert!(matches!(result, Err(FxError::ChannelRecv(_))));
    }

    #[test]
    fn test_seed_rates_prefers_book_then_fallback() {
        let book = AlertBook::builtin().unwrap();
        let pairs: HashSet<_> = [pair("USD-EUR"), pair("USD-KES")].into_iter().collect();
        let seeds = seed_rates(&book, &pairs, &UsdCrossRates::market());
        assert_eq!(seeds.len(), 2);
        assert!(seeds.contains(&(pair("USD-EUR"), 0.92)));
        assert!(seeds.iter().any(|(p, r)| *p == pair("USD-KES") && *r > 100.0));
    }
}
