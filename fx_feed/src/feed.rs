//! Rate feed and event broadcasting.
//!
//! The `RateFeed` runs a background thread that moves a fixed set of pairs by
//! a random walk and broadcasts every new `RateTick` to all subscribers using
//! `crossbeam_channel`. Subscribers register through [`RateFeed::subscribe`].
//!
//! Event model:
//! - `RateEvent::Tick(RateTick)`: a single rate update.
//! - `RateEvent::Shutdown`: signal for consumers to terminate gracefully.
//!
//! Broadcast is best-effort: if sending to a subscriber fails, that
//! subscriber is dropped. Dropping the feed without calling
//! [`RateFeed::stop`] also stops the generator.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, select, unbounded};
use fx_common::{CurrencyPair, FxError, Result};
use log::{debug, info};

use crate::tick::RateTick;

/// Message sent by the feed to its subscribers.
#[derive(Debug, Clone)]
pub enum RateEvent {
    /// New rate for a particular pair.
    Tick(RateTick),
    /// Global shutdown notification for all consumers.
    Shutdown,
}

/// Background rate generator that broadcasts to subscribers.
pub struct RateFeed {
    subscribe_tx: Sender<Sender<RateEvent>>,
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl RateFeed {
    /// Start the generator thread over `seed_rates`, ticking every `interval`.
    pub fn start(seed_rates: Vec<(CurrencyPair, f64)>, interval: Duration) -> Self {
        let (subscribe_tx, subscribe_rx) = unbounded::<Sender<RateEvent>>();
        let (stop_tx, stop_rx) = unbounded::<()>();

        let handle = thread::spawn(move || run_generator(seed_rates, interval, subscribe_rx, stop_rx));

        Self {
            subscribe_tx,
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Register a new subscriber; it receives every tick from the next round on.
    pub fn subscribe(&self) -> Result<Receiver<RateEvent>> {
        let (data_tx, data_rx) = unbounded::<RateEvent>();
        self.subscribe_tx
            .send(data_tx)
            .map_err(|e| FxError::ChannelSend(e.to_string()))?;
        Ok(data_rx)
    }

    /// A sender that stops the generator when a unit is sent on it.
    pub fn stop_handle(&self) -> Sender<()> {
        self.stop_tx.clone()
    }

    /// Stop the generator and wait for it to broadcast `Shutdown`.
    pub fn stop(mut self) -> Result<()> {
        // The generator may already be gone when a stop handle was used.
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| FxError::ChannelRecv("rate feed thread panicked".to_string()))?;
        }
        Ok(())
    }
}

fn run_generator(
    seed_rates: Vec<(CurrencyPair, f64)>,
    interval: Duration,
    subscribe_rx: Receiver<Sender<RateEvent>>,
    stop_rx: Receiver<()>,
) {
    let mut rng = rand::rng();
    let mut clients: Vec<Sender<RateEvent>> = Vec::new();
    let mut current_rates = seed_rates;

    info!(
        "Rate feed started for {} pairs (Thread ID: {:?})",
        current_rates.len(),
        thread::current().id()
    );

    loop {
        while let Ok(new_client_tx) = subscribe_rx.try_recv() {
            clients.push(new_client_tx);
            debug!("Feed: new subscriber added. Total subscribers: {}", clients.len());
        }

        for (pair, rate) in current_rates.iter_mut() {
            let tick = RateTick::generate_new(*pair, *rate, &mut rng);
            *rate = tick.rate;

            let event = RateEvent::Tick(tick);
            clients.retain(|client_tx| client_tx.send(event.clone()).is_ok());
        }

        select! {
            recv(stop_rx) -> _ => break,
            default(interval) => {},
        }
    }

    while let Ok(late_client_tx) = subscribe_rx.try_recv() {
        clients.push(late_client_tx);
    }
    for client_tx in &clients {
        let _ = client_tx.send(RateEvent::Shutdown);
    }
    info!("Rate feed stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(s: &str) -> CurrencyPair {
        s.parse().unwrap()
    }

    #[test]
    fn test_subscriber_receives_ticks_then_shutdown() {
        let feed = RateFeed::start(
            vec![(pair("USD-GHS"), 11.05), (pair("EUR-NGN"), 1725.8)],
            Duration::from_millis(5),
        );
        let rx = feed.subscribe().unwrap();

        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        match first {
            RateEvent::Tick(tick) => {
                assert!(tick.pair == pair("USD-GHS") || tick.pair == pair("EUR-NGN"));
            }
            RateEvent::Shutdown => panic!("feed stopped early"),
        }

        feed.stop().unwrap();
        let saw_shutdown = rx
            .iter()
            .any(|event| matches!(event, RateEvent::Shutdown));
        assert!(saw_shutdown);
    }

    #[test]
    fn test_stop_handle_stops_generator() {
        let feed = RateFeed::start(vec![(pair("USD-EUR"), 0.92)], Duration::from_millis(5));
        let rx = feed.subscribe().unwrap();
        feed.stop_handle().send(()).unwrap();
        let saw_shutdown = rx
            .iter()
            .any(|event| matches!(event, RateEvent::Shutdown));
        assert!(saw_shutdown);
        feed.stop().unwrap();
    }
}
