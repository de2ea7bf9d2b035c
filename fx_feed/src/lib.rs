//! Streaming rate feed for the FX toolkit.
//!
//! - `tick`: the broadcast payload and its random walk
//! - `feed`: background generator and subscriber fan-out
//! - `watcher`: evaluates rate alerts against the stream

pub mod feed;
pub mod tick;
pub mod watcher;

pub use feed::{RateEvent, RateFeed};
pub use tick::RateTick;
pub use watcher::{seed_rates, watch_alerts};
