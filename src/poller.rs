//! Polling scheduler.
//!
//! One task owns the fetch loop: tick, fetch, parse, emit one message per
//! outcome. Fetches never overlap (the tick arm awaits completion and the
//! interval uses [`MissedTickBehavior::Delay`], so a slow fetch defers the
//! next tick instead of stacking). Consecutive failures push the next poll
//! out geometrically, capped at [`MAX_BACKOFF_FACTOR`] times the base
//! interval; the first success snaps back to the base cadence.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::client::RatesClient;
use crate::config::PollConfig;
use crate::models::RateSnapshot;
use crate::tui::event::Message;

/// Largest multiple of the base interval a backed-off poll waits.
pub const MAX_BACKOFF_FACTOR: u32 = 8;

/// Multiplier applied to the base interval after `consecutive_failures`.
pub fn backoff_factor(consecutive_failures: u32) -> u32 {
    if consecutive_failures == 0 {
        1
    } else {
        2u32.saturating_pow(consecutive_failures).min(MAX_BACKOFF_FACTOR)
    }
}

/// Runs the polling loop until the channel closes or shutdown is signalled.
///
/// Every cycle ends in exactly one message: [`Message::Rates`] with the
/// parsed snapshot, or [`Message::PollFailed`] when the fetch, status, or
/// price parsing failed. The receiver decides what "failed" means for the
/// display; this loop just keeps retrying.
pub async fn run(
    client: RatesClient,
    config: PollConfig,
    tx: mpsc::UnboundedSender<Message>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut failures: u32 = 0;
    let mut ticker = interval_from(Instant::now(), config.interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match poll_once(&client).await {
                    Ok(snapshot) => {
                        if failures > 0 {
                            info!(failures, "poll recovered");
                            ticker = interval_from(Instant::now() + config.interval, config.interval);
                        }
                        failures = 0;
                        if tx.send(Message::Rates(snapshot)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        failures += 1;
                        let factor = backoff_factor(failures);
                        warn!(error = %e, failures, backoff = factor, "poll failed");
                        if factor > 1 {
                            ticker = interval_from(
                                Instant::now() + config.interval * factor,
                                config.interval,
                            );
                        }
                        if tx.send(Message::PollFailed(e.to_string())).is_err() {
                            break;
                        }
                    }
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("poller stopped");
}

async fn poll_once(client: &RatesClient) -> crate::Result<RateSnapshot> {
    let document = client.fetch().await?;
    RateSnapshot::parse(document)
}

fn interval_from(start: Instant, period: Duration) -> time::Interval {
    let mut interval = time::interval_at(start, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
