//! Periodic scrape loop.
//!
//! One cycle is fetch, translate, write. The cycle outcome drives the
//! `gateway_up` gauge and nothing else: a failed cycle writes no other series,
//! so values from the last good scrape stay in place until the next one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::clock::Clock;
use crate::error::ScrapeResult;
use crate::gateway::StatusSource;
use crate::metrics::translate;
use crate::metrics::Metric;
use crate::metrics::MetricSink;

/// Buffered outcomes per subscriber before the oldest are dropped
const OUTCOME_CHANNEL_CAPACITY: usize = 16;

/// Result of one scrape cycle as seen by subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeOutcome {
    Succeeded,
    Failed,
}

pub struct Scraper {
    source: Arc<dyn StatusSource>,
    sink: Arc<dyn MetricSink>,
    outcomes: broadcast::Sender<ScrapeOutcome>,
}

impl Scraper {
    pub fn new(source: Arc<dyn StatusSource>, sink: Arc<dyn MetricSink>) -> Self {
        let (outcomes, _) = broadcast::channel(OUTCOME_CHANNEL_CAPACITY);
        Self {
            source,
            sink,
            outcomes,
        }
    }

    /// Receive the outcome of every cycle that completes after this call
    pub fn subscribe(&self) -> broadcast::Receiver<ScrapeOutcome> {
        self.outcomes.subscribe()
    }

    /// Fetch, translate and write one snapshot.
    ///
    /// Translation happens only after the whole document decoded, so a failed
    /// fetch leaves the sink untouched.
    pub async fn scrape(&self) -> ScrapeResult<()> {
        let status = self.source.fetch().await?;
        let observations = translate(&status);
        for observation in &observations {
            self.sink.record(observation);
        }
        debug!(count = observations.len(), "Recorded gateway observations");
        Ok(())
    }

    /// Run one cycle and record its health. Never fails.
    pub async fn scrape_cycle(&self) -> ScrapeOutcome {
        let outcome = match self.scrape().await {
            Ok(()) => {
                self.sink.observe(Metric::Up, &[], 1.0);
                ScrapeOutcome::Succeeded
            }
            Err(e) => {
                self.sink.observe(Metric::Up, &[], 0.0);
                warn!("Gateway scrape failed: {e:?}");
                ScrapeOutcome::Failed
            }
        };

        // no subscribers is fine
        let _ = self.outcomes.send(outcome);
        outcome
    }

    /// Scrape immediately, then once per `interval` until `token` is cancelled.
    ///
    /// Cancellation is checked while waiting for the next tick; a cycle that
    /// already started runs to completion.
    pub async fn run(&self, clock: &dyn Clock, interval: Duration, token: CancellationToken) {
        info!(?interval, "Starting gateway scrape loop");
        let mut ticker = clock.ticker(interval);

        self.scrape_cycle().await;

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    info!("Gateway scrape loop shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    self.scrape_cycle().await;
                }
            }
        }
    }
}
