//! Time source for the scrape scheduler.
//!
//! The scheduler only ever asks for a periodic ticker, so cadence can be
//! driven by hand in tests instead of by the wall clock.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tokio::time::Interval;
use tokio::time::MissedTickBehavior;

/// Produces periodic tickers
pub trait Clock: Send + Sync {
    /// A ticker whose first tick fires one full `period` after creation
    fn ticker(&self, period: Duration) -> Box<dyn Ticker>;
}

#[async_trait]
pub trait Ticker: Send {
    /// Wait for the next tick
    async fn tick(&mut self);
}

/// Clock backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn ticker(&self, period: Duration) -> Box<dyn Ticker> {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        // a slow scrape pushes the schedule back instead of bursting to catch up
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Box::new(IntervalTicker(interval))
    }
}

struct IntervalTicker(Interval);

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.0.tick().await;
    }
}


#[cfg(test)]
mod tests {
    use super::manual::ManualClock;
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_ticker_waits_a_full_period_first() {
        let start = Instant::now();
        let mut ticker = TokioClock.ticker(Duration::from_secs(10));

        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(10));

        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(20));
    }

    #[tokio::test]
    async fn manual_ticker_fires_on_advance() {
        let clock = ManualClock::new();
        let mut ticker = clock.ticker(Duration::from_secs(10));

        let pending =
            tokio::time::timeout(Duration::from_millis(20), ticker.tick()).await;
        assert!(pending.is_err(), "ticker should not fire before advance");

        clock.advance();
        tokio::time::timeout(Duration::from_secs(1), ticker.tick())
            .await
            .expect("ticker should fire after advance");
    }
}
