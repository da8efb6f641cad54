//! Periodic refresh scheduling
//!
//! One refresh runs at startup, then one per interval tick. The loop holds
//! no statistics itself: it drives the aggregator and hands each complete
//! snapshot to the gauges. Only one cycle is ever in flight because the
//! loop awaits each cycle inline; ticks that fire while a cycle is still
//! running are skipped, not queued. Shutdown is observed between cycles,
//! so an in-flight cycle always runs to completion.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use uuid::Uuid;

use crate::error::RefreshError;
use crate::gauges::GaugeSet;
use crate::stats::StatsAggregator;

/// Drives the refresh pipeline on a fixed interval
pub struct Scheduler {
    aggregator: StatsAggregator,
    gauges: Arc<GaugeSet>,
    refresh_interval: Duration,
}

impl Scheduler {
    /// Creates a scheduler over the aggregator and gauge set.
    pub fn new(
        aggregator: StatsAggregator,
        gauges: Arc<GaugeSet>,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            aggregator,
            gauges,
            refresh_interval,
        }
    }

    /// Runs the refresh loop until `shutdown` flips.
    ///
    /// The first tick completes immediately, which covers the startup
    /// refresh. When a tick and the shutdown flip are ready at the same
    /// time the shutdown wins; no cycle starts after shutdown is requested.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = time::interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            interval_secs = self.refresh_interval.as_secs(),
            "starting refresh loop"
        );

        loop {
            tokio::select! {
                biased;

                _ = shutdown.changed() => break,
                _ = ticker.tick() => {
                    let _ = self.run_once().await;
                }
            }
        }

        tracing::info!("refresh loop stopped");
    }

    /// Runs exactly one refresh cycle, publishing its snapshot on success.
    ///
    /// Both outcomes are logged under a fresh cycle id. On error nothing is
    /// published: every gauge keeps the value of the last successful cycle.
    pub async fn run_once(&self) -> Result<(), RefreshError> {
        let cycle_id = Uuid::new_v4();
        let started = Instant::now();

        match self.aggregator.refresh().await {
            Ok(snapshot) => {
                self.gauges.publish(&snapshot);
                tracing::debug!(
                    %cycle_id,
                    latency_ms = started.elapsed().as_millis() as u64,
                    vault_balance = snapshot.vault_balance,
                    forever_burnt = snapshot.forever_burnt,
                    total_supply = snapshot.total_supply,
                    total_burnt = snapshot.total_burnt,
                    burn_percent = snapshot.burn_percent,
                    usd_price = snapshot.usd_price,
                    "refresh cycle published"
                );
                Ok(())
            }
            Err(error) => {
                tracing::warn!(
                    %cycle_id,
                    latency_ms = started.elapsed().as_millis() as u64,
                    error = %error,
                    "refresh cycle failed, previous stats remain published"
                );
                Err(error)
            }
        }
    }
}
