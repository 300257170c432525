//! Periodic synchronization inside the server process.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{error, info};

use crate::config::SyncSettings;
use crate::services::synchronizer::Synchronizer;

/// Start the periodic sync background task.
///
/// The first run starts immediately; later runs follow every
/// `interval_secs`. A failed run is logged and the next tick still happens.
/// Ticks missed while a slow run is in progress are dropped, not replayed.
pub fn start_sync_task(synchronizer: Arc<Synchronizer>, settings: SyncSettings) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting periodic sync of {} users (interval: {} seconds)",
            settings.usernames.len(),
            settings.interval_secs
        );

        let mut ticker = sync_ticker(settings.interval_secs);

        loop {
            ticker.tick().await;

            if let Err(e) = synchronizer.synchronize(&settings.usernames).await {
                error!("Periodic sync failed: {}", e);
            }
        }
    })
}

/// Ticker whose first tick completes immediately.
fn sync_ticker(interval_secs: u64) -> Interval {
    let mut ticker = interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}
