//! Expired Entry Purge Task
//!
//! Background task that periodically drops expired cache entries so idle
//! keys do not stay in memory forever. Reads never depend on it: an expired
//! entry is already ignored by the cache.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::store::CachedStore;

/// Spawns the purge loop for `cache`, running every `cleanup_interval_secs`.
///
/// The first purge happens one interval after the call. Abort the returned
/// handle to stop the loop.
pub fn spawn_cleanup_task(cache: Arc<CachedStore>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let period = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(interval_secs = cleanup_interval_secs, "cache purge task running");

        let mut ticks = time::interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticks.tick().await;
            match cache.purge_expired().await {
                0 => debug!("cache purge found nothing to remove"),
                removed => info!(removed, "purged expired cache entries"),
            }
        }
    })
}
