use std::sync::Arc;
use std::time::Duration;

use serenity::all::{ChannelId, GuildId};
use tokio::sync::watch;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::bot::error::Error;
use crate::platform::{Platform, PlatformError};
use crate::services::channels::registry::ChannelRegistry;

/// Result of one deferred emptiness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReapOutcome {
    /// Channel was empty and this call deleted it
    Deleted,
    /// Someone is still connected
    Occupied,
    /// Not tracked (anymore), or the platform had already removed it
    AlreadyGone,
}

/// Result of one sweep over the registry
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Entries dropped because the channel no longer exists
    pub reconciled: usize,
    /// Deferred checks spawned for channels that still exist
    pub scheduled: usize,
}

/// Opened once the gateway session is ready; the sweeper waits on it
#[derive(Debug)]
pub struct ReadyGate {
    tx: watch::Sender<bool>,
}

impl ReadyGate {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn open(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_open(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for ReadyGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Deletes temporary channels once they have been empty for the grace period
pub struct EmptyChannelReaper {
    registry: Arc<ChannelRegistry>,
    platform: Arc<dyn Platform>,
    grace_period: Duration,
}

impl EmptyChannelReaper {
    pub fn new(
        registry: Arc<ChannelRegistry>,
        platform: Arc<dyn Platform>,
        grace_period: Duration,
    ) -> Self {
        Self {
            registry,
            platform,
            grace_period,
        }
    }

    /// A member left `channel_id`; schedule a deferred check if it's tracked
    pub fn on_member_left(self: &Arc<Self>, channel_id: ChannelId) -> bool {
        if !self.registry.contains(channel_id) {
            return false;
        }
        self.spawn_check(channel_id);
        true
    }

    fn spawn_check(self: &Arc<Self>, channel_id: ChannelId) {
        let reaper = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = reaper.check_after_grace(channel_id).await {
                error!("Empty check for channel {} failed: {}", channel_id, e);
            }
        });
    }

    /// Wait out the grace period, then delete the channel if nobody is in it
    pub async fn check_after_grace(&self, channel_id: ChannelId) -> Result<ReapOutcome, Error> {
        if !self.registry.contains(channel_id) {
            return Ok(ReapOutcome::AlreadyGone);
        }

        sleep(self.grace_period).await;

        let guild_id = match self.registry.get(channel_id) {
            Some(channel) => channel.guild_id,
            None => return Ok(ReapOutcome::AlreadyGone),
        };

        let members = match self.platform.list_channel_members(guild_id, channel_id).await {
            Ok(members) => members,
            Err(PlatformError::NotFound) => {
                debug!("Channel {} vanished before the empty check", channel_id);
                self.registry.unregister(channel_id);
                return Ok(ReapOutcome::AlreadyGone);
            }
            Err(e) => return Err(Error::Platform(e)),
        };

        if !members.is_empty() {
            debug!(
                "Channel {} still has {} members, keeping it",
                channel_id,
                members.len()
            );
            return Ok(ReapOutcome::Occupied);
        }

        info!("Deleting empty temporary channel {}", channel_id);
        self.delete_channel(channel_id, "Temporary channel is empty")
            .await
    }

    /// Delete a tracked channel on the platform and drop it from the registry.
    ///
    /// The registry entry is claimed before the platform call, so concurrent
    /// callers for the same channel issue at most one delete.
    pub async fn delete_channel(
        &self,
        channel_id: ChannelId,
        reason: &str,
    ) -> Result<ReapOutcome, Error> {
        let claimed = match self.registry.claim(channel_id) {
            Some(channel) => channel,
            None => return Ok(ReapOutcome::AlreadyGone),
        };

        match self.platform.delete_channel(channel_id, reason).await {
            Ok(()) => {
                self.registry.unregister(channel_id);
                info!("Deleted temporary channel {} ({})", channel_id, claimed.name);
                Ok(ReapOutcome::Deleted)
            }
            Err(PlatformError::NotFound) => {
                self.registry.unregister(channel_id);
                debug!("Channel {} was already deleted", channel_id);
                Ok(ReapOutcome::AlreadyGone)
            }
            Err(PlatformError::PermissionDenied) => {
                error!("No permission to delete channel {} ({})", channel_id, claimed.name);
                self.registry.restore(claimed);
                Err(Error::PermissionDenied("delete voice channels".to_string()))
            }
            Err(e) => {
                warn!("Failed to delete channel {}: {}", channel_id, e);
                self.registry.restore(claimed);
                Err(Error::Platform(e))
            }
        }
    }

    /// Reconcile every tracked channel against the platform.
    ///
    /// Channels that no longer resolve are dropped without a delete call; the
    /// rest get the same deferred check as [`EmptyChannelReaper::on_member_left`].
    pub async fn sweep(self: &Arc<Self>) -> SweepReport {
        let mut report = SweepReport::default();

        for channel_id in self.registry.all_channel_ids() {
            let guild_id: GuildId = match self.registry.get(channel_id) {
                Some(channel) => channel.guild_id,
                None => continue,
            };

            match self.platform.resolve_channel(guild_id, channel_id).await {
                Ok(_) => {
                    self.spawn_check(channel_id);
                    report.scheduled += 1;
                }
                Err(PlatformError::NotFound) => {
                    if self.registry.unregister(channel_id) {
                        info!("Removed stale temporary channel {} from registry", channel_id);
                        report.reconciled += 1;
                    }
                }
                Err(e) => {
                    warn!("Could not resolve channel {} during sweep: {}", channel_id, e);
                }
            }
        }

        report
    }
}

/// Start the periodic sweep once the session is ready
pub fn spawn_sweeper(
    reaper: Arc<EmptyChannelReaper>,
    mut ready: watch::Receiver<bool>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if ready.wait_for(|ready| *ready).await.is_err() {
            warn!("Ready gate dropped before the session became ready, sweeper not started");
            return;
        }

        info!("Starting temporary channel sweeper");
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let report = reaper.sweep().await;
            debug!(
                "Sweep finished: {} reconciled, {} checks scheduled",
                report.reconciled, report.scheduled
            );
        }
    })
}
