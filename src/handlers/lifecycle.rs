//! Platform-independent lifecycle events.
//!
//! The gateway handlers translate serenity events into [`LifecycleEvent`] so
//! the channel services never depend on the gateway's payload types.

use std::sync::Arc;

use serenity::all::{ChannelId, GuildId, UserId};
use tracing::{debug, info};

use crate::bot::data::Data;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The gateway session is established
    SessionReady,
    /// A member left (or moved out of) a voice channel
    MemberLeft {
        guild_id: GuildId,
        channel_id: ChannelId,
        user_id: UserId,
    },
    /// A channel was deleted on the platform, by us or by someone else
    ChannelDeleted { channel_id: ChannelId },
}

/// Derive the leave event from a voice state transition, if any
pub fn member_left(
    guild_id: Option<GuildId>,
    user_id: UserId,
    old_channel: Option<ChannelId>,
    new_channel: Option<ChannelId>,
) -> Option<LifecycleEvent> {
    let guild_id = guild_id?;
    let channel_id = old_channel?;
    if new_channel == Some(channel_id) {
        // Mute/deafen/stream change inside the same channel
        return None;
    }
    Some(LifecycleEvent::MemberLeft {
        guild_id,
        channel_id,
        user_id,
    })
}

pub fn dispatch(data: &Arc<Data>, event: LifecycleEvent) {
    match event {
        LifecycleEvent::SessionReady => {
            if !data.ready.is_open() {
                info!("Session ready, enabling the temporary channel sweeper");
            }
            data.ready.open();
        }
        LifecycleEvent::MemberLeft {
            channel_id,
            user_id,
            ..
        } => {
            if data.reaper.on_member_left(channel_id) {
                debug!(
                    "User {} left temporary channel {}, scheduled empty check",
                    user_id, channel_id
                );
            }
        }
        LifecycleEvent::ChannelDeleted { channel_id } => {
            if data.registry.unregister(channel_id) {
                info!("Temporary channel {} was deleted, removed from registry", channel_id);
            }
        }
    }
}
