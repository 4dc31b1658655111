use std::sync::Arc;

use serenity::all::{ChannelId, VoiceState};
use tracing::trace;

use crate::bot::data::Data;
use crate::handlers::lifecycle::{self, LifecycleEvent};

pub fn handle_voice_state_update(data: &Arc<Data>, old: Option<&VoiceState>, new: &VoiceState) {
    let old_channel = old.and_then(|o| o.channel_id);

    trace!(
        "Voice state for {}: {:?} -> {:?}",
        new.user_id,
        old_channel,
        new.channel_id
    );

    // Joins are not interesting; only departures can empty a channel
    if let Some(event) = lifecycle::member_left(new.guild_id, new.user_id, old_channel, new.channel_id) {
        lifecycle::dispatch(data, event);
    }
}

/// Translate a live channel deletion into a lifecycle event
pub fn channel_deleted(data: &Arc<Data>, channel_id: ChannelId) {
    lifecycle::dispatch(data, LifecycleEvent::ChannelDeleted { channel_id });
}
