//! In-memory record of which voice channels are temporary and who owns them.
//!
//! All lookups return owned values; no map guard escapes a method, so callers
//! can await between operations without holding a shard lock.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serenity::all::{ChannelId, GuildId, UserId};

use crate::bot::error::Error;

/// A tracked temporary channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporaryChannel {
    pub channel_id: ChannelId,
    pub guild_id: GuildId,
    pub owner_id: UserId,
    pub name: String,
    /// Set for channels created through the gaming setup flow
    pub platform: Option<String>,
    pub game: Option<String>,
    pub room_number: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl TemporaryChannel {
    pub fn new(channel_id: ChannelId, guild_id: GuildId, owner_id: UserId, name: String) -> Self {
        Self {
            channel_id,
            guild_id,
            owner_id,
            name,
            platform: None,
            game: None,
            room_number: None,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: DashMap<ChannelId, TemporaryChannel>,
    bans: DashMap<ChannelId, HashSet<UserId>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, channel: TemporaryChannel) {
        self.channels.insert(channel.channel_id, channel);
    }

    /// Remove a channel and its ban list; returns whether it was tracked
    pub fn unregister(&self, channel_id: ChannelId) -> bool {
        self.bans.remove(&channel_id);
        self.channels.remove(&channel_id).is_some()
    }

    /// Atomically remove a channel so exactly one caller gets to delete it.
    /// The ban list is kept until [`ChannelRegistry::unregister`] or a restore.
    pub fn claim(&self, channel_id: ChannelId) -> Option<TemporaryChannel> {
        self.channels.remove(&channel_id).map(|(_, channel)| channel)
    }

    /// Put back a claimed channel whose deletion did not go through
    pub fn restore(&self, channel: TemporaryChannel) {
        self.channels.entry(channel.channel_id).or_insert(channel);
    }

    pub fn contains(&self, channel_id: ChannelId) -> bool {
        self.channels.contains_key(&channel_id)
    }

    pub fn get(&self, channel_id: ChannelId) -> Option<TemporaryChannel> {
        self.channels.get(&channel_id).map(|c| c.clone())
    }

    pub fn lookup_owner(&self, channel_id: ChannelId) -> Option<UserId> {
        self.channels.get(&channel_id).map(|c| c.owner_id)
    }

    pub fn is_owner(&self, channel_id: ChannelId, user_id: UserId) -> bool {
        self.lookup_owner(channel_id) == Some(user_id)
    }

    /// Snapshot of tracked channel ids, safe to iterate while the registry changes
    pub fn all_channel_ids(&self) -> Vec<ChannelId> {
        self.channels.iter().map(|entry| *entry.key()).collect()
    }

    /// Replace the owner, returning the previous one
    pub fn transfer(&self, channel_id: ChannelId, new_owner: UserId) -> Result<UserId, Error> {
        let mut channel = self
            .channels
            .get_mut(&channel_id)
            .ok_or(Error::ChannelNotFound(channel_id))?;
        let previous = channel.owner_id;
        channel.owner_id = new_owner;
        Ok(previous)
    }

    /// Replace the owner only if it is still `expected`
    pub fn transfer_from(
        &self,
        channel_id: ChannelId,
        expected: UserId,
        new_owner: UserId,
    ) -> Result<(), Error> {
        let mut channel = self
            .channels
            .get_mut(&channel_id)
            .ok_or(Error::ChannelNotFound(channel_id))?;
        if channel.owner_id != expected {
            return Err(Error::NotOwner);
        }
        channel.owner_id = new_owner;
        Ok(())
    }

    /// Channels in a guild, oldest first
    pub fn channels_in_guild(&self, guild_id: GuildId) -> Vec<TemporaryChannel> {
        let mut channels: Vec<TemporaryChannel> = self
            .channels
            .iter()
            .filter(|entry| entry.guild_id == guild_id)
            .map(|entry| entry.value().clone())
            .collect();
        channels.sort_by_key(|c| (c.created_at, c.channel_id));
        channels
    }

    /// Channels a user owns in a guild, oldest first
    pub fn owned_by(&self, guild_id: GuildId, user_id: UserId) -> Vec<TemporaryChannel> {
        self.channels_in_guild(guild_id)
            .into_iter()
            .filter(|c| c.owner_id == user_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Add a user to a channel's ban list; returns false if already banned
    pub fn ban(&self, channel_id: ChannelId, user_id: UserId) -> bool {
        self.bans.entry(channel_id).or_default().insert(user_id)
    }

    /// Drop a ban reservation whose platform overwrite did not go through
    pub fn unban(&self, channel_id: ChannelId, user_id: UserId) -> bool {
        self.bans
            .get_mut(&channel_id)
            .map(|mut set| set.remove(&user_id))
            .unwrap_or(false)
    }

    pub fn is_banned(&self, channel_id: ChannelId, user_id: UserId) -> bool {
        self.bans
            .get(&channel_id)
            .map(|set| set.contains(&user_id))
            .unwrap_or(false)
    }

    pub fn ban_count(&self, channel_id: ChannelId) -> usize {
        self.bans.get(&channel_id).map(|set| set.len()).unwrap_or(0)
    }
}
