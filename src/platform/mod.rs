//! Outbound calls to the chat platform.
//!
//! Core components only talk to the platform through [`Platform`], so they can
//! be exercised without a gateway connection.

pub mod discord;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use serenity::all::{ChannelId, GuildId, PermissionOverwrite, UserId};
use thiserror::Error;

pub use discord::DiscordPlatform;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("not found")]
    NotFound,

    #[error("missing permissions")]
    PermissionDenied,

    #[error("{0}")]
    Other(String),
}

impl From<serenity::Error> for PlatformError {
    fn from(err: serenity::Error) -> Self {
        if let serenity::Error::Http(ref http) = err {
            match http.status_code().map(|s| s.as_u16()) {
                Some(404) => return PlatformError::NotFound,
                Some(403) => return PlatformError::PermissionDenied,
                _ => {}
            }
        }
        PlatformError::Other(err.to_string())
    }
}

/// Everything needed to create a voice channel
#[derive(Debug, Clone)]
pub struct VoiceChannelSpec {
    pub name: String,
    pub category: Option<ChannelId>,
    pub overwrites: Vec<PermissionOverwrite>,
    pub user_limit: Option<u32>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub id: ChannelId,
    pub guild_id: GuildId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberVoiceState {
    pub channel_id: ChannelId,
    pub muted: bool,
}

#[async_trait]
pub trait Platform: Send + Sync {
    async fn create_voice_channel(
        &self,
        guild_id: GuildId,
        spec: VoiceChannelSpec,
    ) -> Result<ChannelId, PlatformError>;

    async fn delete_channel(&self, channel_id: ChannelId, reason: &str)
        -> Result<(), PlatformError>;

    /// `None` removes the member's overwrite, resetting them to the channel default
    async fn set_permission_overwrite(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
        overwrite: Option<PermissionOverwrite>,
    ) -> Result<(), PlatformError>;

    /// `None` disconnects the member from voice
    async fn move_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        destination: Option<ChannelId>,
    ) -> Result<(), PlatformError>;

    async fn set_member_mute(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        mute: bool,
    ) -> Result<(), PlatformError>;

    async fn resolve_or_create_category(
        &self,
        guild_id: GuildId,
        name: &str,
        reason: &str,
    ) -> Result<ChannelId, PlatformError>;

    async fn resolve_channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<ChannelSnapshot, PlatformError>;

    async fn list_channel_members(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Vec<UserId>, PlatformError>;

    /// Current voice state of a member, read from the local cache
    fn voice_state(&self, guild_id: GuildId, user_id: UserId) -> Option<MemberVoiceState>;
}
