use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    Cache, ChannelId, ChannelType, CreateChannel, EditMember, GuildId, Http, PermissionOverwrite,
    PermissionOverwriteType, UserId,
};
use tracing::{debug, info};

use super::{ChannelSnapshot, MemberVoiceState, Platform, PlatformError, VoiceChannelSpec};

/// [`Platform`] backed by serenity's HTTP client and gateway cache
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }

    fn cache_http(&self) -> (&Arc<Cache>, &Http) {
        (&self.cache, &self.http)
    }
}

#[async_trait]
impl Platform for DiscordPlatform {
    async fn create_voice_channel(
        &self,
        guild_id: GuildId,
        spec: VoiceChannelSpec,
    ) -> Result<ChannelId, PlatformError> {
        let mut builder = CreateChannel::new(&spec.name)
            .kind(ChannelType::Voice)
            .permissions(spec.overwrites)
            .audit_log_reason(&spec.reason);

        if let Some(category) = spec.category {
            builder = builder.category(category);
        }
        if let Some(limit) = spec.user_limit {
            builder = builder.user_limit(limit);
        }

        let channel = guild_id.create_channel(self.cache_http(), builder).await?;
        Ok(channel.id)
    }

    async fn delete_channel(
        &self,
        channel_id: ChannelId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.http.delete_channel(channel_id, Some(reason)).await?;
        Ok(())
    }

    async fn set_permission_overwrite(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
        overwrite: Option<PermissionOverwrite>,
    ) -> Result<(), PlatformError> {
        match overwrite {
            Some(overwrite) => {
                channel_id
                    .create_permission(self.cache_http(), overwrite)
                    .await?
            }
            None => {
                channel_id
                    .delete_permission(self.cache_http(), PermissionOverwriteType::Member(user_id))
                    .await?
            }
        }
        Ok(())
    }

    async fn move_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        destination: Option<ChannelId>,
    ) -> Result<(), PlatformError> {
        let edit = match destination {
            Some(channel_id) => EditMember::new().voice_channel(channel_id),
            None => EditMember::new().disconnect_member(),
        };
        guild_id.edit_member(self.cache_http(), user_id, edit).await?;
        Ok(())
    }

    async fn set_member_mute(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        mute: bool,
    ) -> Result<(), PlatformError> {
        guild_id
            .edit_member(self.cache_http(), user_id, EditMember::new().mute(mute))
            .await?;
        Ok(())
    }

    async fn resolve_or_create_category(
        &self,
        guild_id: GuildId,
        name: &str,
        reason: &str,
    ) -> Result<ChannelId, PlatformError> {
        let channels = guild_id.channels(&self.http).await?;
        let existing = channels
            .values()
            .find(|c| c.kind == ChannelType::Category && c.name == name)
            .map(|c| c.id);

        if let Some(id) = existing {
            return Ok(id);
        }

        let category = guild_id
            .create_channel(
                self.cache_http(),
                CreateChannel::new(name)
                    .kind(ChannelType::Category)
                    .audit_log_reason(reason),
            )
            .await?;

        info!("Created category {} ({}) in guild {}", name, category.id, guild_id);
        Ok(category.id)
    }

    async fn resolve_channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<ChannelSnapshot, PlatformError> {
        // Prefer the cache; fall back to HTTP when the guild isn't cached yet
        let cached = self.cache.guild(guild_id).map(|guild| {
            guild.channels.get(&channel_id).map(|c| ChannelSnapshot {
                id: c.id,
                guild_id: c.guild_id,
                name: c.name.clone(),
            })
        });

        match cached {
            Some(Some(snapshot)) => Ok(snapshot),
            Some(None) => Err(PlatformError::NotFound),
            None => {
                debug!("Guild {} not cached, fetching channel {} over HTTP", guild_id, channel_id);
                let channel = self.http.get_channel(channel_id).await?;
                let guild_channel = channel.guild().ok_or(PlatformError::NotFound)?;
                Ok(ChannelSnapshot {
                    id: guild_channel.id,
                    guild_id: guild_channel.guild_id,
                    name: guild_channel.name,
                })
            }
        }
    }

    async fn list_channel_members(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Vec<UserId>, PlatformError> {
        let guild = self
            .cache
            .guild(guild_id)
            .ok_or_else(|| PlatformError::Other(format!("guild {} is not cached", guild_id)))?;

        if !guild.channels.contains_key(&channel_id) {
            return Err(PlatformError::NotFound);
        }

        Ok(guild
            .voice_states
            .values()
            .filter(|vs| vs.channel_id == Some(channel_id))
            .map(|vs| vs.user_id)
            .collect())
    }

    fn voice_state(&self, guild_id: GuildId, user_id: UserId) -> Option<MemberVoiceState> {
        let guild = self.cache.guild(guild_id)?;
        let state = guild.voice_states.get(&user_id)?;
        state.channel_id.map(|channel_id| MemberVoiceState {
            channel_id,
            muted: state.mute,
        })
    }
}
