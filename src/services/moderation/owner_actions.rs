use std::sync::Arc;

use serenity::all::{ChannelId, GuildId, UserId};
use tracing::{error, info, warn};

use crate::bot::error::Error;
use crate::platform::{Platform, PlatformError};
use crate::services::channels::registry::ChannelRegistry;
use crate::utils::permissions;

/// Result of a successful ban
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BanOutcome {
    /// The target was connected and got disconnected
    pub disconnected: bool,
}

/// Moderation actions available to the owner of a temporary channel
pub struct OwnerActionHandler {
    registry: Arc<ChannelRegistry>,
    platform: Arc<dyn Platform>,
}

impl OwnerActionHandler {
    pub fn new(registry: Arc<ChannelRegistry>, platform: Arc<dyn Platform>) -> Self {
        Self { registry, platform }
    }

    /// The temporary channel `actor` is in and owns
    pub fn owned_channel(&self, guild_id: GuildId, actor: UserId) -> Result<ChannelId, Error> {
        let channel_id = self
            .platform
            .voice_state(guild_id, actor)
            .map(|vs| vs.channel_id)
            .ok_or(Error::NotOwner)?;

        if !self.registry.is_owner(channel_id, actor) {
            return Err(Error::NotOwner);
        }

        Ok(channel_id)
    }

    fn is_present(&self, guild_id: GuildId, channel_id: ChannelId, user_id: UserId) -> bool {
        self.platform
            .voice_state(guild_id, user_id)
            .map(|vs| vs.channel_id == channel_id)
            .unwrap_or(false)
    }

    fn ensure_not_self(actor: UserId, target: UserId) -> Result<(), Error> {
        if actor == target {
            return Err(Error::InvalidOperation(
                "You cannot perform this action on yourself.".to_string(),
            ));
        }
        Ok(())
    }

    /// Disconnect `target` from the owner's channel
    pub async fn remove_member(
        &self,
        guild_id: GuildId,
        actor: UserId,
        target: UserId,
    ) -> Result<ChannelId, Error> {
        let channel_id = self.owned_channel(guild_id, actor)?;
        Self::ensure_not_self(actor, target)?;

        if !self.is_present(guild_id, channel_id, target) {
            return Err(Error::TargetNotPresent(target));
        }

        self.disconnect(guild_id, target).await?;

        info!("User {} removed user {} from channel {}", actor, target, channel_id);
        Ok(channel_id)
    }

    /// Deny `target` from connecting to the owner's channel and disconnect them
    pub async fn ban_member(
        &self,
        guild_id: GuildId,
        actor: UserId,
        target: UserId,
    ) -> Result<BanOutcome, Error> {
        let channel_id = self.owned_channel(guild_id, actor)?;
        Self::ensure_not_self(actor, target)?;

        // Reserve the ban first so a concurrent ban of the same target loses
        if !self.registry.ban(channel_id, target) {
            return Err(Error::AlreadyBanned(target));
        }

        if let Err(e) = self
            .platform
            .set_permission_overwrite(
                channel_id,
                target,
                Some(permissions::ban_overwrite(target)),
            )
            .await
        {
            self.registry.unban(channel_id, target);
            return Err(Self::log_failure(e, "manage channel permissions"));
        }

        let disconnected = if self.is_present(guild_id, channel_id, target) {
            self.disconnect(guild_id, target).await?;
            true
        } else {
            false
        };

        info!("User {} banned user {} from channel {}", actor, target, channel_id);
        Ok(BanOutcome { disconnected })
    }

    /// Flip the server mute of `target`; returns whether they are now muted
    pub async fn toggle_mute(
        &self,
        guild_id: GuildId,
        actor: UserId,
        target: UserId,
    ) -> Result<bool, Error> {
        let channel_id = self.owned_channel(guild_id, actor)?;
        Self::ensure_not_self(actor, target)?;

        let state = self
            .platform
            .voice_state(guild_id, target)
            .filter(|vs| vs.channel_id == channel_id)
            .ok_or(Error::TargetNotPresent(target))?;

        let mute = !state.muted;
        self.platform
            .set_member_mute(guild_id, target, mute)
            .await
            .map_err(|e| Self::log_failure(e, "mute members"))?;

        info!(
            "User {} {} user {} in channel {}",
            actor,
            if mute { "muted" } else { "unmuted" },
            target,
            channel_id
        );
        Ok(mute)
    }

    /// Hand the owner's channel to `target`. The new owner's overwrite is
    /// granted before the old one is cleared, and the registry changes last.
    pub async fn transfer_ownership(
        &self,
        guild_id: GuildId,
        actor: UserId,
        target: UserId,
    ) -> Result<ChannelId, Error> {
        let channel_id = self.owned_channel(guild_id, actor)?;
        Self::ensure_not_self(actor, target)?;

        if !self.is_present(guild_id, channel_id, target) {
            return Err(Error::TargetNotPresent(target));
        }

        self.platform
            .set_permission_overwrite(
                channel_id,
                target,
                Some(permissions::owner_overwrite(target)),
            )
            .await
            .map_err(|e| Self::log_failure(e, "manage channel permissions"))?;

        if let Err(e) = self
            .platform
            .set_permission_overwrite(channel_id, actor, None)
            .await
        {
            // Both members hold the elevated overwrite now; roll the grant back
            self.revoke_grant(channel_id, target).await;
            return Err(Self::log_failure(e, "manage channel permissions"));
        }

        // A concurrent transfer by the same owner may have won meanwhile
        if let Err(e) = self.registry.transfer_from(channel_id, actor, target) {
            warn!(
                "Ownership of channel {} changed during transfer to {}, rolling back",
                channel_id, target
            );
            self.revoke_grant(channel_id, target).await;
            return Err(e);
        }

        info!(
            "User {} transferred ownership of channel {} to user {}",
            actor, channel_id, target
        );
        Ok(channel_id)
    }

    async fn revoke_grant(&self, channel_id: ChannelId, user_id: UserId) {
        if let Err(e) = self
            .platform
            .set_permission_overwrite(channel_id, user_id, None)
            .await
        {
            error!(
                "Failed to revoke owner overwrite of user {} on channel {}: {}",
                user_id, channel_id, e
            );
        }
    }

    async fn disconnect(&self, guild_id: GuildId, user_id: UserId) -> Result<(), Error> {
        self.platform
            .move_member(guild_id, user_id, None)
            .await
            .map_err(|e| Self::log_failure(e, "move members"))
    }

    fn log_failure(err: PlatformError, action: &str) -> Error {
        error!("Owner action failed, could not {}: {}", action, err);
        Error::platform(err, action)
    }
}
