use serenity::all::{ChannelId, GuildId, UserId};
use tracing::info;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::guild_requester;
use crate::constants::embeds;
use crate::services::channels::{ChannelRegistry, ReapOutcome};
use crate::utils::formatting::{mention_channel, mention_user, plural};

/// Pick the channel `/delete-voice` acts on: the one the user is in if they
/// own it, otherwise their oldest channel in the guild
fn deletion_target(
    registry: &ChannelRegistry,
    guild_id: GuildId,
    user_id: UserId,
    current: Option<ChannelId>,
) -> Option<ChannelId> {
    current
        .filter(|channel_id| registry.is_owner(*channel_id, user_id))
        .or_else(|| {
            registry
                .owned_by(guild_id, user_id)
                .first()
                .map(|c| c.channel_id)
        })
}

/// Delete your temporary voice channel
#[poise::command(slash_command, rename = "delete-voice", guild_only)]
pub async fn delete_voice(ctx: Context<'_>) -> Result<(), Error> {
    let (guild_id, requester) = guild_requester(ctx).await?;
    let data = ctx.data();

    let channel_id = deletion_target(
        &data.registry,
        guild_id,
        requester.user_id,
        requester.voice_channel,
    )
    .ok_or(Error::custom("You don't own any temporary voice channel."))?;

    let reason = format!("Deleted by owner {}", requester.display_name);
    match data.reaper.delete_channel(channel_id, &reason).await? {
        ReapOutcome::AlreadyGone => return Err(Error::ChannelNotFound(channel_id)),
        _ => info!("User {} deleted channel {}", requester.user_id, channel_id),
    }

    let embed = embeds::warning_embed()
        .title("🗑️ Channel Deleted")
        .description("Your temporary voice channel has been deleted.");

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// List the active temporary voice channels in this server
#[poise::command(slash_command, rename = "list-temp-channels", guild_only)]
pub async fn list_temp_channels(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let data = ctx.data();

    let channels = data.registry.channels_in_guild(guild_id);
    if channels.is_empty() {
        let embed = embeds::info_embed()
            .title("Temporary Channels")
            .description("No temporary voice channels are active right now.");
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        return Ok(());
    }

    let mut lines = Vec::with_capacity(channels.len());
    for channel in &channels {
        let members = match data
            .platform
            .list_channel_members(guild_id, channel.channel_id)
            .await
        {
            Ok(members) => plural(members.len(), "member"),
            Err(_) => "unknown members".to_string(),
        };
        lines.push(format!(
            "{} {} owned by {} ({})",
            embeds::BULLET,
            mention_channel(channel.channel_id),
            mention_user(channel.owner_id),
            members
        ));
    }

    let embed = embeds::info_embed()
        .title(format!("Temporary Channels ({})", channels.len()))
        .description(lines.join("\n"));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
