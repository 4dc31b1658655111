use poise::serenity_prelude::User;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::utils::formatting::mention_user;

/// Disconnect a user from your voice channel
#[poise::command(slash_command, rename = "kick-user", guild_only)]
pub async fn kick_user(
    ctx: Context<'_>,
    #[description = "User to disconnect"] user: User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    ctx.data()
        .owner_actions
        .remove_member(guild_id, ctx.author().id, user.id)
        .await?;

    let embed = embeds::success_embed()
        .title("User Removed")
        .description(format!("{} has been disconnected from your channel.", mention_user(user.id)));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
