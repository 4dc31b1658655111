use poise::serenity_prelude::User;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::utils::formatting::mention_user;

/// Toggle the server mute of a user in your voice channel
#[poise::command(slash_command, rename = "mute-user", guild_only)]
pub async fn mute_user(
    ctx: Context<'_>,
    #[description = "User to mute or unmute"] user: User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let muted = ctx
        .data()
        .owner_actions
        .toggle_mute(guild_id, ctx.author().id, user.id)
        .await?;

    let (title, verb) = if muted {
        ("User Muted", "muted")
    } else {
        ("User Unmuted", "unmuted")
    };

    let embed = embeds::success_embed()
        .title(title)
        .description(format!("{} has been server {}.", mention_user(user.id), verb));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
