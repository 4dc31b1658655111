use poise::serenity_prelude::User;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::utils::formatting::mention_user;

/// Ban a user from rejoining your voice channel
#[poise::command(slash_command, rename = "ban-user", guild_only)]
pub async fn ban_user(
    ctx: Context<'_>,
    #[description = "User to ban"] user: User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let outcome = ctx
        .data()
        .owner_actions
        .ban_member(guild_id, ctx.author().id, user.id)
        .await?;

    let mut description = format!(
        "{} can no longer join your channel.",
        mention_user(user.id)
    );
    if outcome.disconnected {
        description.push_str(" They have been disconnected.");
    }

    let embed = embeds::warning_embed()
        .title("User Banned")
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
