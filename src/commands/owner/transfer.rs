use poise::serenity_prelude::User;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::utils::formatting::mention_user;

/// Transfer ownership of your voice channel to another user
#[poise::command(slash_command, rename = "transfer-owner", guild_only)]
pub async fn transfer_owner(
    ctx: Context<'_>,
    #[description = "User to transfer ownership to"] user: User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    if user.bot {
        return Err(Error::InvalidOperation(
            "You cannot transfer ownership to a bot.".to_string(),
        ));
    }

    ctx.data()
        .owner_actions
        .transfer_ownership(guild_id, ctx.author().id, user.id)
        .await?;

    let embed = embeds::success_embed()
        .title("Ownership Transferred")
        .description(format!(
            "Ownership of the voice channel has been transferred to {}.",
            mention_user(user.id)
        ));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
