pub mod create;
pub mod help;
pub mod manage;
pub mod owner;

use serenity::all::GuildId;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::utils::permissions::Requester;

/// Resolve the guild and the invoking member as a [`Requester`]
pub(crate) async fn guild_requester(ctx: Context<'_>) -> Result<(GuildId, Requester), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let member = ctx
        .author_member()
        .await
        .ok_or(Error::custom("Could not resolve your server membership."))?;
    Ok((guild_id, ctx.data().requester(guild_id, &member)))
}
