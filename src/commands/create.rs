use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::guild_requester;
use crate::components::{creation_modal, platform_selector};
use crate::services::channels::ProvisionRequest;
use crate::utils::permissions;

/// Create a temporary gaming voice channel
#[poise::command(slash_command, rename = "gaming-channel", guild_only)]
pub async fn gaming_channel(ctx: Context<'_>) -> Result<(), Error> {
    let (_, requester) = guild_requester(ctx).await?;
    permissions::ensure_can_provision(&requester)?;

    let (embed, menu) = platform_selector::create_menu();

    ctx.send(
        poise::CreateReply::default()
            .embed(embed)
            .components(vec![menu])
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Create a simple temporary voice channel
#[poise::command(slash_command, rename = "create-voice", guild_only)]
pub async fn create_voice(
    ctx: Context<'_>,
    #[description = "Name for your channel"]
    #[max_length = 100]
    name: Option<String>,
) -> Result<(), Error> {
    let (guild_id, requester) = guild_requester(ctx).await?;
    permissions::ensure_can_provision(&requester)?;

    ctx.defer_ephemeral().await?;

    let channel = ctx
        .data()
        .provisioner
        .provision(guild_id, &requester, ProvisionRequest::Simple { name })
        .await?;

    ctx.send(
        poise::CreateReply::default()
            .embed(creation_modal::created_embed(&channel))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
