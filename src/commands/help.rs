use serenity::all::CreateEmbedFooter;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::timeouts::{format_duration, EMPTY_CHANNEL_GRACE_PERIOD};

/// Show how temporary voice channels work
#[poise::command(slash_command, rename = "voice-help")]
pub async fn voice_help(ctx: Context<'_>) -> Result<(), Error> {
    let create = embeds::bullet_list(&[
        "`/gaming-channel` pick a platform, game and member limit",
        "`/create-voice [name]` a plain temporary channel",
    ]);
    let manage = embeds::bullet_list(&[
        "`/delete-voice` delete your channel",
        "`/list-temp-channels` show active temporary channels",
    ]);
    let owner = embeds::bullet_list(&[
        "`/kick-user` disconnect a member from your channel",
        "`/ban-user` stop a member from rejoining your channel",
        "`/mute-user` toggle a member's server mute",
        "`/transfer-owner` hand your channel to another member",
    ]);

    let embed = embeds::standard_embed()
        .title("🎧 Temporary Voice Channels")
        .description(
            "Create a voice channel that belongs to you. You need to be in a voice channel or have the Manage Channels permission.",
        )
        .field("Create", create, false)
        .field("Manage", manage, false)
        .field("Owner Commands", owner, false)
        .footer(CreateEmbedFooter::new(format!(
            "Empty channels are deleted after {}",
            format_duration(EMPTY_CHANNEL_GRACE_PERIOD)
        )));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
