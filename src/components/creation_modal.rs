use std::sync::Arc;

use serenity::all::{
    ActionRowComponent, Context, CreateActionRow, CreateEmbed, CreateInputText,
    CreateInteractionResponseFollowup, CreateModal, InputTextStyle, ModalInteraction,
};
use tracing::debug;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::platforms;
use crate::handlers::interaction::send_modal_error;
use crate::services::channels::{ProvisionRequest, ProvisionedChannel};
use crate::utils::formatting::mention_channel;
use crate::utils::permissions;

pub const CUSTOM_ID_PREFIX: &str = "gaming_modal_";

const GAME_INPUT: &str = "game_name";
const MAX_USERS_INPUT: &str = "max_users";

/// Create the game / member limit modal for a platform
pub fn create_modal(platform: &str) -> CreateModal {
    CreateModal::new(
        format!("{}{}", CUSTOM_ID_PREFIX, platform),
        format!("{} Gaming Channel", platform),
    )
    .components(vec![
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "Game Name", GAME_INPUT)
                .placeholder("e.g. Valorant, Minecraft, Rocket League")
                .required(true)
                .max_length(50),
        ),
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "Max Users (2-99)", MAX_USERS_INPUT)
                .placeholder("10")
                .required(false)
                .max_length(2),
        ),
    ])
}

fn platform_from_custom_id(custom_id: &str) -> Option<&str> {
    custom_id
        .strip_prefix(CUSTOM_ID_PREFIX)
        .filter(|p| platforms::is_known(p))
}

fn input_value(modal: &ModalInteraction, custom_id: &str) -> Option<String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == custom_id => {
                input.value.clone().filter(|v| !v.trim().is_empty())
            }
            _ => None,
        })
}

/// Handle the modal submission by provisioning the gaming channel
pub async fn handle_submission(
    ctx: &Context,
    data: &Arc<Data>,
    modal: &ModalInteraction,
) -> Result<(), Error> {
    let platform = match platform_from_custom_id(&modal.data.custom_id) {
        Some(p) => p.to_string(),
        None => {
            send_modal_error(ctx, modal, "Invalid modal state").await?;
            return Ok(());
        }
    };

    let (guild_id, member) = match (modal.guild_id, modal.member.as_ref()) {
        (Some(guild_id), Some(member)) => (guild_id, member),
        _ => {
            send_modal_error(ctx, modal, "This can only be used in a server.").await?;
            return Ok(());
        }
    };

    // Checked again here: the member may have left voice since opening the menu
    let requester = data.requester(guild_id, member);
    if let Err(e) = permissions::ensure_can_provision(&requester) {
        send_modal_error(ctx, modal, &e.user_message()).await?;
        return Ok(());
    }

    let game = input_value(modal, GAME_INPUT).unwrap_or_default();
    let max_users = input_value(modal, MAX_USERS_INPUT);

    debug!(
        "Gaming modal submitted: platform={}, game={:?}, max_users={:?}",
        platform, game, max_users
    );

    modal.defer_ephemeral(ctx).await?;

    let request = ProvisionRequest::Gaming {
        platform,
        game,
        max_users,
    };

    let embed = match data.provisioner.provision(guild_id, &requester, request).await {
        Ok(channel) => created_embed(&channel),
        Err(e) => {
            e.log("Gaming channel creation failed");
            embeds::failure(e.user_message())
        }
    };

    modal
        .create_followup(
            ctx,
            CreateInteractionResponseFollowup::new()
                .embed(embed)
                .ephemeral(true),
        )
        .await?;

    Ok(())
}

/// Summary shown to the owner once a channel exists
pub fn created_embed(channel: &ProvisionedChannel) -> CreateEmbed {
    let mut embed = embeds::success_embed()
        .title("✅ Voice Channel Created")
        .description(format!(
            "Your temporary channel {} is ready.",
            mention_channel(channel.channel_id)
        ));

    if let Some(platform) = &channel.platform {
        embed = embed.field("Platform", platform, true);
    }
    if let Some(game) = &channel.game {
        embed = embed.field("Game", game, true);
    }
    if let Some(limit) = channel.user_limit {
        embed = embed.field("Max Users", limit.to_string(), true);
    }

    embed
        .field("Owner Powers", embeds::bullet_list(embeds::OWNER_POWERS), false)
        .field(
            "Auto-cleanup",
            "The channel is deleted automatically once it has been empty for a few seconds.",
            false,
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_custom_id() {
        assert_eq!(platform_from_custom_id("gaming_modal_PC"), Some("PC"));
        assert_eq!(platform_from_custom_id("gaming_modal_PlayStation"), Some("PlayStation"));
        assert_eq!(platform_from_custom_id("gaming_modal_Amiga"), None);
        assert_eq!(platform_from_custom_id("topic_PC"), None);
    }
}
