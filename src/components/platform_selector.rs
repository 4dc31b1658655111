use std::sync::Arc;

use serenity::all::{
    ComponentInteraction, ComponentInteractionDataKind, Context, CreateActionRow, CreateEmbed,
    CreateInteractionResponse, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption,
};
use tracing::debug;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::components::creation_modal;
use crate::constants::embeds;
use crate::constants::platforms::{self, PLATFORMS};
use crate::handlers::interaction::send_component_error;

pub const CUSTOM_ID: &str = "platform_select";

/// Build the platform select menu shown by `/gaming-channel`
pub fn create_menu() -> (CreateEmbed, CreateActionRow) {
    let options: Vec<CreateSelectMenuOption> = PLATFORMS
        .iter()
        .map(|platform| {
            CreateSelectMenuOption::new(*platform, *platform)
                .description(format!("Create a {} gaming channel", platform))
                .emoji('🎮')
        })
        .collect();

    let select_menu = CreateSelectMenu::new(CUSTOM_ID, CreateSelectMenuKind::String { options })
        .placeholder("Choose your gaming platform")
        .min_values(1)
        .max_values(1);

    let embed = embeds::standard_embed()
        .title("🎮 Create a Gaming Channel")
        .description(
            "Select your platform below. You'll then be asked for the game and an optional member limit.",
        );

    (embed, CreateActionRow::SelectMenu(select_menu))
}

/// Handle a platform selection by opening the creation modal
pub async fn handle_selection(
    ctx: &Context,
    _data: &Arc<Data>,
    component: &ComponentInteraction,
) -> Result<(), Error> {
    let selected = match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => values.first().cloned(),
        _ => None,
    };

    let platform = match selected {
        Some(p) if platforms::is_known(&p) => p,
        other => {
            debug!("Rejected platform selection {:?}", other);
            send_component_error(ctx, component, "Please pick one of the listed platforms.")
                .await?;
            return Ok(());
        }
    };

    debug!("User {} selected platform {}", component.user.id, platform);

    component
        .create_response(
            ctx,
            CreateInteractionResponse::Modal(creation_modal::create_modal(&platform)),
        )
        .await?;

    Ok(())
}
