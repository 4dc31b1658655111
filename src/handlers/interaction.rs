use std::sync::Arc;

use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    Interaction, ModalInteraction,
};
use tracing::debug;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::components::{creation_modal, platform_selector};
use crate::constants::embeds;

pub async fn handle_interaction(
    ctx: &Context,
    data: &Arc<Data>,
    interaction: &Interaction,
) -> Result<(), Error> {
    match interaction {
        Interaction::Component(component) => {
            handle_component(ctx, data, component).await?;
        }
        Interaction::Modal(modal) => {
            handle_modal(ctx, data, modal).await?;
        }
        Interaction::Command(_) => {
            // Slash commands are handled by poise
        }
        _ => {
            debug!("Unhandled interaction type: {:?}", interaction.kind());
        }
    }

    Ok(())
}

async fn handle_component(
    ctx: &Context,
    data: &Arc<Data>,
    component: &ComponentInteraction,
) -> Result<(), Error> {
    let custom_id = &component.data.custom_id;
    debug!("Component interaction: {}", custom_id);

    let result = if custom_id == platform_selector::CUSTOM_ID {
        platform_selector::handle_selection(ctx, data, component).await
    } else {
        // Stale menus from a previous process land here
        debug!("Unknown component interaction: {}", custom_id);
        send_component_error(ctx, component, "This menu has expired. Please run the command again.")
            .await
    };

    if let Err(e) = result {
        e.log(&format!("Component interaction {}", custom_id));
        let _ = send_component_error(ctx, component, &e.user_message()).await;
    }

    Ok(())
}

async fn handle_modal(
    ctx: &Context,
    data: &Arc<Data>,
    modal: &ModalInteraction,
) -> Result<(), Error> {
    let custom_id = &modal.data.custom_id;
    debug!("Modal submission: {}", custom_id);

    if custom_id.starts_with(creation_modal::CUSTOM_ID_PREFIX) {
        if let Err(e) = creation_modal::handle_submission(ctx, data, modal).await {
            e.log(&format!("Modal submission {}", custom_id));
            let _ = send_modal_error(ctx, modal, &e.user_message()).await;
        }
    } else {
        debug!("Unknown modal submission: {}", custom_id);
    }

    Ok(())
}

/// Send an ephemeral error message for a component interaction
pub async fn send_component_error(
    ctx: &Context,
    component: &ComponentInteraction,
    message: &str,
) -> Result<(), Error> {
    let embed = embeds::failure(message);

    component
        .create_response(
            ctx,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

/// Send an ephemeral error message for a modal interaction
pub async fn send_modal_error(
    ctx: &Context,
    modal: &ModalInteraction,
    message: &str,
) -> Result<(), Error> {
    let embed = embeds::failure(message);

    modal
        .create_response(
            ctx,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}
