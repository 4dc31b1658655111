use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, ActivityData, FullEvent};
use tracing::{debug, error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::handlers::lifecycle::{self, LifecycleEvent};
use crate::handlers::{interaction, voice_state};

/// Presence shown while the bot is connected
fn ready_activity() -> ActivityData {
    ActivityData::listening("for /voice commands")
}

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Arc<Data>, Error>,
    data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!(
                "Bot ready as {} in {} guild(s)",
                data_about_bot.user.name,
                data_about_bot.guilds.len()
            );
            ctx.set_activity(Some(ready_activity()));
            lifecycle::dispatch(data, LifecycleEvent::SessionReady);
        }

        FullEvent::Resume { .. } => {
            debug!("Gateway session resumed");
            lifecycle::dispatch(data, LifecycleEvent::SessionReady);
        }

        FullEvent::VoiceStateUpdate { old, new } => {
            voice_state::handle_voice_state_update(data, old.as_ref(), new);
        }

        FullEvent::InteractionCreate { interaction } => {
            // Poise handles ApplicationCommand (slash commands) automatically
            match interaction {
                serenity::Interaction::Component(_) | serenity::Interaction::Modal(_) => {
                    if let Err(e) = interaction::handle_interaction(ctx, data, interaction).await {
                        error!("Component/Modal interaction handler error: {:?}", e);
                    }
                }
                _ => {}
            }
        }

        FullEvent::ChannelDelete { channel, .. } => {
            voice_state::channel_deleted(data, channel.id);
        }

        _ => {}
    }

    Ok(())
}
