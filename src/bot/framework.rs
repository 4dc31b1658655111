use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, GatewayIntents, GuildId};
use tracing::{error, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::commands;
use crate::config::Settings;
use crate::constants::embeds;
use crate::constants::timeouts::SWEEP_INTERVAL;
use crate::handlers::event_handler::event_handler;
use crate::platform::DiscordPlatform;
use crate::services::channels::reaper;

fn command_list() -> Vec<poise::Command<Arc<Data>, Error>> {
    vec![
        commands::create::gaming_channel(),
        commands::create::create_voice(),
        commands::manage::delete_voice(),
        commands::manage::list_temp_channels(),
        commands::owner::kick::kick_user(),
        commands::owner::ban::ban_user(),
        commands::owner::mute::mute_user(),
        commands::owner::transfer::transfer_owner(),
        commands::help::voice_help(),
    ]
}

async fn on_error(error: poise::FrameworkError<'_, Arc<Data>, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error.log(&format!("Command /{} failed", ctx.command().name));
            let reply = poise::CreateReply::default()
                .embed(embeds::failure(error.user_message()))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                warn!("Failed to send error reply: {:?}", e);
            }
        }
        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
            let reply = poise::CreateReply::default()
                .embed(embeds::failure(format!("Invalid argument: {}", error)))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                warn!("Failed to send argument error reply: {:?}", e);
            }
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            // Prefix commands are disabled
        }
        err => {
            if let Err(e) = poise::builtins::on_error(err).await {
                error!("Error while handling framework error: {:?}", e);
            }
        }
    }
}

pub async fn run(settings: Settings) -> Result<(), Error> {
    let token = settings.discord_token.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: command_list(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: None,
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as {}", ready.user.name);

                let platform = Arc::new(DiscordPlatform::new(ctx.http.clone(), ctx.cache.clone()));
                let data = Arc::new(Data::new(settings, platform));

                // Waits for the ready gate, which the Ready event opens
                reaper::spawn_sweeper(data.reaper.clone(), data.ready.subscribe(), SWEEP_INTERVAL);
                info!("Sweeper spawned, waiting for the session to become ready");

                let commands = &framework.options().commands;
                match data.settings.guild_id {
                    Some(guild_id) => {
                        let guild_id = GuildId::new(guild_id);
                        poise::builtins::register_in_guild(ctx, commands, guild_id)
                            .await
                            .map_err(|e| {
                                error!("Failed to register commands in guild {}: {:?}", guild_id, e);
                                Error::Serenity(e)
                            })?;
                        info!("Registered {} commands in guild {}", commands.len(), guild_id);
                    }
                    None => {
                        poise::builtins::register_globally(ctx, commands)
                            .await
                            .map_err(|e| {
                                error!("Failed to register commands globally: {:?}", e);
                                Error::Serenity(e)
                            })?;
                        info!(
                            "Registered {} commands globally (may take up to an hour to appear)",
                            commands.len()
                        );
                    }
                }

                Ok(data)
            })
        })
        .build();

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_VOICE_STATES;

    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .map_err(Error::Serenity)?;

    info!("Starting Discord client...");
    client.start().await.map_err(Error::Serenity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        let names: Vec<String> = command_list().into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "gaming-channel",
                "create-voice",
                "delete-voice",
                "list-temp-channels",
                "kick-user",
                "ban-user",
                "mute-user",
                "transfer-owner",
                "voice-help",
            ]
        );
    }
}
