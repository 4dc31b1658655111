use std::fmt;
use std::sync::Arc;

use serenity::all::{GuildId, Member};

use crate::config::Settings;
use crate::constants::timeouts::EMPTY_CHANNEL_GRACE_PERIOD;
use crate::platform::Platform;
use crate::services::channels::naming::NamingRules;
use crate::services::channels::{
    ChannelProvisioner, ChannelRegistry, EmptyChannelReaper, ReadyGate,
};
use crate::services::moderation::OwnerActionHandler;
use crate::utils::permissions::Requester;

/// Shared data available to all commands and handlers
pub struct Data {
    pub settings: Settings,
    pub platform: Arc<dyn Platform>,
    /// Source of truth for which channels are temporary and who owns them
    pub registry: Arc<ChannelRegistry>,
    pub reaper: Arc<EmptyChannelReaper>,
    pub provisioner: ChannelProvisioner,
    pub owner_actions: OwnerActionHandler,
    /// Opened when the gateway session is ready
    pub ready: ReadyGate,
}

impl Data {
    pub fn new(settings: Settings, platform: Arc<dyn Platform>) -> Self {
        let registry = Arc::new(ChannelRegistry::new());

        let reaper = Arc::new(EmptyChannelReaper::new(
            registry.clone(),
            platform.clone(),
            EMPTY_CHANNEL_GRACE_PERIOD,
        ));

        let provisioner = ChannelProvisioner::new(
            registry.clone(),
            platform.clone(),
            NamingRules {
                max_length: settings.max_channel_name_length,
                default_label: settings.default_channel_name.clone(),
            },
            settings.temp_category_name.clone(),
        );

        let owner_actions = OwnerActionHandler::new(registry.clone(), platform.clone());

        Self {
            settings,
            platform,
            registry,
            reaper,
            provisioner,
            owner_actions,
            ready: ReadyGate::new(),
        }
    }

    /// Capture who is asking, including their current voice channel
    pub fn requester(&self, guild_id: GuildId, member: &Member) -> Requester {
        let voice_channel = self
            .platform
            .voice_state(guild_id, member.user.id)
            .map(|vs| vs.channel_id);
        Requester::from_member(member, voice_channel)
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("temp_channels", &self.registry.len())
            .field("ready", &self.ready.is_open())
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;
