use std::sync::Arc;

use dashmap::DashMap;
use serenity::all::{ChannelId, GuildId};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::bot::error::Error;
use crate::constants::platforms;
use crate::platform::{Platform, PlatformError, VoiceChannelSpec};
use crate::services::channels::naming::{self, NamingRules};
use crate::services::channels::registry::{ChannelRegistry, TemporaryChannel};
use crate::utils::permissions::{self, Requester};

/// What the requester asked for
#[derive(Debug, Clone)]
pub enum ProvisionRequest {
    /// Interactive setup: platform, game and a raw "max users" field
    Gaming {
        platform: String,
        game: String,
        max_users: Option<String>,
    },
    /// `/create-voice` with an optional custom name
    Simple { name: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedChannel {
    pub channel_id: ChannelId,
    pub name: String,
    pub platform: Option<String>,
    pub game: Option<String>,
    pub user_limit: Option<u32>,
    pub room_number: Option<u64>,
}

/// Everything derived from a request before the platform is involved
struct Draft {
    name: String,
    category_name: String,
    platform: Option<String>,
    game: Option<String>,
    user_limit: Option<u32>,
    room_number: Option<u64>,
}

pub struct ChannelProvisioner {
    registry: Arc<ChannelRegistry>,
    platform: Arc<dyn Platform>,
    rules: NamingRules,
    temp_category_name: String,
    /// Last room number handed out per (guild, platform label)
    room_counters: DashMap<(GuildId, String), u64>,
    /// Serializes category lookups so concurrent requests don't create duplicates
    category_lock: Mutex<()>,
}

impl ChannelProvisioner {
    pub fn new(
        registry: Arc<ChannelRegistry>,
        platform: Arc<dyn Platform>,
        rules: NamingRules,
        temp_category_name: String,
    ) -> Self {
        Self {
            registry,
            platform,
            rules,
            temp_category_name,
            room_counters: DashMap::new(),
            category_lock: Mutex::new(()),
        }
    }

    /// Next room number for a platform label; starts at 1 and is never reused
    pub fn next_room_number(&self, guild_id: GuildId, platform: &str) -> u64 {
        let mut counter = self
            .room_counters
            .entry((guild_id, platform.to_string()))
            .or_insert(0);
        *counter += 1;
        *counter
    }

    /// Create a temporary channel for `requester` and start tracking it.
    ///
    /// The caller is expected to have checked [`permissions::can_provision`].
    pub async fn provision(
        &self,
        guild_id: GuildId,
        requester: &Requester,
        request: ProvisionRequest,
    ) -> Result<ProvisionedChannel, Error> {
        let draft = self.draft(guild_id, requester, request);
        let category = self.resolve_category(guild_id, &draft.category_name).await;

        let spec = VoiceChannelSpec {
            name: draft.name.clone(),
            category,
            overwrites: permissions::temp_channel_overwrites(guild_id, requester.user_id),
            user_limit: draft.user_limit,
            reason: format!("Temporary voice channel created by {}", requester.display_name),
        };

        let channel_id = match self.platform.create_voice_channel(guild_id, spec).await {
            Ok(id) => id,
            Err(PlatformError::PermissionDenied) => {
                error!("No permission to create voice channels in guild {}", guild_id);
                return Err(Error::PermissionDenied("create voice channels".to_string()));
            }
            Err(e) => {
                error!("Error creating voice channel in guild {}: {}", guild_id, e);
                return Err(Error::ProvisionFailed(e));
            }
        };

        let mut entry =
            TemporaryChannel::new(channel_id, guild_id, requester.user_id, draft.name.clone());
        entry.platform = draft.platform.clone();
        entry.game = draft.game.clone();
        entry.room_number = draft.room_number;
        self.registry.register(entry);

        info!(
            "Created temporary voice channel {} ({}) for user {}",
            draft.name, channel_id, requester.user_id
        );

        Ok(ProvisionedChannel {
            channel_id,
            name: draft.name,
            platform: draft.platform,
            game: draft.game,
            user_limit: draft.user_limit,
            room_number: draft.room_number,
        })
    }

    fn draft(&self, guild_id: GuildId, requester: &Requester, request: ProvisionRequest) -> Draft {
        match request {
            ProvisionRequest::Gaming {
                platform,
                game,
                max_users,
            } => {
                let user_limit = naming::parse_user_limit(max_users.as_deref());
                let platform = self.rules.sanitize(&platform);
                let game = self.rules.sanitize(&game);
                let room_number = self.next_room_number(guild_id, &platform);

                Draft {
                    name: naming::gaming_channel_name(
                        room_number,
                        &game,
                        &requester.display_name,
                    ),
                    category_name: platforms::category_name(&platform),
                    platform: Some(platform),
                    game: Some(game),
                    user_limit: Some(user_limit),
                    room_number: Some(room_number),
                }
            }
            ProvisionRequest::Simple { name } => {
                let raw = name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| naming::simple_channel_name(&requester.display_name));

                Draft {
                    name: self.rules.sanitize(&raw),
                    category_name: self.temp_category_name.clone(),
                    platform: None,
                    game: None,
                    user_limit: None,
                    room_number: None,
                }
            }
        }
    }

    /// Find or create the category; failures leave the channel uncategorized
    async fn resolve_category(&self, guild_id: GuildId, name: &str) -> Option<ChannelId> {
        let _guard = self.category_lock.lock().await;

        let reason = format!("Category for {}", name);
        match self
            .platform
            .resolve_or_create_category(guild_id, name, &reason)
            .await
        {
            Ok(id) => Some(id),
            Err(PlatformError::PermissionDenied) => {
                error!("No permission to create category {} in guild {}", name, guild_id);
                None
            }
            Err(e) => {
                warn!("Error resolving category {} in guild {}: {}", name, guild_id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serenity::all::{Permissions, UserId};

    use super::*;
    use crate::platform::mock::{Call, MockPlatform};

    const GUILD: GuildId = GuildId::new(1);

    fn setup() -> (Arc<ChannelRegistry>, Arc<MockPlatform>, ChannelProvisioner) {
        let registry = Arc::new(ChannelRegistry::new());
        let platform = Arc::new(MockPlatform::new());
        let provisioner = ChannelProvisioner::new(
            registry.clone(),
            platform.clone(),
            NamingRules {
                max_length: 50,
                default_label: "Temporary Channel".to_string(),
            },
            "Temporary Channels".to_string(),
        );
        (registry, platform, provisioner)
    }

    fn requester(id: u64, name: &str) -> Requester {
        Requester {
            user_id: UserId::new(id),
            display_name: name.to_string(),
            permissions: Permissions::CONNECT | Permissions::SPEAK,
            voice_channel: Some(ChannelId::new(5)),
        }
    }

    fn gaming(platform: &str, game: &str, max_users: Option<&str>) -> ProvisionRequest {
        ProvisionRequest::Gaming {
            platform: platform.to_string(),
            game: game.to_string(),
            max_users: max_users.map(str::to_string),
        }
    }

    fn created_specs(platform: &MockPlatform) -> Vec<VoiceChannelSpec> {
        platform
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateVoiceChannel(spec) => Some(spec),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_gaming_channel_clamps_limit_and_registers_owner() {
        let (registry, platform, provisioner) = setup();

        let channel = provisioner
            .provision(GUILD, &requester(1, "U1"), gaming("PC", "Dota2", Some("150")))
            .await
            .unwrap();

        assert_eq!(channel.user_limit, Some(99));
        assert_eq!(channel.name, "#1 - Dota2's U1");
        assert_eq!(registry.lookup_owner(channel.channel_id), Some(UserId::new(1)));

        let specs = created_specs(&platform);
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].user_limit, Some(99));
        assert_eq!(specs[0].overwrites.len(), 2);
        assert!(specs[0].category.is_some());
    }

    #[tokio::test]
    async fn test_room_numbers_increase_per_platform() {
        let (registry, _platform, provisioner) = setup();
        let user = requester(1, "U1");

        let first = provisioner.provision(GUILD, &user, gaming("PC", "Dota2", None)).await.unwrap();
        registry.unregister(first.channel_id);
        let second = provisioner.provision(GUILD, &user, gaming("PC", "LOL", None)).await.unwrap();
        let mobile = provisioner.provision(GUILD, &user, gaming("Mobile", "MLBB", None)).await.unwrap();
        let third = provisioner.provision(GUILD, &user, gaming("PC", "Valorant", None)).await.unwrap();

        assert_eq!(first.room_number, Some(1));
        assert_eq!(second.room_number, Some(2));
        assert_eq!(third.room_number, Some(3));
        assert_eq!(mobile.room_number, Some(1));
    }

    #[tokio::test]
    async fn test_category_reused_by_name() {
        let (_registry, platform, provisioner) = setup();
        platform.add_category("🎮 PC Gaming", ChannelId::new(77));
        let user = requester(1, "U1");

        provisioner.provision(GUILD, &user, gaming("PC", "Dota2", None)).await.unwrap();
        provisioner.provision(GUILD, &user, gaming("Console", "Halo", None)).await.unwrap();
        provisioner.provision(GUILD, &user, gaming("Console", "Halo", None)).await.unwrap();

        let specs = created_specs(&platform);
        assert_eq!(specs[0].category, Some(ChannelId::new(77)));
        assert_eq!(specs[1].category, specs[2].category);

        let created: Vec<String> = platform
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateCategory(name) => Some(name),
                _ => None,
            })
            .collect();
        assert_eq!(created, vec!["🎮 Console Gaming".to_string()]);
    }

    #[tokio::test]
    async fn test_default_limit_for_missing_or_bad_input() {
        let (_registry, _platform, provisioner) = setup();
        let user = requester(1, "U1");

        let blank = provisioner.provision(GUILD, &user, gaming("PC", "a", None)).await.unwrap();
        let junk = provisioner.provision(GUILD, &user, gaming("PC", "a", Some("xx"))).await.unwrap();
        let low = provisioner.provision(GUILD, &user, gaming("PC", "a", Some("1"))).await.unwrap();

        assert_eq!(blank.user_limit, Some(10));
        assert_eq!(junk.user_limit, Some(10));
        assert_eq!(low.user_limit, Some(2));
    }

    #[tokio::test]
    async fn test_simple_channel_uses_sanitized_default_name() {
        let (registry, platform, provisioner) = setup();

        let channel = provisioner
            .provision(GUILD, &requester(2, "bob"), ProvisionRequest::Simple { name: None })
            .await
            .unwrap();

        assert_eq!(channel.name, "bobs Channel");
        assert_eq!(channel.user_limit, None);
        assert!(registry.is_owner(channel.channel_id, UserId::new(2)));
        assert!(platform
            .calls()
            .iter()
            .any(|c| matches!(c, Call::CreateCategory(name) if name == "Temporary Channels")));
    }

    #[tokio::test]
    async fn test_simple_channel_custom_name() {
        let (_registry, _platform, provisioner) = setup();

        let channel = provisioner
            .provision(
                GUILD,
                &requester(2, "bob"),
                ProvisionRequest::Simple {
                    name: Some("!!!".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(channel.name, "Temporary Channel");
    }

    #[tokio::test]
    async fn test_category_failure_creates_uncategorized_channel() {
        let (registry, platform, provisioner) = setup();
        platform.fail_category(PlatformError::PermissionDenied);

        let channel = provisioner
            .provision(GUILD, &requester(1, "U1"), gaming("Xbox", "Halo", None))
            .await
            .unwrap();

        let specs = created_specs(&platform);
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].category, None);
        assert_eq!(registry.lookup_owner(channel.channel_id), Some(UserId::new(1)));
    }

    #[tokio::test]
    async fn test_permission_denied_leaves_registry_untouched() {
        let (registry, platform, provisioner) = setup();
        platform.fail_create(PlatformError::PermissionDenied);

        let result = provisioner
            .provision(GUILD, &requester(1, "U1"), gaming("PC", "Dota2", None))
            .await;

        assert!(matches!(result, Err(Error::PermissionDenied(_))));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_other_failures_are_provision_failed() {
        let (registry, platform, provisioner) = setup();
        platform.fail_create(PlatformError::Other("rate limited".to_string()));

        let result = provisioner
            .provision(GUILD, &requester(1, "U1"), ProvisionRequest::Simple { name: None })
            .await;

        match result {
            Err(Error::ProvisionFailed(cause)) => {
                assert_eq!(cause, PlatformError::Other("rate limited".to_string()))
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(registry.is_empty());
    }
}
