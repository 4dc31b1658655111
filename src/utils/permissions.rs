use serenity::all::{
    ChannelId, GuildId, Member, PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId,
    UserId,
};

use crate::bot::error::Error;

/// Who is asking to create a channel, captured from the interaction
#[derive(Debug, Clone)]
pub struct Requester {
    pub user_id: UserId,
    pub display_name: String,
    /// Guild-level permissions resolved by Discord for this interaction
    pub permissions: Permissions,
    pub voice_channel: Option<ChannelId>,
}

impl Requester {
    /// Build from an interaction member; Discord fills in `permissions` for those
    pub fn from_member(member: &Member, voice_channel: Option<ChannelId>) -> Self {
        Self {
            user_id: member.user.id,
            display_name: member.display_name().to_string(),
            permissions: member.permissions.unwrap_or_else(Permissions::empty),
            voice_channel,
        }
    }
}

/// Elevated permissions granted to the owner of a temporary channel
pub fn owner_permissions() -> Permissions {
    Permissions::CONNECT
        | Permissions::SPEAK
        | Permissions::MANAGE_CHANNELS
        | Permissions::MOVE_MEMBERS
        | Permissions::MUTE_MEMBERS
        | Permissions::DEAFEN_MEMBERS
        | Permissions::PRIORITY_SPEAKER
}

pub fn owner_overwrite(user_id: UserId) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: owner_permissions(),
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Member(user_id),
    }
}

/// The @everyone role shares its id with the guild
pub fn everyone_overwrite(guild_id: GuildId) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: Permissions::CONNECT,
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Role(RoleId::new(guild_id.get())),
    }
}

pub fn ban_overwrite(user_id: UserId) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: Permissions::empty(),
        deny: Permissions::CONNECT,
        kind: PermissionOverwriteType::Member(user_id),
    }
}

/// Overwrite set applied to a freshly created temporary channel
pub fn temp_channel_overwrites(guild_id: GuildId, owner_id: UserId) -> Vec<PermissionOverwrite> {
    vec![everyone_overwrite(guild_id), owner_overwrite(owner_id)]
}

/// Check if a member may create temporary channels
///
/// Requires connect and speak, plus either an active voice connection or
/// Manage Channels.
pub fn can_provision(requester: &Requester) -> bool {
    let perms = requester.permissions;
    if perms.administrator() {
        return true;
    }
    let basics = perms.connect() && perms.speak();
    basics && (perms.manage_channels() || requester.voice_channel.is_some())
}

pub fn ensure_can_provision(requester: &Requester) -> Result<(), Error> {
    if can_provision(requester) {
        Ok(())
    } else {
        Err(Error::ProvisionNotAllowed)
    }
}
