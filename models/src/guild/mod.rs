mod types;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    channel::Channel,
    id::{ChannelId, GuildId, RoleId, UserId},
    permissions::Permissions,
    user::User,
};

pub use types::*;

/// A guild role.
///
/// Roles group members for display and carry the permission grants that feed
/// guild-wide permission resolution.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Role {
    pub id: RoleId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    pub name: String,
    pub color: u32,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub mentionable: bool,
    pub position: i64,
    pub permissions: Permissions,
}

impl Role {
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.name)
    }
}

/// A user's guild-scoped state: nickname, voice flags and held roles.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Member {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub deaf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
}

impl Member {
    /// The nickname if one is set, the account name otherwise.
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or(&self.user.name)
    }

    pub fn mention(&self) -> String {
        if self.nick.is_some() {
            format!("<@!{}>", self.user.id)
        } else {
            self.user.mention()
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GuildBan {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afk_channel_id: Option<ChannelId>,
    #[serde(default)]
    pub afk_timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_channel_id: Option<ChannelId>,
    #[serde(default)]
    pub verification_level: VerificationLevel,
    #[serde(default)]
    pub explicit_content_filter: ExplicitContentFilter,
    #[serde(default)]
    pub default_message_notifications: DefaultMessageNotifications,
    #[serde(default)]
    pub mfa_level: u8,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u64>,
    #[serde(default)]
    pub premium_tier: u8,
    #[serde(default)]
    pub premium_subscription_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_members: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vanity_url_code: Option<String>,
    #[serde(default)]
    pub unavailable: bool,
}

impl Guild {
    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    /// The implicit everyone role. Present on every well-formed guild since
    /// its id equals the guild id.
    pub fn everyone_role(&self) -> Option<&Role> {
        self.role(self.id.everyone_role())
    }

    pub fn member(&self, id: UserId) -> Option<&Member> {
        self.members.iter().find(|member| member.user.id == id)
    }

    pub fn is_owner(&self, id: UserId) -> bool {
        self.owner_id == id
    }

    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|icon| format!("https://cdn.discordapp.com/icons/{}/{icon}.webp", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::Guild;
    use crate::id::{RoleId, UserId};

    const GUILD: &str = r#"{
        "id": 100,
        "name": "testing grounds",
        "owner_id": 7,
        "roles": [
            {"id": 100, "name": "@everyone", "color": 0, "position": 0, "permissions": 1024},
            {"id": 101, "name": "mods", "color": 0, "position": 1, "permissions": 8192}
        ],
        "members": [
            {"user": {"id": 7, "username": "ava", "discriminator": "0001"}, "roles": [101]}
        ]
    }"#;

    #[test]
    fn everyone_role_has_guild_id() {
        let guild: Guild = serde_json::from_str(GUILD).unwrap();
        let everyone = guild.everyone_role().unwrap();
        assert_eq!(everyone.id, RoleId::new(100));
        assert_eq!(everyone.id, guild.id.everyone_role());
    }

    #[test]
    fn member_lookup_and_display_name() {
        let guild: Guild = serde_json::from_str(GUILD).unwrap();
        let member = guild.member(UserId::new(7)).unwrap();
        assert_eq!(member.display_name(), "ava");
        assert!(guild.is_owner(member.user.id));
    }
}
