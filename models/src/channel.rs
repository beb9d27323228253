use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::num::NonZeroU64;

use crate::{
    id::{ChannelId, GuildId, MessageId, RoleId, UserId},
    permissions::Permissions,
    user::User,
};

#[derive(Clone, Copy, Debug, Deserialize_repr, Eq, Ord, PartialEq, PartialOrd, Serialize_repr)]
#[repr(u8)]
pub enum ChannelType {
    GuildText = 0,
    Private = 1,
    GuildVoice = 2,
    Group = 3,
    GuildCategory = 4,
    GuildNews = 5,
    GuildStore = 6,
}

/// The entity a channel overwrite applies to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PermissionOverwriteTarget {
    Role(RoleId),
    Member(UserId),
}

/// A per-entity allow/deny permission delta scoped to one channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PermissionOverwrite {
    pub kind: PermissionOverwriteTarget,
    pub allow: Permissions,
    pub deny: Permissions,
}

impl PermissionOverwrite {
    /// The overwrite's net effect applied to an empty value, deny first.
    pub fn compiled(&self) -> Permissions {
        let mut value = Permissions::empty();
        value.remove(self.deny);
        value.insert(self.allow);
        value
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
enum OverwriteTargetKind {
    Role,
    Member,
}

// Wire shape: the target id and a string discriminator live side by side.
#[derive(Deserialize, Serialize)]
struct OverwriteData {
    id: NonZeroU64,
    #[serde(rename = "type")]
    kind: OverwriteTargetKind,
    allow: Permissions,
    deny: Permissions,
}

impl<'de> Deserialize<'de> for PermissionOverwrite {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = OverwriteData::deserialize(deserializer)?;
        let kind = match data.kind {
            OverwriteTargetKind::Role => PermissionOverwriteTarget::Role(RoleId(data.id)),
            OverwriteTargetKind::Member => PermissionOverwriteTarget::Member(UserId(data.id)),
        };
        Ok(Self {
            kind,
            allow: data.allow,
            deny: data.deny,
        })
    }
}

impl Serialize for PermissionOverwrite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (id, kind) = match self.kind {
            PermissionOverwriteTarget::Role(id) => (id.0, OverwriteTargetKind::Role),
            PermissionOverwriteTarget::Member(id) => (id.0, OverwriteTargetKind::Member),
        };
        OverwriteData {
            id,
            kind,
            allow: self.allow,
            deny: self.deny,
        }
        .serialize(serializer)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Channel {
    pub id: ChannelId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_user: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ChannelId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<MessageId>,
    #[serde(default)]
    pub recipients: Vec<User>,
    #[serde(default)]
    pub permission_overwrites: Vec<PermissionOverwrite>,
}

impl Channel {
    pub fn is_guild(&self) -> bool {
        matches!(
            self.kind,
            ChannelType::GuildText
                | ChannelType::GuildVoice
                | ChannelType::GuildCategory
                | ChannelType::GuildNews
        )
    }

    /// Whether the channel is a direct or group message channel.
    pub fn is_private(&self) -> bool {
        matches!(self.kind, ChannelType::Private | ChannelType::Group)
    }

    pub fn is_voice(&self) -> bool {
        matches!(self.kind, ChannelType::GuildVoice | ChannelType::Group)
    }

    pub fn is_news(&self) -> bool {
        self.kind == ChannelType::GuildNews
    }

    pub fn is_nsfw(&self) -> bool {
        if self.kind != ChannelType::GuildText {
            return false;
        }
        self.nsfw
            || self
                .name
                .as_deref()
                .is_some_and(|name| name == "nsfw" || name.starts_with("nsfw-"))
    }

    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Channel, ChannelType, PermissionOverwrite, PermissionOverwriteTarget};
    use crate::{
        id::{RoleId, UserId},
        permissions::Permissions,
    };

    #[test]
    fn overwrite_wire_shape() {
        let raw = r#"{"id":3,"type":"role","allow":1024,"deny":2048}"#;
        let overwrite: PermissionOverwrite = serde_json::from_str(raw).unwrap();
        assert_eq!(
            overwrite.kind,
            PermissionOverwriteTarget::Role(RoleId::new(3))
        );
        assert_eq!(overwrite.allow, Permissions::VIEW_CHANNEL);
        assert_eq!(overwrite.deny, Permissions::SEND_MESSAGES);

        let raw = r#"{"id":7,"type":"member","allow":0,"deny":0}"#;
        let overwrite: PermissionOverwrite = serde_json::from_str(raw).unwrap();
        assert_eq!(
            overwrite.kind,
            PermissionOverwriteTarget::Member(UserId::new(7))
        );
    }

    #[test]
    fn nsfw_detection() {
        let mut channel: Channel =
            serde_json::from_str(r#"{"id":1,"type":0,"name":"general"}"#).unwrap();
        assert!(!channel.is_nsfw());
        channel.name = Some("nsfw-art".into());
        assert!(channel.is_nsfw());
        channel.name = Some("general".into());
        channel.nsfw = true;
        assert!(channel.is_nsfw());
        channel.kind = ChannelType::GuildVoice;
        assert!(!channel.is_nsfw());
    }
}
