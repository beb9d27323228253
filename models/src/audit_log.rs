use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::HashMap, num::NonZeroU64};

use crate::id::{AuditLogEntryId, GuildId, UserId};

/// The moderation action an audit-log entry records.
///
/// Wire values the library does not recognize deserialize to
/// [`AuditLogAction::Unknown`] rather than failing; newer platform actions
/// must never make existing logs unreadable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuditLogAction {
    GuildUpdate,
    ChannelCreate,
    ChannelUpdate,
    ChannelDelete,
    ChannelOverwriteCreate,
    ChannelOverwriteUpdate,
    ChannelOverwriteDelete,
    MemberKick,
    MemberPrune,
    MemberBanAdd,
    MemberBanRemove,
    MemberUpdate,
    MemberRoleUpdate,
    RoleCreate,
    RoleUpdate,
    RoleDelete,
    InviteCreate,
    InviteUpdate,
    InviteDelete,
    WebhookCreate,
    WebhookUpdate,
    WebhookDelete,
    EmojiCreate,
    EmojiUpdate,
    EmojiDelete,
    MessageDelete,
    Unknown(u8),
}

/// The class of entity an audit-log action targets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TargetKind {
    Guild,
    Channel,
    Member,
    Role,
    Invite,
    Webhook,
    Emoji,
    Message,
    Unknown,
}

impl AuditLogAction {
    pub const fn value(self) -> u8 {
        match self {
            AuditLogAction::GuildUpdate => 1,
            AuditLogAction::ChannelCreate => 10,
            AuditLogAction::ChannelUpdate => 11,
            AuditLogAction::ChannelDelete => 12,
            AuditLogAction::ChannelOverwriteCreate => 13,
            AuditLogAction::ChannelOverwriteUpdate => 14,
            AuditLogAction::ChannelOverwriteDelete => 15,
            AuditLogAction::MemberKick => 20,
            AuditLogAction::MemberPrune => 21,
            AuditLogAction::MemberBanAdd => 22,
            AuditLogAction::MemberBanRemove => 23,
            AuditLogAction::MemberUpdate => 24,
            AuditLogAction::MemberRoleUpdate => 25,
            AuditLogAction::RoleCreate => 30,
            AuditLogAction::RoleUpdate => 31,
            AuditLogAction::RoleDelete => 32,
            AuditLogAction::InviteCreate => 40,
            AuditLogAction::InviteUpdate => 41,
            AuditLogAction::InviteDelete => 42,
            AuditLogAction::WebhookCreate => 50,
            AuditLogAction::WebhookUpdate => 51,
            AuditLogAction::WebhookDelete => 52,
            AuditLogAction::EmojiCreate => 60,
            AuditLogAction::EmojiUpdate => 61,
            AuditLogAction::EmojiDelete => 62,
            AuditLogAction::MessageDelete => 72,
            AuditLogAction::Unknown(raw) => raw,
        }
    }

    pub const fn from_value(raw: u8) -> Self {
        match raw {
            1 => AuditLogAction::GuildUpdate,
            10 => AuditLogAction::ChannelCreate,
            11 => AuditLogAction::ChannelUpdate,
            12 => AuditLogAction::ChannelDelete,
            13 => AuditLogAction::ChannelOverwriteCreate,
            14 => AuditLogAction::ChannelOverwriteUpdate,
            15 => AuditLogAction::ChannelOverwriteDelete,
            20 => AuditLogAction::MemberKick,
            21 => AuditLogAction::MemberPrune,
            22 => AuditLogAction::MemberBanAdd,
            23 => AuditLogAction::MemberBanRemove,
            24 => AuditLogAction::MemberUpdate,
            25 => AuditLogAction::MemberRoleUpdate,
            30 => AuditLogAction::RoleCreate,
            31 => AuditLogAction::RoleUpdate,
            32 => AuditLogAction::RoleDelete,
            40 => AuditLogAction::InviteCreate,
            41 => AuditLogAction::InviteUpdate,
            42 => AuditLogAction::InviteDelete,
            50 => AuditLogAction::WebhookCreate,
            51 => AuditLogAction::WebhookUpdate,
            52 => AuditLogAction::WebhookDelete,
            60 => AuditLogAction::EmojiCreate,
            61 => AuditLogAction::EmojiUpdate,
            62 => AuditLogAction::EmojiDelete,
            72 => AuditLogAction::MessageDelete,
            raw => AuditLogAction::Unknown(raw),
        }
    }

    pub const fn target_kind(self) -> TargetKind {
        match self {
            AuditLogAction::GuildUpdate => TargetKind::Guild,
            AuditLogAction::ChannelCreate
            | AuditLogAction::ChannelUpdate
            | AuditLogAction::ChannelDelete
            | AuditLogAction::ChannelOverwriteCreate
            | AuditLogAction::ChannelOverwriteUpdate
            | AuditLogAction::ChannelOverwriteDelete => TargetKind::Channel,
            AuditLogAction::MemberKick
            | AuditLogAction::MemberPrune
            | AuditLogAction::MemberBanAdd
            | AuditLogAction::MemberBanRemove
            | AuditLogAction::MemberUpdate
            | AuditLogAction::MemberRoleUpdate => TargetKind::Member,
            AuditLogAction::RoleCreate
            | AuditLogAction::RoleUpdate
            | AuditLogAction::RoleDelete => TargetKind::Role,
            AuditLogAction::InviteCreate
            | AuditLogAction::InviteUpdate
            | AuditLogAction::InviteDelete => TargetKind::Invite,
            AuditLogAction::WebhookCreate
            | AuditLogAction::WebhookUpdate
            | AuditLogAction::WebhookDelete => TargetKind::Webhook,
            AuditLogAction::EmojiCreate
            | AuditLogAction::EmojiUpdate
            | AuditLogAction::EmojiDelete => TargetKind::Emoji,
            AuditLogAction::MessageDelete => TargetKind::Message,
            AuditLogAction::Unknown(_) => TargetKind::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for AuditLogAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(u8::deserialize(deserializer)?))
    }
}

impl Serialize for AuditLogAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AuditLogChange {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AuditLogEntry {
    pub id: AuditLogEntryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// The acted-upon entity's id, interpreted per [`AuditLogAction::target_kind`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<NonZeroU64>,
    #[serde(rename = "action_type")]
    pub action: AuditLogAction,
    #[serde(default)]
    pub changes: Vec<AuditLogChange>,
    #[serde(default)]
    pub options: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{AuditLogAction, AuditLogEntry, TargetKind};

    #[test]
    fn unrecognized_action_is_preserved() {
        let entry: AuditLogEntry =
            serde_json::from_str(r#"{"id":9,"action_type":83}"#).unwrap();
        assert_eq!(entry.action, AuditLogAction::Unknown(83));
        assert_eq!(entry.action.target_kind(), TargetKind::Unknown);
        let raw = serde_json::to_string(&entry).unwrap();
        assert!(raw.contains("\"action_type\":83"));
    }

    #[test]
    fn action_values_round_trip() {
        for raw in 0..=u8::MAX {
            assert_eq!(AuditLogAction::from_value(raw).value(), raw);
        }
    }

    #[test]
    fn action_grouping() {
        assert_eq!(
            AuditLogAction::MemberBanAdd.target_kind(),
            TargetKind::Member
        );
        assert_eq!(
            AuditLogAction::ChannelOverwriteDelete.target_kind(),
            TargetKind::Channel
        );
        assert_eq!(AuditLogAction::RoleDelete.target_kind(), TargetKind::Role);
    }
}
