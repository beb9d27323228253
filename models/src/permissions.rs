use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Bitset of the capabilities a role or overwrite can grant.
    ///
    /// Values are immutable; union and removal always produce a fresh value.
    /// `Permissions::all()` doubles as the administrator/full-access value.
    pub struct Permissions: u64 {
        const CREATE_INVITE = 1;
        const KICK_MEMBERS = 1 << 1;
        const BAN_MEMBERS = 1 << 2;
        const ADMINISTRATOR = 1 << 3;
        const MANAGE_CHANNELS = 1 << 4;
        const MANAGE_GUILD = 1 << 5;
        const ADD_REACTIONS = 1 << 6;
        const VIEW_AUDIT_LOG = 1 << 7;
        const PRIORITY_SPEAKER = 1 << 8;
        const STREAM = 1 << 9;
        const VIEW_CHANNEL = 1 << 10;
        const SEND_MESSAGES = 1 << 11;
        const SEND_TTS_MESSAGES = 1 << 12;
        const MANAGE_MESSAGES = 1 << 13;
        const EMBED_LINKS = 1 << 14;
        const ATTACH_FILES = 1 << 15;
        const READ_MESSAGE_HISTORY = 1 << 16;
        const MENTION_EVERYONE = 1 << 17;
        const USE_EXTERNAL_EMOJIS = 1 << 18;
        const CONNECT = 1 << 20;
        const SPEAK = 1 << 21;
        const MUTE_MEMBERS = 1 << 22;
        const DEAFEN_MEMBERS = 1 << 23;
        const MOVE_MEMBERS = 1 << 24;
        const USE_VOICE_ACTIVITY = 1 << 25;
        const CHANGE_NICKNAME = 1 << 26;
        const MANAGE_NICKNAMES = 1 << 27;
        const MANAGE_ROLES = 1 << 28;
        const MANAGE_WEBHOOKS = 1 << 29;
        const MANAGE_EMOJIS = 1 << 30;
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u64::deserialize(deserializer)?))
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::Permissions;

    #[test]
    fn union_is_commutative() {
        let a = Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES;
        let b = Permissions::KICK_MEMBERS | Permissions::SEND_MESSAGES;
        assert_eq!(a | b, b | a);
    }

    #[test]
    fn removal_does_not_touch_other_bits() {
        let mut value = Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES;
        value.remove(Permissions::SEND_MESSAGES);
        assert!(value.contains(Permissions::VIEW_CHANNEL));
        assert!(!value.contains(Permissions::SEND_MESSAGES));
    }

    #[test]
    fn serde_round_trips_raw_bits() {
        let value = Permissions::VIEW_CHANNEL | Permissions::CONNECT;
        let raw = serde_json::to_string(&value).unwrap();
        assert_eq!(raw, value.bits().to_string());
        let back: Permissions = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn unknown_bits_are_truncated() {
        let back: Permissions = serde_json::from_str(&u64::MAX.to_string()).unwrap();
        assert_eq!(back, Permissions::all());
    }
}
