use serde::{Deserialize, Serialize};

use crate::{
    channel::Channel,
    guild::{Guild, Member, Role},
    id::{GuildId, RoleId},
    message::Message,
    user::User,
};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Ready {
    pub user: User,
    #[serde(default)]
    pub guilds: Vec<UnavailableGuild>,
    pub session_id: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UnavailableGuild {
    pub id: GuildId,
    #[serde(default)]
    pub unavailable: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GuildCreate(pub Guild);

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GuildUpdate(pub Guild);

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GuildDelete {
    pub id: GuildId,
    #[serde(default)]
    pub unavailable: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ChannelCreate(pub Channel);

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ChannelUpdate(pub Channel);

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ChannelDelete(pub Channel);

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoleCreate {
    pub guild_id: GuildId,
    pub role: Role,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoleUpdate {
    pub guild_id: GuildId,
    pub role: Role,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoleDelete {
    pub guild_id: GuildId,
    pub role_id: RoleId,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemberAdd {
    pub guild_id: GuildId,
    #[serde(flatten)]
    pub member: Member,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemberUpdate {
    pub guild_id: GuildId,
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemberRemove {
    pub guild_id: GuildId,
    pub user: User,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MessageCreate(pub Message);

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UserUpdate(pub User);

/// A gateway dispatch relevant to the snapshot layer. The transport that
/// produces these is an external collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Ready(Box<Ready>),
    GuildCreate(Box<GuildCreate>),
    GuildUpdate(Box<GuildUpdate>),
    GuildDelete(GuildDelete),
    ChannelCreate(ChannelCreate),
    ChannelUpdate(ChannelUpdate),
    ChannelDelete(ChannelDelete),
    RoleCreate(RoleCreate),
    RoleUpdate(RoleUpdate),
    RoleDelete(RoleDelete),
    MemberAdd(Box<MemberAdd>),
    MemberUpdate(Box<MemberUpdate>),
    MemberRemove(MemberRemove),
    MessageCreate(Box<MessageCreate>),
    UserUpdate(UserUpdate),
}
