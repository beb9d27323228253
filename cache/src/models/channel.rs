use accord_models::{
    channel::{ChannelType, PermissionOverwrite},
    id::{ChannelId, GuildId},
};

#[derive(Debug, Clone, PartialEq)]
pub struct CachedChannel {
    pub id: ChannelId,
    pub guild_id: Option<GuildId>,
    pub name: Option<String>,
    pub kind: ChannelType,
    pub position: Option<i64>,
    pub parent_id: Option<ChannelId>,
    pub permission_overwrites: Vec<PermissionOverwrite>,
}
