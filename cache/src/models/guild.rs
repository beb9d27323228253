use accord_models::id::{GuildId, UserId};
use std::sync::{atomic::AtomicI64, Arc};

#[derive(Debug, Clone)]
pub struct CachedGuild {
    pub id: GuildId,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub owner_id: UserId,
    pub unavailable: bool,
    pub member_count: Arc<AtomicI64>,
}
