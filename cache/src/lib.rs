#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_wrap,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::implicit_hasher,
    clippy::missing_panics_doc
)]

mod error;
mod event;
mod models;

use accord_models::{
    audit_log::{AuditLogEntry, TargetKind},
    channel::{Channel, PermissionOverwriteTarget},
    guild::{Guild, Member, Role},
    id::{ChannelId, GuildId, RoleId, UserId},
    permissions::Permissions,
    user::User,
};
use dashmap::{mapref::entry::Entry, DashMap, DashSet};
use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc, Mutex,
    },
};

pub use error::{CacheError, ResolutionError};
pub use event::UpdateCache;
pub use models::{
    channel::CachedChannel, guild::CachedGuild, member::CachedMember, role::CachedRole,
};

/// Add an element to the structure that maps guild ids to the set of the resource they hold
fn upsert_guild_item<K: Eq + Hash, V: Eq + Hash>(map: &DashMap<K, HashSet<V>>, k: K, v: V) {
    match map.entry(k) {
        Entry::Occupied(e) if e.get().contains(&v) => {}
        Entry::Occupied(mut e) => {
            e.get_mut().insert(v);
        }
        Entry::Vacant(_) => {}
    }
}

/// Add or modify an element that maps resource ids to their respective structures
fn upsert_item<K: Eq + Hash, V: PartialEq>(map: &DashMap<K, Arc<V>>, k: K, v: V) -> Arc<V> {
    match map.entry(k) {
        Entry::Occupied(e) if **e.get() == v => Arc::clone(e.get()),
        Entry::Occupied(mut e) => {
            let v = Arc::new(v);
            e.insert(Arc::clone(&v));
            v
        }
        Entry::Vacant(e) => {
            let v = Arc::new(v);
            e.insert(Arc::clone(&v));
            v
        }
    }
}

struct CacheRef {
    channels: DashMap<ChannelId, Arc<CachedChannel>>,
    guilds: DashMap<GuildId, Arc<CachedGuild>>,
    members: DashMap<(GuildId, UserId), Arc<CachedMember>>,
    roles: DashMap<RoleId, Arc<CachedRole>>,
    users: DashMap<UserId, Arc<User>>,

    guild_roles: DashMap<GuildId, HashSet<RoleId>>,
    guild_channels: DashMap<GuildId, HashSet<ChannelId>>,
    guild_members: DashMap<GuildId, HashSet<UserId>>,
    unavailable_guilds: DashSet<GuildId>,

    current_user: Mutex<Option<Arc<User>>>,

    guild_permissions: DashMap<GuildId, Permissions>,
    channel_permissions: DashMap<ChannelId, Permissions>,
}

/// A wrapper around the actual structure that holds all the cache fields allowing this to be sent across multiple threads
#[derive(Clone)]
pub struct Cache(Arc<CacheRef>);

/// The entity an audit-log entry acted upon, resolved against the snapshot.
///
/// Entries whose action the library does not classify, or whose target has
/// left the snapshot, resolve to `Unknown` rather than an error.
#[derive(Clone, Debug)]
pub enum AuditLogTarget {
    Guild(Arc<CachedGuild>),
    Channel(Arc<CachedChannel>),
    Role(Arc<CachedRole>),
    User(Arc<User>),
    Unknown,
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(CacheRef {
            channels: DashMap::new(),
            guilds: DashMap::new(),
            members: DashMap::new(),
            roles: DashMap::new(),
            users: DashMap::new(),
            guild_roles: DashMap::new(),
            guild_channels: DashMap::new(),
            guild_members: DashMap::new(),
            unavailable_guilds: DashSet::new(),
            current_user: Mutex::new(None),
            guild_permissions: DashMap::new(),
            channel_permissions: DashMap::new(),
        }))
    }

    /// Returns the user the library is operating as
    pub fn current_user(&self) -> Option<Arc<User>> {
        self.0
            .current_user
            .lock()
            .expect("current user poisoned")
            .clone()
    }

    /// Get an immutable reference to a channel
    pub fn channel(&self, channel_id: ChannelId) -> Option<Arc<CachedChannel>> {
        self.0
            .channels
            .get(&channel_id)
            .map(|c| Arc::clone(c.value()))
    }

    /// Get a cloned list of the channel ids of a particular guild
    pub fn guild_channels(&self, guild_id: GuildId) -> HashSet<ChannelId> {
        self.0
            .guild_channels
            .get(&guild_id)
            .map_or_else(HashSet::new, |gc| gc.value().clone())
    }

    /// Get the precomputed permissions of the current user in a certain channel
    pub fn channel_permissions(&self, channel_id: ChannelId) -> Option<Permissions> {
        self.0
            .channel_permissions
            .get(&channel_id)
            .map(|c| *c.value())
    }

    /// Get the precomputed guild-wide permissions of the current user
    pub fn guild_permissions(&self, guild_id: GuildId) -> Option<Permissions> {
        self.0.guild_permissions.get(&guild_id).map(|g| *g.value())
    }

    /// Get an immutable reference to the guild struct
    pub fn guild(&self, guild_id: GuildId) -> Option<Arc<CachedGuild>> {
        self.0.guilds.get(&guild_id).map(|g| Arc::clone(g.value()))
    }

    /// Get a list of all guild ids inside the cache
    pub fn guilds(&self) -> Vec<u64> {
        self.0.guilds.iter().map(|g| g.id.get()).collect::<Vec<_>>()
    }

    /// Get an immutable reference to a certain user in a certain guild
    pub fn member(&self, guild_id: GuildId, user_id: UserId) -> Option<Arc<CachedMember>> {
        self.0
            .members
            .get(&(guild_id, user_id))
            .map(|m| Arc::clone(m.value()))
    }

    /// Get a list of all member ids inside a guild
    pub fn members(&self, guild_id: GuildId) -> HashSet<UserId> {
        self.0
            .guild_members
            .get(&guild_id)
            .map_or_else(HashSet::new, |g| g.value().clone())
    }

    /// Get the membercount of a guild. Returns 0 if the guild is not present inside the cache
    pub fn member_count(&self, guild_id: GuildId) -> i64 {
        self.0
            .guilds
            .get(&guild_id)
            .map_or(0, |g| g.member_count.load(Ordering::SeqCst))
    }

    /// Get an immutable reference of a certain role
    pub fn role(&self, role_id: RoleId) -> Option<Arc<CachedRole>> {
        self.0.roles.get(&role_id).map(|r| Arc::clone(r.value()))
    }

    /// Get a list of all role ids inside a guild
    pub fn roles(&self, guild_id: GuildId) -> HashSet<RoleId> {
        self.0
            .guild_roles
            .get(&guild_id)
            .map_or_else(HashSet::new, |gr| gr.value().clone())
    }

    /// Get a list of all role structs inside a guild
    pub fn guild_roles(&self, guild_id: GuildId) -> Vec<Arc<CachedRole>> {
        let roles = self.roles(guild_id);
        let mut guild_roles = Vec::new();
        for role_id in roles {
            if let Some(role) = self.role(role_id) {
                guild_roles.push(role);
            }
        }
        guild_roles
    }

    /// Get an immutable reference to a certain user
    pub fn user(&self, user_id: UserId) -> Option<Arc<User>> {
        self.0.users.get(&user_id).map(|u| Arc::clone(u.value()))
    }

    /// Update a resource inside the cache
    pub fn update<T: UpdateCache>(&self, value: &T) -> Result<(), CacheError> {
        value.update(self)
    }

    /// Resolve the guild-wide permissions of a member from the snapshot
    pub fn resolve_guild_permissions(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Permissions, CacheError> {
        let guild = self
            .guild(guild_id)
            .ok_or(ResolutionError::GuildMissing(guild_id))?;
        let member = self
            .member(guild_id, user_id)
            .ok_or(ResolutionError::MemberMissing(guild_id, user_id))?;
        let roles = self.role_map(guild_id);
        Ok(guild_wide_permissions(
            &guild,
            &roles,
            user_id,
            &member.roles,
        )?)
    }

    /// Resolve the permissions of a member in a channel, overwrites applied
    pub fn resolve_channel_permissions(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Result<Permissions, CacheError> {
        let channel = self
            .channel(channel_id)
            .ok_or(ResolutionError::ChannelMissing(channel_id))?;
        let Some(guild_id) = channel.guild_id else {
            return Ok(Permissions::all());
        };
        let guild = self
            .guild(guild_id)
            .ok_or(ResolutionError::GuildMissing(guild_id))?;
        let member = self
            .member(guild_id, user_id)
            .ok_or(ResolutionError::MemberMissing(guild_id, user_id))?;
        let roles = self.role_map(guild_id);
        Ok(channel_permissions(
            &guild,
            &roles,
            user_id,
            &member.roles,
            &channel,
        )?)
    }

    /// Resolve the entity an audit-log entry acted upon
    pub fn audit_log_target(&self, entry: &AuditLogEntry) -> AuditLogTarget {
        let Some(target_id) = entry.target_id else {
            return AuditLogTarget::Unknown;
        };

        match entry.action.target_kind() {
            TargetKind::Guild => entry
                .guild_id
                .and_then(|id| self.guild(id))
                .map_or(AuditLogTarget::Unknown, AuditLogTarget::Guild),
            TargetKind::Channel => self
                .channel(ChannelId(target_id))
                .map_or(AuditLogTarget::Unknown, AuditLogTarget::Channel),
            TargetKind::Member => self
                .user(UserId(target_id))
                .map_or(AuditLogTarget::Unknown, AuditLogTarget::User),
            TargetKind::Role => self
                .role(RoleId(target_id))
                .map_or(AuditLogTarget::Unknown, AuditLogTarget::Role),
            _ => AuditLogTarget::Unknown,
        }
    }

    fn role_map(&self, guild_id: GuildId) -> HashMap<RoleId, Arc<CachedRole>> {
        self.guild_roles(guild_id)
            .into_iter()
            .map(|r| (r.id, r))
            .collect()
    }

    fn cache_current_user(&self, mut current_user: User) {
        let mut user = self.0.current_user.lock().expect("current user poisoned");
        if let Some(user) = user.as_mut() {
            if let Some(user) = Arc::get_mut(user) {
                std::mem::swap(user, &mut current_user);
                return;
            }
        }

        *user = Some(Arc::new(current_user));
    }

    fn cache_guild_channels(
        &self,
        guild: GuildId,
        channels: impl IntoIterator<Item = Channel>,
    ) -> HashSet<ChannelId> {
        let mut c = HashSet::new();
        for channel in channels {
            let id = channel.id;
            self.cache_guild_channel(guild, channel);
            c.insert(id);
        }
        c
    }

    fn cache_guild_channel(&self, guild: GuildId, channel: Channel) -> Arc<CachedChannel> {
        let cached = CachedChannel {
            id: channel.id,
            guild_id: channel.guild_id.or(Some(guild)),
            name: channel.name,
            kind: channel.kind,
            position: channel.position,
            parent_id: channel.parent_id,
            permission_overwrites: channel.permission_overwrites,
        };
        upsert_guild_item(&self.0.guild_channels, guild, cached.id);
        upsert_item(&self.0.channels, cached.id, cached)
    }

    fn cache_members(
        &self,
        guild: GuildId,
        members: impl IntoIterator<Item = Member>,
    ) -> HashSet<UserId> {
        let mut m = HashSet::new();
        for member in members {
            let id = member.user.id;
            self.cache_member(guild, member);
            m.insert(id);
        }
        m
    }

    pub fn cache_member(&self, guild: GuildId, member: Member) -> Arc<CachedMember> {
        let key = (guild, member.user.id);
        match self.0.members.get(&key) {
            Some(m) if **m == member => return Arc::clone(&m),
            _ => {}
        }

        let user = self.cache_user(member.user);
        let cached = Arc::new(CachedMember {
            roles: member.roles,
            nick: member.nick,
            user,
        });
        upsert_guild_item(&self.0.guild_members, guild, cached.user.id);
        self.0.members.insert(key, Arc::clone(&cached));
        cached
    }

    fn cache_roles(
        &self,
        guild: GuildId,
        roles: impl IntoIterator<Item = Role>,
    ) -> HashSet<RoleId> {
        let mut r = HashSet::new();
        for role in roles {
            let id = role.id;
            self.cache_role(guild, role);
            r.insert(id);
        }
        r
    }

    fn cache_role(&self, guild: GuildId, role: Role) -> Arc<CachedRole> {
        let role = CachedRole {
            id: role.id,
            guild_id: guild,
            name: role.name,
            position: role.position,
            permissions: role.permissions,
        };
        upsert_guild_item(&self.0.guild_roles, guild, role.id);
        upsert_item(&self.0.roles, role.id, role)
    }

    fn cache_guild_permissions(&self, guild_id: GuildId) {
        let Some(user) = self.current_user() else {
            return;
        };
        match self.resolve_guild_permissions(guild_id, user.id) {
            Ok(permissions) => {
                self.0.guild_permissions.insert(guild_id, permissions);
            }
            Err(why) => {
                tracing::error!(guild = ?guild_id, reason = ?why);
            }
        }
    }

    fn cache_channel_permissions(&self, channel_id: ChannelId) {
        let Some(user) = self.current_user() else {
            return;
        };
        match self.resolve_channel_permissions(channel_id, user.id) {
            Ok(permissions) => {
                self.0.channel_permissions.insert(channel_id, permissions);
            }
            Err(why) => {
                tracing::error!(channel = ?channel_id, reason = ?why);
            }
        }
    }

    fn cache_guild(&self, guild: Guild) -> Option<Arc<CachedGuild>> {
        let guild_id = guild.id;
        self.0.guild_roles.insert(guild_id, HashSet::new());
        self.0.guild_channels.insert(guild_id, HashSet::new());
        if !self.0.guild_members.contains_key(&guild_id) {
            self.0.guild_members.insert(guild_id, HashSet::new());
        }

        self.cache_guild_channels(guild_id, guild.channels);
        self.cache_roles(guild_id, guild.roles);
        self.cache_members(guild_id, guild.members);

        let cached = CachedGuild {
            id: guild_id,
            name: guild.name,
            icon: guild.icon,
            description: guild.description,
            owner_id: guild.owner_id,
            unavailable: guild.unavailable,
            member_count: Arc::new(AtomicI64::new(
                guild.member_count.unwrap_or_default() as i64
            )),
        };

        self.0.unavailable_guilds.remove(&guild_id);
        self.0.guilds.insert(guild_id, Arc::new(cached))
    }

    fn cache_user(&self, user: User) -> Arc<User> {
        match self.0.users.get(&user.id) {
            Some(u) if **u == user => return Arc::clone(&u),
            _ => {}
        }

        let user = Arc::new(user);
        self.0.users.insert(user.id, Arc::clone(&user));
        user
    }

    fn delete_guild_channel(&self, channel_id: ChannelId) -> Option<Arc<CachedChannel>> {
        let channel = self.0.channels.remove(&channel_id).map(|(_, c)| c)?;
        if let Some(guild_id) = channel.guild_id {
            if let Some(mut channels) = self.0.guild_channels.get_mut(&guild_id) {
                channels.remove(&channel_id);
            }
        }
        Some(channel)
    }

    fn delete_role(&self, role_id: RoleId) -> Option<Arc<CachedRole>> {
        let role = self.0.roles.remove(&role_id).map(|(_, r)| r)?;
        if let Some(mut roles) = self.0.guild_roles.get_mut(&role.guild_id) {
            roles.remove(&role_id);
        }
        Some(role)
    }

    fn unavailable_guild(&self, guild_id: GuildId) {
        self.0.unavailable_guilds.insert(guild_id);
    }
}

/// Compute the guild-wide permissions of a member from a role snapshot.
///
/// The guild owner short-circuits to the full value. Everyone else starts
/// from the everyone role and unions in each held role; union is commutative,
/// so the iteration order of `member_roles` never changes the result.
pub fn guild_wide_permissions(
    guild: &CachedGuild,
    roles: &HashMap<RoleId, Arc<CachedRole>>,
    member_id: UserId,
    member_roles: &[RoleId],
) -> Result<Permissions, ResolutionError> {
    if member_id == guild.owner_id {
        return Ok(Permissions::all());
    }

    let everyone = guild.id.everyone_role();
    let mut permissions = match roles.get(&everyone) {
        Some(r) => r.permissions,
        None => return Err(ResolutionError::EveryoneRoleMissing(guild.id)),
    };

    for role in member_roles {
        let role_permissions = match roles.get(role) {
            Some(r) => r.permissions,
            None => return Err(ResolutionError::RoleMissing(*role)),
        };

        permissions |= role_permissions;
    }
    Ok(permissions)
}

/// Compute the permissions of a member in a channel.
///
/// Channels without a guild association grant everything. Guild channels
/// layer overwrites over the guild-wide base in three strictly ordered steps:
/// the everyone overwrite, then every overwrite of a role the member holds,
/// then the member's own overwrite. Within a step deny is cleared before
/// allow is added, so an entity's own allow wins over its own deny.
pub fn channel_permissions(
    guild: &CachedGuild,
    roles: &HashMap<RoleId, Arc<CachedRole>>,
    member_id: UserId,
    member_roles: &[RoleId],
    channel: &CachedChannel,
) -> Result<Permissions, ResolutionError> {
    if channel.guild_id.is_none() {
        return Ok(Permissions::all());
    }

    let mut permissions = guild_wide_permissions(guild, roles, member_id, member_roles)?;

    let everyone = guild.id.everyone_role();
    let mut everyone_allow = Permissions::empty();
    let mut everyone_deny = Permissions::empty();
    let mut roles_allow = Permissions::empty();
    let mut roles_deny = Permissions::empty();
    let mut member_allow = Permissions::empty();
    let mut member_deny = Permissions::empty();

    for overwrite in &channel.permission_overwrites {
        match overwrite.kind {
            PermissionOverwriteTarget::Role(role) if role == everyone => {
                everyone_allow.insert(overwrite.allow);
                everyone_deny.insert(overwrite.deny);
            }
            PermissionOverwriteTarget::Role(role) => {
                if !member_roles.contains(&role) {
                    continue;
                }

                roles_allow.insert(overwrite.allow);
                roles_deny.insert(overwrite.deny);
            }
            PermissionOverwriteTarget::Member(user) if user == member_id => {
                member_allow.insert(overwrite.allow);
                member_deny.insert(overwrite.deny);
            }
            PermissionOverwriteTarget::Member(_) => {}
        }
    }

    permissions.remove(everyone_deny);
    permissions.insert(everyone_allow);
    permissions.remove(roles_deny);
    permissions.insert(roles_allow);
    permissions.remove(member_deny);
    permissions.insert(member_allow);

    Ok(permissions)
}
