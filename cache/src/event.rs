use accord_models::gateway::{
    ChannelCreate, ChannelDelete, ChannelUpdate, Event, GuildCreate, GuildDelete, GuildUpdate,
    MemberAdd, MemberRemove, MemberUpdate, MessageCreate, Ready, RoleCreate, RoleDelete,
    RoleUpdate, UserUpdate,
};
use std::sync::{atomic::Ordering, Arc};
use tracing::debug;

use super::{Cache, CacheError, CachedMember};

pub trait UpdateCache {
    fn update(&self, cache: &Cache) -> Result<(), CacheError>;
}

impl UpdateCache for Event {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        use Event::{
            ChannelCreate, ChannelDelete, ChannelUpdate, GuildCreate, GuildDelete, GuildUpdate,
            MemberAdd, MemberRemove, MemberUpdate, MessageCreate, Ready, RoleCreate, RoleDelete,
            RoleUpdate, UserUpdate,
        };

        match self {
            ChannelCreate(v) => c.update(v),
            ChannelDelete(v) => c.update(v),
            ChannelUpdate(v) => c.update(v),
            GuildCreate(v) => c.update(v.as_ref()),
            GuildDelete(v) => c.update(v),
            GuildUpdate(v) => c.update(v.as_ref()),
            MemberAdd(v) => c.update(v.as_ref()),
            MemberRemove(v) => c.update(v),
            MemberUpdate(v) => c.update(v.as_ref()),
            MessageCreate(v) => c.update(v.as_ref()),
            Ready(v) => c.update(v.as_ref()),
            RoleCreate(v) => c.update(v),
            RoleDelete(v) => c.update(v),
            RoleUpdate(v) => c.update(v),
            UserUpdate(v) => c.update(v),
        }
    }
}

impl UpdateCache for ChannelCreate {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        if let Some(guild_id) = self.0.guild_id {
            c.cache_guild_channel(guild_id, self.0.clone());
            c.cache_channel_permissions(self.0.id);
        }

        Ok(())
    }
}

impl UpdateCache for ChannelDelete {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        if self.0.guild_id.is_some() {
            c.delete_guild_channel(self.0.id);
            c.0.channel_permissions.remove(&self.0.id);
        }
        Ok(())
    }
}

impl UpdateCache for ChannelUpdate {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        if let Some(guild_id) = self.0.guild_id {
            c.cache_guild_channel(guild_id, self.0.clone());
            c.cache_channel_permissions(self.0.id);
        }

        Ok(())
    }
}

impl UpdateCache for GuildCreate {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        c.cache_guild(self.0.clone());
        let guild_id = self.0.id;
        c.cache_guild_permissions(guild_id);
        for channel in c.guild_channels(guild_id) {
            c.cache_channel_permissions(channel);
        }
        Ok(())
    }
}

impl UpdateCache for GuildDelete {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        let guild_id = self.id;
        c.0.guilds.remove(&guild_id);
        c.0.guild_permissions.remove(&guild_id);
        if let Some((_, ids)) = c.0.guild_channels.remove(&guild_id) {
            for id in ids {
                c.0.channels.remove(&id);
                c.0.channel_permissions.remove(&id);
            }
        }
        if let Some((_, ids)) = c.0.guild_roles.remove(&guild_id) {
            for id in ids {
                c.0.roles.remove(&id);
            }
        }
        if let Some((_, ids)) = c.0.guild_members.remove(&guild_id) {
            for id in ids {
                c.0.members.remove(&(guild_id, id));
            }
        }

        if self.unavailable {
            c.unavailable_guild(guild_id);
        }

        Ok(())
    }
}

impl UpdateCache for GuildUpdate {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        debug!(id = ?self.0.id, "received guild update");

        let mut owner_changed = false;
        if let Some(mut guild) = c.0.guilds.get_mut(&self.0.id) {
            let guild = Arc::make_mut(&mut guild);
            owner_changed = guild.owner_id != self.0.owner_id;
            guild.name = self.0.name.clone();
            guild.icon = self.0.icon.clone();
            guild.description = self.0.description.clone();
            guild.owner_id = self.0.owner_id;
            guild.unavailable = self.0.unavailable;
        }

        // The owner short-circuit feeds the precomputed permissions, so an
        // ownership transfer invalidates them like role churn does.
        if owner_changed {
            c.cache_guild_permissions(self.0.id);
            for channel in c.guild_channels(self.0.id) {
                c.cache_channel_permissions(channel);
            }
        }

        Ok(())
    }
}

impl UpdateCache for MemberAdd {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        c.cache_member(self.guild_id, self.member.clone());
        if let Some(guild) = c.guild(self.guild_id) {
            guild.member_count.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

impl UpdateCache for MemberRemove {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        let guild_id = self.guild_id;
        c.0.members.remove(&(guild_id, self.user.id));
        if let Some(mut members) = c.0.guild_members.get_mut(&guild_id) {
            members.remove(&self.user.id);
        }
        if let Some(guild) = c.guild(guild_id) {
            guild.member_count.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

impl UpdateCache for MemberUpdate {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        debug!(id = ?self.user.id, "received member update");
        let guild_id = self.guild_id;
        {
            if let Some(mut member) = c.0.members.get_mut(&(guild_id, self.user.id)) {
                let member = Arc::make_mut(&mut member);

                member.nick = self.nick.clone();
                member.roles = self.roles.clone();
            }
        }

        if let Some(current_user) = c.current_user() {
            if self.user.id == current_user.id {
                c.cache_guild_permissions(guild_id);
                let channels = c.guild_channels(guild_id);
                for channel in channels {
                    c.cache_channel_permissions(channel);
                }
            }
        }

        Ok(())
    }
}

impl UpdateCache for MessageCreate {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        let user = c.cache_user(self.0.author.clone());

        if let (Some(member), Some(guild_id)) = (&self.0.member, self.0.guild_id) {
            let id = (guild_id, user.id);
            match c.0.members.get(&id) {
                Some(m) if **m == *member => return Ok(()),
                _ => {}
            }

            c.0.guild_members
                .entry(guild_id)
                .or_default()
                .insert(user.id);

            let cached = Arc::new(CachedMember {
                nick: member.nick.clone(),
                roles: member.roles.clone(),
                user,
            });
            c.0.members.insert(id, Arc::clone(&cached));
        }

        Ok(())
    }
}

impl UpdateCache for Ready {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        c.cache_current_user(self.user.clone());

        for ug in &self.guilds {
            c.unavailable_guild(ug.id);
        }

        Ok(())
    }
}

impl UpdateCache for RoleCreate {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        c.cache_role(self.guild_id, self.role.clone());
        Ok(())
    }
}

impl UpdateCache for RoleDelete {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        let guild_id = self.guild_id;
        c.delete_role(self.role_id);
        c.cache_guild_permissions(guild_id);
        let channels = c.guild_channels(guild_id);
        for channel in channels {
            c.cache_channel_permissions(channel);
        }
        Ok(())
    }
}

impl UpdateCache for RoleUpdate {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        let guild_id = self.guild_id;
        c.cache_role(guild_id, self.role.clone());
        c.cache_guild_permissions(guild_id);
        let channels = c.guild_channels(guild_id);
        for channel in channels {
            c.cache_channel_permissions(channel);
        }
        Ok(())
    }
}

impl UpdateCache for UserUpdate {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        c.cache_current_user(self.0.clone());
        Ok(())
    }
}
