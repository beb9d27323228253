use accord_models::id::{ChannelId, GuildId, RoleId, UserId};
use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// A referenced entity is absent from the local snapshot.
///
/// Resolution never silently skips a dangling reference; a missing role on a
/// member is a data-consistency fault the caller must see.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionError {
    GuildMissing(GuildId),
    ChannelMissing(ChannelId),
    MemberMissing(GuildId, UserId),
    EveryoneRoleMissing(GuildId),
    RoleMissing(RoleId),
}

impl Display for ResolutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ResolutionError::GuildMissing(id) => {
                write!(f, "guild {id} is not in the cache")
            }
            ResolutionError::ChannelMissing(id) => {
                write!(f, "channel {id} is not in the cache")
            }
            ResolutionError::MemberMissing(guild, user) => {
                write!(f, "member {user} of guild {guild} is not in the cache")
            }
            ResolutionError::EveryoneRoleMissing(id) => {
                write!(f, "the everyone role of guild {id} is not in the cache")
            }
            ResolutionError::RoleMissing(id) => {
                write!(f, "role {id} held by the member is not in the cache")
            }
        }
    }
}

impl StdError for ResolutionError {}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CacheError {
    Resolution(ResolutionError),
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CacheError::Resolution(err) => Display::fmt(err, f),
        }
    }
}

impl StdError for CacheError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CacheError::Resolution(err) => Some(err),
        }
    }
}

impl From<ResolutionError> for CacheError {
    fn from(err: ResolutionError) -> Self {
        Self::Resolution(err)
    }
}
