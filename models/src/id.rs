use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    num::NonZeroU64,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct GuildId(pub NonZeroU64);

impl GuildId {
    /// # Panics
    /// Panics if `n` is zero.
    pub fn new(n: u64) -> Self {
        Self(NonZeroU64::new(n).unwrap())
    }

    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// The id of the guild's implicit everyone role.
    ///
    /// Every guild carries exactly one role whose id equals the guild id; it
    /// represents the permissions granted to all members by default.
    pub const fn everyone_role(self) -> RoleId {
        RoleId(self.0)
    }
}

impl Display for GuildId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ChannelId(pub NonZeroU64);

impl ChannelId {
    /// # Panics
    /// Panics if `n` is zero.
    pub fn new(n: u64) -> Self {
        Self(NonZeroU64::new(n).unwrap())
    }

    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl Display for ChannelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct RoleId(pub NonZeroU64);

impl RoleId {
    /// # Panics
    /// Panics if `n` is zero.
    pub fn new(n: u64) -> Self {
        Self(NonZeroU64::new(n).unwrap())
    }

    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl Display for RoleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct UserId(pub NonZeroU64);

impl UserId {
    /// # Panics
    /// Panics if `n` is zero.
    pub fn new(n: u64) -> Self {
        Self(NonZeroU64::new(n).unwrap())
    }

    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct MessageId(pub NonZeroU64);

impl MessageId {
    /// # Panics
    /// Panics if `n` is zero.
    pub fn new(n: u64) -> Self {
        Self(NonZeroU64::new(n).unwrap())
    }

    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct AuditLogEntryId(pub NonZeroU64);

impl AuditLogEntryId {
    /// # Panics
    /// Panics if `n` is zero.
    pub fn new(n: u64) -> Self {
        Self(NonZeroU64::new(n).unwrap())
    }

    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl Display for AuditLogEntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}
