use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Clone, Copy, Debug, Deserialize_repr, Eq, Ord, PartialEq, PartialOrd, Serialize_repr)]
#[repr(u8)]
pub enum VerificationLevel {
    None = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    VeryHigh = 4,
}

#[derive(Clone, Copy, Debug, Deserialize_repr, Eq, Ord, PartialEq, PartialOrd, Serialize_repr)]
#[repr(u8)]
pub enum ExplicitContentFilter {
    None = 0,
    WithoutRoles = 1,
    All = 2,
}

#[derive(Clone, Copy, Debug, Deserialize_repr, Eq, Ord, PartialEq, PartialOrd, Serialize_repr)]
#[repr(u8)]
pub enum DefaultMessageNotifications {
    AllMessages = 0,
    OnlyMentions = 1,
}

impl Default for VerificationLevel {
    fn default() -> Self {
        Self::None
    }
}

impl Default for ExplicitContentFilter {
    fn default() -> Self {
        Self::None
    }
}

impl Default for DefaultMessageNotifications {
    fn default() -> Self {
        Self::AllMessages
    }
}

impl Display for VerificationLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            VerificationLevel::None => f.write_str("None"),
            VerificationLevel::Low => f.write_str("Low"),
            VerificationLevel::Medium => f.write_str("Medium"),
            VerificationLevel::High => f.write_str("High"),
            VerificationLevel::VeryHigh => f.write_str("Very High"),
        }
    }
}
