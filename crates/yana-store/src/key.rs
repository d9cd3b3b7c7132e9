use std::{fmt, str::FromStr};

use crate::StorageError;

/// Fixed storage keys. One per persisted store slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    /// Conversation slice.
    Chat,
    /// Session slice (token, version guard).
    Session,
    /// User settings slice.
    Settings,
    /// Presentation slice.
    Ui,
}

impl StorageKey {
    /// Every key, in restore read order.
    pub const ALL: [Self; 4] = [Self::Chat, Self::Session, Self::Settings, Self::Ui];

    /// Name the key is stored under.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "CHAT",
            Self::Session => "SESSION",
            Self::Settings => "SETTINGS",
            Self::Ui => "UI",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKey {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| StorageError::NotFound(s.to_string()))
    }
}
