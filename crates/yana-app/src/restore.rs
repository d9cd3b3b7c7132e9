//! Boot-time restore protocol.
//!
//! Decides whether persisted state may be trusted, and what to publish.
//! Publication order is fixed: chat, settings, ui, then session, followed by
//! a conversation refresh. Session comes last so that observers keyed on the
//! token (navigation, lifecycle) see the other slices already in place.
//!
//! # Outcomes
//!
//! - No session blob, or an undecodable one: nothing is published, the user
//!   lands unauthenticated.
//! - Session written by an unsupported build: every key is wiped.
//! - Otherwise: every present slice is published.

use serde::de::DeserializeOwned;
use serde_json::from_str;
use tracing::{info, warn};
use yana_core::{ChatState, RestoreError, SessionState, SettingsState, UiState};
use yana_store::{Entries, StorageKey};

use crate::RestoreConfig;

/// Raw persisted blobs, one per key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedBlobs {
    /// `CHAT` blob.
    pub chat: Option<String>,
    /// `SESSION` blob.
    pub session: Option<String>,
    /// `SETTINGS` blob.
    pub settings: Option<String>,
    /// `UI` blob.
    pub ui: Option<String>,
}

impl PersistedBlobs {
    /// Collect the result of a multi-key read.
    pub fn from_entries(entries: Entries) -> Self {
        let mut blobs = Self::default();
        for (key, value) in entries {
            match key {
                StorageKey::Chat => blobs.chat = value,
                StorageKey::Session => blobs.session = value,
                StorageKey::Settings => blobs.settings = value,
                StorageKey::Ui => blobs.ui = value,
            }
        }
        blobs
    }
}

/// How boot resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing restored; the user is unauthenticated.
    NoSession,
    /// Session came from an unsupported build; persistence must be wiped.
    Incompatible,
    /// Session and the present slices were restored.
    Restored,
}

/// Decoded slices ready for publication.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredState {
    /// Restored session. Always present on a successful restore.
    pub session: SessionState,
    /// Restored chat slice, if one was persisted.
    pub chat: Option<ChatState>,
    /// Restored settings slice, if one was persisted.
    pub settings: Option<SettingsState>,
    /// Restored UI slice, if one was persisted.
    pub ui: Option<UiState>,
}

/// Result of running the restore protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoreReport {
    /// How boot resolved.
    pub outcome: RestoreOutcome,
    /// Slices to publish. Only present for [`RestoreOutcome::Restored`].
    pub state: Option<RestoredState>,
    /// Why the session was not restored, for logging.
    pub fault: Option<RestoreError>,
}

impl RestoreReport {
    fn no_session(fault: Option<RestoreError>) -> Self {
        Self { outcome: RestoreOutcome::NoSession, state: None, fault }
    }

    /// Report for a persistence read that failed outright.
    pub fn storage_failure(reason: impl Into<String>) -> Self {
        Self::no_session(Some(RestoreError::Storage(reason.into())))
    }

    /// Keys published, in publication order.
    pub fn published_keys(&self) -> Vec<StorageKey> {
        let Some(state) = &self.state else {
            return vec![];
        };

        let mut keys = Vec::with_capacity(StorageKey::ALL.len());
        if state.chat.is_some() {
            keys.push(StorageKey::Chat);
        }
        if state.settings.is_some() {
            keys.push(StorageKey::Settings);
        }
        if state.ui.is_some() {
            keys.push(StorageKey::Ui);
        }
        keys.push(StorageKey::Session);
        keys
    }
}

/// Runs the restore protocol over persisted blobs.
#[derive(Debug, Clone, Default)]
pub struct RestoreController {
    config: RestoreConfig,
}

impl RestoreController {
    /// Create a controller with the given configuration.
    pub fn new(config: RestoreConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &RestoreConfig {
        &self.config
    }

    /// Decide what to do with the persisted blobs.
    ///
    /// Every blob is decoded before anything is reported for publication, so
    /// a malformed slice never leaves a half-restored state behind.
    pub fn restore(&self, blobs: &PersistedBlobs) -> RestoreReport {
        let Some(raw_session) = blobs.session.as_deref() else {
            info!("no persisted session");
            return RestoreReport::no_session(None);
        };

        let session: SessionState = match decode(StorageKey::Session, raw_session) {
            Ok(session) => session,
            Err(fault) => {
                warn!(%fault, "discarding persisted session");
                return RestoreReport::no_session(Some(fault));
            },
        };

        let minimum = self.config.min_supported_version_code;
        if !session.is_compatible(minimum) {
            let fault = RestoreError::Incompatible {
                version_name: session.app_version_name,
                version_code: session.app_version_code,
                minimum,
            };
            info!(%fault, "clearing persisted state");
            return RestoreReport {
                outcome: RestoreOutcome::Incompatible,
                state: None,
                fault: Some(fault),
            };
        }

        match decode_slices(session, blobs) {
            Ok(state) => {
                info!(
                    version_code = state.session.app_version_code,
                    authenticated = state.session.is_authenticated(),
                    "persisted state restored"
                );
                RestoreReport { outcome: RestoreOutcome::Restored, state: Some(state), fault: None }
            },
            Err(fault) => {
                warn!(%fault, "discarding persisted state");
                RestoreReport::no_session(Some(fault))
            },
        }
    }
}

fn decode_slices(
    session: SessionState,
    blobs: &PersistedBlobs,
) -> Result<RestoredState, RestoreError> {
    Ok(RestoredState {
        chat: decode_optional(StorageKey::Chat, blobs.chat.as_deref())?,
        settings: decode_optional(StorageKey::Settings, blobs.settings.as_deref())?,
        ui: decode_optional(StorageKey::Ui, blobs.ui.as_deref())?,
        session,
    })
}

fn decode<T: DeserializeOwned>(key: StorageKey, raw: &str) -> Result<T, RestoreError> {
    from_str(raw).map_err(|e| RestoreError::Malformed { key: key.as_str(), reason: e.to_string() })
}

fn decode_optional<T: DeserializeOwned>(
    key: StorageKey,
    raw: Option<&str>,
) -> Result<Option<T>, RestoreError> {
    raw.map(|raw| decode(key, raw)).transpose()
}
