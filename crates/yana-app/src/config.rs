//! Runtime configuration.
//!
//! Plain structs with defaults matching the shipped app. The binary maps its
//! command-line flags onto these.

use std::time::Duration;

/// Oldest `appVersionCode` whose persisted state can be restored.
pub const MIN_SUPPORTED_VERSION_CODE: u32 = 50;

/// Minimum delay between the end of restore and the boot-complete signal.
pub const BOOT_DELAY: Duration = Duration::from_millis(100);

/// Gap between consecutive quick-reply reveals.
pub const REVEAL_STAGGER: Duration = Duration::from_millis(100);

/// Length of a single reveal.
pub const REVEAL_DURATION: Duration = Duration::from_millis(400);

/// Restore protocol configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreConfig {
    /// Sessions written by an older build are discarded.
    pub min_supported_version_code: u32,
    /// Delay before the boot-complete signal fires.
    pub boot_delay: Duration,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self { min_supported_version_code: MIN_SUPPORTED_VERSION_CODE, boot_delay: BOOT_DELAY }
    }
}

/// Composer presentation configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Gap between consecutive reveals.
    pub reveal_stagger: Duration,
    /// Length of each reveal.
    pub reveal_duration: Duration,
    /// Placeholder used when the assistant supplies none.
    pub default_placeholder: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            reveal_stagger: REVEAL_STAGGER,
            reveal_duration: REVEAL_DURATION,
            default_placeholder: "Write a message".to_string(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Restore protocol settings.
    pub restore: RestoreConfig,
    /// Composer settings.
    pub composer: ComposerConfig,
}
