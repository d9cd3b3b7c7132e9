//! Command implementations.
//!
//! Each command works against any [`Persistence`] so tests can run them on
//! the in-memory store. Output goes to a caller-supplied writer.

use std::{io::Write, time::Duration};

use tokio::time::Instant;
use yana_app::{AppConfig, RestoreOutcome, Runtime, SystemEnv};
use yana_core::{Route, SessionState};
use yana_store::{Persistence, StorageKey};

use crate::{CliError, driver::HeadlessDriver};

/// What a restore run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSummary {
    /// How boot resolved.
    pub outcome: RestoreOutcome,
    /// Navigation branch after boot.
    pub route: Route,
    /// Keys published, in order.
    pub published: Vec<StorageKey>,
    /// Conversation refreshes requested.
    pub refresh_requests: usize,
    /// Time from boot start to the boot-complete signal.
    pub boot_elapsed: Duration,
    /// Profile title, if the session has a real username.
    pub display_name: Option<String>,
}

impl RestoreSummary {
    /// Write a human-readable report.
    pub fn write_to(&self, out: &mut impl Write) -> Result<(), CliError> {
        let published: Vec<&str> = self.published.iter().map(|key| key.as_str()).collect();

        writeln!(out, "outcome:    {:?}", self.outcome)?;
        writeln!(out, "route:      {:?}", self.route)?;
        writeln!(out, "published:  {}", if published.is_empty() { "-".to_string() } else { published.join(", ") })?;
        writeln!(out, "refreshes:  {}", self.refresh_requests)?;
        writeln!(out, "boot after: {} ms", self.boot_elapsed.as_millis())?;
        if let Some(name) = &self.display_name {
            writeln!(out, "user:       {name}")?;
        }
        Ok(())
    }
}

/// Run the boot sequence against `store` until the boot-complete signal.
pub async fn restore<P: Persistence>(store: P, config: AppConfig) -> Result<RestoreSummary, CliError> {
    let mut runtime = Runtime::new(HeadlessDriver::default(), SystemEnv::new(), store, config);
    let start = Instant::now();

    let outcome = runtime.boot().await?;
    while !runtime.driver().splash_hidden() {
        runtime.step().await?;
    }

    let summary = RestoreSummary {
        outcome,
        route: runtime.app().route(),
        published: runtime.driver().published().to_vec(),
        refresh_requests: runtime.driver().refresh_requests(),
        boot_elapsed: start.elapsed(),
        display_name: runtime.app().session().display_name().map(str::to_owned),
    };
    runtime.teardown();

    Ok(summary)
}

/// Print every stored blob.
pub fn inspect<P: Persistence>(store: &P, out: &mut impl Write) -> Result<(), CliError> {
    for (key, value) in store.multi_get(&StorageKey::ALL)? {
        writeln!(out, "{key}: {}", value.as_deref().unwrap_or("<absent>"))?;
    }
    Ok(())
}

/// Write a session blob.
pub fn seed<P: Persistence>(store: &P, session: &SessionState) -> Result<(), CliError> {
    let blob = serde_json::to_string(session)?;
    store.set(StorageKey::Session, &blob)?;
    tracing::info!(version_code = session.app_version_code, "session seeded");
    Ok(())
}

/// Remove every stored blob.
pub fn clear<P: Persistence>(store: &P) -> Result<(), CliError> {
    store.clear()?;
    tracing::info!("store cleared");
    Ok(())
}
