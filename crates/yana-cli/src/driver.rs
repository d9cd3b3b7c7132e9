//! Headless driver for running the boot sequence from a terminal.
//!
//! There is no chat screen and no messaging collaborator: input never
//! arrives, and every outgoing request is logged and counted.

use std::future::pending;

use tracing::info;
use yana_app::{App, AppEvent, Driver, RevealSequence};
use yana_core::ResponsePayload;
use yana_store::StorageKey;

use crate::CliError;

/// Driver that records what boot asked of the platform.
#[derive(Debug, Default)]
pub struct HeadlessDriver {
    published: Vec<StorageKey>,
    refresh_requests: usize,
    splash_hidden: bool,
}

impl HeadlessDriver {
    /// Keys published, in order.
    pub fn published(&self) -> &[StorageKey] {
        &self.published
    }

    /// Conversation refreshes requested.
    pub fn refresh_requests(&self) -> usize {
        self.refresh_requests
    }

    /// True once the boot-complete signal reached the platform.
    pub fn splash_hidden(&self) -> bool {
        self.splash_hidden
    }
}

impl Driver for HeadlessDriver {
    type Error = CliError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        pending().await
    }

    async fn submit_response(&mut self, payload: ResponsePayload) -> Result<(), Self::Error> {
        info!(next_key = %payload.next_key, "no messaging collaborator, response dropped");
        Ok(())
    }

    async fn request_conversation_refresh(&mut self) -> Result<(), Self::Error> {
        self.refresh_requests += 1;
        info!("conversation refresh requested");
        Ok(())
    }

    fn dismiss_keyboard(&mut self) {}

    fn reveal(&mut self, _sequence: &RevealSequence) {}

    fn set_reset_visible(&mut self, _visible: bool) {}

    fn store_published(&mut self, key: StorageKey, _app: &App) {
        info!(%key, "store published");
        self.published.push(key);
    }

    fn hide_splash(&mut self) {
        self.splash_hidden = true;
    }

    fn render(&mut self, _app: &App) -> Result<(), Self::Error> {
        Ok(())
    }

    fn stop(&mut self) {}
}
