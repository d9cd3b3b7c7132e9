//! Fuzz target for RestoreController::restore
//!
//! Feeds arbitrary strings as the four persisted blobs, plus a well-formed
//! session with an arbitrary version so the guard is exercised past decoding.
//!
//! # Invariants
//!
//! - restore NEVER panics
//! - Incompatible only when a decodable session fails the version guard
//! - Restored implies a compatible session and a publication list ending in SESSION

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use yana_app::{PersistedBlobs, RestoreConfig, RestoreController, RestoreOutcome};
use yana_core::SessionState;

#[derive(Debug, Arbitrary)]
struct Blobs {
    session: Option<String>,
    chat: Option<String>,
    settings: Option<String>,
    ui: Option<String>,
    /// Replace the session blob with a well-formed one
    structured: Option<(String, u32, String)>,
    minimum: u8,
}

fuzz_target!(|input: Blobs| {
    let session = match input.structured {
        Some((name, code, token)) => serde_json::to_string(&SessionState {
            token,
            app_version_name: name,
            app_version_code: code,
            is_onboarding_done: false,
            username: String::new(),
        })
        .ok(),
        None => input.session,
    };

    let minimum = u32::from(input.minimum);
    let controller = RestoreController::new(RestoreConfig {
        min_supported_version_code: minimum,
        ..RestoreConfig::default()
    });
    let report = controller.restore(&PersistedBlobs {
        session,
        chat: input.chat,
        settings: input.settings,
        ui: input.ui,
    });

    match report.outcome {
        RestoreOutcome::Restored => {
            let state = report.state.as_ref().expect("restored without state");
            assert!(state.session.is_compatible(minimum));
            assert_eq!(report.published_keys().last().map(|k| k.as_str()), Some("SESSION"));
        },
        RestoreOutcome::Incompatible => assert!(report.published_keys().is_empty()),
        RestoreOutcome::NoSession => {},
    }
});
