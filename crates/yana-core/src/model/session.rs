use serde::{Deserialize, Serialize};

use super::lenient::{null_as_default, version_code};

/// Placeholder username assigned before the user picks one.
const PLACEHOLDER_USERNAME: &str = "humano";

/// Authenticated session, persisted under `SESSION`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionState {
    /// Bearer token. Empty means unauthenticated.
    #[serde(deserialize_with = "null_as_default")]
    pub token: String,
    /// Version name of the build that wrote this session.
    #[serde(deserialize_with = "null_as_default")]
    pub app_version_name: String,
    /// Version code of the build that wrote this session. `null` and
    /// negative codes decode to `0`.
    #[serde(deserialize_with = "version_code")]
    pub app_version_code: u32,
    /// Onboarding conversation has been completed.
    #[serde(deserialize_with = "null_as_default")]
    pub is_onboarding_done: bool,
    /// Name the assistant addresses the user by.
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
}

impl SessionState {
    /// True if the session carries a token.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Check the compatibility guard.
    ///
    /// A session is compatible when it names the version that wrote it and that
    /// version is at least `minimum`.
    pub fn is_compatible(&self, minimum: u32) -> bool {
        !self.app_version_name.is_empty() && self.app_version_code >= minimum
    }

    /// Name to show as the profile title. `None` while the username is unset
    /// or still the placeholder.
    pub fn display_name(&self) -> Option<&str> {
        if self.username.is_empty() || self.username == PLACEHOLDER_USERNAME {
            None
        } else {
            Some(&self.username)
        }
    }
}

/// Root navigation branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Onboarding, sign-in and password recovery screens.
    Auth,
    /// Main tabs (chat, routine, journal, profile).
    App,
}

impl Route {
    /// Branch for the given session token.
    pub fn for_token(token: &str) -> Self {
        if token.is_empty() { Self::Auth } else { Self::App }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(name: &str, code: u32) -> SessionState {
        SessionState {
            app_version_name: name.into(),
            app_version_code: code,
            ..SessionState::default()
        }
    }

    #[test]
    fn compatibility_guard() {
        assert!(session("1.0", 50).is_compatible(50));
        assert!(session("1.0", 51).is_compatible(50));
        assert!(!session("1.0", 49).is_compatible(50));
        assert!(!session("", 80).is_compatible(50));
    }

    #[test]
    fn missing_fields_decode_to_incompatible() {
        let decoded: SessionState = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(decoded.token, "abc");
        assert!(!decoded.is_compatible(50));
    }

    #[test]
    fn decodes_camel_case_blob() {
        let blob = r#"{"token":"t","appVersionName":"2.1","appVersionCode":64,"isOnboardingDone":true,"username":"ana"}"#;
        let decoded: SessionState = serde_json::from_str(blob).unwrap();
        assert_eq!(decoded.app_version_code, 64);
        assert!(decoded.is_onboarding_done);
        assert!(decoded.is_compatible(50));
    }

    #[test]
    fn null_version_fields_decode_to_incompatible() {
        for blob in [
            r#"{"token":"t","appVersionName":null,"appVersionCode":60}"#,
            r#"{"token":"t","appVersionName":"2.0","appVersionCode":null}"#,
            r#"{"token":"t","appVersionName":"2.0","appVersionCode":-1}"#,
        ] {
            let decoded: SessionState = serde_json::from_str(blob).unwrap();
            assert_eq!(decoded.token, "t");
            assert!(!decoded.is_compatible(50), "{blob}");
        }
    }

    #[test]
    fn float_and_huge_codes_decode() {
        let decoded: SessionState =
            serde_json::from_str(r#"{"appVersionName":"2.0","appVersionCode":64.0}"#).unwrap();
        assert_eq!(decoded.app_version_code, 64);

        let decoded: SessionState =
            serde_json::from_str(r#"{"appVersionName":"2.0","appVersionCode":1e12}"#).unwrap();
        assert_eq!(decoded.app_version_code, u32::MAX);
    }

    #[test]
    fn display_name_skips_placeholder() {
        let mut state = SessionState::default();
        assert_eq!(state.display_name(), None);
        state.username = "humano".into();
        assert_eq!(state.display_name(), None);
        state.username = "ana".into();
        assert_eq!(state.display_name(), Some("ana"));
    }

    #[test]
    fn route_follows_token() {
        assert_eq!(Route::for_token(""), Route::Auth);
        assert_eq!(Route::for_token("abc"), Route::App);
    }
}
