//! Runtime tests on virtual time.
//!
//! Each test drives the production [`Runtime`] with a [`SimDriver`] and an
//! in-memory store, under tokio's paused clock, so the boot delay elapses
//! deterministically.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - What the store holds after boot
//! - What the platform was asked to do, in order
//! - Whether the boot-complete signal fired

use std::time::Duration;

use tokio::time::{Instant, sleep, timeout};
use yana_app::{
    AppConfig, AppEvent, AppStatus, PushNotification, RestoreOutcome, Runtime, SystemEnv,
    notification,
};
use yana_core::{ChatState, QuickReply, SessionState};
use yana_harness::{InvariantRegistry, SimDriver};
use yana_store::{ChaoticStore, MemoryStore, Persistence, StorageKey};

const BOOT_DELAY: Duration = Duration::from_millis(100);

fn session_blob(code: u32, token: &str) -> String {
    serde_json::to_string(&SessionState {
        token: token.into(),
        app_version_name: "1.0".into(),
        app_version_code: code,
        is_onboarding_done: true,
        username: "humano".into(),
    })
    .unwrap()
}

fn chat_blob(next_key: &str, labels: &[&str]) -> String {
    serde_json::to_string(&ChatState {
        next_key: next_key.into(),
        quick_replies: labels.iter().map(|l| QuickReply::new(*l, format!("after_{l}"))).collect(),
        ..ChatState::default()
    })
    .unwrap()
}

fn runtime<P: Persistence>(driver: &SimDriver, store: P) -> Runtime<SimDriver, SystemEnv, P> {
    let driver = driver.clone().with_invariants(InvariantRegistry::standard());
    Runtime::new(driver, SystemEnv::new(), store, AppConfig::default())
}

#[tokio::test(start_paused = true)]
async fn absent_session_boots_unauthenticated_and_fires_signal() {
    let driver = SimDriver::new();
    let store = MemoryStore::with_entries([(StorageKey::Ui, r#"{"isDarkModeActive":true}"#)]);
    let mut runtime = runtime(&driver, store.clone());
    let start = Instant::now();

    let outcome = runtime.boot().await.unwrap();
    assert_eq!(outcome, RestoreOutcome::NoSession);
    assert!(!driver.splash_hidden());
    assert!(runtime.boot_pending());

    runtime.step().await.unwrap();

    assert!(driver.splash_hidden());
    assert!(start.elapsed() >= BOOT_DELAY);
    assert!(runtime.app().is_booted());
    assert!(driver.published().is_empty());
    assert_eq!(driver.refresh_requests(), 0);
    assert_eq!(store.len(), 1, "no store mutation without a session");
}

#[tokio::test(start_paused = true)]
async fn version_49_clears_store() {
    let driver = SimDriver::new();
    let store = MemoryStore::with_entries([
        (StorageKey::Session, session_blob(49, "abc").as_str()),
        (StorageKey::Chat, chat_blob("turn", &["a"]).as_str()),
    ]);
    let mut runtime = runtime(&driver, store.clone());

    let outcome = runtime.boot().await.unwrap();

    assert_eq!(outcome, RestoreOutcome::Incompatible);
    assert!(store.is_empty());
    assert!(driver.published().is_empty());
    assert!(runtime.app().session().token.is_empty());
}

#[tokio::test(start_paused = true)]
async fn version_50_publishes_in_order_then_refreshes() {
    let driver = SimDriver::new();
    let store = MemoryStore::with_entries([
        (StorageKey::Session, session_blob(50, "abc").as_str()),
        (StorageKey::Chat, chat_blob("turn", &["a", "b"]).as_str()),
        (StorageKey::Settings, r#"{"reminders":"08:00"}"#),
        (StorageKey::Ui, r#"{"bannerContent":{"type":"info","message":"hi"}}"#),
    ]);
    let mut runtime = runtime(&driver, store.clone());

    let outcome = runtime.boot().await.unwrap();

    assert_eq!(outcome, RestoreOutcome::Restored);
    assert_eq!(driver.published(), vec![
        StorageKey::Chat,
        StorageKey::Settings,
        StorageKey::Ui,
        StorageKey::Session,
    ]);
    assert_eq!(driver.refresh_requests(), 1);
    assert_eq!(store.len(), 4);
    assert_eq!(runtime.app().ui().banner_content.as_ref().unwrap().message, "hi");
    assert_eq!(runtime.app().session().display_name(), None);
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_boot_signal() {
    let driver = SimDriver::new();
    let mut runtime = runtime(&driver, MemoryStore::new());
    runtime.boot().await.unwrap();

    sleep(BOOT_DELAY / 2).await;
    runtime.teardown();
    sleep(BOOT_DELAY * 5).await;

    assert!(!runtime.boot_pending());
    assert!(timeout(BOOT_DELAY * 10, runtime.step()).await.is_err());
    assert!(!driver.splash_hidden());
    assert!(driver.stopped());
}

#[tokio::test(start_paused = true)]
async fn storage_failure_is_no_session() {
    let driver = SimDriver::new();
    let store = ChaoticStore::new(
        MemoryStore::with_entries([(StorageKey::Session, session_blob(90, "abc").as_str())]),
        1.0,
    );
    let mut runtime = runtime(&driver, store);

    assert_eq!(runtime.boot().await.unwrap(), RestoreOutcome::NoSession);

    runtime.step().await.unwrap();
    assert!(driver.splash_hidden());
}

#[tokio::test(start_paused = true)]
async fn driver_events_win_over_boot_signal() {
    let driver = SimDriver::new();
    let mut runtime = runtime(&driver, MemoryStore::new());
    runtime.boot().await.unwrap();

    driver.inject_event(AppEvent::ChatScreenMounted);
    runtime.step().await.unwrap();

    assert!(runtime.app().composer().is_some());
    assert!(!driver.splash_hidden());
}

#[tokio::test(start_paused = true)]
async fn reply_round_trip_through_runtime() {
    let driver = SimDriver::new();
    let store = MemoryStore::with_entries([
        (StorageKey::Session, session_blob(60, "abc").as_str()),
        (StorageKey::Chat, chat_blob("turn", &["yes", "no"]).as_str()),
    ]);
    let mut runtime = runtime(&driver, store.clone());
    runtime.boot().await.unwrap();

    driver.inject_event(AppEvent::ChatScreenMounted);
    driver.inject_event(AppEvent::ReplyPressed(1));
    driver.inject_event(AppEvent::ReplyPressed(0));
    for _ in 0..3 {
        runtime.step().await.unwrap();
    }

    let submissions = driver.take_submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].user_response, "no");
    assert_eq!(submissions[0].next_key, "after_no");

    let mut failed: ChatState = serde_json::from_str(&chat_blob("turn", &["yes", "no"])).unwrap();
    failed.user_response_failed = true;
    driver.inject_event(AppEvent::ChatUpdated(failed));
    driver.inject_event(AppEvent::ReplyPressed(0));
    runtime.step().await.unwrap();
    runtime.step().await.unwrap();

    assert_eq!(driver.take_submissions().len(), 1);
    let persisted: ChatState =
        serde_json::from_str(&store.get(StorageKey::Chat).unwrap().unwrap()).unwrap();
    assert!(!persisted.user_response_failed);
}

#[tokio::test(start_paused = true)]
async fn blank_submit_reveals_without_submitting() {
    let driver = SimDriver::new();
    let store = MemoryStore::with_entries([
        (StorageKey::Session, session_blob(60, "abc").as_str()),
        (StorageKey::Chat, chat_blob("turn", &["yes", "no"]).as_str()),
    ]);
    let mut runtime = runtime(&driver, store);
    runtime.boot().await.unwrap();

    driver.inject_event(AppEvent::ChatScreenMounted);
    driver.inject_event(AppEvent::InputChanged("   ".into()));
    driver.inject_event(AppEvent::SubmitPressed);
    for _ in 0..3 {
        runtime.step().await.unwrap();
    }

    assert!(driver.take_submissions().is_empty());
    assert!(driver.reset_visible());
    assert!(!driver.take_reveals().is_empty());
    assert_eq!(driver.keyboard_dismissals(), 0);
}

#[tokio::test(start_paused = true)]
async fn text_submit_dismisses_keyboard() {
    let driver = SimDriver::new();
    let mut runtime = runtime(&driver, MemoryStore::new());
    runtime.boot().await.unwrap();

    driver.inject_event(AppEvent::ChatScreenMounted);
    driver.inject_event(AppEvent::InputChanged("hello".into()));
    driver.inject_event(AppEvent::SubmitPressed);
    for _ in 0..3 {
        runtime.step().await.unwrap();
    }

    assert_eq!(driver.keyboard_dismissals(), 1);
    assert_eq!(driver.take_submissions()[0].user_response, "hello");
    assert!(runtime.app().composer().unwrap().ui().is_submit_loading);
}

#[tokio::test(start_paused = true)]
async fn resume_refreshes_with_late_token() {
    let driver = SimDriver::new();
    let store = MemoryStore::new();
    let mut runtime = runtime(&driver, store.clone());
    runtime.boot().await.unwrap();

    driver.inject_event(AppEvent::AppStatusChanged(AppStatus::Background));
    driver.inject_event(AppEvent::AppStatusChanged(AppStatus::Active));
    driver.inject_event(AppEvent::AppStatusChanged(AppStatus::Background));
    driver.inject_event(AppEvent::SessionUpdated(SessionState {
        token: "abc".into(),
        app_version_name: "1.0".into(),
        app_version_code: 50,
        ..SessionState::default()
    }));
    driver.inject_event(AppEvent::AppStatusChanged(AppStatus::Active));
    for _ in 0..5 {
        runtime.step().await.unwrap();
    }

    assert_eq!(driver.refresh_requests(), 1);
    assert!(store.get(StorageKey::Session).unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn notifications_collapse_to_latest() {
    let driver = SimDriver::new();
    let store =
        MemoryStore::with_entries([(StorageKey::Session, session_blob(60, "abc").as_str())]);
    let (sender, inbox) = notification::channel();
    let mut runtime = runtime(&driver, store).with_notifications(inbox);
    runtime.boot().await.unwrap();
    let after_boot = driver.refresh_requests();

    sender.publish(PushNotification { id: "1".into(), ..PushNotification::default() });
    sender.publish(PushNotification { id: "2".into(), ..PushNotification::default() });
    runtime.step().await.unwrap();

    assert_eq!(driver.refresh_requests(), after_boot + 1);
    assert!(!driver.splash_hidden());
}

#[tokio::test(start_paused = true)]
async fn messaging_failure_still_fires_boot_signal() {
    let driver = SimDriver::new();
    driver.set_messaging_down(true);
    let store =
        MemoryStore::with_entries([(StorageKey::Session, session_blob(60, "abc").as_str())]);
    let mut runtime = runtime(&driver, store);

    assert!(runtime.boot().await.is_err());
    assert!(runtime.boot_pending());
    assert_eq!(runtime.app().session().token, "abc");

    runtime.step().await.unwrap();
    assert!(driver.splash_hidden());
    assert!(runtime.app().is_booted());
}

#[tokio::test(start_paused = true)]
async fn null_version_name_clears_store() {
    let driver = SimDriver::new();
    let store = MemoryStore::with_entries([
        (StorageKey::Session, r#"{"token":"abc","appVersionName":null,"appVersionCode":60}"#),
        (StorageKey::Chat, chat_blob("turn", &["a"]).as_str()),
    ]);
    let mut runtime = runtime(&driver, store.clone());

    assert_eq!(runtime.boot().await.unwrap(), RestoreOutcome::Incompatible);
    assert!(store.is_empty());
    assert!(runtime.app().session().token.is_empty());
}

#[tokio::test(start_paused = true)]
async fn run_until_quit() {
    let driver = SimDriver::new();
    let runtime = runtime(&driver, MemoryStore::new());

    driver.inject_event(AppEvent::ChatScreenMounted);
    driver.inject_event(AppEvent::Quit);
    runtime.run().await.unwrap();

    assert!(driver.stopped());
    assert!(driver.renders() >= 2);
}
