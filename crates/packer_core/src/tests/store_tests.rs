use super::*;
use shared::domain::FileUpload;

#[test]
fn default_store_starts_empty() {
    let store = Store::default();
    assert_eq!(store.state(), &AppState::default());
    assert_eq!(store.dispatched(), 0);
}

#[test]
fn dispatch_threads_state_between_actions() {
    let mut store = Store::default();
    store.dispatch(Action::UploadPluginStart);
    store.dispatch(Action::UploadPlugin(FileUpload::new(
        b"zip".to_vec(),
        "plugin.zip",
    )));

    assert_eq!(store.dispatched(), 2);
    assert_eq!(store.state().contents.name.as_deref(), Some("plugin.zip"));
    assert!(store.state().is_ready_to_package());
}

#[test]
fn dispatch_all_applies_in_order() {
    let mut store = Store::new(AppState {
        error: Some("stale".to_string()),
        ..AppState::default()
    });
    store.dispatch_all([
        Action::CreatePluginZipStart,
        Action::CreatePluginZipFailure("signing failed".to_string()),
    ]);

    let state = store.into_state();
    assert_eq!(state.error.as_deref(), Some("signing failed"));
    assert!(!state.loading);
}

#[test]
fn not_ready_while_loading() {
    let mut store = Store::default();
    store.dispatch(Action::UploadPlugin(FileUpload::new(
        b"zip".to_vec(),
        "plugin.zip",
    )));
    store.dispatch(Action::CreatePluginZipStart);
    assert!(!store.state().is_ready_to_package());
}
