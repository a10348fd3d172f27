//! Navigation guard tests
//!
//! Views that depend on a handoff must never render without one, however
//! they are reached: typed URL, reload, back or forward.

use std::sync::Arc;
use std::time::Duration;

use app_core::{FixedProgress, PickedFile, Platform, PresetId, RecordingNotifier, Route};
use app_state::{AppConfig, Scheduler, VirtualScheduler};
use app_ui::{Action, App, AppError, NavigationTab};

fn new_app() -> App<VirtualScheduler> {
    let notifier = Arc::new(RecordingNotifier::new());
    let platform = Platform::new(notifier).with_progress(FixedProgress::constant(5.0));
    App::new(VirtualScheduler::new(), platform, AppConfig::default())
}

fn reach_editor(app: &mut App<VirtualScheduler>) {
    app.navigate(Route::Upload).unwrap();
    app.dispatch(Action::SelectFile(PickedFile::new("p.jpg", "image/jpeg", 4096)))
        .unwrap();
    app.dispatch(Action::ContinueToEdit).unwrap();
    app.run_until_idle().unwrap();
    assert_eq!(app.route(), Route::Edit);
}

fn reach_result(app: &mut App<VirtualScheduler>) {
    reach_editor(app);
    app.dispatch(Action::ApplyPreset(PresetId::Noir)).unwrap();
    app.dispatch(Action::ProcessImage).unwrap();
    app.run_until_idle().unwrap();
    app.dispatch(Action::SaveEdit).unwrap();
    assert_eq!(app.route(), Route::Result);
}

/// Test direct entry to /edit redirects to /upload
#[test]
fn test_direct_edit_redirects() {
    let mut app = new_app();
    app.open("/edit").unwrap();

    assert_eq!(app.route(), Route::Upload);
    assert_eq!(app.path(), "/upload");
    assert!(app.edit().is_none());
}

/// Test direct entry to /result redirects to /upload
#[test]
fn test_direct_result_redirects() {
    let mut app = new_app();
    app.open("/result?from=bookmark").unwrap();

    assert_eq!(app.route(), Route::Upload);
    assert!(app.result().is_none());
}

/// Test that the redirect replaces the guarded entry
#[test]
fn test_redirect_replaces_history_entry() {
    let mut app = new_app();
    app.open("/edit").unwrap();

    assert!(app.go_back().unwrap());
    assert_eq!(app.route(), Route::Home);
    assert!(app.go_forward().unwrap());
    assert_eq!(app.route(), Route::Upload);
}

/// Test unknown paths render the not-found view
#[test]
fn test_unknown_path_not_found() {
    let mut app = new_app();
    for path in ["/settings", "/upload/123", "/GALLERY"] {
        app.open(path).unwrap();
        assert_eq!(app.route(), Route::NotFound);
        assert_eq!(app.path(), path);
        assert_eq!(app.active_tab(), None);
    }
}

/// Test known paths render their views
#[test]
fn test_known_paths() {
    let mut app = new_app();
    app.open("/gallery").unwrap();
    assert_eq!(app.gallery().unwrap().items().len(), 4);
    app.open("/profile/").unwrap();
    assert!(!app.profile().unwrap().is_logged_in());
    app.open("/").unwrap();
    assert_eq!(app.route(), Route::Home);
}

/// Test reloading the editor loses the handoff
#[test]
fn test_reload_editor() {
    let mut app = new_app();
    reach_editor(&mut app);

    app.reload().unwrap();
    assert_eq!(app.route(), Route::Upload);
}

/// Test reloading the result view loses the handoff
#[test]
fn test_reload_result() {
    let mut app = new_app();
    reach_result(&mut app);

    app.reload().unwrap();
    assert_eq!(app.route(), Route::Upload);
}

/// Test back from the result view does not restore the editor
#[test]
fn test_back_from_result() {
    let mut app = new_app();
    reach_result(&mut app);

    assert!(app.go_back().unwrap());
    assert_eq!(app.route(), Route::Upload);
    assert!(app.edit().is_none());
}

/// Test forward into a guarded entry redirects
#[test]
fn test_forward_into_editor() {
    let mut app = new_app();
    reach_editor(&mut app);
    app.dispatch(Action::SelectTab(NavigationTab::Gallery)).unwrap();

    assert!(app.go_back().unwrap());
    assert_eq!(app.route(), Route::Upload);
    assert!(app.go_forward().unwrap());
    assert_eq!(app.route(), Route::Gallery);
}

/// Test leaving mid-processing cancels the timer
#[test]
fn test_leaving_editor_cancels_processing() {
    let mut app = new_app();
    reach_editor(&mut app);
    app.dispatch(Action::ApplyPreset(PresetId::Vintage)).unwrap();
    app.dispatch(Action::ProcessImage).unwrap();
    assert_eq!(app.scheduler().pending_count(), 1);

    app.dispatch(Action::SelectTab(NavigationTab::Home)).unwrap();
    assert_eq!(app.scheduler().pending_count(), 0);

    app.advance(Duration::from_secs(5)).unwrap();
    assert_eq!(app.route(), Route::Home);
}

/// Test leaving mid-upload cancels the transfer
#[test]
fn test_leaving_upload_cancels_transfer() {
    let mut app = new_app();
    app.navigate(Route::Upload).unwrap();
    app.dispatch(Action::SelectFile(PickedFile::new("p.jpg", "image/jpeg", 4096)))
        .unwrap();
    app.dispatch(Action::ContinueToEdit).unwrap();
    app.advance(Duration::from_millis(900)).unwrap();

    app.go_back().unwrap();
    app.advance(Duration::from_secs(30)).unwrap();
    assert_eq!(app.route(), Route::Home);
    assert_eq!(app.scheduler().pending_count(), 0);
}

/// Test actions are scoped to the mounted view
#[test]
fn test_actions_scoped_to_view() {
    let mut app = new_app();
    app.open("/gallery").unwrap();

    let err = app.dispatch(Action::SaveEdit).unwrap_err();
    assert_eq!(
        err,
        AppError::ActionUnavailable {
            action: "save-edit",
            route: Route::Gallery
        }
    );

    app.dispatch(Action::BrowseUpload).unwrap();
    assert_eq!(app.route(), Route::Upload);
}
