//! Application shell
//!
//! The shell owns the scheduler, the platform capabilities, the session
//! history and the single active view. Every user action, timer and
//! navigation goes through it one at a time:
//!
//! 1. actions are dispatched to the active flow,
//! 2. a returned [`Transition`] is pushed onto the history,
//! 3. the old view is torn down (its timers cancelled) and the new one is
//!    mounted with whatever handoff the navigation carried.
//!
//! Views that cannot be entered without a handoff redirect to their fallback
//! by replacing the current history entry.

use app_core::{
    EditFlow, Error, Flow, FlowContext, GalleryFlow, HomeFlow, NotFoundFlow, PickedFile,
    Platform, PresetId, ProfileFlow, ResultFlow, Route, SettingsItem, Transition, UploadFlow,
};
use app_state::{AppConfig, Scheduler, TimerId, TokioScheduler, VirtualScheduler};
use std::time::Duration;

use crate::navigation::{NavigationState, NavigationTab, Router, StackEntry};

/// Errors surfaced by the shell
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    /// A flow rejected the action
    #[error(transparent)]
    Flow(#[from] Error),

    /// The action does not exist on the active view
    #[error("{action} is not available on {route:?}")]
    ActionUnavailable {
        /// Action name
        action: &'static str,
        /// View that was showing
        route: Route,
    },
}

/// Result type for shell operations
pub type AppResult<T> = std::result::Result<T, AppError>;

/// User actions, grouped by the view that offers them
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Home
    /// "Upload Photo"
    UploadPhoto,
    /// Search button
    Search,
    /// "Sign in" banner
    SignInPrompt,

    // Upload
    /// A file came back from the picker
    SelectFile(PickedFile),
    /// Remove the selected image
    DiscardSelection,
    /// "Continue to Edit"
    ContinueToEdit,
    /// "Take Photo"
    CaptureFromCamera,

    // Edit
    /// Instruction text changed
    SetPrompt(String),
    /// Preset chip tapped
    ApplyPreset(PresetId),
    /// "Apply Transformation"
    ProcessImage,
    /// "Try Again"
    ResetEdit,
    /// "Save & Continue"
    SaveEdit,

    // Result
    /// "Download"
    Download,
    /// "Edit Another Image"
    EditAgain,

    // Gallery
    /// Gallery item tapped
    OpenGalleryItem(String),
    /// Sort button
    SortGallery,
    /// Empty-state "Upload an Image"
    BrowseUpload,

    // Profile
    /// "Continue with Google"
    SignInWithGoogle,
    /// "Continue with Email"
    SignInWithEmail,
    /// "Sign Out"
    SignOut,
    /// "Edit Profile"
    EditProfile,
    /// Settings row tapped
    OpenSettings(SettingsItem),

    // Not found
    /// "Return Home"
    ReturnHome,

    /// Bottom navigation, available everywhere
    SelectTab(NavigationTab),
}

impl Action {
    /// Stable name for logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Action::UploadPhoto => "upload-photo",
            Action::Search => "search",
            Action::SignInPrompt => "sign-in-prompt",
            Action::SelectFile(_) => "select-file",
            Action::DiscardSelection => "discard-selection",
            Action::ContinueToEdit => "continue-to-edit",
            Action::CaptureFromCamera => "capture-from-camera",
            Action::SetPrompt(_) => "set-prompt",
            Action::ApplyPreset(_) => "apply-preset",
            Action::ProcessImage => "process-image",
            Action::ResetEdit => "reset-edit",
            Action::SaveEdit => "save-edit",
            Action::Download => "download",
            Action::EditAgain => "edit-again",
            Action::OpenGalleryItem(_) => "open-gallery-item",
            Action::SortGallery => "sort-gallery",
            Action::BrowseUpload => "browse-upload",
            Action::SignInWithGoogle => "sign-in-with-google",
            Action::SignInWithEmail => "sign-in-with-email",
            Action::SignOut => "sign-out",
            Action::EditProfile => "edit-profile",
            Action::OpenSettings(_) => "open-settings",
            Action::ReturnHome => "return-home",
            Action::SelectTab(_) => "select-tab",
        }
    }
}

/// The mounted view
#[derive(Debug)]
pub enum ActiveView {
    /// Landing screen
    Home(HomeFlow),
    /// Upload screen
    Upload(UploadFlow),
    /// Edit screen
    Edit(EditFlow),
    /// Result screen
    Result(ResultFlow),
    /// Gallery screen
    Gallery(GalleryFlow),
    /// Profile screen
    Profile(ProfileFlow),
    /// Catch-all
    NotFound(NotFoundFlow),
}

impl ActiveView {
    /// Build the view for a history entry
    ///
    /// Only views that require a handoff can fail, with
    /// [`Error::MissingHandoff`].
    fn build(entry: &StackEntry, handoff: Option<app_core::Handoff>) -> Result<Self, Error> {
        let view = match entry.route {
            Route::Home => ActiveView::Home(HomeFlow::new()),
            Route::Upload => ActiveView::Upload(UploadFlow::new()),
            Route::Edit => ActiveView::Edit(EditFlow::enter(handoff)?),
            Route::Result => ActiveView::Result(ResultFlow::enter(handoff)?),
            Route::Gallery => ActiveView::Gallery(GalleryFlow::new()),
            Route::Profile => ActiveView::Profile(ProfileFlow::new()),
            Route::NotFound => ActiveView::NotFound(NotFoundFlow::new(entry.path.clone())),
        };
        Ok(view)
    }

    /// The flow behind this view
    pub fn as_flow(&self) -> &dyn Flow {
        match self {
            ActiveView::Home(flow) => flow,
            ActiveView::Upload(flow) => flow,
            ActiveView::Edit(flow) => flow,
            ActiveView::Result(flow) => flow,
            ActiveView::Gallery(flow) => flow,
            ActiveView::Profile(flow) => flow,
            ActiveView::NotFound(flow) => flow,
        }
    }

    /// The flow behind this view, mutably
    pub fn as_flow_mut(&mut self) -> &mut dyn Flow {
        match self {
            ActiveView::Home(flow) => flow,
            ActiveView::Upload(flow) => flow,
            ActiveView::Edit(flow) => flow,
            ActiveView::Result(flow) => flow,
            ActiveView::Gallery(flow) => flow,
            ActiveView::Profile(flow) => flow,
            ActiveView::NotFound(flow) => flow,
        }
    }

    /// Route of the mounted view
    pub fn route(&self) -> Route {
        self.as_flow().route()
    }
}

/// Headless application
pub struct App<S: Scheduler> {
    scheduler: S,
    platform: Platform,
    config: AppConfig,
    router: Router,
    history: NavigationState,
    view: ActiveView,
}

impl<S: Scheduler> App<S> {
    /// Start on the home view
    pub fn new(scheduler: S, platform: Platform, config: AppConfig) -> Self {
        Self {
            scheduler,
            platform,
            config,
            router: Router::new(),
            history: NavigationState::default(),
            view: ActiveView::Home(HomeFlow::new()),
        }
    }

    /// Mounted view
    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    /// Route of the mounted view
    pub fn route(&self) -> Route {
        self.view.route()
    }

    /// Path in the address bar
    pub fn path(&self) -> &str {
        &self.history.current().path
    }

    /// Highlighted bottom tab, if any
    pub fn active_tab(&self) -> Option<NavigationTab> {
        NavigationTab::for_route(self.route())
    }

    /// Session history
    pub fn history(&self) -> &NavigationState {
        &self.history
    }

    /// Timer scheduler
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Runtime configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Upload flow, if mounted
    pub fn upload(&self) -> Option<&UploadFlow> {
        match &self.view {
            ActiveView::Upload(flow) => Some(flow),
            _ => None,
        }
    }

    /// Edit flow, if mounted
    pub fn edit(&self) -> Option<&EditFlow> {
        match &self.view {
            ActiveView::Edit(flow) => Some(flow),
            _ => None,
        }
    }

    /// Result flow, if mounted
    pub fn result(&self) -> Option<&ResultFlow> {
        match &self.view {
            ActiveView::Result(flow) => Some(flow),
            _ => None,
        }
    }

    /// Gallery flow, if mounted
    pub fn gallery(&self) -> Option<&GalleryFlow> {
        match &self.view {
            ActiveView::Gallery(flow) => Some(flow),
            _ => None,
        }
    }

    /// Profile flow, if mounted
    pub fn profile(&self) -> Option<&ProfileFlow> {
        match &self.view {
            ActiveView::Profile(flow) => Some(flow),
            _ => None,
        }
    }

    /// Open a path as if typed into the address bar
    ///
    /// Nothing is handed over, so views that need a handoff redirect.
    pub fn open(&mut self, path: &str) -> AppResult<()> {
        let route = self.router.match_path(path);
        tracing::info!(%path, ?route, "opening path");
        self.history
            .navigate(StackEntry::with_path(route, path), None);
        self.mount()
    }

    /// Navigate to a route without a handoff
    pub fn navigate(&mut self, route: Route) -> AppResult<()> {
        self.apply(Transition::to(route))
    }

    /// Browser back
    ///
    /// Returns `false` if there was nothing to go back to.
    pub fn go_back(&mut self) -> AppResult<bool> {
        if !self.history.go_back() {
            return Ok(false);
        }
        self.mount()?;
        Ok(true)
    }

    /// Browser forward
    ///
    /// Returns `false` if there was nothing to go forward to.
    pub fn go_forward(&mut self) -> AppResult<bool> {
        if !self.history.go_forward() {
            return Ok(false);
        }
        self.mount()?;
        Ok(true)
    }

    /// Reload the current entry, discarding all view state
    pub fn reload(&mut self) -> AppResult<()> {
        tracing::debug!(path = %self.path(), "reloading");
        self.history.reload();
        self.mount()
    }

    /// Dispatch a user action to the mounted view
    pub fn dispatch(&mut self, action: Action) -> AppResult<()> {
        let route = self.view.route();
        let name = action.name();
        tracing::debug!(action = name, ?route, "dispatching");

        let mut ctx = FlowContext::new(&mut self.scheduler, &mut self.platform, &self.config);
        let transition = match (&mut self.view, action) {
            (_, Action::SelectTab(tab)) => Some(Transition::to(tab.root_route())),

            (ActiveView::Home(home), Action::UploadPhoto) => Some(home.start_upload()),
            (ActiveView::Home(home), Action::Search) => {
                home.search(&mut ctx);
                None
            }
            (ActiveView::Home(home), Action::SignInPrompt) => Some(home.sign_in()),

            (ActiveView::Upload(upload), Action::SelectFile(file)) => {
                upload.select(file, &mut ctx)?;
                None
            }
            (ActiveView::Upload(upload), Action::DiscardSelection) => {
                upload.discard(&mut ctx)?;
                None
            }
            (ActiveView::Upload(upload), Action::ContinueToEdit) => {
                upload.start_upload(&mut ctx)?;
                None
            }
            (ActiveView::Upload(upload), Action::CaptureFromCamera) => {
                upload.capture_from_camera(&mut ctx);
                None
            }

            (ActiveView::Edit(edit), Action::SetPrompt(text)) => {
                edit.set_prompt(text, &mut ctx)?;
                None
            }
            (ActiveView::Edit(edit), Action::ApplyPreset(preset)) => {
                edit.apply_preset(preset, &mut ctx)?;
                None
            }
            (ActiveView::Edit(edit), Action::ProcessImage) => {
                edit.process(&mut ctx)?;
                None
            }
            (ActiveView::Edit(edit), Action::ResetEdit) => {
                edit.reset(&mut ctx)?;
                None
            }
            (ActiveView::Edit(edit), Action::SaveEdit) => Some(edit.save(&mut ctx)?),

            (ActiveView::Result(result), Action::Download) => {
                result.download(&mut ctx);
                None
            }
            (ActiveView::Result(result), Action::EditAgain) => Some(result.edit_again()),

            (ActiveView::Gallery(gallery), Action::OpenGalleryItem(id)) => {
                gallery.open(&id, &mut ctx)?;
                None
            }
            (ActiveView::Gallery(gallery), Action::SortGallery) => {
                gallery.sort(&mut ctx);
                None
            }
            (ActiveView::Gallery(gallery), Action::BrowseUpload) => Some(gallery.browse_upload()),

            (ActiveView::Profile(profile), Action::SignInWithGoogle) => {
                profile.sign_in_with_google(&mut ctx)?;
                None
            }
            (ActiveView::Profile(profile), Action::SignInWithEmail) => {
                profile.sign_in_with_email(&mut ctx);
                None
            }
            (ActiveView::Profile(profile), Action::SignOut) => {
                profile.sign_out(&mut ctx);
                None
            }
            (ActiveView::Profile(profile), Action::EditProfile) => {
                profile.edit_profile(&mut ctx);
                None
            }
            (ActiveView::Profile(profile), Action::OpenSettings(item)) => {
                profile.open_settings(item, &mut ctx);
                None
            }

            (ActiveView::NotFound(not_found), Action::ReturnHome) => Some(not_found.go_home()),

            _ => {
                tracing::warn!(action = name, ?route, "action not available on this view");
                return Err(AppError::ActionUnavailable {
                    action: name,
                    route,
                });
            }
        };

        match transition {
            Some(transition) => self.apply(transition),
            None => Ok(()),
        }
    }

    /// Share the result through the platform share sheet
    pub async fn share(&mut self) -> AppResult<()> {
        let ActiveView::Result(result) = &self.view else {
            return Err(AppError::ActionUnavailable {
                action: "share",
                route: self.view.route(),
            });
        };

        let mut ctx = FlowContext::new(&mut self.scheduler, &mut self.platform, &self.config);
        result.share(&mut ctx).await?;
        Ok(())
    }

    /// Deliver a fired timer to the mounted view
    pub fn fire_timer(&mut self, id: TimerId) -> AppResult<()> {
        let mut ctx = FlowContext::new(&mut self.scheduler, &mut self.platform, &self.config);
        let transition = self.view.as_flow_mut().on_timer(id, &mut ctx)?;
        match transition {
            Some(transition) => self.apply(transition),
            None => Ok(()),
        }
    }

    fn apply(&mut self, transition: Transition) -> AppResult<()> {
        tracing::info!(
            from = ?self.route(),
            to = ?transition.route,
            handoff = transition.handoff.is_some(),
            "navigating"
        );
        self.history
            .navigate(StackEntry::new(transition.route), transition.handoff);
        self.mount()
    }

    /// Replace the mounted view with the one for the current history entry
    fn mount(&mut self) -> AppResult<()> {
        self.view.as_flow_mut().teardown(&mut self.scheduler);

        loop {
            let route = self.history.current_route();
            let mut handoff = self.history.take_handoff();
            if handoff.is_some() && !route.requires_handoff() {
                tracing::debug!(?route, "view takes no handoff, dropping it");
                handoff = None;
            }
            match ActiveView::build(self.history.current(), handoff) {
                Ok(view) => {
                    self.view = view;
                    return Ok(());
                }
                Err(Error::MissingHandoff { route, fallback }) => {
                    tracing::warn!(?route, ?fallback, "no handoff, redirecting");
                    self.history.replace(StackEntry::new(fallback), None);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl App<VirtualScheduler> {
    /// Move the virtual clock forward, firing every timer due on the way
    pub fn advance(&mut self, by: Duration) -> AppResult<()> {
        let target = self.scheduler.now() + by;
        while let Some(id) = self.scheduler.pop_due(target) {
            self.fire_timer(id)?;
        }
        self.scheduler.advance_to(target);
        Ok(())
    }

    /// Fire timers until none are pending
    pub fn run_until_idle(&mut self) -> AppResult<()> {
        while let Some(deadline) = self.scheduler.next_deadline() {
            if let Some(id) = self.scheduler.pop_due(deadline) {
                self.fire_timer(id)?;
            }
        }
        Ok(())
    }
}

impl App<TokioScheduler> {
    /// Wait for timers until none are outstanding
    pub async fn run_until_idle(&mut self) -> AppResult<()> {
        while let Some(id) = self.scheduler.next_fired().await {
            self.fire_timer(id)?;
        }
        Ok(())
    }
}
