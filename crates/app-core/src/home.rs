//! Home and not-found flows

use crate::flow::{Flow, FlowContext, Transition};
use crate::notify::Notice;
use crate::route::Route;

/// Landing screen
#[derive(Debug, Default)]
pub struct HomeFlow;

impl HomeFlow {
    /// Create the landing screen
    pub fn new() -> Self {
        Self
    }

    /// "Upload Photo"
    pub fn start_upload(&self) -> Transition {
        Transition::to(Route::Upload)
    }

    /// Search is not offered yet
    pub fn search(&self, ctx: &mut FlowContext<'_>) {
        ctx.notify(Notice::info(
            "Coming soon",
            "Search functionality will be available in a future update.",
        ));
    }

    /// "Sign in" banner
    pub fn sign_in(&self) -> Transition {
        Transition::to(Route::Profile)
    }
}

impl Flow for HomeFlow {
    fn route(&self) -> Route {
        Route::Home
    }
}

/// Shown for paths that match no view
#[derive(Debug)]
pub struct NotFoundFlow {
    path: String,
}

impl NotFoundFlow {
    /// Record the unmatched path
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        tracing::warn!(%path, "404: user attempted to access a non-existent route");
        Self { path }
    }

    /// Path that failed to match
    pub fn path(&self) -> &str {
        &self.path
    }

    /// "Return Home"
    pub fn go_home(&self) -> Transition {
        Transition::to(Route::Home)
    }
}

impl Flow for NotFoundFlow {
    fn route(&self) -> Route {
        Route::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::test_support::Harness;

    #[test]
    fn test_home_actions() {
        let home = HomeFlow::new();
        assert_eq!(home.start_upload(), Transition::to(Route::Upload));
        assert_eq!(home.sign_in(), Transition::to(Route::Profile));
    }

    #[test]
    fn test_search_coming_soon() {
        let mut h = Harness::new();
        HomeFlow::new().search(&mut h.ctx());
        assert_eq!(h.notifier.last().unwrap().title, "Coming soon");
    }

    #[test]
    fn test_not_found_keeps_path() {
        let flow = NotFoundFlow::new("/missing/page");
        assert_eq!(flow.path(), "/missing/page");
        assert_eq!(flow.go_home().route, Route::Home);
    }
}
