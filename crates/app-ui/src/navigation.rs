//! Navigation system for Imagify
//!
//! This module provides:
//! - Path routing with a catch-all for unknown paths
//! - Bottom navigation tabs
//! - Session history (back/forward) with one-shot handoffs
//!
//! Handoffs live only in memory and only until the destination view takes
//! them. Moving through history or reloading never brings one back, so views
//! that require input fall back to the step that produces it.

use app_core::{Handoff, Route};
use serde::{Deserialize, Serialize};

// =============================================================================
// Navigation Tabs
// =============================================================================

/// Bottom navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationTab {
    /// Home tab
    #[default]
    Home,
    /// Upload tab
    Upload,
    /// Gallery tab
    Gallery,
    /// Profile tab
    Profile,
}

impl NavigationTab {
    /// Get the root route for this tab
    pub fn root_route(&self) -> Route {
        match self {
            NavigationTab::Home => Route::Home,
            NavigationTab::Upload => Route::Upload,
            NavigationTab::Gallery => Route::Gallery,
            NavigationTab::Profile => Route::Profile,
        }
    }

    /// Tab highlighted while `route` is showing
    pub fn for_route(route: Route) -> Option<NavigationTab> {
        Self::all().into_iter().find(|tab| tab.root_route() == route)
    }

    /// Get all tabs in order
    pub fn all() -> [NavigationTab; 4] {
        [
            NavigationTab::Home,
            NavigationTab::Upload,
            NavigationTab::Gallery,
            NavigationTab::Profile,
        ]
    }
}

// =============================================================================
// Session History
// =============================================================================

/// A history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    /// Resolved route
    pub route: Route,
    /// Path as requested
    pub path: String,
}

impl StackEntry {
    /// Entry for a route at its canonical path
    pub fn new(route: Route) -> Self {
        Self {
            route,
            path: route.to_path().to_string(),
        }
    }

    /// Entry for a route reached through a specific path
    pub fn with_path(route: Route, path: impl Into<String>) -> Self {
        Self {
            route,
            path: path.into(),
        }
    }
}

/// Session history with a one-shot handoff slot
#[derive(Debug, Clone)]
pub struct NavigationState {
    /// Entries behind the current one (oldest first)
    back: Vec<StackEntry>,
    /// Entry being shown
    current: StackEntry,
    /// Entries ahead of the current one (nearest last)
    forward: Vec<StackEntry>,
    /// Handoff waiting for the current entry's view
    handoff: Option<Handoff>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(StackEntry::new(Route::Home))
    }
}

impl NavigationState {
    /// Create a history starting at `entry`
    pub fn new(entry: StackEntry) -> Self {
        Self {
            back: Vec::new(),
            current: entry,
            forward: Vec::new(),
            handoff: None,
        }
    }

    /// Current entry
    pub fn current(&self) -> &StackEntry {
        &self.current
    }

    /// Current route
    pub fn current_route(&self) -> Route {
        self.current.route
    }

    /// Push a new entry, optionally carrying a handoff
    ///
    /// Clears the forward history.
    pub fn navigate(&mut self, entry: StackEntry, handoff: Option<Handoff>) {
        let previous = std::mem::replace(&mut self.current, entry);
        self.back.push(previous);
        self.forward.clear();
        self.handoff = handoff;
    }

    /// Swap the current entry without growing the history
    pub fn replace(&mut self, entry: StackEntry, handoff: Option<Handoff>) {
        self.current = entry;
        self.handoff = handoff;
    }

    /// Step back (returns false if there is nothing behind)
    pub fn go_back(&mut self) -> bool {
        match self.back.pop() {
            Some(entry) => {
                let previous = std::mem::replace(&mut self.current, entry);
                self.forward.push(previous);
                self.handoff = None;
                true
            }
            None => false,
        }
    }

    /// Step forward (returns false if there is nothing ahead)
    pub fn go_forward(&mut self) -> bool {
        match self.forward.pop() {
            Some(entry) => {
                let previous = std::mem::replace(&mut self.current, entry);
                self.back.push(previous);
                self.handoff = None;
                true
            }
            None => false,
        }
    }

    /// Reload the current entry; any untaken handoff is lost
    pub fn reload(&mut self) {
        self.handoff = None;
    }

    /// Take the handoff for the current entry
    ///
    /// Returns it at most once.
    pub fn take_handoff(&mut self) -> Option<Handoff> {
        self.handoff.take()
    }

    /// Check whether a handoff is waiting
    pub fn has_handoff(&self) -> bool {
        self.handoff.is_some()
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    /// Check if we can go forward
    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Number of entries up to and including the current one
    pub fn depth(&self) -> usize {
        self.back.len() + 1
    }
}

// =============================================================================
// Router
// =============================================================================

/// Route pattern for matching
struct RoutePattern {
    /// Pattern segments
    segments: Vec<String>,
    /// Route this pattern resolves to
    route: Route,
}

/// URL Router for parsing paths to routes
pub struct Router {
    /// Route patterns
    patterns: Vec<RoutePattern>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a new router with all routes
    pub fn new() -> Self {
        let mut router = Self {
            patterns: Vec::new(),
        };

        for route in Route::all() {
            router.add_route(route.to_path(), route);
        }

        router
    }

    /// Add a route pattern
    fn add_route(&mut self, pattern: &str, route: Route) {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        self.patterns.push(RoutePattern { segments, route });
    }

    /// Match a path to a route
    ///
    /// Query strings and fragments are ignored; unknown paths resolve to
    /// [`Route::NotFound`].
    pub fn match_path(&self, path: &str) -> Route {
        let pathname = path.split(['?', '#']).next().unwrap_or_default();
        let path_segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

        self.patterns
            .iter()
            .find(|pattern| {
                pattern.segments.len() == path_segments.len()
                    && pattern
                        .segments
                        .iter()
                        .zip(&path_segments)
                        .all(|(expected, actual)| expected == actual)
            })
            .map(|pattern| pattern.route)
            .unwrap_or(Route::NotFound)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::{EditHandoff, ImageReference};

    fn edit_handoff() -> Handoff {
        Handoff::Edit(EditHandoff {
            image_url: ImageReference::new("blob:imagify/x"),
        })
    }

    #[test]
    fn test_router_match_known_paths() {
        let router = Router::new();
        assert_eq!(router.match_path("/"), Route::Home);
        assert_eq!(router.match_path("/upload"), Route::Upload);
        assert_eq!(router.match_path("/edit"), Route::Edit);
        assert_eq!(router.match_path("/result"), Route::Result);
        assert_eq!(router.match_path("/gallery"), Route::Gallery);
        assert_eq!(router.match_path("/profile"), Route::Profile);
    }

    #[test]
    fn test_router_ignores_query_and_trailing_slash() {
        let router = Router::new();
        assert_eq!(router.match_path("/upload/"), Route::Upload);
        assert_eq!(router.match_path("/gallery?sort=recent"), Route::Gallery);
        assert_eq!(router.match_path("/?utm=x"), Route::Home);
        assert_eq!(router.match_path("/profile#settings"), Route::Profile);
    }

    #[test]
    fn test_router_not_found() {
        let router = Router::new();
        assert_eq!(router.match_path("/nonexistent/path"), Route::NotFound);
        assert_eq!(router.match_path("/upload/extra"), Route::NotFound);
        assert_eq!(router.match_path("/Upload"), Route::NotFound);
    }

    #[test]
    fn test_tab_for_route() {
        assert_eq!(NavigationTab::for_route(Route::Gallery), Some(NavigationTab::Gallery));
        assert_eq!(NavigationTab::for_route(Route::Edit), None);
        assert_eq!(NavigationTab::for_route(Route::Result), None);
    }

    #[test]
    fn test_handoff_taken_once() {
        let mut state = NavigationState::default();
        state.navigate(StackEntry::new(Route::Edit), Some(edit_handoff()));

        assert!(state.has_handoff());
        assert_eq!(state.take_handoff(), Some(edit_handoff()));
        assert_eq!(state.take_handoff(), None);
    }

    #[test]
    fn test_reload_drops_handoff() {
        let mut state = NavigationState::default();
        state.navigate(StackEntry::new(Route::Edit), Some(edit_handoff()));
        state.reload();
        assert_eq!(state.take_handoff(), None);
        assert_eq!(state.current_route(), Route::Edit);
    }

    #[test]
    fn test_back_and_forward() {
        let mut state = NavigationState::default();
        assert!(!state.can_go_back());

        state.navigate(StackEntry::new(Route::Upload), None);
        state.navigate(StackEntry::new(Route::Edit), Some(edit_handoff()));
        assert_eq!(state.depth(), 3);

        assert!(state.go_back());
        assert_eq!(state.current_route(), Route::Upload);
        assert!(state.can_go_forward());

        assert!(state.go_forward());
        assert_eq!(state.current_route(), Route::Edit);
        assert_eq!(state.take_handoff(), None);
        assert!(!state.go_forward());
    }

    #[test]
    fn test_navigate_clears_forward() {
        let mut state = NavigationState::default();
        state.navigate(StackEntry::new(Route::Gallery), None);
        state.go_back();
        state.navigate(StackEntry::new(Route::Profile), None);
        assert!(!state.can_go_forward());
    }

    #[test]
    fn test_replace_keeps_depth() {
        let mut state = NavigationState::default();
        state.navigate(StackEntry::new(Route::Edit), None);
        state.replace(StackEntry::new(Route::Upload), None);

        assert_eq!(state.depth(), 2);
        assert_eq!(state.current_route(), Route::Upload);
        assert!(state.go_back());
        assert_eq!(state.current_route(), Route::Home);
    }

    #[test]
    fn test_entry_keeps_requested_path() {
        let entry = StackEntry::with_path(Route::NotFound, "/nope");
        assert_eq!(entry.path, "/nope");
        assert_eq!(StackEntry::new(Route::Gallery).path, "/gallery");
    }

    #[test]
    fn test_tab_serialization() {
        let json = serde_json::to_string(&NavigationTab::Gallery).unwrap();
        assert_eq!(json, "\"gallery\"");
    }
}
