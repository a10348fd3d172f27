//! Logical views of the app

use serde::{Deserialize, Serialize};

/// All views the app can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Landing screen
    #[default]
    Home,
    /// Pick and upload an image
    Upload,
    /// Describe and apply a transformation
    Edit,
    /// Before/after review with download and share
    Result,
    /// Previously edited images
    Gallery,
    /// Account and settings
    Profile,
    /// Catch-all for unknown paths
    NotFound,
}

impl Route {
    /// Get the URL path for this route
    pub fn to_path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Upload => "/upload",
            Route::Edit => "/edit",
            Route::Result => "/result",
            Route::Gallery => "/gallery",
            Route::Profile => "/profile",
            Route::NotFound => "/not-found",
        }
    }

    /// Check if this route needs a handoff from the previous step
    pub fn requires_handoff(&self) -> bool {
        matches!(self, Route::Edit | Route::Result)
    }

    /// Get all routes reachable by path
    pub fn all() -> [Route; 6] {
        [
            Route::Home,
            Route::Upload,
            Route::Edit,
            Route::Result,
            Route::Gallery,
            Route::Profile,
        ]
    }
}
