//! Application shell for Imagify
//!
//! This crate wires the headless flows from `app_core` into a running app:
//! path routing, session history with one-shot handoffs, bottom navigation,
//! and the [`App`] that owns the active view and delivers actions and timers
//! to it.
//!
//! # Modules
//!
//! - [`navigation`] - Router, tabs and session history
//! - [`shell`] - The application shell
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use app_core::{Platform, Route, TracingNotifier};
//! use app_state::{AppConfig, VirtualScheduler};
//! use app_ui::App;
//!
//! let platform = Platform::new(Arc::new(TracingNotifier));
//! let mut app = App::new(VirtualScheduler::new(), platform, AppConfig::default());
//!
//! // Entering the editor directly has nothing to edit
//! app.open("/edit").unwrap();
//! assert_eq!(app.route(), Route::Upload);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod navigation;
pub mod shell;

pub use navigation::{NavigationState, NavigationTab, Router, StackEntry};
pub use shell::{Action, ActiveView, App, AppError, AppResult};
