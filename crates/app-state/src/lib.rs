//! Application state plumbing for Imagify
//!
//! This crate provides the timer scheduler every simulated delay runs on
//! (a deterministic virtual clock for tests and a tokio-backed scheduler for
//! the real runtime) and the runtime configuration shared by all flows.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod runtime;
pub mod scheduler;

pub use config::{AppConfig, ConfigError};
pub use runtime::TokioScheduler;
pub use scheduler::{Scheduler, TimerId, VirtualScheduler};
