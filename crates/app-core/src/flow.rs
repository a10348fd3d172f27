//! Shared flow plumbing
//!
//! A flow is the headless model of one screen. User actions are inherent
//! methods on each flow; timers come back through [`Flow::on_timer`]. Any
//! action may ask to leave the screen by returning a [`Transition`], which the
//! shell carries out.

use app_state::{AppConfig, Scheduler, TimerId};
use std::sync::Arc;
use std::time::Duration;

use crate::handoff::Handoff;
use crate::media::{BlobUrlProvider, ObjectUrlProvider};
use crate::notify::{Notice, Notifier};
use crate::progress::{ProgressSource, RandomProgress};
use crate::route::Route;
use crate::share::ShareCapability;
use crate::{Error, Result};

/// Request to move to another view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Destination
    pub route: Route,
    /// Payload for the destination, consumed on arrival
    pub handoff: Option<Handoff>,
}

impl Transition {
    /// Navigate without a handoff
    pub fn to(route: Route) -> Self {
        Self {
            route,
            handoff: None,
        }
    }

    /// Navigate carrying a handoff
    pub fn with_handoff(route: Route, handoff: impl Into<Handoff>) -> Self {
        Self {
            route,
            handoff: Some(handoff.into()),
        }
    }
}

/// Capabilities supplied by the host platform
pub struct Platform {
    /// Notice sink
    pub notifier: Arc<dyn Notifier>,
    /// Object URL minting
    pub object_urls: Arc<dyn ObjectUrlProvider>,
    /// Share sheet, if the platform has one
    pub share: Option<Arc<dyn ShareCapability>>,
    /// Upload progress jitter
    pub progress: Box<dyn ProgressSource>,
}

impl Platform {
    /// Platform with blob URLs, random progress and no share sheet
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            object_urls: Arc::new(BlobUrlProvider),
            share: None,
            progress: Box::new(RandomProgress),
        }
    }

    /// Provide a share capability
    pub fn with_share(mut self, share: Arc<dyn ShareCapability>) -> Self {
        self.share = Some(share);
        self
    }

    /// Replace the object URL provider
    pub fn with_object_urls(mut self, object_urls: Arc<dyn ObjectUrlProvider>) -> Self {
        self.object_urls = object_urls;
        self
    }

    /// Replace the progress source
    pub fn with_progress(mut self, progress: impl ProgressSource + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }
}

/// Everything a flow may touch while handling an event
pub struct FlowContext<'a> {
    /// Timer scheduling
    pub scheduler: &'a mut dyn Scheduler,
    /// Platform capabilities
    pub platform: &'a mut Platform,
    /// Timings and limits
    pub config: &'a AppConfig,
}

impl<'a> FlowContext<'a> {
    /// Bundle the pieces for one event
    pub fn new(
        scheduler: &'a mut dyn Scheduler,
        platform: &'a mut Platform,
        config: &'a AppConfig,
    ) -> Self {
        Self {
            scheduler,
            platform,
            config,
        }
    }

    /// Show a notice
    pub fn notify(&self, notice: Notice) {
        self.platform.notifier.notify(notice);
    }

    /// Report a rejected action and hand the error back
    pub fn reject(&self, error: Error) -> Error {
        tracing::warn!(%error, "action rejected");
        if let Some(notice) = error.notice() {
            self.notify(notice);
        }
        error
    }

    /// Schedule a one-shot timer
    pub fn schedule(&mut self, delay: Duration) -> TimerId {
        self.scheduler.schedule(delay)
    }
}

/// Behaviour shared by every flow
pub trait Flow {
    /// The view this flow backs
    fn route(&self) -> Route;

    /// Handle a fired timer
    ///
    /// Ids the flow does not own are ignored.
    fn on_timer(&mut self, _id: TimerId, _ctx: &mut FlowContext<'_>) -> Result<Option<Transition>> {
        Ok(None)
    }

    /// Timers this flow is waiting on
    fn pending_timers(&self) -> Vec<TimerId> {
        Vec::new()
    }

    /// Cancel outstanding timers before the view goes away
    fn teardown(&mut self, scheduler: &mut dyn Scheduler) {
        for id in self.pending_timers() {
            if scheduler.cancel(id) {
                tracing::debug!(route = ?self.route(), %id, "cancelled timer on teardown");
            }
        }
    }
}
