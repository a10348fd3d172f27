//! Upload flow
//!
//! ```text
//! Empty --select--> Selected --start_upload--> Uploading --settle--> Done
//!   ^                  |
//!   +-----discard------+
//! ```
//!
//! Uploading is simulated: every tick adds a random increment below the
//! configured maximum until the total would pass 100, at which point progress
//! is pinned to 100, ticking stops, and after a short settle delay the flow
//! hands the image to the editor. The simulated upload never fails and cannot
//! be cancelled by the user.

use app_state::TimerId;

use crate::flow::{Flow, FlowContext, Transition};
use crate::handoff::EditHandoff;
use crate::media::{ImageReference, PickedFile};
use crate::notify::Notice;
use crate::route::Route;
use crate::{Error, Result};

/// Progress value at which the upload is complete
pub const COMPLETE_PROGRESS: f64 = 100.0;

/// Upload session state
#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    /// Nothing selected
    Empty,
    /// Image chosen, upload not started
    Selected {
        /// Chosen image
        image: ImageReference,
    },
    /// Simulated transfer running
    Uploading {
        /// Image being uploaded
        image: ImageReference,
        /// Percent complete, 0 to 100
        progress: f64,
    },
    /// Transfer finished; the editor has been requested
    Done {
        /// Uploaded image
        image: ImageReference,
    },
}

/// Which timer the flow is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadTimer {
    Tick(TimerId),
    Settle(TimerId),
}

impl UploadTimer {
    fn id(&self) -> TimerId {
        match self {
            UploadTimer::Tick(id) | UploadTimer::Settle(id) => *id,
        }
    }
}

/// Upload screen
#[derive(Debug)]
pub struct UploadFlow {
    state: UploadState,
    timer: Option<UploadTimer>,
}

impl Default for UploadFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadFlow {
    /// Start with nothing selected
    pub fn new() -> Self {
        Self {
            state: UploadState::Empty,
            timer: None,
        }
    }

    /// Current state
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Currently held image, if any
    pub fn selected_image(&self) -> Option<&ImageReference> {
        match &self.state {
            UploadState::Empty => None,
            UploadState::Selected { image }
            | UploadState::Uploading { image, .. }
            | UploadState::Done { image } => Some(image),
        }
    }

    /// Upload progress in percent (0 until uploading starts)
    pub fn progress(&self) -> f64 {
        match &self.state {
            UploadState::Uploading { progress, .. } => *progress,
            UploadState::Done { .. } => COMPLETE_PROGRESS,
            _ => 0.0,
        }
    }

    /// Check whether the simulated transfer is running
    pub fn is_uploading(&self) -> bool {
        matches!(self.state, UploadState::Uploading { .. })
    }

    /// Accept a picked file
    ///
    /// Rejected files leave the state untouched. Picking again while an image
    /// is selected replaces it.
    pub fn select(&mut self, file: PickedFile, ctx: &mut FlowContext<'_>) -> Result<()> {
        if matches!(self.state, UploadState::Uploading { .. } | UploadState::Done { .. }) {
            return Err(ctx.reject(Error::Busy("Upload")));
        }

        file.validate(ctx.config.max_upload_bytes)
            .map_err(|e| ctx.reject(e))?;

        let image = ctx.platform.object_urls.create(&file);
        tracing::debug!(file = %file.name, size = file.size, %image, "image selected");
        self.state = UploadState::Selected { image };
        Ok(())
    }

    /// Drop the current selection
    pub fn discard(&mut self, ctx: &mut FlowContext<'_>) -> Result<()> {
        match self.state {
            UploadState::Uploading { .. } | UploadState::Done { .. } => {
                Err(ctx.reject(Error::Busy("Upload")))
            }
            _ => {
                self.state = UploadState::Empty;
                Ok(())
            }
        }
    }

    /// Begin the simulated transfer
    pub fn start_upload(&mut self, ctx: &mut FlowContext<'_>) -> Result<()> {
        let image = match &self.state {
            UploadState::Selected { image } => image.clone(),
            UploadState::Empty => return Err(ctx.reject(Error::NoSelection)),
            UploadState::Uploading { .. } | UploadState::Done { .. } => {
                return Err(ctx.reject(Error::Busy("Upload")))
            }
        };

        tracing::debug!(%image, "upload started");
        self.state = UploadState::Uploading {
            image,
            progress: 0.0,
        };
        let tick = ctx.config.upload_tick();
        self.timer = Some(UploadTimer::Tick(ctx.schedule(tick)));
        Ok(())
    }

    /// Camera capture is not offered yet
    pub fn capture_from_camera(&self, ctx: &mut FlowContext<'_>) {
        ctx.notify(Notice::info(
            "Camera access",
            "Camera functionality will be implemented in a future update.",
        ));
    }

    fn tick(&mut self, ctx: &mut FlowContext<'_>) {
        let UploadState::Uploading { progress, .. } = &mut self.state else {
            return;
        };

        let max_step = ctx.config.max_progress_increment;
        let step = ctx.platform.progress.next_increment(max_step);
        *progress += step;

        if *progress > COMPLETE_PROGRESS {
            *progress = COMPLETE_PROGRESS;
            tracing::debug!("upload reached 100%");
            let settle = ctx.config.upload_settle();
            self.timer = Some(UploadTimer::Settle(ctx.schedule(settle)));
        } else {
            tracing::trace!(progress = *progress, "upload progress");
            let tick = ctx.config.upload_tick();
            self.timer = Some(UploadTimer::Tick(ctx.schedule(tick)));
        }
    }

    fn settle(&mut self) -> Option<Transition> {
        let UploadState::Uploading { image, .. } = &self.state else {
            return None;
        };

        let image = image.clone();
        self.state = UploadState::Done {
            image: image.clone(),
        };
        tracing::info!(%image, "upload complete");
        Some(Transition::with_handoff(
            Route::Edit,
            EditHandoff { image_url: image },
        ))
    }
}

impl Flow for UploadFlow {
    fn route(&self) -> Route {
        Route::Upload
    }

    fn on_timer(&mut self, id: TimerId, ctx: &mut FlowContext<'_>) -> Result<Option<Transition>> {
        match self.timer {
            Some(UploadTimer::Tick(own)) if own == id => {
                self.timer = None;
                self.tick(ctx);
                Ok(None)
            }
            Some(UploadTimer::Settle(own)) if own == id => {
                self.timer = None;
                Ok(self.settle())
            }
            _ => Ok(None),
        }
    }

    fn pending_timers(&self) -> Vec<TimerId> {
        self.timer.iter().map(UploadTimer::id).collect()
    }
}
