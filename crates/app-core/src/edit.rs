//! Edit flow
//!
//! The editor needs the uploaded image; entered without it, the shell sends
//! the user back to the upload screen. The user writes an instruction (or
//! picks a preset, which overwrites it), submits it, waits out the simulated
//! processing delay and either saves the result or resets to try again.
//!
//! Processing is a mock: the "transformed" image is the original reference.

use app_state::TimerId;

use crate::flow::{Flow, FlowContext, Transition};
use crate::handoff::{Handoff, ResultHandoff};
use crate::media::ImageReference;
use crate::notify::Notice;
use crate::presets::PresetId;
use crate::route::Route;
use crate::{Error, Result};

/// Where the editor is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStage {
    /// Writing or choosing an instruction
    Composing,
    /// Waiting for the simulated transformation
    Processing,
    /// Transformed image ready to save
    Complete,
}

/// Edit screen
#[derive(Debug)]
pub struct EditFlow {
    image: ImageReference,
    prompt: String,
    /// Instruction as submitted; fixed until reset
    submitted: Option<String>,
    processed: Option<ImageReference>,
    stage: EditStage,
    timer: Option<TimerId>,
}

impl EditFlow {
    /// Enter the editor
    ///
    /// Fails with [`Error::MissingHandoff`] unless an editor handoff arrived.
    pub fn enter(handoff: Option<Handoff>) -> Result<Self> {
        let handoff = Handoff::expect_edit(handoff)?;
        Ok(Self {
            image: handoff.image_url,
            prompt: String::new(),
            submitted: None,
            processed: None,
            stage: EditStage::Composing,
            timer: None,
        })
    }

    /// Image being edited
    pub fn image(&self) -> &ImageReference {
        &self.image
    }

    /// Current instruction text
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Transformed image, once processing finished
    pub fn processed_image(&self) -> Option<&ImageReference> {
        self.processed.as_ref()
    }

    /// Image to show: the result if there is one, else the original
    pub fn preview(&self) -> &ImageReference {
        self.processed.as_ref().unwrap_or(&self.image)
    }

    /// Current stage
    pub fn stage(&self) -> EditStage {
        self.stage
    }

    /// Check whether processing is running
    pub fn is_processing(&self) -> bool {
        self.stage == EditStage::Processing
    }

    /// Replace the instruction text
    pub fn set_prompt(&mut self, text: impl Into<String>, ctx: &mut FlowContext<'_>) -> Result<()> {
        self.ensure_composing(ctx)?;
        self.prompt = text.into();
        Ok(())
    }

    /// Overwrite the instruction with a preset's text
    pub fn apply_preset(&mut self, preset: PresetId, ctx: &mut FlowContext<'_>) -> Result<()> {
        self.ensure_composing(ctx)?;
        self.prompt = preset.preset().prompt.to_string();
        tracing::debug!(%preset, "preset applied");
        Ok(())
    }

    /// Submit the instruction and start the simulated transformation
    pub fn process(&mut self, ctx: &mut FlowContext<'_>) -> Result<()> {
        self.ensure_composing(ctx)?;
        if self.prompt.trim().is_empty() {
            return Err(ctx.reject(Error::EmptyPrompt));
        }

        self.submitted = Some(self.prompt.clone());
        self.stage = EditStage::Processing;
        let delay = ctx.config.processing_delay();
        self.timer = Some(ctx.schedule(delay));
        tracing::info!(prompt = %self.prompt, image = %self.image, "processing started");
        Ok(())
    }

    /// Throw away the result and start over with an empty prompt
    pub fn reset(&mut self, ctx: &mut FlowContext<'_>) -> Result<()> {
        if self.is_processing() {
            return Err(ctx.reject(Error::Busy("Processing")));
        }

        self.processed = None;
        self.submitted = None;
        self.prompt.clear();
        self.stage = EditStage::Composing;
        Ok(())
    }

    /// Keep the result and move on to the result view
    pub fn save(&self, ctx: &mut FlowContext<'_>) -> Result<Transition> {
        let (Some(processed), Some(prompt)) = (&self.processed, &self.submitted) else {
            return Err(ctx.reject(Error::NoProcessedImage));
        };

        ctx.notify(Notice::success(
            "Image saved",
            "The image has been saved to your gallery",
        ));
        Ok(Transition::with_handoff(
            Route::Result,
            ResultHandoff {
                original_url: self.image.clone(),
                processed_url: processed.clone(),
                prompt: prompt.clone(),
            },
        ))
    }

    fn ensure_composing(&self, ctx: &FlowContext<'_>) -> Result<()> {
        match self.stage {
            EditStage::Composing => Ok(()),
            EditStage::Processing => Err(ctx.reject(Error::Busy("Processing"))),
            EditStage::Complete => Err(ctx.reject(Error::ResetRequired)),
        }
    }

    fn finish(&mut self, ctx: &mut FlowContext<'_>) {
        self.processed = Some(self.image.clone());
        self.stage = EditStage::Complete;
        tracing::info!(image = %self.image, "processing complete");
        ctx.notify(Notice::success(
            "Processing complete",
            "Your image has been successfully transformed!",
        ));
    }
}

impl Flow for EditFlow {
    fn route(&self) -> Route {
        Route::Edit
    }

    fn on_timer(&mut self, id: TimerId, ctx: &mut FlowContext<'_>) -> Result<Option<Transition>> {
        if self.timer == Some(id) {
            self.timer = None;
            self.finish(ctx);
        }
        Ok(None)
    }

    fn pending_timers(&self) -> Vec<TimerId> {
        self.timer.into_iter().collect()
    }
}
