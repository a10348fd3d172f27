//! Result flow
//!
//! Shows the before/after pair handed over by the editor and offers download,
//! share and "edit again". Entered without a result handoff, the shell
//! redirects to the upload screen.

use crate::flow::{Flow, FlowContext, Transition};
use crate::handoff::{Handoff, ResultHandoff};
use crate::media::ImageReference;
use crate::notify::Notice;
use crate::route::Route;
use crate::share::SharePayload;
use crate::{Error, Result};

/// Title used for shared images
pub const SHARE_TITLE: &str = "My AI-edited image";

/// Message used for shared images
pub const SHARE_TEXT: &str = "Check out this image I created with AI!";

/// Result screen
#[derive(Debug)]
pub struct ResultFlow {
    result: ResultHandoff,
}

impl ResultFlow {
    /// Enter the result view
    ///
    /// Fails with [`Error::MissingHandoff`] unless a result handoff arrived.
    pub fn enter(handoff: Option<Handoff>) -> Result<Self> {
        let result = Handoff::expect_result(handoff)?;
        Ok(Self { result })
    }

    /// Image before the transformation
    pub fn original(&self) -> &ImageReference {
        &self.result.original_url
    }

    /// Image after the transformation
    pub fn processed(&self) -> &ImageReference {
        &self.result.processed_url
    }

    /// Instruction that produced the result
    pub fn prompt(&self) -> &str {
        &self.result.prompt
    }

    /// Start a download
    ///
    /// Only the notice is produced; no file is written.
    pub fn download(&self, ctx: &mut FlowContext<'_>) {
        tracing::info!(image = %self.result.processed_url, "download requested");
        ctx.notify(Notice::success(
            "Download started",
            "Your image is being downloaded",
        ));
    }

    /// Hand the result to the platform share sheet
    pub async fn share(&self, ctx: &mut FlowContext<'_>) -> Result<()> {
        let Some(share) = ctx.platform.share.clone() else {
            return Err(ctx.reject(Error::ShareUnavailable));
        };

        let payload = SharePayload {
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
            url: ctx.config.share_url.clone(),
        };

        match share.share(&payload).await {
            Ok(()) => {
                tracing::info!(url = %payload.url, "shared successfully");
                Ok(())
            }
            Err(e) => Err(ctx.reject(Error::ShareFailed(e.to_string()))),
        }
    }

    /// Go back to the upload screen, dropping this result
    pub fn edit_again(&self) -> Transition {
        Transition::to(Route::Upload)
    }
}

impl Flow for ResultFlow {
    fn route(&self) -> Route {
        Route::Result
    }
}
