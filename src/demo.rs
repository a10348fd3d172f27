//! Scripted session behind `imagify demo`.

use std::sync::Arc;

use anyhow::Context;
use app_core::{
    Error, ImageReference, PickedFile, Platform, ShareCapability, ShareError, SharePayload,
    TracingNotifier,
};
use app_state::{AppConfig, TokioScheduler};
use app_ui::{Action, App, AppError};
use async_trait::async_trait;

use crate::cli::DemoArgs;

/// Share sheet that only records the request in the log
pub struct LoggingShare;

#[async_trait]
impl ShareCapability for LoggingShare {
    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
        tracing::info!(title = %payload.title, url = %payload.url, "share sheet presented");
        Ok(())
    }
}

/// What a finished demo session produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSummary {
    pub original: ImageReference,
    pub processed: ImageReference,
    pub prompt: String,
    /// False when the platform had no share sheet
    pub shared: bool,
}

/// Walk one picked file through upload, edit and result on the tokio clock.
///
/// The preset always goes in first; `--prompt` then replaces its text.
/// A missing share sheet is reported in the summary, not as an error.
pub async fn run_demo(config: AppConfig, args: &DemoArgs) -> anyhow::Result<DemoSummary> {
    let mut platform = Platform::new(Arc::new(TracingNotifier));
    if !args.no_share {
        platform = platform.with_share(Arc::new(LoggingShare));
    }
    let mut app = App::new(TokioScheduler::new(), platform, config);

    app.dispatch(Action::UploadPhoto)?;
    app.dispatch(Action::SelectFile(PickedFile::new(
        args.file_name.as_str(),
        args.mime_type.as_str(),
        args.size,
    )))
    .context("file rejected")?;
    app.dispatch(Action::ContinueToEdit)?;
    app.run_until_idle().await?;

    app.dispatch(Action::ApplyPreset(args.preset))?;
    if let Some(prompt) = &args.prompt {
        app.dispatch(Action::SetPrompt(prompt.clone()))?;
    }
    app.dispatch(Action::ProcessImage)
        .context("nothing to apply")?;
    app.run_until_idle().await?;
    app.dispatch(Action::SaveEdit)?;

    let result = app.result().context("no result after saving")?;
    let mut summary = DemoSummary {
        original: result.original().clone(),
        processed: result.processed().clone(),
        prompt: result.prompt().to_string(),
        shared: false,
    };
    tracing::debug!(prompt = %summary.prompt, "demo result ready");

    app.dispatch(Action::Download)?;
    summary.shared = match app.share().await {
        Ok(()) => true,
        Err(AppError::Flow(Error::ShareUnavailable)) => false,
        Err(err) => return Err(err.into()),
    };
    Ok(summary)
}
