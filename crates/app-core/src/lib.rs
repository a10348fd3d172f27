//! Core application logic for Imagify
//!
//! This crate contains the headless flows behind each screen (upload, edit,
//! result, gallery, profile, home), the typed handoffs passed between them,
//! and the platform capabilities they are given (notifier, object URLs,
//! sharing, progress jitter).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod edit;
pub mod flow;
pub mod gallery;
pub mod handoff;
pub mod home;
pub mod media;
pub mod notify;
pub mod presets;
pub mod profile;
pub mod progress;
pub mod result;
pub mod route;
pub mod share;
pub mod upload;

pub use edit::{EditFlow, EditStage};
pub use flow::{Flow, FlowContext, Platform, Transition};
pub use gallery::{GalleryFlow, GalleryItem};
pub use handoff::{EditHandoff, Handoff, ResultHandoff};
pub use home::{HomeFlow, NotFoundFlow};
pub use media::{BlobUrlProvider, ImageReference, ObjectUrlProvider, PickedFile};
pub use notify::{Notice, NoticeKind, Notifier, RecordingNotifier, TracingNotifier};
pub use presets::{Preset, PresetId, PRESETS};
pub use profile::{ProfileFlow, ProfileSummary, SettingsItem};
pub use progress::{FixedProgress, ProgressSource, RandomProgress};
pub use result::ResultFlow;
pub use route::Route;
pub use share::{ShareCapability, ShareError, SharePayload};
pub use upload::{UploadFlow, UploadState};

/// Result type for flow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by flow actions
///
/// Every error is recoverable. User-facing ones map to a [`Notice`] through
/// [`Error::notice`]; [`Error::MissingHandoff`] is handled by redirecting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Picked file is not an image
    #[error("Invalid file type: {mime_type}")]
    InvalidFileType {
        /// MIME type reported by the picker
        mime_type: String,
    },

    /// Picked file exceeds the upload limit
    #[error("File size {size} exceeds maximum {max}")]
    FileTooLarge {
        /// Actual file size in bytes
        size: u64,
        /// Maximum allowed size in bytes
        max: u64,
    },

    /// Transformation requested with a blank instruction
    #[error("Transformation prompt is empty")]
    EmptyPrompt,

    /// A view was entered without the handoff it requires
    #[error("{route:?} requires a handoff; redirecting to {fallback:?}")]
    MissingHandoff {
        /// View that was entered
        route: Route,
        /// View that produces the missing input
        fallback: Route,
    },

    /// No share capability on this platform
    #[error("Sharing is not available")]
    ShareUnavailable,

    /// The share capability rejected the request
    #[error("Sharing failed: {0}")]
    ShareFailed(String),

    /// Upload requested with no image selected
    #[error("No image selected")]
    NoSelection,

    /// Save requested before processing finished
    #[error("No processed image to save")]
    NoProcessedImage,

    /// Action conflicts with work still in progress
    #[error("{0} is still in progress")]
    Busy(&'static str),

    /// Editor input while a finished result is showing
    #[error("Reset before editing the prompt")]
    ResetRequired,

    /// Gallery item id does not exist
    #[error("Unknown gallery item: {0}")]
    UnknownGalleryItem(String),
}

impl Error {
    /// The notice shown to the user for this error, if any
    pub fn notice(&self) -> Option<Notice> {
        let notice = match self {
            Error::InvalidFileType { .. } => Notice::error(
                "Invalid file type",
                "Please select an image file (JPEG, PNG, etc.)",
            ),
            Error::FileTooLarge { max, .. } => Notice::error(
                "File too large",
                format!("Please select an image smaller than {}MB", max / (1024 * 1024)),
            ),
            Error::EmptyPrompt => Notice::error(
                "Empty prompt",
                "Please enter a description or select a filter",
            ),
            Error::MissingHandoff { .. } => return None,
            Error::ShareUnavailable => Notice::info(
                "Sharing not available",
                "This device does not support the share functionality",
            ),
            Error::ShareFailed(_) => Notice::error(
                "Sharing failed",
                "Could not share the image. Try downloading it instead.",
            ),
            Error::NoSelection => {
                Notice::error("No image selected", "Select an image before continuing")
            }
            Error::NoProcessedImage => {
                Notice::error("Nothing to save", "Apply a transformation before saving")
            }
            Error::Busy(what) => {
                Notice::info("Please wait", format!("{} is still in progress", what))
            }
            Error::ResetRequired => Notice::info(
                "Result ready",
                "Tap Try Again before editing the prompt",
            ),
            Error::UnknownGalleryItem(_) => {
                Notice::error("Image not found", "This image is no longer in your gallery")
            }
        };
        Some(notice)
    }
}
