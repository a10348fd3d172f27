//! Typed handoffs between flows
//!
//! A handoff rides along with a single navigation and is consumed by the view
//! that navigation lands on. It is never persisted and never encoded into the
//! URL, so reloading or moving through history arrives without one.

use crate::media::ImageReference;
use crate::route::Route;
use crate::{Error, Result};

/// Payload attached to a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handoff {
    /// Uploaded image, for the editor
    Edit(EditHandoff),
    /// Finished transformation, for the result view
    Result(ResultHandoff),
}

/// Input the editor needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditHandoff {
    /// Image to edit
    pub image_url: ImageReference,
}

/// Input the result view needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultHandoff {
    /// Image before the transformation
    pub original_url: ImageReference,
    /// Image after the transformation
    pub processed_url: ImageReference,
    /// Instruction that produced it
    pub prompt: String,
}

impl Handoff {
    /// Require an editor handoff, falling back to the upload view
    pub fn expect_edit(handoff: Option<Handoff>) -> Result<EditHandoff> {
        match handoff {
            Some(Handoff::Edit(edit)) => Ok(edit),
            _ => Err(Error::MissingHandoff {
                route: Route::Edit,
                fallback: Route::Upload,
            }),
        }
    }

    /// Require a result handoff, falling back to the upload view
    pub fn expect_result(handoff: Option<Handoff>) -> Result<ResultHandoff> {
        match handoff {
            Some(Handoff::Result(result)) => Ok(result),
            _ => Err(Error::MissingHandoff {
                route: Route::Result,
                fallback: Route::Upload,
            }),
        }
    }
}

impl From<EditHandoff> for Handoff {
    fn from(handoff: EditHandoff) -> Self {
        Handoff::Edit(handoff)
    }
}

impl From<ResultHandoff> for Handoff {
    fn from(handoff: ResultHandoff) -> Self {
        Handoff::Result(handoff)
    }
}
