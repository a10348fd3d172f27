//! Picked files and image references
//!
//! The core never reads image bytes. A picked file is judged only by the MIME
//! type and size the picker reports, and once accepted it is represented by an
//! opaque [`ImageReference`] minted by the platform's [`ObjectUrlProvider`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// MIME prefix every accepted file must carry
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Opaque handle to image bytes held by the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageReference(String);

impl ImageReference {
    /// Wrap an existing URL
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Get the URL string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File as reported by the local file picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    /// File name
    pub name: String,
    /// MIME type
    pub mime_type: String,
    /// Size in bytes
    pub size: u64,
}

impl PickedFile {
    /// Create a picked file description
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }

    /// Check the file can be uploaded
    ///
    /// The type check runs first, so an oversized non-image reports
    /// [`Error::InvalidFileType`].
    pub fn validate(&self, max_size: u64) -> Result<()> {
        if !self.mime_type.starts_with(IMAGE_MIME_PREFIX) {
            return Err(Error::InvalidFileType {
                mime_type: self.mime_type.clone(),
            });
        }

        if self.size > max_size {
            return Err(Error::FileTooLarge {
                size: self.size,
                max: max_size,
            });
        }

        Ok(())
    }
}

/// Turns picked files into dereferenceable handles
///
/// Revoking handles is the caller's business and is not modelled.
pub trait ObjectUrlProvider: Send + Sync {
    /// Create a handle for a picked file
    fn create(&self, file: &PickedFile) -> ImageReference;
}

/// Mints `blob:imagify/<uuid>` handles
#[derive(Debug, Clone, Default)]
pub struct BlobUrlProvider;

impl ObjectUrlProvider for BlobUrlProvider {
    fn create(&self, _file: &PickedFile) -> ImageReference {
        ImageReference::new(format!("blob:imagify/{}", uuid::Uuid::new_v4()))
    }
}
