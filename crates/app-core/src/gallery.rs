//! Gallery flow
//!
//! Lists previously edited images. There is no storage yet, so the gallery is
//! seeded with sample entries.

use serde::{Deserialize, Serialize};

use crate::flow::{Flow, FlowContext, Transition};
use crate::notify::Notice;
use crate::route::Route;
use crate::{Error, Result};

/// An edited image shown in the gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Identifier
    pub id: String,
    /// Image URL
    pub src: String,
    /// Caption
    pub title: String,
}

impl GalleryItem {
    /// Create a gallery item
    pub fn new(id: impl Into<String>, src: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            title: title.into(),
        }
    }
}

/// Sample gallery entries
pub fn sample_items() -> Vec<GalleryItem> {
    vec![
        GalleryItem::new(
            "1",
            "https://images.unsplash.com/photo-1516651029879-bcd191e7d33b?q=80&w=700",
            "Sunset Vintage Filter",
        ),
        GalleryItem::new(
            "2",
            "https://images.unsplash.com/photo-1529686342540-1b43aec0df75?q=80&w=700",
            "Cyberpunk Portrait",
        ),
        GalleryItem::new(
            "3",
            "https://images.unsplash.com/photo-1493246507139-91e8fad9978e?q=80&w=700",
            "Watercolor Landscape",
        ),
        GalleryItem::new(
            "4",
            "https://images.unsplash.com/photo-1520634222887-a2baa539fab3?q=80&w=700",
            "Noir City Lights",
        ),
    ]
}

/// Gallery screen
#[derive(Debug)]
pub struct GalleryFlow {
    items: Vec<GalleryItem>,
}

impl Default for GalleryFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryFlow {
    /// Gallery seeded with the sample entries
    pub fn new() -> Self {
        Self::with_items(sample_items())
    }

    /// Gallery with the given entries
    pub fn with_items(items: Vec<GalleryItem>) -> Self {
        Self { items }
    }

    /// Entries in display order
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Check whether the empty state is showing
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Open an entry's details
    pub fn open(&self, id: &str, ctx: &mut FlowContext<'_>) -> Result<()> {
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| ctx.reject(Error::UnknownGalleryItem(id.to_string())))?;

        ctx.notify(Notice::info(
            "Image details",
            format!("Viewing details for {}", item.title),
        ));
        Ok(())
    }

    /// Sorting is not offered yet
    pub fn sort(&self, ctx: &mut FlowContext<'_>) {
        ctx.notify(Notice::info(
            "Sort options",
            "Sorting options will be available in a future update",
        ));
    }

    /// Empty-state shortcut to the upload screen
    pub fn browse_upload(&self) -> Transition {
        Transition::to(Route::Upload)
    }
}

impl Flow for GalleryFlow {
    fn route(&self) -> Route {
        Route::Gallery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::test_support::Harness;

    #[test]
    fn test_sample_items() {
        let flow = GalleryFlow::new();
        assert_eq!(flow.items().len(), 4);
        assert_eq!(flow.items()[1].title, "Cyberpunk Portrait");
        assert!(!flow.is_empty());
    }

    #[test]
    fn test_open_known_item() {
        let mut h = Harness::new();
        GalleryFlow::new().open("4", &mut h.ctx()).unwrap();

        let notice = h.notifier.last().unwrap();
        assert_eq!(notice.title, "Image details");
        assert_eq!(
            notice.description.as_deref(),
            Some("Viewing details for Noir City Lights")
        );
    }

    #[test]
    fn test_open_unknown_item() {
        let mut h = Harness::new();
        let err = GalleryFlow::new().open("99", &mut h.ctx()).unwrap_err();
        assert_eq!(err, Error::UnknownGalleryItem("99".to_string()));
    }

    #[test]
    fn test_empty_gallery_links_to_upload() {
        let flow = GalleryFlow::with_items(Vec::new());
        assert!(flow.is_empty());
        assert_eq!(flow.browse_upload().route, Route::Upload);
    }
}
