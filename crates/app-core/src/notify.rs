//! User-visible notices
//!
//! Flows report outcomes through an injected [`Notifier`] instead of a global
//! toast channel. Notices are fire-and-forget: nothing waits on them and no
//! flow reads them back.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Neutral information
    Info,
    /// Completed action
    Success,
    /// Rejected action
    Error,
}

/// A notice as delivered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity
    pub kind: NoticeKind,
    /// Headline
    pub title: String,
    /// Optional detail line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notice {
    /// Create a notice
    pub fn new(kind: NoticeKind, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description,
        }
    }

    /// Informational notice
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, Some(description.into()))
    }

    /// Success notice
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, title, Some(description.into()))
    }

    /// Error notice
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, Some(description.into()))
    }
}

/// Sink for user-visible notices
pub trait Notifier: Send + Sync {
    /// Deliver a notice
    fn notify(&self, notice: Notice);
}

/// Writes notices to the tracing log
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or("");
        match notice.kind {
            NoticeKind::Info => tracing::info!(title = %notice.title, %description, "notice"),
            NoticeKind::Success => tracing::info!(title = %notice.title, %description, "success"),
            NoticeKind::Error => tracing::warn!(title = %notice.title, %description, "error"),
        }
    }
}

/// Keeps every notice for later inspection
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices received so far
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    /// The most recent notice
    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().last().cloned()
    }

    /// Titles of all notices, oldest first
    pub fn titles(&self) -> Vec<String> {
        self.notices.lock().iter().map(|n| n.title.clone()).collect()
    }

    /// Number of notices received
    pub fn len(&self) -> usize {
        self.notices.lock().len()
    }

    /// Check whether nothing was received
    pub fn is_empty(&self) -> bool {
        self.notices.lock().is_empty()
    }

    /// Forget all notices
    pub fn clear(&self) {
        self.notices.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::info("One", "first"));
        notifier.notify(Notice::error("Two", "second"));

        assert_eq!(notifier.len(), 2);
        assert_eq!(notifier.titles(), vec!["One", "Two"]);
        assert_eq!(notifier.last().unwrap().kind, NoticeKind::Error);

        notifier.clear();
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_notice_serialization_skips_empty_description() {
        let notice = Notice::new(NoticeKind::Success, "Signed out successfully", None);
        let json = serde_json::to_string(&notice).unwrap();
        assert_eq!(json, r#"{"kind":"success","title":"Signed out successfully"}"#);
    }
}
