//! Profile flow
//!
//! Sign-in is simulated: asking to sign in waits out a short timer and then
//! flips a local flag. Nothing is authenticated and nothing survives the
//! view.

use app_state::TimerId;
use serde::{Deserialize, Serialize};

use crate::flow::{Flow, FlowContext, Transition};
use crate::notify::{Notice, NoticeKind};
use crate::route::Route;
use crate::{Error, Result};

/// Profile shown once signed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Number of edits made
    pub total_edits: u32,
    /// Storage used, formatted
    pub storage_used: String,
}

impl Default for ProfileSummary {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            total_edits: 12,
            storage_used: "42 MB".to_string(),
        }
    }
}

/// Entries in the settings list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingsItem {
    /// Notification preferences
    Notifications,
    /// Data and account security
    PrivacyAndSecurity,
    /// Help and contact
    HelpAndSupport,
}

impl SettingsItem {
    /// Row title
    pub fn title(&self) -> &'static str {
        match self {
            SettingsItem::Notifications => "Notifications",
            SettingsItem::PrivacyAndSecurity => "Privacy & Security",
            SettingsItem::HelpAndSupport => "Help & Support",
        }
    }
}

/// Profile screen
#[derive(Debug, Default)]
pub struct ProfileFlow {
    is_logged_in: bool,
    summary: ProfileSummary,
    sign_in_timer: Option<TimerId>,
}

impl ProfileFlow {
    /// Start signed out
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the user is signed in
    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    /// Check whether a sign-in is in flight
    pub fn is_signing_in(&self) -> bool {
        self.sign_in_timer.is_some()
    }

    /// Profile details, once signed in
    pub fn summary(&self) -> Option<&ProfileSummary> {
        self.is_logged_in.then_some(&self.summary)
    }

    /// Begin the simulated Google sign-in
    pub fn sign_in_with_google(&mut self, ctx: &mut FlowContext<'_>) -> Result<()> {
        if self.sign_in_timer.is_some() {
            return Err(ctx.reject(Error::Busy("Sign-in")));
        }
        if self.is_logged_in {
            return Ok(());
        }

        ctx.notify(Notice::info(
            "Sign in with Google",
            "Google authentication will be implemented in a future update",
        ));
        let delay = ctx.config.sign_in_delay();
        self.sign_in_timer = Some(ctx.schedule(delay));
        tracing::debug!("sign-in started");
        Ok(())
    }

    /// Email sign-in is not offered yet
    pub fn sign_in_with_email(&self, ctx: &mut FlowContext<'_>) {
        ctx.notify(Notice::info(
            "Email sign in",
            "Email authentication will be implemented in a future update",
        ));
    }

    /// Sign out immediately
    pub fn sign_out(&mut self, ctx: &mut FlowContext<'_>) {
        if let Some(id) = self.sign_in_timer.take() {
            ctx.scheduler.cancel(id);
        }
        self.is_logged_in = false;
        tracing::debug!("signed out");
        ctx.notify(Notice::new(
            NoticeKind::Success,
            "Signed out successfully",
            None,
        ));
    }

    /// Profile editing is not offered yet
    pub fn edit_profile(&self, ctx: &mut FlowContext<'_>) {
        ctx.notify(Notice::info(
            "Edit profile",
            "Profile editing will be available in a future update",
        ));
    }

    /// Settings pages are not offered yet
    pub fn open_settings(&self, item: SettingsItem, ctx: &mut FlowContext<'_>) {
        ctx.notify(Notice::info(
            format!("{} settings", item.title()),
            format!("{} settings will be available in a future update", item.title()),
        ));
    }
}

impl Flow for ProfileFlow {
    fn route(&self) -> Route {
        Route::Profile
    }

    fn on_timer(&mut self, id: TimerId, ctx: &mut FlowContext<'_>) -> Result<Option<Transition>> {
        if self.sign_in_timer == Some(id) {
            self.sign_in_timer = None;
            self.is_logged_in = true;
            tracing::info!("signed in");
            ctx.notify(Notice::success(
                "Signed in successfully",
                "Welcome to Imagify!",
            ));
        }
        Ok(None)
    }

    fn pending_timers(&self) -> Vec<TimerId> {
        self.sign_in_timer.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::test_support::Harness;
    use app_state::Scheduler;
    use std::time::Duration;

    #[test]
    fn test_sign_in_flips_after_delay() {
        let mut h = Harness::new();
        let mut flow = ProfileFlow::new();
        flow.sign_in_with_google(&mut h.ctx()).unwrap();
        assert!(flow.is_signing_in());
        assert!(!flow.is_logged_in());
        assert!(flow.summary().is_none());

        h.advance(&mut flow, Duration::from_millis(999));
        assert!(!flow.is_logged_in());

        h.advance(&mut flow, Duration::from_millis(1));
        assert!(flow.is_logged_in());
        assert_eq!(flow.summary().unwrap().total_edits, 12);
        assert_eq!(
            h.notifier.titles(),
            vec!["Sign in with Google", "Signed in successfully"]
        );
    }

    #[test]
    fn test_second_sign_in_while_pending_is_busy() {
        let mut h = Harness::new();
        let mut flow = ProfileFlow::new();
        flow.sign_in_with_google(&mut h.ctx()).unwrap();

        assert_eq!(
            flow.sign_in_with_google(&mut h.ctx()),
            Err(Error::Busy("Sign-in"))
        );
        assert_eq!(h.scheduler.pending_count(), 1);
    }

    #[test]
    fn test_sign_out() {
        let mut h = Harness::new();
        let mut flow = ProfileFlow::new();
        flow.sign_in_with_google(&mut h.ctx()).unwrap();
        h.advance(&mut flow, Duration::from_secs(1));

        flow.sign_out(&mut h.ctx());
        assert!(!flow.is_logged_in());
        assert_eq!(h.notifier.last().unwrap().title, "Signed out successfully");
    }

    #[test]
    fn test_sign_out_cancels_pending_sign_in() {
        let mut h = Harness::new();
        let mut flow = ProfileFlow::new();
        flow.sign_in_with_google(&mut h.ctx()).unwrap();

        flow.sign_out(&mut h.ctx());
        h.advance(&mut flow, Duration::from_secs(5));
        assert!(!flow.is_logged_in());
        assert_eq!(h.scheduler.pending_count(), 0);
    }

    #[test]
    fn test_settings_rows_notify() {
        let mut h = Harness::new();
        let flow = ProfileFlow::new();
        flow.open_settings(SettingsItem::PrivacyAndSecurity, &mut h.ctx());

        let notice = h.notifier.last().unwrap();
        assert_eq!(notice.title, "Privacy & Security settings");
    }
}
