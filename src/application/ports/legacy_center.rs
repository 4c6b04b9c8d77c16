//! Port for the legacy, delegate-based notification center

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;

use crate::application::legacy::LegacyDelegate;
use crate::domain::notification::Sound;

/// Content submitted to the legacy backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyNotification {
    pub identifier: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: String,
    pub sound: Option<Sound>,
    pub main_button_label: Option<String>,
    pub close_button_label: Option<String>,
    /// More than one entry is shown as a dropdown menu
    pub actions: Vec<String>,
    /// Placeholder of the reply field, when one is offered
    pub response_placeholder: Option<String>,
    /// Loaded best-effort; an unreadable location shows no image
    pub app_icon: Option<String>,
    /// Loaded best-effort; an unreadable location shows no image
    pub content_image: Option<String>,
    /// Relative delay before delivery; `None` delivers immediately
    pub deliver_after: Option<StdDuration>,
}

impl LegacyNotification {
    /// Whether a dropdown of alternate actions should be shown
    pub fn has_action_menu(&self) -> bool {
        self.actions.len() > 1
    }
}

/// Legacy notification center.
///
/// The backend reports delivery and user interaction through the
/// `LegacyDelegate` it was handed; those reports may arrive on any thread.
#[async_trait]
pub trait LegacyCenter: Send + Sync {
    /// Schedule or immediately deliver a notification
    fn deliver(&self, notification: LegacyNotification, delegate: Arc<LegacyDelegate>);

    /// Service the platform event loop of the calling thread for one slice
    async fn pump(&self, slice: StdDuration);
}
