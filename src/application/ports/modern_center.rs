//! Port for the modern, callback-based notification center

use std::time::Duration as StdDuration;

use crate::domain::notification::Sound;

/// Called once with the user's authorization decision
pub type AuthorizationReply = Box<dyn FnOnce(bool) + Send + 'static>;

/// Called once when a submission completes; `Some` carries the
/// platform's error description.
pub type CompletionHandler = Box<dyn FnOnce(Option<String>) + Send + 'static>;

/// Content submitted to the modern backend
#[derive(Debug, Clone, PartialEq)]
pub struct ModernRequest {
    /// Fresh unique identifier; never reused
    pub identifier: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: String,
    pub sound: Option<Sound>,
    /// Relative delay before delivery; `None` delivers immediately
    pub trigger_after: Option<StdDuration>,
}

/// Modern notification center.
///
/// Both calls return immediately; the callbacks may run later on a thread
/// owned by the platform, or never.
pub trait ModernCenter: Send + Sync {
    /// Ask the user for permission to show alerts and play sounds
    fn request_authorization(&self, reply: AuthorizationReply);

    /// Submit a notification
    fn add(&self, request: ModernRequest, completion: CompletionHandler);
}
