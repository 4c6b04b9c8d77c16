//! Notifier port interface

use async_trait::async_trait;

use crate::domain::notification::{NotificationOutcome, NotificationRequest};

/// Port for sending desktop notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one notification.
    ///
    /// Depending on the request this returns once the platform accepted
    /// it, or once the user responded to it.
    ///
    /// # Returns
    /// The outcome; failures are reported as `NotificationOutcome::Failure`
    async fn send(&self, request: NotificationRequest) -> NotificationOutcome;
}

/// Blanket implementation for boxed notifier types
#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn send(&self, request: NotificationRequest) -> NotificationOutcome {
        self.as_ref().send(request).await
    }
}
