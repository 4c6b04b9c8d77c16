//! Delivery through the modern notification center

use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::delivery::{DeliverySettings, TimeoutPolicy};
use crate::domain::notification::{NotificationOutcome, NotificationRequest};
use crate::domain::schedule::epoch_now;

use super::ports::{ModernCenter, ModernRequest};

/// Translate a request into modern-backend content.
///
/// `now` is the current time in epoch seconds; a delivery date at or
/// before it is delivered immediately.
pub fn build_modern_request(request: &NotificationRequest, now: f64) -> ModernRequest {
    let options = &request.options;
    ModernRequest {
        identifier: Uuid::new_v4().to_string(),
        title: request.title.clone(),
        subtitle: request.subtitle().map(str::to_string),
        body: request.body.clone(),
        sound: options.sound.clone(),
        trigger_after: options
            .delivery_date
            .and_then(|date| date.interval_from(now)),
    }
}

/// Submit a request and wait, bounded, for the backend to confirm it.
///
/// The completion callback writes its result into a oneshot channel; the
/// value is only read after the wait returns.
pub async fn deliver_modern<M>(
    center: &M,
    request: &NotificationRequest,
    settings: &DeliverySettings,
) -> NotificationOutcome
where
    M: ModernCenter + ?Sized,
{
    let content = build_modern_request(request, epoch_now());
    debug!(
        identifier = %content.identifier,
        scheduled_in = ?content.trigger_after,
        "submitting notification to modern center"
    );

    let (tx, rx) = oneshot::channel();
    center.add(
        content,
        Box::new(move |error| {
            let _ = tx.send(error);
        }),
    );

    match tokio::time::timeout(settings.completion_timeout.as_std(), rx).await {
        Ok(Ok(None)) => NotificationOutcome::Success,
        Ok(Ok(Some(description))) => {
            if description.is_empty() {
                NotificationOutcome::failure(NotificationOutcome::UNKNOWN_ERROR)
            } else {
                NotificationOutcome::failure(description)
            }
        }
        Ok(Err(_)) => unconfirmed(settings, "completion handler was dropped"),
        Err(_) => unconfirmed(settings, "timed out waiting for completion"),
    }
}

fn unconfirmed(settings: &DeliverySettings, reason: &str) -> NotificationOutcome {
    warn!(
        reason,
        timeout = %settings.completion_timeout,
        policy = %settings.on_completion_timeout,
        "modern center did not confirm submission"
    );
    match settings.on_completion_timeout {
        TimeoutPolicy::AssumeSuccess => NotificationOutcome::Success,
        TimeoutPolicy::Fail => NotificationOutcome::failure(format!(
            "{} after {}",
            reason, settings.completion_timeout
        )),
    }
}
