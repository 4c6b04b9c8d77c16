//! Delivery through the legacy notification center
//!
//! The legacy backend reports back through a delegate. When the caller has
//! to wait (buttons, reply field, click, or a scheduled delivery) the
//! calling task services the platform event loop in short slices until the
//! delegate says it is done. There is no overall deadline: an interactive
//! notification waits for the user for as long as it takes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use tracing::debug;
use uuid::Uuid;

use crate::domain::notification::{
    NotificationOptions, NotificationOutcome, NotificationRequest, UserAction,
};
use crate::domain::schedule::epoch_now;

use super::ports::{LegacyCenter, LegacyNotification};

/// Length of one event loop slice while waiting for the user
pub const RUN_LOOP_SLICE: StdDuration = StdDuration::from_millis(100);

/// Fixed pause after submission. The legacy center can drop delegate
/// callbacks that fire while the delegate is still being registered.
pub const REGISTRATION_GRACE: StdDuration = StdDuration::from_millis(100);

/// Whether the caller should block after submitting.
///
/// Every feature flag is evaluated first; `asynchronous` is applied last
/// and always wins.
pub fn should_keep_running(options: &NotificationOptions) -> bool {
    let mut keep_running = false;

    if options.delivery_date.is_some() {
        keep_running = true;
    }
    if options.main_button_label.is_some() {
        keep_running = true;
    }
    if options.has_actions() {
        keep_running = true;
    }
    if options.close_button_label.is_some() {
        keep_running = true;
    }
    if options.response.is_some() {
        keep_running = true;
    }
    if options.wait_for_click {
        keep_running = true;
    }

    if options.asynchronous {
        keep_running = false;
    }

    keep_running
}

/// Whether sending these options blocks until the user responds
pub fn waits_for_user(options: &NotificationOptions) -> bool {
    options.is_interactive() && !options.asynchronous
}

/// Per-send receiver of legacy backend callbacks.
///
/// Safe to call from any thread: the captured action is written before
/// `keep_running` is cleared, and read only after the waiter observes it
/// cleared.
#[derive(Debug)]
pub struct LegacyDelegate {
    keep_running: AtomicBool,
    /// Only a user action ends the wait, not delivery
    awaiting_interaction: bool,
    action: Mutex<Option<UserAction>>,
}

impl LegacyDelegate {
    pub fn new(keep_running: bool, awaiting_interaction: bool) -> Self {
        Self {
            keep_running: AtomicBool::new(keep_running),
            awaiting_interaction,
            action: Mutex::new(None),
        }
    }

    pub fn for_options(options: &NotificationOptions) -> Self {
        Self::new(should_keep_running(options), waits_for_user(options))
    }

    pub fn keep_running(&self) -> bool {
        self.keep_running.load(Ordering::Acquire)
    }

    pub fn awaiting_interaction(&self) -> bool {
        self.awaiting_interaction
    }

    /// The notification was shown
    pub fn did_deliver(&self) {
        if !self.awaiting_interaction {
            self.stop();
        }
    }

    /// The user acted on the notification. Only the first action is kept.
    pub fn did_activate(&self, action: UserAction) {
        {
            let mut slot = self.action.lock().unwrap_or_else(|e| e.into_inner());
            if slot.is_none() {
                *slot = Some(action);
            }
        }
        self.stop();
    }

    /// The notification went away without a user action
    pub fn did_dismiss(&self) {
        self.stop();
    }

    pub fn take_action(&self) -> Option<UserAction> {
        self.action.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    fn stop(&self) {
        self.keep_running.store(false, Ordering::Release);
    }
}

/// Translate a request into legacy-backend content.
///
/// `now` is the current time in epoch seconds; a delivery date at or
/// before it is delivered immediately.
pub fn build_legacy_notification(request: &NotificationRequest, now: f64) -> LegacyNotification {
    let options = &request.options;
    LegacyNotification {
        identifier: Uuid::new_v4().to_string(),
        title: request.title.clone(),
        subtitle: request.subtitle().map(str::to_string),
        body: request.body.clone(),
        sound: options.sound.clone(),
        main_button_label: options.main_button_label.clone(),
        close_button_label: options.close_button_label.clone(),
        actions: options.actions.clone(),
        response_placeholder: options.response.clone(),
        app_icon: options.app_icon.clone(),
        content_image: options.content_image.clone(),
        deliver_after: options
            .delivery_date
            .and_then(|date| date.interval_from(now)),
    }
}

/// Submit a request and, if needed, wait for the delegate to finish
pub async fn deliver_legacy<L>(center: &L, request: &NotificationRequest) -> NotificationOutcome
where
    L: LegacyCenter + ?Sized,
{
    let delegate = Arc::new(LegacyDelegate::for_options(&request.options));
    let notification = build_legacy_notification(request, epoch_now());
    debug!(
        identifier = %notification.identifier,
        scheduled_in = ?notification.deliver_after,
        keep_running = delegate.keep_running(),
        "submitting notification to legacy center"
    );

    center.deliver(notification, Arc::clone(&delegate));
    tokio::time::sleep(REGISTRATION_GRACE).await;

    while delegate.keep_running() {
        center.pump(RUN_LOOP_SLICE).await;
    }

    match delegate.take_action() {
        Some(action) => NotificationOutcome::UserAction(action),
        None => NotificationOutcome::Success,
    }
}
