//! `NSUserNotificationCenter` adapter
//!
//! Each delivery gets a fresh Objective-C delegate object wrapping the
//! caller's `LegacyDelegate`. The center only holds its delegate weakly, so
//! the adapter keeps the current one alive until the next delivery.

use std::ffi::c_void;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use cocoa::base::{id, nil, BOOL, YES};
use cocoa::foundation::NSArray;
use objc::declare::ClassDecl;
use objc::rc::StrongPtr;
use objc::runtime::{Class, Object, Sel};
use objc::{class, msg_send, sel, sel_impl};
use tracing::{debug, warn};

use crate::application::legacy::LegacyDelegate;
use crate::application::ports::{LegacyCenter, LegacyNotification};
use crate::domain::notification::{Sound, UserAction};

use super::foundation::{ns_bool, ns_string, rust_string, with_autorelease_pool};
use super::image::load_image;

extern "C" {
    static NSUserNotificationDefaultSoundName: id;
}

const DELEGATE_CLASS: &str = "DeskNotifyLegacyDelegate";
const CONTEXT_IVAR: &str = "deskNotifyContext";

/// Title of the dropdown button when no main button label was given
const ACTION_MENU_TITLE: &str = "Actions";

// NSUserNotificationActivationType
const ACTIVATION_CONTENTS_CLICKED: isize = 1;
const ACTIVATION_ACTION_BUTTON_CLICKED: isize = 2;
const ACTIVATION_REPLIED: isize = 3;
const ACTIVATION_ADDITIONAL_ACTION_CLICKED: isize = 4;

/// Rust side of one Objective-C delegate instance
struct DelegateContext {
    identifier: String,
    actions: Vec<String>,
    delegate: Arc<LegacyDelegate>,
}

struct DelegateHandle(StrongPtr);

// Only touched while holding the center's mutex
unsafe impl Send for DelegateHandle {}

/// Legacy notification center
pub struct MacLegacyCenter {
    current: Mutex<Option<DelegateHandle>>,
}

impl MacLegacyCenter {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }
}

impl Default for MacLegacyCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LegacyCenter for MacLegacyCenter {
    fn deliver(&self, notification: LegacyNotification, delegate: Arc<LegacyDelegate>) {
        with_autorelease_pool(|| unsafe {
            let center: id = msg_send![class!(NSUserNotificationCenter), defaultUserNotificationCenter];
            if center == nil {
                // Happens for unbundled binaries without a sender override
                warn!("legacy notification center is unavailable for this process");
                delegate.did_dismiss();
                return;
            }

            let Some(class) = delegate_class() else {
                warn!("could not register notification delegate class");
                delegate.did_dismiss();
                return;
            };

            let context = Box::new(DelegateContext {
                identifier: notification.identifier.clone(),
                actions: notification.actions.clone(),
                delegate,
            });
            let objc_delegate: id = msg_send![class, new];
            (*objc_delegate).set_ivar(CONTEXT_IVAR, Box::into_raw(context) as *mut c_void);
            let objc_delegate = StrongPtr::new(objc_delegate);
            let _: () = msg_send![center, setDelegate: *objc_delegate];

            // Dropping the previous handle releases its delegate object
            let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
            *current = Some(DelegateHandle(objc_delegate));

            let user_notification = build_notification(&notification);
            if notification.deliver_after.is_some() {
                let _: () = msg_send![center, scheduleNotification: user_notification];
            } else {
                let _: () = msg_send![center, deliverNotification: user_notification];
            }
            let _: () = msg_send![user_notification, release];
        })
    }

    async fn pump(&self, slice: StdDuration) {
        with_autorelease_pool(|| unsafe {
            let run_loop: id = msg_send![class!(NSRunLoop), currentRunLoop];
            let until: id = msg_send![class!(NSDate), dateWithTimeIntervalSinceNow: slice.as_secs_f64()];
            let _: () = msg_send![run_loop, runUntilDate: until];
        })
    }
}

/// Build a retained `NSUserNotification`
unsafe fn build_notification(notification: &LegacyNotification) -> id {
    let n: id = msg_send![class!(NSUserNotification), new];
    let _: () = msg_send![n, setIdentifier: ns_string(&notification.identifier)];
    let _: () = msg_send![n, setTitle: ns_string(&notification.title)];
    if let Some(ref subtitle) = notification.subtitle {
        let _: () = msg_send![n, setSubtitle: ns_string(subtitle)];
    }
    let _: () = msg_send![n, setInformativeText: ns_string(&notification.body)];

    match notification.sound {
        Some(Sound::Default) => {
            let _: () = msg_send![n, setSoundName: NSUserNotificationDefaultSoundName];
        }
        Some(Sound::Named(ref name)) => {
            let _: () = msg_send![n, setSoundName: ns_string(name)];
        }
        None => {}
    }

    let main_label = notification.main_button_label.as_deref().or_else(|| {
        match notification.actions.len() {
            0 => None,
            1 => notification.actions.first().map(String::as_str),
            _ => Some(ACTION_MENU_TITLE),
        }
    });
    if let Some(label) = main_label {
        let _: () = msg_send![n, setHasActionButton: YES];
        let _: () = msg_send![n, setActionButtonTitle: ns_string(label)];
    }

    if !notification.actions.is_empty() {
        let _: () = msg_send![n, setValue: ns_bool(true) forKey: ns_string("_showsButtons")];
    }
    if notification.has_action_menu() {
        let titles: Vec<id> = notification.actions.iter().map(|a| ns_string(a)).collect();
        let titles: id = NSArray::arrayWithObjects(nil, &titles);
        let _: () = msg_send![n, setValue: ns_bool(true) forKey: ns_string("_alwaysShowAlternateActionMenu")];
        let _: () = msg_send![n, setValue: titles forKey: ns_string("_alternateActionButtonTitles")];
    }

    if let Some(ref label) = notification.close_button_label {
        let _: () = msg_send![n, setValue: ns_bool(true) forKey: ns_string("_showsButtons")];
        let _: () = msg_send![n, setOtherButtonTitle: ns_string(label)];
    }

    if let Some(ref placeholder) = notification.response_placeholder {
        let _: () = msg_send![n, setHasReplyButton: YES];
        let _: () = msg_send![n, setResponsePlaceholder: ns_string(placeholder)];
    }

    // Best effort: unreadable images are simply left out
    if let Some(ref location) = notification.app_icon {
        let image = load_image(location);
        if image != nil {
            let _: () = msg_send![n, setValue: image forKey: ns_string("_identityImage")];
        }
    }
    if let Some(ref location) = notification.content_image {
        let image = load_image(location);
        if image != nil {
            let _: () = msg_send![n, setContentImage: image];
        }
    }

    if let Some(delay) = notification.deliver_after {
        let date: id = msg_send![class!(NSDate), dateWithTimeIntervalSinceNow: delay.as_secs_f64()];
        let _: () = msg_send![n, setDeliveryDate: date];
    }

    n
}

fn delegate_class() -> Option<&'static Class> {
    static REGISTER: Once = Once::new();
    REGISTER.call_once(|| unsafe {
        let Some(mut decl) = ClassDecl::new(DELEGATE_CLASS, class!(NSObject)) else {
            return;
        };
        decl.add_ivar::<*mut c_void>(CONTEXT_IVAR);
        decl.add_method(
            sel!(userNotificationCenter:didDeliverNotification:),
            did_deliver as extern "C" fn(&Object, Sel, id, id),
        );
        decl.add_method(
            sel!(userNotificationCenter:didActivateNotification:),
            did_activate as extern "C" fn(&Object, Sel, id, id),
        );
        decl.add_method(
            sel!(userNotificationCenter:didDismissAlert:),
            did_dismiss_alert as extern "C" fn(&Object, Sel, id, id),
        );
        decl.add_method(
            sel!(userNotificationCenter:shouldPresentNotification:),
            should_present as extern "C" fn(&Object, Sel, id, id) -> BOOL,
        );
        decl.add_method(sel!(dealloc), dealloc as extern "C" fn(&Object, Sel));
        decl.register();
    });
    Class::get(DELEGATE_CLASS)
}

/// Context of `this` if `notification` is the one it was created for
unsafe fn context_for<'a>(this: &'a Object, notification: id) -> Option<&'a DelegateContext> {
    let ptr: *mut c_void = *this.get_ivar(CONTEXT_IVAR);
    if ptr.is_null() {
        return None;
    }
    let context = &*(ptr as *const DelegateContext);
    let identifier: id = msg_send![notification, identifier];
    if rust_string(identifier).as_deref() == Some(context.identifier.as_str()) {
        Some(context)
    } else {
        None
    }
}

extern "C" fn did_deliver(this: &Object, _: Sel, _center: id, notification: id) {
    unsafe {
        if let Some(context) = context_for(this, notification) {
            context.delegate.did_deliver();
        }
    }
}

extern "C" fn did_activate(this: &Object, _: Sel, _center: id, notification: id) {
    unsafe {
        let Some(context) = context_for(this, notification) else {
            return;
        };
        let activation: isize = msg_send![notification, activationType];
        debug!(activation, "legacy notification activated");
        let action = match activation {
            ACTIVATION_CONTENTS_CLICKED => UserAction::click(),
            ACTIVATION_ACTION_BUTTON_CLICKED => {
                UserAction::button(chosen_button(context, notification).unwrap_or_default())
            }
            ACTIVATION_REPLIED => {
                let response: id = msg_send![notification, response];
                let text: id = if response == nil { nil } else { msg_send![response, string] };
                UserAction::reply(rust_string(text).unwrap_or_default())
            }
            ACTIVATION_ADDITIONAL_ACTION_CLICKED => {
                let action: id = msg_send![notification, additionalActivationAction];
                let title: id = if action == nil { nil } else { msg_send![action, title] };
                UserAction::button(rust_string(title).unwrap_or_default())
            }
            _ => {
                context.delegate.did_dismiss();
                return;
            }
        };
        context.delegate.did_activate(action);
    }
}

/// Label of the clicked action button, resolving dropdown selections
unsafe fn chosen_button(context: &DelegateContext, notification: id) -> Option<String> {
    if context.actions.len() > 1 {
        let index: id = msg_send![notification, valueForKey: ns_string("_alternateActionIndex")];
        if index != nil {
            let index: isize = msg_send![index, integerValue];
            if let Some(label) = usize::try_from(index).ok().and_then(|i| context.actions.get(i)) {
                return Some(label.clone());
            }
        }
    }
    let title: id = msg_send![notification, actionButtonTitle];
    rust_string(title)
}

extern "C" fn did_dismiss_alert(this: &Object, _: Sel, _center: id, notification: id) {
    unsafe {
        let Some(context) = context_for(this, notification) else {
            return;
        };
        let title: id = msg_send![notification, otherButtonTitle];
        match rust_string(title) {
            Some(label) => context.delegate.did_activate(UserAction::close(label)),
            None => context.delegate.did_dismiss(),
        }
    }
}

extern "C" fn should_present(_this: &Object, _: Sel, _center: id, _notification: id) -> BOOL {
    YES
}

extern "C" fn dealloc(this: &Object, _: Sel) {
    unsafe {
        let ptr: *mut c_void = *this.get_ivar(CONTEXT_IVAR);
        if !ptr.is_null() {
            drop(Box::from_raw(ptr as *mut DelegateContext));
        }
        let _: () = msg_send![super(this, class!(NSObject)), dealloc];
    }
}
