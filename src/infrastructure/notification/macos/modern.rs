//! `UNUserNotificationCenter` adapter

use std::sync::Mutex;

use block::ConcreteBlock;
use cocoa::base::{id, nil, BOOL, NO, YES};
use objc::{class, msg_send, sel, sel_impl};

use crate::application::ports::{
    AuthorizationReply, CompletionHandler, ModernCenter, ModernRequest,
};
use crate::domain::notification::Sound;

use super::foundation::{ns_string, rust_string, with_autorelease_pool};

#[link(name = "UserNotifications", kind = "framework")]
extern "C" {}

const UN_AUTHORIZATION_OPTION_BADGE: usize = 1 << 0;
const UN_AUTHORIZATION_OPTION_SOUND: usize = 1 << 1;
const UN_AUTHORIZATION_OPTION_ALERT: usize = 1 << 2;

/// Modern notification center (macOS 10.14+)
#[derive(Debug, Default)]
pub struct MacModernCenter;

impl MacModernCenter {
    pub fn new() -> Self {
        Self
    }

    unsafe fn center() -> id {
        msg_send![class!(UNUserNotificationCenter), currentNotificationCenter]
    }
}

impl ModernCenter for MacModernCenter {
    fn request_authorization(&self, reply: AuthorizationReply) {
        with_autorelease_pool(|| unsafe {
            let reply = Mutex::new(Some(reply));
            let block = ConcreteBlock::new(move |granted: BOOL, _error: id| {
                if let Some(cb) = reply.lock().ok().and_then(|mut guard| guard.take()) {
                    cb(granted == YES);
                }
            });
            let block = block.copy();

            let options = UN_AUTHORIZATION_OPTION_ALERT
                | UN_AUTHORIZATION_OPTION_SOUND
                | UN_AUTHORIZATION_OPTION_BADGE;
            let _: () = msg_send![
                Self::center(),
                requestAuthorizationWithOptions: options
                completionHandler: &*block
            ];
        })
    }

    fn add(&self, request: ModernRequest, completion: CompletionHandler) {
        with_autorelease_pool(|| unsafe {
            let content: id = msg_send![class!(UNMutableNotificationContent), new];
            let _: () = msg_send![content, setTitle: ns_string(&request.title)];
            if let Some(ref subtitle) = request.subtitle {
                let _: () = msg_send![content, setSubtitle: ns_string(subtitle)];
            }
            let _: () = msg_send![content, setBody: ns_string(&request.body)];

            // An unknown sound name resolves to no sound, never an error
            let sound: id = match request.sound {
                Some(Sound::Default) => msg_send![class!(UNNotificationSound), defaultSound],
                Some(Sound::Named(ref name)) => {
                    msg_send![class!(UNNotificationSound), soundNamed: ns_string(name)]
                }
                None => nil,
            };
            if sound != nil {
                let _: () = msg_send![content, setSound: sound];
            }

            let trigger: id = match request.trigger_after {
                Some(delay) => msg_send![
                    class!(UNTimeIntervalNotificationTrigger),
                    triggerWithTimeInterval: delay.as_secs_f64()
                    repeats: NO
                ],
                None => nil,
            };

            let un_request: id = msg_send![
                class!(UNNotificationRequest),
                requestWithIdentifier: ns_string(&request.identifier)
                content: content
                trigger: trigger
            ];
            let _: () = msg_send![content, release];

            let completion = Mutex::new(Some(completion));
            let block = ConcreteBlock::new(move |error: id| {
                let description = if error == nil {
                    None
                } else {
                    let text: id = msg_send![error, localizedDescription];
                    Some(rust_string(text).unwrap_or_default())
                };
                if let Some(cb) = completion.lock().ok().and_then(|mut guard| guard.take()) {
                    cb(description);
                }
            });
            let block = block.copy();

            let _: () = msg_send![
                Self::center(),
                addNotificationRequest: un_request
                withCompletionHandler: &*block
            ];
        })
    }
}
