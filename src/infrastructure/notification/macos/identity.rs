//! Sender identity override through `-[NSBundle bundleIdentifier]`
//!
//! The replacement implementation answers with the override for the main
//! bundle and forwards everything else to the replaced method.

use std::sync::{Arc, Once, OnceLock};

use cocoa::base::{id, nil};
use objc::runtime::{
    class_getInstanceMethod, method_setImplementation, Class, Imp, Object, Sel,
};
use objc::{class, msg_send, sel, sel_impl};
use tracing::{debug, warn};

use crate::application::ports::IdentityHook;
use crate::domain::identity::IdentityOverride;

use super::foundation::ns_string;

static INSTALL: Once = Once::new();
static IDENTITY: OnceLock<Arc<IdentityOverride>> = OnceLock::new();
static ORIGINAL: OnceLock<usize> = OnceLock::new();

/// Replaces `bundleIdentifier` on `NSBundle` once per process
#[derive(Debug, Default)]
pub struct BundleSwizzleHook;

impl BundleSwizzleHook {
    pub fn new() -> Self {
        Self
    }
}

impl IdentityHook for BundleSwizzleHook {
    fn install(&self, identity: Arc<IdentityOverride>) {
        let _ = IDENTITY.set(identity);
        INSTALL.call_once(|| unsafe {
            let class: &Class = class!(NSBundle);
            let method = class_getInstanceMethod(class, sel!(bundleIdentifier));
            if method.is_null() {
                warn!("NSBundle has no bundleIdentifier method; sender override disabled");
                return;
            }
            let replacement: Imp = std::mem::transmute(
                bundle_identifier as extern "C" fn(&Object, Sel) -> id,
            );
            let original = method_setImplementation(method as *mut _, replacement);
            let _ = ORIGINAL.set(original as usize);
            debug!("installed bundle identifier hook");
        });
    }
}

extern "C" fn bundle_identifier(this: &Object, cmd: Sel) -> id {
    unsafe {
        let main: id = msg_send![class!(NSBundle), mainBundle];
        if std::ptr::eq(this as *const Object, main as *const Object) {
            if let Some(sender) = IDENTITY.get().and_then(|identity| identity.get()) {
                return ns_string(sender);
            }
        }
        match ORIGINAL.get() {
            Some(&original) => {
                let original: extern "C" fn(&Object, Sel) -> id = std::mem::transmute(original);
                original(this, cmd)
            }
            None => nil,
        }
    }
}
