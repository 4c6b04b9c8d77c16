//! Best-effort image loading

use cocoa::base::{id, nil};
use objc::{class, msg_send, sel, sel_impl};
use tracing::debug;

use super::foundation::ns_string;

/// Load an image from a URL or local path.
///
/// Returns an autoreleased `NSImage`, or `nil` when the location cannot be
/// read or decoded.
pub(super) unsafe fn load_image(location: &str) -> id {
    let url: id = if location.contains("://") {
        msg_send![class!(NSURL), URLWithString: ns_string(location)]
    } else {
        msg_send![class!(NSURL), fileURLWithPath: ns_string(location)]
    };
    if url == nil {
        debug!(location, "not a valid image location");
        return nil;
    }

    let image: id = msg_send![class!(NSImage), alloc];
    let image: id = msg_send![image, initWithContentsOfURL: url];
    if image == nil {
        debug!(location, "image could not be loaded; showing none");
        return nil;
    }
    msg_send![image, autorelease]
}
