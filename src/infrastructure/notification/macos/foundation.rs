//! Foundation helpers shared by the macOS adapters

use std::ffi::{c_char, CStr};

use cocoa::base::{id, nil, BOOL, YES};
use cocoa::foundation::{NSAutoreleasePool, NSString};
use objc::{class, msg_send, sel, sel_impl};

#[link(name = "Foundation", kind = "framework")]
extern "C" {}

#[repr(C)]
#[derive(Clone, Copy)]
struct NSOperatingSystemVersion {
    major: isize,
    minor: isize,
    patch: isize,
}

/// Autoreleased `NSString` copy of `s`
pub(super) unsafe fn ns_string(s: &str) -> id {
    let string = NSString::alloc(nil).init_str(s);
    msg_send![string, autorelease]
}

/// Copy an `NSString` into Rust; `nil` yields `None`
pub(super) unsafe fn rust_string(string: id) -> Option<String> {
    if string == nil {
        return None;
    }
    let ptr: *const c_char = msg_send![string, UTF8String];
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

pub(super) unsafe fn ns_bool(value: bool) -> id {
    let flag: BOOL = if value { YES } else { cocoa::base::NO };
    msg_send![class!(NSNumber), numberWithBool: flag]
}

/// Whether the running system is at least `major.minor`
pub(super) fn os_at_least(major: isize, minor: isize) -> bool {
    unsafe {
        let info: id = msg_send![class!(NSProcessInfo), processInfo];
        let version = NSOperatingSystemVersion {
            major,
            minor,
            patch: 0,
        };
        let at_least: BOOL = msg_send![info, isOperatingSystemAtLeastVersion: version];
        at_least == YES
    }
}

/// Whether this process runs from inside an `.app` bundle
pub(super) fn is_app_bundle() -> bool {
    unsafe {
        let bundle: id = msg_send![class!(NSBundle), mainBundle];
        let path: id = msg_send![bundle, bundlePath];
        rust_string(path).is_some_and(|p| p.ends_with(".app"))
    }
}

/// Run `f` inside its own autorelease pool
pub(super) fn with_autorelease_pool<T>(f: impl FnOnce() -> T) -> T {
    unsafe {
        let pool = NSAutoreleasePool::new(nil);
        let result = f();
        pool.drain();
        result
    }
}
