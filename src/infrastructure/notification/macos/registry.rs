//! Application lookup through AppleScript and `NSWorkspace`

use cocoa::base::{id, nil};
use objc::{class, msg_send, sel, sel_impl};
use tracing::debug;

use crate::application::ports::AppRegistry;

use super::foundation::{ns_string, rust_string, with_autorelease_pool};

/// Resolves applications through the scripting bridge
#[derive(Debug, Default)]
pub struct MacAppRegistry;

impl MacAppRegistry {
    pub fn new() -> Self {
        Self
    }
}

fn lookup_script(application_name: &str) -> String {
    let escaped = application_name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("id of application \"{}\"", escaped)
}

impl AppRegistry for MacAppRegistry {
    fn bundle_identifier(&self, application_name: &str) -> Option<String> {
        with_autorelease_pool(|| unsafe {
            let source = ns_string(&lookup_script(application_name));
            let script: id = msg_send![class!(NSAppleScript), alloc];
            let script: id = msg_send![script, initWithSource: source];
            if script == nil {
                return None;
            }
            // No error dictionary is requested; any failure reads as unknown
            let descriptor: id = msg_send![script, executeAndReturnError: nil];
            let result = if descriptor == nil {
                debug!(application = application_name, "AppleScript lookup failed");
                None
            } else {
                let value: id = msg_send![descriptor, stringValue];
                rust_string(value)
            };
            let _: () = msg_send![script, release];
            result
        })
    }

    fn is_installed(&self, bundle_identifier: &str) -> bool {
        with_autorelease_pool(|| unsafe {
            let workspace: id = msg_send![class!(NSWorkspace), sharedWorkspace];
            let url: id = msg_send![
                workspace,
                URLForApplicationWithBundleIdentifier: ns_string(bundle_identifier)
            ];
            url != nil
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_escapes_quotes() {
        assert_eq!(lookup_script("Safari"), "id of application \"Safari\"");
        assert_eq!(
            lookup_script("My \"App\""),
            "id of application \"My \\\"App\\\"\""
        );
    }
}
