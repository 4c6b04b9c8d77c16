//! Backend selection

use crate::domain::notification::NotificationOptions;

/// Which backend handles a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Modern,
    Legacy,
}

impl Route {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Legacy => "legacy",
        }
    }
}

/// Pick the backend for a request.
///
/// Interactive requests always go to the legacy backend. The modern
/// backend takes everything else when the platform has one.
pub fn classify(options: &NotificationOptions, modern_available: bool) -> Route {
    if options.is_interactive() {
        return Route::Legacy;
    }
    if modern_available {
        Route::Modern
    } else {
        Route::Legacy
    }
}
