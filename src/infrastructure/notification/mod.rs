//! Notification infrastructure module
//!
//! Wires the platform notification facilities into the application
//! services: Notification Center on macOS, the freedesktop notification
//! service on other Unix desktops, and a no-op elsewhere.

#[cfg(all(unix, not(target_os = "macos")))]
mod freedesktop;
#[cfg(target_os = "macos")]
pub mod macos;
mod unavailable;

#[cfg(all(unix, not(target_os = "macos")))]
pub use freedesktop::{DesktopEntryRegistry, FreedesktopCenter, FreedesktopIdentityHook};
pub use unavailable::{NoModernCenter, NoopHook, NoopRegistry, UnsupportedCenter};

use std::sync::Arc;

use crate::application::ports::{AppRegistry, IdentityHook, Notifier};
use crate::application::{IdentityService, NotificationService};
use crate::domain::delivery::DeliverySettings;
use crate::domain::identity::IdentityOverride;

/// Identity setup over whatever the platform provides
pub type PlatformIdentityService = IdentityService<Box<dyn AppRegistry>, Box<dyn IdentityHook>>;

/// Notification services for the current platform.
///
/// The notifier and the identity service share one `IdentityOverride`, so
/// a sender set through `identity` applies to later sends.
pub struct PlatformNotifications {
    pub notifier: Box<dyn Notifier>,
    pub identity: PlatformIdentityService,
}

/// Create the notification services for the current platform
#[cfg(target_os = "macos")]
pub fn create_platform(settings: DeliverySettings) -> PlatformNotifications {
    use macos::{BundleSwizzleHook, MacAppRegistry, MacLegacyCenter, MacModernCenter};

    let identity = Arc::new(IdentityOverride::new());
    let modern = macos::supports_modern_center().then(MacModernCenter::new);
    let service = NotificationService::new(
        modern,
        MacLegacyCenter::new(),
        settings,
        Arc::clone(&identity),
    );

    PlatformNotifications {
        notifier: Box::new(service),
        identity: IdentityService::new(
            Box::new(MacAppRegistry::new()),
            Box::new(BundleSwizzleHook::new()),
            identity,
        ),
    }
}

/// Create the notification services for the current platform
#[cfg(all(unix, not(target_os = "macos")))]
pub fn create_platform(settings: DeliverySettings) -> PlatformNotifications {
    let identity = Arc::new(IdentityOverride::new());
    let center = FreedesktopCenter::new();
    let hook = center.identity_hook();
    let service = NotificationService::<NoModernCenter, _>::new(
        None,
        center,
        settings,
        Arc::clone(&identity),
    );

    PlatformNotifications {
        notifier: Box::new(service),
        identity: IdentityService::new(
            Box::new(DesktopEntryRegistry::new()),
            Box::new(hook),
            identity,
        ),
    }
}

/// Create the notification services for the current platform
#[cfg(not(unix))]
pub fn create_platform(settings: DeliverySettings) -> PlatformNotifications {
    let identity = Arc::new(IdentityOverride::new());
    let service = NotificationService::<NoModernCenter, _>::new(
        None,
        UnsupportedCenter,
        settings,
        Arc::clone(&identity),
    );

    PlatformNotifications {
        notifier: Box::new(service),
        identity: IdentityService::new(Box::new(NoopRegistry), Box::new(NoopHook), identity),
    }
}
