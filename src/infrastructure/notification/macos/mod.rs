//! macOS notification adapters

mod foundation;
mod identity;
mod image;
mod legacy;
mod modern;
mod registry;

pub use identity::BundleSwizzleHook;
pub use legacy::MacLegacyCenter;
pub use modern::MacModernCenter;
pub use registry::MacAppRegistry;

/// Whether the modern center can be used by this process.
///
/// It needs macOS 10.14 and a real application bundle; unbundled binaries
/// are rejected by the system.
pub fn supports_modern_center() -> bool {
    foundation::os_at_least(10, 14) && foundation::is_app_bundle()
}
