//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod app_registry;
pub mod config;
pub mod identity_hook;
pub mod legacy_center;
pub mod modern_center;
pub mod notifier;

// Re-export common types
pub use app_registry::AppRegistry;
pub use config::ConfigStore;
pub use identity_hook::IdentityHook;
pub use legacy_center::{LegacyCenter, LegacyNotification};
pub use modern_center::{AuthorizationReply, CompletionHandler, ModernCenter, ModernRequest};
pub use notifier::Notifier;
