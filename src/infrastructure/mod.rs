//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces for the
//! platform notification facilities and the config file.

pub mod config;
pub mod notification;

// Re-export adapters
pub use config::XdgConfigStore;
pub use notification::{create_platform, PlatformNotifications};
