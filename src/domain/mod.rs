//! Domain layer - Core notification model
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on platform frameworks.

pub mod config;
pub mod delivery;
pub mod error;
pub mod identity;
pub mod notification;
pub mod schedule;

// Re-export common types
pub use config::AppConfig;
pub use delivery::{DeliverySettings, TimeoutPolicy};
pub use error::*;
pub use identity::{IdentityOverride, FALLBACK_BUNDLE_IDENTIFIER};
pub use notification::{
    NotificationOptions, NotificationOutcome, NotificationRequest, OptionKey, Sound, UserAction,
};
pub use schedule::{DeliveryDate, Duration};
