//! Application layer - Use cases and port interfaces
//!
//! Contains the routing and delivery logic plus the trait definitions
//! for the platform notification facilities.

pub mod authorization;
pub mod identity;
pub mod legacy;
pub mod modern;
pub mod ports;
pub mod routing;
pub mod service;

// Re-export use cases
pub use authorization::{request_authorization, AuthorizationGate};
pub use identity::IdentityService;
pub use legacy::{deliver_legacy, should_keep_running, waits_for_user, LegacyDelegate};
pub use modern::deliver_modern;
pub use routing::{classify, Route};
pub use service::NotificationService;
