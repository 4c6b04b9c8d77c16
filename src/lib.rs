//! desk-notify - desktop notifications with a single outcome type
//!
//! Sends a notification through the platform's modern notification center
//! when the request is fire-and-forget, or through the legacy center when
//! it needs buttons, a reply field, or waiting for a click. The legacy
//! path blocks until the user responds. Either way the caller gets one
//! `NotificationOutcome`.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Requests, options, outcomes, the sender override, and errors
//! - **Application**: Routing, authorization, delivery use cases, and port traits
//! - **Infrastructure**: Platform adapters (macOS, freedesktop) and the config store
//! - **CLI**: Command-line interface, argument parsing, and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
