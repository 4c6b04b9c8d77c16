//! Notification request/response model

mod options;
mod outcome;
mod request;
mod sound;

pub use options::{parse_option_pair, NotificationOptions, OptionKey};
pub use outcome::{NotificationOutcome, UserAction};
pub use request::NotificationRequest;
pub use sound::{Sound, DEFAULT_SOUND_NAME};
