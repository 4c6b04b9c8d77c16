//! Scheduling-related value objects

mod delivery_date;
mod duration;

pub use delivery_date::{epoch_now, DeliveryDate};
pub use duration::{
    Duration, DEFAULT_AUTHORIZATION_TIMEOUT_SECS, DEFAULT_COMPLETION_TIMEOUT_SECS,
};
