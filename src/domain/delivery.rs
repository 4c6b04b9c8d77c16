//! Delivery timing policy

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::schedule::Duration;

/// What to report when the modern backend never confirms a submission
/// within the completion timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeoutPolicy {
    /// Report `Success`; an unconfirmed submission looks like a delivered one
    #[default]
    AssumeSuccess,
    /// Report `Failure` naming the timeout
    Fail,
}

impl TimeoutPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AssumeSuccess => "assume-success",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for TimeoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeoutPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "assume-success" | "success" => Ok(Self::AssumeSuccess),
            "fail" | "failure" => Ok(Self::Fail),
            _ => Err(format!(
                "Invalid timeout policy \"{}\". Valid values: assume-success, fail",
                s
            )),
        }
    }
}

/// Bounds applied to the blocking parts of a send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliverySettings {
    pub completion_timeout: Duration,
    pub authorization_timeout: Duration,
    pub on_completion_timeout: TimeoutPolicy,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            completion_timeout: Duration::default_completion_timeout(),
            authorization_timeout: Duration::default_authorization_timeout(),
            on_completion_timeout: TimeoutPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_bounds() {
        let settings = DeliverySettings::default();
        assert_eq!(settings.completion_timeout.as_secs(), 5);
        assert_eq!(settings.authorization_timeout.as_secs(), 30);
        assert_eq!(settings.on_completion_timeout, TimeoutPolicy::AssumeSuccess);
    }

    #[test]
    fn timeout_policy_parses() {
        assert_eq!("fail".parse::<TimeoutPolicy>(), Ok(TimeoutPolicy::Fail));
        assert_eq!(
            "Assume-Success".parse::<TimeoutPolicy>(),
            Ok(TimeoutPolicy::AssumeSuccess)
        );
        assert!("maybe".parse::<TimeoutPolicy>().is_err());
    }
}
