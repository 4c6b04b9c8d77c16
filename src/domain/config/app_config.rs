//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::delivery::{DeliverySettings, TimeoutPolicy};
use crate::domain::notification::Sound;
use crate::domain::schedule::Duration;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bundle identifier notifications should appear to come from
    pub sender: Option<String>,
    /// Sound used when a request does not name one
    pub sound: Option<String>,
    pub completion_timeout: Option<String>,
    pub authorization_timeout: Option<String>,
    pub on_timeout: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            sender: None,
            sound: None,
            completion_timeout: Some(Duration::default_completion_timeout().to_string()),
            authorization_timeout: Some(Duration::default_authorization_timeout().to_string()),
            on_timeout: Some(TimeoutPolicy::default().to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            sender: other.sender.or(self.sender),
            sound: other.sound.or(self.sound),
            completion_timeout: other.completion_timeout.or(self.completion_timeout),
            authorization_timeout: other.authorization_timeout.or(self.authorization_timeout),
            on_timeout: other.on_timeout.or(self.on_timeout),
        }
    }

    /// Sender override, ignoring empty values
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref().filter(|s| !s.is_empty())
    }

    /// Default sound, if configured
    pub fn sound(&self) -> Option<Sound> {
        self.sound.as_deref().and_then(Sound::from_option)
    }

    /// Get completion timeout, or default if not set/invalid
    pub fn completion_timeout_or_default(&self) -> Duration {
        self.completion_timeout
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_completion_timeout)
    }

    /// Get authorization timeout, or default if not set/invalid
    pub fn authorization_timeout_or_default(&self) -> Duration {
        self.authorization_timeout
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_authorization_timeout)
    }

    /// Get timeout policy, or default if not set/invalid
    pub fn on_timeout_or_default(&self) -> TimeoutPolicy {
        self.on_timeout
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn delivery_settings(&self) -> DeliverySettings {
        DeliverySettings {
            completion_timeout: self.completion_timeout_or_default(),
            authorization_timeout: self.authorization_timeout_or_default(),
            on_completion_timeout: self.on_timeout_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.sender.is_none());
        assert!(config.sound.is_none());
        assert_eq!(config.completion_timeout, Some("5s".to_string()));
        assert_eq!(config.authorization_timeout, Some("30s".to_string()));
        assert_eq!(config.on_timeout, Some("assume-success".to_string()));
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            sender: Some("com.apple.Safari".to_string()),
            completion_timeout: Some("5s".to_string()),
            ..Default::default()
        };
        let other = AppConfig {
            sender: Some("com.apple.Mail".to_string()),
            completion_timeout: None,
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.sender(), Some("com.apple.Mail"));
        assert_eq!(merged.completion_timeout, Some("5s".to_string()));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = AppConfig {
            completion_timeout: Some("soon".to_string()),
            on_timeout: Some("maybe".to_string()),
            ..Default::default()
        };
        let settings = config.delivery_settings();
        assert_eq!(settings, DeliverySettings::default());
    }

    #[test]
    fn configured_values_reach_delivery_settings() {
        let config = AppConfig {
            completion_timeout: Some("2s".to_string()),
            authorization_timeout: Some("1m".to_string()),
            on_timeout: Some("fail".to_string()),
            ..Default::default()
        };
        let settings = config.delivery_settings();
        assert_eq!(settings.completion_timeout.as_secs(), 2);
        assert_eq!(settings.authorization_timeout.as_secs(), 60);
        assert_eq!(settings.on_completion_timeout, TimeoutPolicy::Fail);
    }

    #[test]
    fn empty_sender_is_ignored() {
        let config = AppConfig {
            sender: Some(String::new()),
            sound: Some("default".to_string()),
            ..Default::default()
        };
        assert_eq!(config.sender(), None);
        assert_eq!(config.sound(), Some(Sound::Default));
    }
}
