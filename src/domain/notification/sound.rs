//! Notification sound selection

use std::fmt;

/// Sentinel option value that selects the system default sound
pub const DEFAULT_SOUND_NAME: &str = "NSUserNotificationDefaultSoundName";

/// Sound to play when the notification is shown.
///
/// Absence of a `Sound` means silent. A named sound that the system cannot
/// resolve is played as no sound at all; it is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sound {
    Default,
    Named(String),
}

impl Sound {
    /// Interpret a raw `sound` option value.
    ///
    /// Accepts the sentinel for the system sound, plus `default` in any
    /// case as a command line shorthand. A sound file literally named
    /// "default" therefore cannot be picked by name. An empty value means
    /// silent.
    pub fn from_option(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else if value == DEFAULT_SOUND_NAME || value.eq_ignore_ascii_case("default") {
            Some(Self::Default)
        } else {
            Some(Self::Named(value.to_string()))
        }
    }

    /// Name handed to the platform backend
    pub fn name(&self) -> &str {
        match self {
            Self::Default => DEFAULT_SOUND_NAME,
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_is_silent() {
        assert_eq!(Sound::from_option(""), None);
        assert_eq!(Sound::from_option("   "), None);
    }

    #[test]
    fn sentinel_and_shorthand_select_default() {
        assert_eq!(Sound::from_option(DEFAULT_SOUND_NAME), Some(Sound::Default));
        assert_eq!(Sound::from_option("Default"), Some(Sound::Default));
        assert_eq!(Sound::from_option(" DEFAULT "), Some(Sound::Default));
        assert_eq!(
            Sound::from_option("default").map(|s| s.name().to_string()),
            Some(DEFAULT_SOUND_NAME.to_string())
        );
    }

    #[test]
    fn other_values_are_named() {
        let sound = Sound::from_option("Submarine").unwrap();
        assert_eq!(sound, Sound::Named("Submarine".to_string()));
        assert_eq!(sound.name(), "Submarine");
    }
}
