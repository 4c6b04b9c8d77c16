//! Typed view over the notification option mapping

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::domain::error::OptionsError;
use crate::domain::schedule::DeliveryDate;

use super::sound::Sound;

/// Recognized option keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Sound,
    DeliveryDate,
    MainButtonLabel,
    CloseButtonLabel,
    Actions,
    Response,
    Click,
    AppIcon,
    ContentImage,
    Asynchronous,
}

impl OptionKey {
    pub const ALL: [OptionKey; 10] = [
        Self::Sound,
        Self::DeliveryDate,
        Self::MainButtonLabel,
        Self::CloseButtonLabel,
        Self::Actions,
        Self::Response,
        Self::Click,
        Self::AppIcon,
        Self::ContentImage,
        Self::Asynchronous,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sound => "sound",
            Self::DeliveryDate => "deliveryDate",
            Self::MainButtonLabel => "mainButtonLabel",
            Self::CloseButtonLabel => "closeButtonLabel",
            Self::Actions => "actions",
            Self::Response => "response",
            Self::Click => "click",
            Self::AppIcon => "appIcon",
            Self::ContentImage => "contentImage",
            Self::Asynchronous => "asynchronous",
        }
    }

    fn valid_keys() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| OptionsError::UnknownKey {
                key: s.to_string(),
                valid: Self::valid_keys(),
            })
    }
}

/// Flag value that turns `click` and `asynchronous` on
const YES: &str = "yes";

/// Normalized notification options.
///
/// Empty strings are treated as absent everywhere, so a field that is
/// `Some` always carries a non-empty value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationOptions {
    pub sound: Option<Sound>,
    pub delivery_date: Option<DeliveryDate>,
    pub main_button_label: Option<String>,
    pub close_button_label: Option<String>,
    /// Extra action labels; more than one shows a dropdown menu
    pub actions: Vec<String>,
    /// A non-empty `actions` value was given, even if every label in it
    /// was blank (`","`). Still counts as asking for actions.
    pub actions_requested: bool,
    /// Placeholder text for a reply field
    pub response: Option<String>,
    pub wait_for_click: bool,
    pub app_icon: Option<String>,
    pub content_image: Option<String>,
    pub asynchronous: bool,
}

impl NotificationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from the raw string mapping.
    ///
    /// Unknown keys are ignored. An unparsable `deliveryDate` is dropped so
    /// the notification is delivered immediately.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let mut options = Self::default();
        for (key, value) in map {
            match key.parse::<OptionKey>() {
                Ok(key) => options.apply(key, value),
                Err(_) => debug!(key = %key, "ignoring unknown notification option"),
            }
        }
        options
    }

    /// Set one option from its raw string value
    pub fn apply(&mut self, key: OptionKey, value: &str) {
        match key {
            OptionKey::Sound => self.sound = Sound::from_option(value),
            OptionKey::DeliveryDate => {
                self.delivery_date = match non_empty(value) {
                    None => None,
                    Some(raw) => match raw.parse::<DeliveryDate>() {
                        Ok(date) => Some(date),
                        Err(e) => {
                            warn!(value = %raw, error = %e, "ignoring unparsable deliveryDate");
                            None
                        }
                    },
                }
            }
            OptionKey::MainButtonLabel => self.main_button_label = non_empty(value),
            OptionKey::CloseButtonLabel => self.close_button_label = non_empty(value),
            OptionKey::Actions => {
                self.actions = split_actions(value);
                self.actions_requested = !value.is_empty();
            }
            OptionKey::Response => self.response = non_empty(value),
            OptionKey::Click => self.wait_for_click = value == YES,
            OptionKey::AppIcon => self.app_icon = non_empty(value),
            OptionKey::ContentImage => self.content_image = non_empty(value),
            OptionKey::Asynchronous => self.asynchronous = value == YES,
        }
    }

    /// Render back to the raw string mapping, omitting absent values
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        let mut put = |key: OptionKey, value: String| {
            map.insert(key.as_str().to_string(), value);
        };

        if let Some(ref sound) = self.sound {
            put(OptionKey::Sound, sound.name().to_string());
        }
        if let Some(date) = self.delivery_date {
            put(OptionKey::DeliveryDate, date.to_string());
        }
        if let Some(ref label) = self.main_button_label {
            put(OptionKey::MainButtonLabel, label.clone());
        }
        if let Some(ref label) = self.close_button_label {
            put(OptionKey::CloseButtonLabel, label.clone());
        }
        if self.has_actions() {
            let raw = if self.actions.is_empty() {
                ",".to_string()
            } else {
                self.actions.join(",")
            };
            put(OptionKey::Actions, raw);
        }
        if let Some(ref placeholder) = self.response {
            put(OptionKey::Response, placeholder.clone());
        }
        if self.wait_for_click {
            put(OptionKey::Click, YES.to_string());
        }
        if let Some(ref icon) = self.app_icon {
            put(OptionKey::AppIcon, icon.clone());
        }
        if let Some(ref image) = self.content_image {
            put(OptionKey::ContentImage, image.clone());
        }
        if self.asynchronous {
            put(OptionKey::Asynchronous, YES.to_string());
        }
        map
    }

    /// Whether the request needs affordances only the legacy backend has:
    /// buttons, a dropdown, a reply field, or waiting for a click.
    pub fn is_interactive(&self) -> bool {
        self.main_button_label.is_some()
            || self.close_button_label.is_some()
            || self.has_actions()
            || self.response.is_some()
            || self.wait_for_click
    }

    /// Whether actions were asked for, labelled or not
    pub fn has_actions(&self) -> bool {
        self.actions_requested || !self.actions.is_empty()
    }

    pub fn with_sound(mut self, sound: Sound) -> Self {
        self.sound = Some(sound);
        self
    }

    pub fn with_delivery_date(mut self, date: DeliveryDate) -> Self {
        self.delivery_date = Some(date);
        self
    }

    pub fn with_main_button(mut self, label: impl Into<String>) -> Self {
        self.main_button_label = non_empty(&label.into());
        self
    }

    pub fn with_close_button(mut self, label: impl Into<String>) -> Self {
        self.close_button_label = non_empty(&label.into());
        self
    }

    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = actions
            .into_iter()
            .map(Into::into)
            .filter(|a| !a.trim().is_empty())
            .collect();
        self.actions_requested = !self.actions.is_empty();
        self
    }

    pub fn with_response(mut self, placeholder: impl Into<String>) -> Self {
        self.response = non_empty(&placeholder.into());
        self
    }

    pub fn with_wait_for_click(mut self) -> Self {
        self.wait_for_click = true;
        self
    }

    pub fn with_app_icon(mut self, location: impl Into<String>) -> Self {
        self.app_icon = non_empty(&location.into());
        self
    }

    pub fn with_content_image(mut self, location: impl Into<String>) -> Self {
        self.content_image = non_empty(&location.into());
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.asynchronous = true;
        self
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn split_actions(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a raw `key=value` pair as given on the command line
pub fn parse_option_pair(pair: &str) -> Result<(OptionKey, String), OptionsError> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| OptionsError::MalformedPair(pair.to_string()))?;
    let key = key.trim().parse::<OptionKey>()?;
    Ok((key, value.to_string()))
}
