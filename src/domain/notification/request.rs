//! Notification request entity

use std::collections::HashMap;

use super::options::NotificationOptions;

/// A single, self-contained request to show one notification
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationRequest {
    /// Required, may be empty
    pub title: String,
    /// Omitted from the shown notification when empty
    pub subtitle: String,
    pub body: String,
    pub options: NotificationOptions,
}

impl NotificationRequest {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    /// Build from the raw option mapping
    pub fn from_parts(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        body: impl Into<String>,
        options: &HashMap<String, String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            body: body.into(),
            options: NotificationOptions::from_map(options),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn with_options(mut self, options: NotificationOptions) -> Self {
        self.options = options;
        self
    }

    /// Subtitle, if there is one worth showing
    pub fn subtitle(&self) -> Option<&str> {
        if self.subtitle.is_empty() {
            None
        } else {
            Some(&self.subtitle)
        }
    }
}
