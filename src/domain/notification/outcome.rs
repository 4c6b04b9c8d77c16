//! Unified delivery result

use std::fmt;

use serde::Serialize;

/// What the user did with an interactive notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAction {
    pub key: String,
    pub value: String,
}

impl UserAction {
    pub const BUTTON: &'static str = "button";
    pub const CLOSE: &'static str = "close";
    pub const REPLY: &'static str = "reply";
    pub const CLICK: &'static str = "click";

    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The main button or one of the dropdown actions was chosen
    pub fn button(label: impl Into<String>) -> Self {
        Self::new(Self::BUTTON, label)
    }

    pub fn close(label: impl Into<String>) -> Self {
        Self::new(Self::CLOSE, label)
    }

    pub fn reply(text: impl Into<String>) -> Self {
        Self::new(Self::REPLY, text)
    }

    /// The notification body itself was clicked
    pub fn click() -> Self {
        Self::new(Self::CLICK, "")
    }
}

/// Result of one send operation.
///
/// Every failure crosses the library boundary as a value of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NotificationOutcome {
    Success,
    UserAction(UserAction),
    Failure { message: String },
}

impl NotificationOutcome {
    /// Message used when the backend reports an error without a description
    pub const UNKNOWN_ERROR: &'static str = "unknown error";

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn user_action(&self) -> Option<&UserAction> {
        match self {
            Self::UserAction(action) => Some(action),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "delivered"),
            Self::UserAction(action) if action.value.is_empty() => write!(f, "{}", action.key),
            Self::UserAction(action) => write!(f, "{}: {}", action.key, action.value),
            Self::Failure { message } => write!(f, "failed: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_outcome_tag() {
        let json = serde_json::to_value(NotificationOutcome::UserAction(UserAction::button("OK")))
            .unwrap();
        assert_eq!(json["outcome"], "user_action");
        assert_eq!(json["key"], "button");
        assert_eq!(json["value"], "OK");

        let json = serde_json::to_value(NotificationOutcome::failure("denied")).unwrap();
        assert_eq!(json["outcome"], "failure");
        assert_eq!(json["message"], "denied");
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(NotificationOutcome::Success.to_string(), "delivered");
        assert_eq!(
            NotificationOutcome::UserAction(UserAction::click()).to_string(),
            "click"
        );
        assert_eq!(
            NotificationOutcome::UserAction(UserAction::reply("hi")).to_string(),
            "reply: hi"
        );
    }
}
