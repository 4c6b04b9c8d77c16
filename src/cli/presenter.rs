//! CLI presenter for output formatting

use std::time::Duration as StdDuration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::notification::NotificationOutcome;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(StdDuration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner.is_some()
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Report a send outcome.
    ///
    /// User actions go to stdout as `key` or `key<TAB>value` so scripts can
    /// read them; status lines go to stderr.
    pub fn outcome(&self, outcome: &NotificationOutcome, json: bool) {
        if json {
            match serde_json::to_string(outcome) {
                Ok(line) => self.output(&line),
                Err(e) => self.error(&format!("Failed to encode outcome: {}", e)),
            }
            return;
        }

        match outcome {
            NotificationOutcome::Success => self.success("Notification delivered"),
            NotificationOutcome::UserAction(_) => self.output(&format_action_line(outcome)),
            NotificationOutcome::Failure { message } => {
                self.error(&format!("Notification failed: {}", message))
            }
        }
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain-text rendering of a user action
fn format_action_line(outcome: &NotificationOutcome) -> String {
    match outcome.user_action() {
        Some(action) if action.value.is_empty() => action.key.clone(),
        Some(action) => format!("{}\t{}", action.key, action.value),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::UserAction;

    #[test]
    fn action_line_with_value() {
        let outcome = NotificationOutcome::UserAction(UserAction::button("OK"));
        assert_eq!(format_action_line(&outcome), "button\tOK");
    }

    #[test]
    fn action_line_for_click() {
        let outcome = NotificationOutcome::UserAction(UserAction::click());
        assert_eq!(format_action_line(&outcome), "click");
    }

    #[test]
    fn spinner_starts_and_stops() {
        let mut presenter = Presenter::new();
        presenter.start_spinner("Waiting");
        assert!(presenter.is_spinning());
        presenter.stop_spinner();
        assert!(!presenter.is_spinning());
    }
}
