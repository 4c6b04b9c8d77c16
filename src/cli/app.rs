//! Main app runner for sending notifications

use std::process::ExitCode;

use tracing::{debug, info};

use crate::application::ports::ConfigStore;
use crate::application::waits_for_user;
use crate::domain::config::AppConfig;
use crate::domain::delivery::DeliverySettings;
use crate::domain::notification::{
    parse_option_pair, NotificationOptions, NotificationOutcome, NotificationRequest, OptionKey,
    Sound,
};
use crate::domain::schedule::{DeliveryDate, Duration};
use crate::infrastructure::{create_platform, XdgConfigStore};

use super::args::Cli;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Who the notification should appear to come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SenderChoice {
    BundleId(String),
    Application(String),
}

/// Send one notification as described by the command line
pub async fn run_send(cli: &Cli, config: &AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let request = match build_request(cli, config) {
        Ok(request) => request,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let platform = create_platform(config.delivery_settings());

    // Must happen before the first send
    if let Some(choice) = sender_choice(cli, config) {
        let result = match choice {
            SenderChoice::BundleId(id) => platform.identity.set_fake_identity(&id).map(|_| id),
            SenderChoice::Application(name) => platform.identity.set_fake_identity_for_app(&name),
        };
        match result {
            Ok(sender) => debug!(sender = %sender, "using sender override"),
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    if waits_for_user(&request.options) && !cli.json {
        presenter.start_spinner("Waiting for a response...");
    }

    let outcome = platform.notifier.send(request).await;
    presenter.stop_spinner();
    info!(outcome = %outcome, "send finished");

    presenter.outcome(&outcome, cli.json);
    ExitCode::from(exit_code_for(&outcome))
}

/// Print the bundle identifier of a named application
pub fn run_bundle_id(application_name: &str) -> ExitCode {
    let presenter = Presenter::new();
    let platform = create_platform(DeliverySettings::default());

    match platform.identity.resolve_bundle_identifier(application_name) {
        Some(bundle_identifier) => {
            presenter.output(&bundle_identifier);
            ExitCode::from(EXIT_SUCCESS)
        }
        None => {
            presenter.error(&format!("No application named '{}'", application_name));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Build the request from arguments, raw options and config defaults.
///
/// Dedicated flags take precedence over `--option` pairs; the configured
/// sound only applies when neither names one.
pub fn build_request(cli: &Cli, config: &AppConfig) -> Result<NotificationRequest, String> {
    let mut options = NotificationOptions::new();
    let mut sound_given = false;

    for pair in &cli.options {
        let (key, value) = parse_option_pair(pair).map_err(|e| e.to_string())?;
        sound_given |= key == OptionKey::Sound;
        options.apply(key, &value);
    }

    if let Some(ref sound) = cli.sound {
        options.sound = Sound::from_option(sound);
    } else if !sound_given {
        options.sound = config.sound();
    }

    if let Some(ref delay) = cli.delay {
        let delay = delay
            .parse::<Duration>()
            .map_err(|e| format!("Invalid delay: {}", e))?;
        options = options.with_delivery_date(DeliveryDate::after(delay));
    }
    if let Some(ref date) = cli.delivery_date {
        let date = date
            .parse::<DeliveryDate>()
            .map_err(|e| format!("Invalid delivery date '{}': {}", date, e))?;
        options = options.with_delivery_date(date);
    }

    if let Some(ref label) = cli.main_button {
        options = options.with_main_button(label.as_str());
    }
    if let Some(ref label) = cli.close_button {
        options = options.with_close_button(label.as_str());
    }
    if !cli.actions.is_empty() {
        options = options.with_actions(cli.actions.iter().cloned());
    }
    if let Some(ref placeholder) = cli.response {
        options = options.with_response(placeholder.as_str());
    }
    if cli.wait_click {
        options = options.with_wait_for_click();
    }
    if let Some(ref icon) = cli.app_icon {
        options = options.with_app_icon(icon.as_str());
    }
    if let Some(ref image) = cli.content_image {
        options = options.with_content_image(image.as_str());
    }
    if cli.asynchronous {
        options = options.asynchronous();
    }

    Ok(NotificationRequest::new(
        cli.title.clone().unwrap_or_default(),
        cli.message.clone().unwrap_or_default(),
    )
    .with_subtitle(cli.subtitle.clone().unwrap_or_default())
    .with_options(options))
}

/// `--sender-app` wins over the merged `sender` setting
pub fn sender_choice(cli: &Cli, config: &AppConfig) -> Option<SenderChoice> {
    if let Some(ref name) = cli.sender_app {
        return Some(SenderChoice::Application(name.clone()));
    }
    config
        .sender()
        .map(|id| SenderChoice::BundleId(id.to_string()))
}

pub fn exit_code_for(outcome: &NotificationOutcome) -> u8 {
    if outcome.is_failure() {
        EXIT_ERROR
    } else {
        EXIT_SUCCESS
    }
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load_or_empty().await;

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::UserAction;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["desk-notify"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn plain_request_is_not_interactive() {
        let request = build_request(&cli(&["Hi", "there"]), &AppConfig::empty()).unwrap();
        assert_eq!(request.title, "Hi");
        assert_eq!(request.body, "there");
        assert_eq!(request.subtitle(), None);
        assert!(!request.options.is_interactive());
        assert_eq!(request.options.sound, None);
    }

    #[test]
    fn flags_override_raw_options() {
        let request = build_request(
            &cli(&["Hi", "-o", "mainButtonLabel=Raw", "--main-button", "Flag"]),
            &AppConfig::empty(),
        )
        .unwrap();
        assert_eq!(request.options.main_button_label.as_deref(), Some("Flag"));
    }

    #[test]
    fn raw_options_are_applied() {
        let request = build_request(
            &cli(&["Hi", "-o", "click=yes", "-o", "asynchronous=yes"]),
            &AppConfig::empty(),
        )
        .unwrap();
        assert!(request.options.wait_for_click);
        assert!(request.options.asynchronous);
    }

    #[test]
    fn unknown_raw_option_is_a_usage_error() {
        let err = build_request(&cli(&["Hi", "-o", "colour=red"]), &AppConfig::empty()).unwrap_err();
        assert!(err.contains("colour"));
    }

    #[test]
    fn malformed_raw_option_is_a_usage_error() {
        assert!(build_request(&cli(&["Hi", "-o", "click"]), &AppConfig::empty()).is_err());
    }

    #[test]
    fn configured_sound_is_the_fallback() {
        let config = AppConfig {
            sound: Some("Ping".to_string()),
            ..Default::default()
        };
        let request = build_request(&cli(&["Hi"]), &config).unwrap();
        assert_eq!(request.options.sound, Some(Sound::Named("Ping".to_string())));

        let request = build_request(&cli(&["Hi", "--sound", "default"]), &config).unwrap();
        assert_eq!(request.options.sound, Some(Sound::Default));

        // An explicit empty sound means silent
        let request = build_request(&cli(&["Hi", "-o", "sound="]), &config).unwrap();
        assert_eq!(request.options.sound, None);
    }

    #[test]
    fn delay_schedules_in_the_future() {
        let request = build_request(&cli(&["Hi", "--delay", "1m"]), &AppConfig::empty()).unwrap();
        let remaining = request
            .options
            .delivery_date
            .and_then(|date| date.interval())
            .unwrap();
        assert!(remaining.as_secs() > 50 && remaining.as_secs() <= 60);
    }

    #[test]
    fn invalid_delay_is_rejected() {
        let err = build_request(&cli(&["Hi", "--delay", "soon"]), &AppConfig::empty()).unwrap_err();
        assert!(err.contains("Invalid delay"));
    }

    #[test]
    fn invalid_delivery_date_is_rejected() {
        assert!(build_request(
            &cli(&["Hi", "--delivery-date", "tomorrow"]),
            &AppConfig::empty()
        )
        .is_err());
    }

    #[test]
    fn sender_app_wins_over_configured_sender() {
        let config = AppConfig {
            sender: Some("com.apple.Mail".to_string()),
            ..Default::default()
        };
        assert_eq!(
            sender_choice(&cli(&["Hi", "--sender-app", "Safari"]), &config),
            Some(SenderChoice::Application("Safari".to_string()))
        );
        assert_eq!(
            sender_choice(&cli(&["Hi"]), &config),
            Some(SenderChoice::BundleId("com.apple.Mail".to_string()))
        );
        assert_eq!(sender_choice(&cli(&["Hi"]), &AppConfig::empty()), None);
    }

    #[test]
    fn exit_codes_follow_outcome() {
        assert_eq!(exit_code_for(&NotificationOutcome::Success), EXIT_SUCCESS);
        assert_eq!(
            exit_code_for(&NotificationOutcome::UserAction(UserAction::click())),
            EXIT_SUCCESS
        );
        assert_eq!(
            exit_code_for(&NotificationOutcome::failure("denied")),
            EXIT_ERROR
        );
    }
}
