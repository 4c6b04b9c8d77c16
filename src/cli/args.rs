//! CLI argument definitions using Clap

use clap::{ArgAction, Parser, Subcommand};

/// desk-notify - send desktop notifications from the command line
#[derive(Parser, Debug)]
#[command(name = "desk-notify")]
#[command(version)]
#[command(about = "Send desktop notifications, optionally waiting for the user's response")]
#[command(long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Notification title (may be empty)
    #[arg(required = true)]
    pub title: Option<String>,

    /// Notification body
    pub message: Option<String>,

    /// Secondary line under the title
    #[arg(short = 's', long)]
    pub subtitle: Option<String>,

    /// Sound name; "default" for the system sound, "" for silence
    #[arg(long, value_name = "NAME")]
    pub sound: Option<String>,

    /// Label of the main action button
    #[arg(long, value_name = "LABEL")]
    pub main_button: Option<String>,

    /// Label of the close button
    #[arg(long, value_name = "LABEL")]
    pub close_button: Option<String>,

    /// Extra actions; more than one is shown as a dropdown
    #[arg(long, value_name = "LABELS", value_delimiter = ',')]
    pub actions: Vec<String>,

    /// Show a reply field with this placeholder
    #[arg(long, value_name = "PLACEHOLDER")]
    pub response: Option<String>,

    /// Wait until the notification is clicked
    #[arg(long)]
    pub wait_click: bool,

    /// Image shown in place of the application icon (path or URL)
    #[arg(long, value_name = "LOCATION")]
    pub app_icon: Option<String>,

    /// Image attached to the notification (path or URL)
    #[arg(long, value_name = "LOCATION")]
    pub content_image: Option<String>,

    /// Deliver after this delay (e.g., 10s, 1m, 2m30s)
    #[arg(short = 'd', long, value_name = "TIME", conflicts_with = "delivery_date")]
    pub delay: Option<String>,

    /// Deliver at this time, in seconds since the Unix epoch
    #[arg(long, value_name = "EPOCH")]
    pub delivery_date: Option<String>,

    /// Return right after delivery instead of waiting for the user
    #[arg(long = "async")]
    pub asynchronous: bool,

    /// Bundle identifier the notification should appear to come from
    #[arg(long, value_name = "BUNDLE_ID", conflicts_with = "sender_app")]
    pub sender: Option<String>,

    /// Name of the application the notification should appear to come from
    #[arg(long, value_name = "NAME")]
    pub sender_app: Option<String>,

    /// Raw notification option (e.g., mainButtonLabel=OK); flags take precedence
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print the bundle identifier of an installed application
    BundleId {
        /// Application name (e.g., Safari)
        app: String,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "sender",
    "sound",
    "completion_timeout",
    "authorization_timeout",
    "on_timeout",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_title_and_message() {
        let cli = Cli::parse_from(["desk-notify", "Build", "finished"]);
        assert_eq!(cli.title.as_deref(), Some("Build"));
        assert_eq!(cli.message.as_deref(), Some("finished"));
        assert!(cli.command.is_none());
        assert!(!cli.asynchronous);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_accepts_empty_title() {
        let cli = Cli::parse_from(["desk-notify", ""]);
        assert_eq!(cli.title.as_deref(), Some(""));
        assert!(cli.message.is_none());
    }

    #[test]
    fn cli_requires_title_without_subcommand() {
        assert!(Cli::try_parse_from(["desk-notify"]).is_err());
    }

    #[test]
    fn cli_parses_interactive_flags() {
        let cli = Cli::parse_from([
            "desk-notify",
            "Deploy?",
            "--main-button",
            "Yes",
            "--close-button",
            "No",
            "--actions",
            "Later,Never",
            "--async",
        ]);
        assert_eq!(cli.main_button.as_deref(), Some("Yes"));
        assert_eq!(cli.close_button.as_deref(), Some("No"));
        assert_eq!(cli.actions, vec!["Later", "Never"]);
        assert!(cli.asynchronous);
    }

    #[test]
    fn cli_parses_repeated_options() {
        let cli = Cli::parse_from([
            "desk-notify",
            "Hi",
            "-o",
            "sound=Ping",
            "--option",
            "click=yes",
        ]);
        assert_eq!(cli.options, vec!["sound=Ping", "click=yes"]);
    }

    #[test]
    fn delay_conflicts_with_delivery_date() {
        let result = Cli::try_parse_from([
            "desk-notify",
            "Hi",
            "--delay",
            "5s",
            "--delivery-date",
            "1700000000",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn sender_conflicts_with_sender_app() {
        let result = Cli::try_parse_from([
            "desk-notify",
            "Hi",
            "--sender",
            "com.apple.Safari",
            "--sender-app",
            "Safari",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_verbosity() {
        let cli = Cli::parse_from(["desk-notify", "Hi", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["desk-notify", "config", "set", "sender", "com.apple.Mail"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "sender");
            assert_eq!(value, "com.apple.Mail");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_parses_bundle_id() {
        let cli = Cli::parse_from(["desk-notify", "bundle-id", "Safari"]);
        assert!(matches!(
            cli.command,
            Some(Commands::BundleId { ref app }) if app == "Safari"
        ));
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("sender"));
        assert!(is_valid_config_key("on_timeout"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
