//! desk-notify CLI entry point

use std::process::ExitCode;

use clap::Parser;

use desk_notify::cli::{
    app::{load_merged_config, run_bundle_id, run_send, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    logging::init_logging,
    presenter::Presenter,
};
use desk_notify::domain::config::AppConfig;
use desk_notify::infrastructure::XdgConfigStore;

// Platform callbacks for legacy notifications are delivered on the main
// thread's run loop, which is serviced while the send is awaited.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            let presenter = Presenter::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::BundleId { ref app }) => return run_bundle_id(app),
        None => {}
    }

    let cli_config = AppConfig {
        sender: cli.sender.clone(),
        ..Default::default()
    };
    let config = load_merged_config(cli_config).await;

    run_send(&cli, &config).await
}
