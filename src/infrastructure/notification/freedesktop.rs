//! Freedesktop notification adapter using notify-rust
//!
//! Plays the legacy-center role on Linux and the BSDs. Buttons become
//! notification actions; waiting for them happens on a helper thread that
//! reports back through the delegate.

use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, OnceLock};
use std::thread;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use notify_rust::{Hint, Notification, Timeout};
use tracing::{debug, warn};

use crate::application::legacy::LegacyDelegate;
use crate::application::ports::{AppRegistry, IdentityHook, LegacyCenter, LegacyNotification};
use crate::domain::identity::IdentityOverride;
use crate::domain::notification::{Sound, UserAction};

/// Action id the notification server invokes when the body is clicked
const DEFAULT_ACTION: &str = "default";
const MAIN_ACTION: &str = "main";
const CLOSE_ACTION: &str = "close";
const EXTRA_ACTION_PREFIX: &str = "action-";
/// Reported by notify-rust when the notification is closed
const CLOSED_ACTION: &str = "__closed";

/// Identity override shared between the hook and the center
type SenderSlot = Arc<OnceLock<Arc<IdentityOverride>>>;

/// Legacy-center adapter over the freedesktop notification service
pub struct FreedesktopCenter {
    /// Application name for notifications
    app_name: String,
    sender: SenderSlot,
}

impl FreedesktopCenter {
    /// Create a new freedesktop center
    pub fn new() -> Self {
        Self::with_app_name("DeskNotify")
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            sender: Arc::new(OnceLock::new()),
        }
    }

    /// Hook that makes this center announce the overridden sender
    pub fn identity_hook(&self) -> FreedesktopIdentityHook {
        FreedesktopIdentityHook {
            sender: Arc::clone(&self.sender),
        }
    }

    fn effective_app_name(&self) -> String {
        self.sender
            .get()
            .and_then(|identity| identity.get())
            .map(str::to_string)
            .unwrap_or_else(|| self.app_name.clone())
    }
}

impl Default for FreedesktopCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LegacyCenter for FreedesktopCenter {
    fn deliver(&self, mut notification: LegacyNotification, delegate: Arc<LegacyDelegate>) {
        let app_name = self.effective_app_name();

        // Nothing outlives the process here, so an unwaited send must be
        // shown before returning
        let fire_and_forget = !delegate.keep_running();
        if fire_and_forget && notification.deliver_after.take().is_some() {
            warn!("scheduled delivery needs the process to keep running; delivering now");
        }

        // Showing and waiting both block on D-Bus
        let (shown_tx, shown_rx) = mpsc::channel::<()>();
        thread::spawn(move || {
            if let Some(delay) = notification.deliver_after {
                thread::sleep(delay);
            }

            let actions = action_table(&notification);
            let builder = build(
                &notification,
                &app_name,
                &actions,
                delegate.awaiting_interaction(),
            );
            let shown = builder.show();
            let _ = shown_tx.send(());
            let handle = match shown {
                Ok(handle) => handle,
                Err(e) => {
                    warn!(error = %e, "failed to show notification");
                    delegate.did_dismiss();
                    return;
                }
            };
            delegate.did_deliver();

            if !delegate.awaiting_interaction() {
                return;
            }
            handle.wait_for_action(|invoked| match resolve_action(&actions, invoked) {
                Some(action) => delegate.did_activate(action),
                None => delegate.did_dismiss(),
            });
        });

        if fire_and_forget {
            let _ = shown_rx.recv();
        }
    }

    async fn pump(&self, slice: StdDuration) {
        tokio::time::sleep(slice).await;
    }
}

/// Notification action ids and what they mean to the caller
fn action_table(notification: &LegacyNotification) -> Vec<(String, UserAction)> {
    let mut table = vec![(DEFAULT_ACTION.to_string(), UserAction::click())];
    if let Some(ref label) = notification.main_button_label {
        table.push((MAIN_ACTION.to_string(), UserAction::button(label.clone())));
    }
    for (i, label) in notification.actions.iter().enumerate() {
        table.push((
            format!("{}{}", EXTRA_ACTION_PREFIX, i),
            UserAction::button(label.clone()),
        ));
    }
    if let Some(ref label) = notification.close_button_label {
        table.push((CLOSE_ACTION.to_string(), UserAction::close(label.clone())));
    }
    table
}

fn resolve_action(table: &[(String, UserAction)], invoked: &str) -> Option<UserAction> {
    if invoked == CLOSED_ACTION {
        return None;
    }
    table
        .iter()
        .find(|(id, _)| id == invoked)
        .map(|(_, action)| action.clone())
}

fn build(
    notification: &LegacyNotification,
    app_name: &str,
    actions: &[(String, UserAction)],
    interactive: bool,
) -> Notification {
    let mut builder = Notification::new();
    builder.appname(app_name).summary(&notification.title);

    // Freedesktop notifications have no subtitle; show it as the first body line
    match notification.subtitle {
        Some(ref subtitle) => builder.body(&format!("{}\n{}", subtitle, notification.body)),
        None => builder.body(&notification.body),
    };

    match notification.sound {
        Some(Sound::Default) => {
            builder.hint(Hint::SoundName("message-new-instant".to_string()));
        }
        Some(Sound::Named(ref name)) => {
            builder.hint(Hint::SoundName(name.clone()));
        }
        None => {
            builder.hint(Hint::SuppressSound(true));
        }
    }

    // Images are best effort: anything not on local disk is skipped
    if let Some(path) = notification.app_icon.as_deref().and_then(local_path) {
        builder.icon(&path);
    }
    if let Some(path) = notification.content_image.as_deref().and_then(local_path) {
        builder.image_path(&path);
    }

    if notification.response_placeholder.is_some() {
        warn!("reply fields are not supported by freedesktop notifications");
    }

    // Without a waiter nobody would hear the answer, so no actions are offered
    if interactive {
        for (id, action) in actions {
            let label: &str = if action.value.is_empty() {
                "Open"
            } else {
                &action.value
            };
            builder.action(id, label);
        }
        builder.timeout(Timeout::Never);
    }
    builder
}

/// Local filesystem path for an image location, if it has one
fn local_path(location: &str) -> Option<String> {
    if location.starts_with("http://") || location.starts_with("https://") {
        debug!(location, "remote images are not fetched");
        return None;
    }
    let path = location.strip_prefix("file://").unwrap_or(location);
    if Path::new(path).exists() {
        Some(path.to_string())
    } else {
        debug!(location, "image not found; showing none");
        None
    }
}

/// Installs the identity override into a `FreedesktopCenter`
pub struct FreedesktopIdentityHook {
    sender: SenderSlot,
}

impl IdentityHook for FreedesktopIdentityHook {
    fn install(&self, identity: Arc<IdentityOverride>) {
        // First installation wins
        let _ = self.sender.set(identity);
    }
}

/// Application lookup through installed `.desktop` entries.
///
/// The desktop file id (file name without `.desktop`) plays the role of
/// a bundle identifier.
pub struct DesktopEntryRegistry {
    search_dirs: Vec<PathBuf>,
}

impl DesktopEntryRegistry {
    pub fn new() -> Self {
        let mut search_dirs = Vec::new();
        if let Some(data) = dirs::data_dir() {
            search_dirs.push(data.join("applications"));
        }
        search_dirs.push(PathBuf::from("/usr/local/share/applications"));
        search_dirs.push(PathBuf::from("/usr/share/applications"));
        Self { search_dirs }
    }

    /// Create with custom search directories
    pub fn with_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    fn entries(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.search_dirs
            .iter()
            .filter_map(|dir| std::fs::read_dir(dir).ok())
            .flatten()
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "desktop"))
    }
}

impl Default for DesktopEntryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AppRegistry for DesktopEntryRegistry {
    fn bundle_identifier(&self, application_name: &str) -> Option<String> {
        self.entries().find_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let named = content
                .lines()
                .filter_map(|line| line.strip_prefix("Name="))
                .any(|name| name.trim() == application_name);
            if named {
                path.file_stem().map(|stem| stem.to_string_lossy().to_string())
            } else {
                None
            }
        })
    }

    fn is_installed(&self, bundle_identifier: &str) -> bool {
        let file_name = format!("{}.desktop", bundle_identifier);
        self.search_dirs.iter().any(|dir| dir.join(&file_name).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_with_custom_app_name() {
        let center = FreedesktopCenter::with_app_name("TestApp");
        assert_eq!(center.app_name, "TestApp");
        assert_eq!(center.effective_app_name(), "TestApp");
    }

    #[test]
    fn center_default_creates() {
        let center = FreedesktopCenter::default();
        assert_eq!(center.app_name, "DeskNotify");
    }

    #[test]
    fn identity_hook_changes_announced_sender() {
        let center = FreedesktopCenter::new();
        let identity = Arc::new(IdentityOverride::new());
        center.identity_hook().install(Arc::clone(&identity));
        assert_eq!(center.effective_app_name(), "DeskNotify");

        identity.set("org.gnome.Nautilus").unwrap();
        assert_eq!(center.effective_app_name(), "org.gnome.Nautilus");
    }

    #[test]
    fn action_table_maps_every_affordance() {
        let notification = LegacyNotification {
            main_button_label: Some("OK".to_string()),
            actions: vec!["Snooze".to_string(), "Archive".to_string()],
            close_button_label: Some("Later".to_string()),
            ..Default::default()
        };
        let table = action_table(&notification);

        assert_eq!(resolve_action(&table, "default"), Some(UserAction::click()));
        assert_eq!(resolve_action(&table, "main"), Some(UserAction::button("OK")));
        assert_eq!(resolve_action(&table, "action-1"), Some(UserAction::button("Archive")));
        assert_eq!(resolve_action(&table, "close"), Some(UserAction::close("Later")));
        assert_eq!(resolve_action(&table, "__closed"), None);
        assert_eq!(resolve_action(&table, "bogus"), None);
    }

    #[test]
    fn remote_and_missing_images_are_skipped() {
        assert_eq!(local_path("https://example.com/icon.png"), None);
        assert_eq!(local_path("/definitely/not/here.png"), None);

        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert_eq!(local_path(&format!("file://{}", path)), Some(path.clone()));
        assert_eq!(local_path(&path), Some(path));
    }

    #[test]
    fn desktop_registry_resolves_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("org.example.Editor.desktop"),
            "[Desktop Entry]\nName=Editor\nExec=editor\n",
        )
        .unwrap();
        let registry = DesktopEntryRegistry::with_dirs(vec![dir.path().to_path_buf()]);

        assert_eq!(
            registry.bundle_identifier("Editor"),
            Some("org.example.Editor".to_string())
        );
        assert_eq!(registry.bundle_identifier("Viewer"), None);
        assert!(registry.is_installed("org.example.Editor"));
        assert!(!registry.is_installed("org.example.Viewer"));
    }
}
