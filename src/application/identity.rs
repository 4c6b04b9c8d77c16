//! Sender identity setup use case

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::error::IdentityError;
use crate::domain::identity::{IdentityOverride, FALLBACK_BUNDLE_IDENTIFIER};

use super::ports::{AppRegistry, IdentityHook};

/// Resolves application identities and sets the sender override.
///
/// The override must be set at most once per process and before the first
/// notification is sent; notifications already shown keep the real sender.
pub struct IdentityService<R, H>
where
    R: AppRegistry,
    H: IdentityHook,
{
    registry: R,
    hook: H,
    identity: Arc<IdentityOverride>,
}

impl<R, H> IdentityService<R, H>
where
    R: AppRegistry,
    H: IdentityHook,
{
    pub fn new(registry: R, hook: H, identity: Arc<IdentityOverride>) -> Self {
        Self {
            registry,
            hook,
            identity,
        }
    }

    pub fn identity(&self) -> &Arc<IdentityOverride> {
        &self.identity
    }

    /// Bundle identifier of a named application, if it can be resolved
    pub fn resolve_bundle_identifier(&self, application_name: &str) -> Option<String> {
        let resolved = self
            .registry
            .bundle_identifier(application_name)
            .filter(|id| !id.is_empty());
        debug!(application = application_name, resolved = ?resolved, "resolved bundle identifier");
        resolved
    }

    /// Bundle identifier of a named application, or Finder's
    pub fn bundle_identifier_or_default(&self, application_name: &str) -> String {
        self.resolve_bundle_identifier(application_name)
            .unwrap_or_else(|| FALLBACK_BUNDLE_IDENTIFIER.to_string())
    }

    /// Make subsequent notifications appear to come from `bundle_identifier`.
    ///
    /// Fails without touching the override when no installed application
    /// has that identifier, or when the override was already set.
    pub fn set_fake_identity(&self, bundle_identifier: &str) -> Result<(), IdentityError> {
        self.hook.install(Arc::clone(&self.identity));

        if !self.registry.is_installed(bundle_identifier) {
            return Err(IdentityError::NotInstalled(bundle_identifier.to_string()));
        }

        self.identity.set(bundle_identifier)?;
        info!(sender = bundle_identifier, "sender identity overridden");
        Ok(())
    }

    /// Resolve an application by name and use it as the sender
    pub fn set_fake_identity_for_app(&self, application_name: &str) -> Result<String, IdentityError> {
        let bundle_identifier = self
            .resolve_bundle_identifier(application_name)
            .ok_or_else(|| IdentityError::UnknownApplication(application_name.to_string()))?;
        self.set_fake_identity(&bundle_identifier)?;
        Ok(bundle_identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockRegistry {
        apps: HashMap<&'static str, &'static str>,
    }

    impl MockRegistry {
        fn new() -> Self {
            let apps = HashMap::from([("Safari", "com.apple.Safari"), ("Mail", "com.apple.mail")]);
            Self { apps }
        }
    }

    impl AppRegistry for MockRegistry {
        fn bundle_identifier(&self, application_name: &str) -> Option<String> {
            self.apps.get(application_name).map(|id| id.to_string())
        }

        fn is_installed(&self, bundle_identifier: &str) -> bool {
            self.apps.values().any(|id| *id == bundle_identifier)
        }
    }

    #[derive(Default)]
    struct MockHook {
        installs: Arc<AtomicUsize>,
    }

    impl IdentityHook for MockHook {
        fn install(&self, _identity: Arc<IdentityOverride>) {
            self.installs.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn service() -> (IdentityService<MockRegistry, MockHook>, Arc<AtomicUsize>) {
        let hook = MockHook::default();
        let installs = Arc::clone(&hook.installs);
        let service = IdentityService::new(MockRegistry::new(), hook, Arc::new(IdentityOverride::new()));
        (service, installs)
    }

    #[test]
    fn resolves_known_application() {
        let (service, _) = service();
        assert_eq!(
            service.resolve_bundle_identifier("Safari"),
            Some("com.apple.Safari".to_string())
        );
        assert_eq!(service.resolve_bundle_identifier("Nope"), None);
    }

    #[test]
    fn unknown_application_falls_back_to_finder() {
        let (service, _) = service();
        assert_eq!(service.bundle_identifier_or_default("Nope"), "com.apple.Finder");
        assert_eq!(service.bundle_identifier_or_default("Mail"), "com.apple.mail");
    }

    #[test]
    fn not_installed_identifier_leaves_override_unset() {
        let (service, installs) = service();
        let err = service.set_fake_identity("com.example.missing").unwrap_err();
        assert_eq!(err, IdentityError::NotInstalled("com.example.missing".to_string()));
        assert!(!service.identity().is_set());
        assert_eq!(installs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn installed_identifier_is_set_exactly_once() {
        let (service, _) = service();
        service.set_fake_identity("com.apple.Safari").unwrap();
        assert_eq!(service.identity().get(), Some("com.apple.Safari"));

        let err = service.set_fake_identity("com.apple.mail").unwrap_err();
        assert!(matches!(err, IdentityError::AlreadySet(_)));
        assert_eq!(service.identity().get(), Some("com.apple.Safari"));
    }

    #[test]
    fn failed_check_keeps_existing_override() {
        let (service, _) = service();
        service.set_fake_identity("com.apple.mail").unwrap();
        assert!(service.set_fake_identity("com.example.missing").is_err());
        assert_eq!(service.identity().get(), Some("com.apple.mail"));
    }

    #[test]
    fn set_by_application_name() {
        let (service, _) = service();
        assert_eq!(
            service.set_fake_identity_for_app("Safari").unwrap(),
            "com.apple.Safari"
        );
        assert_eq!(
            service.set_fake_identity_for_app("Nope").unwrap_err(),
            IdentityError::UnknownApplication("Nope".to_string())
        );
    }
}
