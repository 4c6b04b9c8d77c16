//! Sender identity override

use std::sync::OnceLock;

use crate::domain::error::IdentityError;

/// Bundle identifier used when an application name cannot be resolved
pub const FALLBACK_BUNDLE_IDENTIFIER: &str = "com.apple.Finder";

/// Process-wide, single-assignment sender identity.
///
/// Starts unset and can be written exactly once; there is no way to clear
/// or replace it. Readers never block.
#[derive(Debug, Default)]
pub struct IdentityOverride {
    bundle_identifier: OnceLock<String>,
}

impl IdentityOverride {
    pub const fn new() -> Self {
        Self {
            bundle_identifier: OnceLock::new(),
        }
    }

    /// Set the override if it is still unset.
    ///
    /// A second call leaves the first value in place and reports it.
    pub fn set(&self, bundle_identifier: impl Into<String>) -> Result<(), IdentityError> {
        self.bundle_identifier
            .set(bundle_identifier.into())
            .map_err(|_| IdentityError::AlreadySet(self.get().unwrap_or_default().to_string()))
    }

    pub fn get(&self) -> Option<&str> {
        self.bundle_identifier.get().map(String::as_str)
    }

    pub fn is_set(&self) -> bool {
        self.bundle_identifier.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unset() {
        let identity = IdentityOverride::new();
        assert!(!identity.is_set());
        assert_eq!(identity.get(), None);
    }

    #[test]
    fn set_once_then_read_only() {
        let identity = IdentityOverride::new();
        identity.set("com.apple.Safari").unwrap();
        assert_eq!(identity.get(), Some("com.apple.Safari"));

        let err = identity.set("com.apple.Mail").unwrap_err();
        assert_eq!(err, IdentityError::AlreadySet("com.apple.Safari".to_string()));
        assert_eq!(identity.get(), Some("com.apple.Safari"));
    }
}
