//! Installed application lookup port

/// Port for resolving and checking application bundle identifiers
pub trait AppRegistry: Send + Sync {
    /// Ask the scripting bridge for the identifier of a named application.
    ///
    /// Lookup failures of any kind are reported as `None`.
    fn bundle_identifier(&self, application_name: &str) -> Option<String>;

    /// Whether an application with this identifier is installed
    fn is_installed(&self, bundle_identifier: &str) -> bool;
}

impl AppRegistry for Box<dyn AppRegistry> {
    fn bundle_identifier(&self, application_name: &str) -> Option<String> {
        self.as_ref().bundle_identifier(application_name)
    }

    fn is_installed(&self, bundle_identifier: &str) -> bool {
        self.as_ref().is_installed(bundle_identifier)
    }
}
