//! Stand-ins for platforms without a notification facility

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use tracing::warn;

use crate::application::legacy::LegacyDelegate;
use crate::application::ports::{
    AppRegistry, AuthorizationReply, CompletionHandler, IdentityHook, LegacyCenter,
    LegacyNotification, ModernCenter, ModernRequest,
};
use crate::domain::identity::IdentityOverride;

/// Modern center type for platforms that never have one
#[derive(Debug)]
pub enum NoModernCenter {}

impl ModernCenter for NoModernCenter {
    fn request_authorization(&self, _reply: AuthorizationReply) {
        match *self {}
    }

    fn add(&self, _request: ModernRequest, _completion: CompletionHandler) {
        match *self {}
    }
}

/// Legacy center that shows nothing
#[derive(Debug, Default)]
pub struct UnsupportedCenter;

#[async_trait]
impl LegacyCenter for UnsupportedCenter {
    fn deliver(&self, notification: LegacyNotification, delegate: Arc<LegacyDelegate>) {
        warn!(
            title = %notification.title,
            "desktop notifications are not supported on this platform"
        );
        delegate.did_dismiss();
    }

    async fn pump(&self, slice: StdDuration) {
        tokio::time::sleep(slice).await;
    }
}

/// Registry that knows no applications
#[derive(Debug, Default)]
pub struct NoopRegistry;

impl AppRegistry for NoopRegistry {
    fn bundle_identifier(&self, _application_name: &str) -> Option<String> {
        None
    }

    fn is_installed(&self, _bundle_identifier: &str) -> bool {
        false
    }
}

#[derive(Debug, Default)]
pub struct NoopHook;

impl IdentityHook for NoopHook {
    fn install(&self, _identity: Arc<IdentityOverride>) {}
}
