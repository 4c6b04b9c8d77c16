//! Sender identity hook port

use std::sync::Arc;

use crate::domain::identity::IdentityOverride;

/// Mechanism that makes the platform read the override as the sender.
pub trait IdentityHook: Send + Sync {
    /// Install the hook so it consults `identity`.
    ///
    /// Idempotent: repeated calls after the first have no effect.
    fn install(&self, identity: Arc<IdentityOverride>);
}

impl IdentityHook for Box<dyn IdentityHook> {
    fn install(&self, identity: Arc<IdentityOverride>) {
        self.as_ref().install(identity)
    }
}
