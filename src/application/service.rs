//! Send notification use case

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::delivery::DeliverySettings;
use crate::domain::identity::IdentityOverride;
use crate::domain::notification::{NotificationOutcome, NotificationRequest};

use super::authorization::AuthorizationGate;
use super::legacy::deliver_legacy;
use super::modern::deliver_modern;
use super::ports::{LegacyCenter, ModernCenter, Notifier};
use super::routing::{classify, Route};

/// Routes each request to the modern or legacy backend and reports the
/// outcome.
///
/// `modern` is `None` on platforms without a modern notification center;
/// every request then goes through the legacy backend.
pub struct NotificationService<M, L>
where
    M: ModernCenter,
    L: LegacyCenter,
{
    modern: Option<M>,
    legacy: L,
    settings: DeliverySettings,
    authorization: AuthorizationGate,
    identity: Arc<IdentityOverride>,
}

impl<M, L> NotificationService<M, L>
where
    M: ModernCenter,
    L: LegacyCenter,
{
    /// Create a new service instance
    pub fn new(
        modern: Option<M>,
        legacy: L,
        settings: DeliverySettings,
        identity: Arc<IdentityOverride>,
    ) -> Self {
        Self {
            modern,
            legacy,
            authorization: AuthorizationGate::new(settings.authorization_timeout),
            settings,
            identity,
        }
    }

    pub fn has_modern_center(&self) -> bool {
        self.modern.is_some()
    }

    pub fn settings(&self) -> &DeliverySettings {
        &self.settings
    }

    /// Sender identity shared with the identity setup
    pub fn identity(&self) -> &Arc<IdentityOverride> {
        &self.identity
    }

    /// Which backend `request` would be sent through
    pub fn route_for(&self, request: &NotificationRequest) -> Route {
        classify(&request.options, self.has_modern_center())
    }

    /// Ask for notification permission now instead of on first send.
    ///
    /// Returns `false` when there is no modern center.
    pub async fn request_authorization(&self) -> bool {
        match self.modern {
            Some(ref center) => self.authorization.ensure(center).await,
            None => false,
        }
    }

    /// Execute one send
    pub async fn send_request(&self, request: &NotificationRequest) -> NotificationOutcome {
        let route = self.route_for(request);
        debug!(
            route = route.as_str(),
            sender = self.identity.get().unwrap_or("(own bundle)"),
            "routing notification"
        );

        match (route, self.modern.as_ref()) {
            (Route::Modern, Some(center)) => {
                if !self.authorization.ensure(center).await {
                    warn!("notifications are not authorized; the system may suppress this one");
                }
                deliver_modern(center, request, &self.settings).await
            }
            _ => deliver_legacy(&self.legacy, request).await,
        }
    }
}

#[async_trait]
impl<M, L> Notifier for NotificationService<M, L>
where
    M: ModernCenter,
    L: LegacyCenter,
{
    async fn send(&self, request: NotificationRequest) -> NotificationOutcome {
        self.send_request(&request).await
    }
}
