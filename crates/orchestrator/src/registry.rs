//! Service registry keyed by intent kind.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::intent::IntentKind;
use crate::services::Service;

/// Holds one service per intent kind.
#[derive(Default, Clone)]
pub struct ServiceRegistry {
    services: HashMap<IntentKind, Arc<dyn Service>>,
}

impl ServiceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service under the kind it reports.
    ///
    /// A service already registered for that kind is replaced.
    pub fn register<S: Service + 'static>(&mut self, service: S) {
        self.register_arc(Arc::new(service));
    }

    /// Register a shared service.
    pub fn register_arc(&mut self, service: Arc<dyn Service>) {
        let kind = service.kind();
        info!(kind = %kind, service = service.name(), "SERVICE_REGISTERED");
        self.services.insert(kind, service);
    }

    /// Service for a kind.
    pub fn get(&self, kind: IntentKind) -> Option<&Arc<dyn Service>> {
        self.services.get(&kind)
    }

    /// Whether a kind has a service.
    pub fn has(&self, kind: IntentKind) -> bool {
        self.services.contains_key(&kind)
    }

    /// Registered kinds, in declaration order.
    pub fn kinds(&self) -> Vec<IntentKind> {
        IntentKind::ALL
            .into_iter()
            .filter(|kind| self.services.contains_key(kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
