//! Dispatch of a classified intent to its registered service.

use serde::Serialize;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::error::OrchestratorError;
use crate::intent::{Intent, IntentKind};
use crate::registry::ServiceRegistry;
use crate::services::ServiceResult;

/// Service name reported when no service answered the kind.
pub const UNREGISTERED_SERVICE: &str = "router:unregistered";

/// Call-site metadata of one dispatch, reported as `meta.svc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMeta {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of one dispatch.
#[derive(Debug)]
pub struct Dispatched {
    /// Kind the intent was dispatched as.
    pub expected: IntentKind,
    pub result: Result<ServiceResult, OrchestratorError>,
    pub meta: ServiceMeta,
}

/// Routes intents to services by kind.
///
/// Unrecognized intents go to the `generic` service.
#[derive(Clone)]
pub struct Dispatcher {
    registry: ServiceRegistry,
}

impl Dispatcher {
    pub fn new(registry: ServiceRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Run the service for `intent` and time it.
    ///
    /// Service errors are returned in [`Dispatched::result`] and mirrored in
    /// the metadata; a degraded but successful result reports its problem in
    /// the metadata only.
    pub async fn dispatch(&self, intent: &Intent, prompt: &str) -> Dispatched {
        let expected = intent.service_kind().unwrap_or(IntentKind::Generic);

        let Some(service) = self.registry.get(expected) else {
            let err = OrchestratorError::NoService(expected);
            warn!(kind = %expected, "DISPATCH_NO_SERVICE");
            return Dispatched {
                expected,
                meta: ServiceMeta {
                    name: UNREGISTERED_SERVICE.to_string(),
                    latency_ms: None,
                    error: Some(err.to_string()),
                },
                result: Err(err),
            };
        };

        let start = Instant::now();
        let result = service
            .run(intent, prompt)
            .await
            .map_err(OrchestratorError::from);
        let latency_ms = start.elapsed().as_millis() as u64;

        let error = match &result {
            Ok(result) => result.degraded.clone(),
            Err(e) => Some(e.to_string()),
        };

        match &error {
            None => info!(service = service.name(), kind = %expected, latency_ms, "DISPATCH_OK"),
            Some(e) => warn!(service = service.name(), kind = %expected, latency_ms, error = %e, "DISPATCH_ERROR"),
        }

        Dispatched {
            expected,
            result,
            meta: ServiceMeta {
                name: service.name().to_string(),
                latency_ms: Some(latency_ms),
                error,
            },
        }
    }
}
