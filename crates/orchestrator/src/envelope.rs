//! The routed answer returned to callers.

use serde::Serialize;

use crate::actions::Cta;
use crate::classifier::ClassificationResult;
use crate::dispatcher::ServiceMeta;
use crate::services::Insight;
use crate::table::TableRow;

/// Renderable payload of a successful answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeData {
    pub insights: Vec<Insight>,
    pub ctas: Vec<Cta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<TableRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Provenance of an answer: how it was classified and which service ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeMeta {
    pub ai: ClassificationResult,
    pub svc: ServiceMeta,
}

/// Result of [`Orchestrator::route`](crate::Orchestrator::route).
///
/// Serializes as `{ok: true, wallet, data, meta}` or
/// `{ok: false, error, meta}`. A failed answer carries no data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RoutedEnvelope {
    Success {
        ok: bool,
        wallet: Option<String>,
        data: EnvelopeData,
        meta: EnvelopeMeta,
    },
    Failure {
        ok: bool,
        error: String,
        meta: EnvelopeMeta,
    },
}

impl RoutedEnvelope {
    pub fn success(wallet: Option<String>, data: EnvelopeData, meta: EnvelopeMeta) -> Self {
        Self::Success {
            ok: true,
            wallet,
            data,
            meta,
        }
    }

    pub fn failure(error: impl Into<String>, meta: EnvelopeMeta) -> Self {
        Self::Failure {
            ok: false,
            error: error.into(),
            meta,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(&self) -> Option<&EnvelopeData> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    pub fn meta(&self) -> &EnvelopeMeta {
        match self {
            Self::Success { meta, .. } | Self::Failure { meta, .. } => meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::AiSource;
    use crate::intent::Intent;
    use serde_json::json;

    fn meta() -> EnvelopeMeta {
        EnvelopeMeta {
            ai: ClassificationResult {
                intent: Intent::Price { token: None },
                source: AiSource::Fallback,
                provider: None,
                latency_ms: 0,
                error: None,
                raw: None,
            },
            svc: ServiceMeta {
                name: "birdeye:price".to_string(),
                latency_ms: Some(12),
                error: Some("backend down".to_string()),
            },
        }
    }

    #[test]
    fn test_failure_shape() {
        let envelope = RoutedEnvelope::failure("backend down", meta());
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "ok": false,
                "error": "backend down",
                "meta": {
                    "ai": { "intent": { "kind": "price" }, "source": "fallback", "latencyMs": 0 },
                    "svc": { "name": "birdeye:price", "latencyMs": 12, "error": "backend down" }
                }
            })
        );
        assert!(!envelope.is_ok());
        assert!(envelope.data().is_none());
    }

    #[test]
    fn test_success_shape_keeps_null_wallet() {
        let data = EnvelopeData {
            insights: Vec::new(),
            ctas: vec![Cta::export_csv()],
            summary: Some("SOL is up.".to_string()),
            table: None,
            suggestions: None,
        };
        let envelope = RoutedEnvelope::success(None, data, meta());
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["ok"], true);
        assert!(value["wallet"].is_null());
        assert!(value.as_object().unwrap().contains_key("wallet"));
        assert_eq!(value["data"]["summary"], "SOL is up.");
        assert!(value["data"].get("table").is_none());
        assert_eq!(value["data"]["ctas"][0]["action"], "export_csv");
    }
}
