//! The query router: classify, dispatch, attach CTAs.

use std::sync::Arc;

use brain_core::{Brain, PromptCache};
use gemini_brain::GeminiBrain;
use market_data::{
    BirdeyeClient, ComingSoonHolders, DemoBackend, HoldersBackend, ListingsBackend, TokenBackend,
};
use openai_brain::OpenAiBrain;
use retry_http::RetryingClient;
use tracing::{error, info, warn};

use crate::classifier::IntentClassifier;
use crate::config::RouterConfig;
use crate::ctas::ctas_for;
use crate::dispatcher::Dispatcher;
use crate::envelope::{EnvelopeData, EnvelopeMeta, RoutedEnvelope};
use crate::error::OrchestratorError;
use crate::registry::ServiceRegistry;
use crate::services::{
    GenericInfoService, GenericService, NewListingsService, PriceService, TopHoldersService,
};
use crate::summarizer::Summarizer;

/// Data backends the services read from.
#[derive(Clone)]
pub struct Backends {
    pub listings: Arc<dyn ListingsBackend>,
    pub tokens: Arc<dyn TokenBackend>,
    pub holders: Arc<dyn HoldersBackend>,
}

impl Backends {
    /// Offline demo data and the holders stub.
    pub fn demo() -> Self {
        let demo = Arc::new(DemoBackend::new());
        Self {
            listings: demo.clone(),
            tokens: demo,
            holders: Arc::new(ComingSoonHolders::new()),
        }
    }

    /// Birdeye when a key is configured, demo data otherwise.
    pub fn from_config(config: &RouterConfig, http: RetryingClient) -> Self {
        if !config.birdeye.has_key() {
            info!("BIRDEYE_KEY_MISSING_USING_DEMO");
            return Self::demo();
        }

        let birdeye = Arc::new(BirdeyeClient::new(config.birdeye.clone(), http));
        Self {
            listings: birdeye.clone(),
            tokens: birdeye,
            holders: Arc::new(ComingSoonHolders::new()),
        }
    }
}

/// Routes free-text queries to data services.
///
/// Each call to [`route`](Self::route) is independent; only the
/// classification and summary caches are shared between calls.
pub struct Orchestrator {
    classifier: Arc<IntentClassifier>,
    summarizer: Arc<Summarizer>,
    dispatcher: Dispatcher,
}

impl Orchestrator {
    /// Create an orchestrator from its parts.
    pub fn new(
        classifier: Arc<IntentClassifier>,
        summarizer: Arc<Summarizer>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            classifier,
            summarizer,
            dispatcher,
        }
    }

    /// Wire the standard services over the given provider tiers and backends.
    pub fn with_backends(
        config: &RouterConfig,
        tiers: Vec<Arc<dyn Brain>>,
        backends: Backends,
    ) -> Self {
        let classifier = Arc::new(
            IntentClassifier::new(
                tiers.clone(),
                Arc::new(PromptCache::new(config.cache_capacity, config.cache_ttl)),
            )
            .with_cache_failures(config.cache_failures)
            .with_system_prompt(config.classify_prompt.as_str()),
        );
        let summarizer = Arc::new(
            Summarizer::new(
                tiers,
                Arc::new(PromptCache::new(config.cache_capacity, config.cache_ttl)),
            )
            .with_cache_failures(config.cache_failures)
            .with_system_prompt(config.summary_prompt.as_str()),
        );

        let mut registry = ServiceRegistry::new();
        registry.register(
            NewListingsService::new(backends.listings, backends.tokens.clone(), summarizer.clone())
                .with_limit(config.listings_limit),
        );
        registry.register(TopHoldersService::new(backends.holders));
        registry.register(PriceService::new(backends.tokens));
        registry.register(GenericInfoService::new(summarizer.clone()));
        registry.register(GenericService::new());

        Self::new(classifier, summarizer, Dispatcher::new(registry))
    }

    /// Build everything from configuration.
    ///
    /// Providers without an API key are left out of the cascade.
    pub fn from_config(config: &RouterConfig) -> Result<Self, OrchestratorError> {
        let http = RetryingClient::from_reqwest()?.with_retry_policy(config.retry_policy());

        let mut tiers: Vec<Arc<dyn Brain>> = Vec::new();
        if config.primary.is_configured() {
            let brain = OpenAiBrain::with_client(config.primary.clone(), http.clone())
                .map_err(|e| OrchestratorError::Configuration(format!("OpenAI: {}", e)))?;
            tiers.push(Arc::new(brain));
        }
        if config.secondary.is_configured() {
            let brain = GeminiBrain::with_client(config.secondary.clone(), http.clone())
                .map_err(|e| OrchestratorError::Configuration(format!("Gemini: {}", e)))?;
            tiers.push(Arc::new(brain));
        }
        if tiers.is_empty() {
            warn!("NO_AI_PROVIDERS_CONFIGURED");
        }

        let backends = Backends::from_config(config, http);
        let orchestrator = Self::with_backends(config, tiers, backends);
        info!(
            tiers = ?orchestrator.classifier.tier_names(),
            services = orchestrator.dispatcher.registry().len(),
            classify_prompt = orchestrator.classifier.prompt_version(),
            summary_prompt = orchestrator.summarizer.prompt_version(),
            "ORCHESTRATOR_INIT"
        );
        Ok(orchestrator)
    }

    /// Build everything from environment variables.
    ///
    /// See [`RouterConfig::from_env`].
    pub fn from_env() -> Result<Self, OrchestratorError> {
        Self::from_config(&RouterConfig::from_env())
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Answer a query.
    ///
    /// Never fails: service errors become an `ok: false` envelope carrying
    /// the same metadata a success would. `wallet` is passed through as-is.
    pub async fn route(&self, prompt: &str, wallet: Option<&str>) -> RoutedEnvelope {
        let classification = self.classifier.classify(prompt).await;
        let dispatched = self.dispatcher.dispatch(&classification.intent, prompt).await;

        let mut meta = EnvelopeMeta {
            ai: classification,
            svc: dispatched.meta,
        };

        let result = match dispatched.result {
            Ok(result) => result,
            Err(e) => return RoutedEnvelope::failure(e.to_string(), meta),
        };

        if result.kind != dispatched.expected {
            let err = OrchestratorError::InvalidServiceKind {
                expected: dispatched.expected,
                actual: result.kind,
            };
            error!(
                service = %meta.svc.name,
                expected = %dispatched.expected,
                actual = %result.kind,
                "INVALID_SERVICE_KIND"
            );
            meta.svc.error = Some(err.to_string());
            return RoutedEnvelope::failure(err.to_string(), meta);
        }

        let mut ctas = result.actions;
        ctas.extend(ctas_for(Some(result.kind)));

        let data = EnvelopeData {
            insights: result.insights,
            ctas,
            summary: result.summary,
            table: result.table,
            suggestions: result.suggestions,
        };

        RoutedEnvelope::success(wallet.map(str::to_string), data, meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::AiSource;
    use crate::intent::{Intent, IntentKind};
    use crate::services::{Service, ServiceResult};
    use async_trait::async_trait;
    use market_data::ServiceError;
    use mock_brain::{FailingBrain, ScriptedBrain};

    /// Registered for `price` but answers as `generic`.
    struct Confused;

    #[async_trait]
    impl Service for Confused {
        fn name(&self) -> &str {
            "confused"
        }

        fn kind(&self) -> IntentKind {
            IntentKind::Price
        }

        async fn run(&self, _intent: &Intent, _prompt: &str) -> Result<ServiceResult, ServiceError> {
            Ok(ServiceResult::new(IntentKind::Generic))
        }
    }

    fn demo(tiers: Vec<Arc<dyn Brain>>) -> Orchestrator {
        Orchestrator::with_backends(&RouterConfig::default(), tiers, Backends::demo())
    }

    #[tokio::test]
    async fn test_invalid_service_kind() {
        let mut registry = ServiceRegistry::new();
        registry.register(Confused);

        let orchestrator = Orchestrator::new(
            Arc::new(IntentClassifier::new(Vec::new(), Arc::new(PromptCache::default()))),
            Arc::new(Summarizer::new(Vec::new(), Arc::new(PromptCache::default()))),
            Dispatcher::new(registry),
        );

        let envelope = orchestrator.route("SOL price", None).await;

        assert!(!envelope.is_ok());
        assert_eq!(envelope.error(), Some("Invalid service kind"));
        assert_eq!(envelope.meta().svc.name, "confused");
        assert_eq!(envelope.meta().svc.error.as_deref(), Some("Invalid service kind"));
    }

    #[tokio::test]
    async fn test_provider_intent_drives_dispatch() {
        let brain = Arc::new(
            ScriptedBrain::new("openai").on_classification(r#"{"kind":"price","token":"USDC"}"#),
        );
        let orchestrator = demo(vec![brain]);

        let envelope = orchestrator.route("how much is a dollar coin", Some("Wallet1")).await;

        assert!(envelope.is_ok());
        let meta = envelope.meta();
        assert_eq!(meta.ai.source, AiSource::PrimaryProvider);
        assert_eq!(meta.ai.provider.as_deref(), Some("openai"));
        assert_eq!(meta.svc.name, "birdeye:price");

        let data = envelope.data().unwrap();
        assert!(data.insights.iter().any(|i| i.label == "Token" && i.value == "USDC"));
        let actions: Vec<&str> = data.ctas.iter().map(|c| c.action_name()).collect();
        assert_eq!(actions, vec!["export_csv", "route"]);

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["wallet"], "Wallet1");
    }

    #[tokio::test]
    async fn test_swap_action_precedes_kind_ctas() {
        let orchestrator = demo(Vec::new());

        let envelope = orchestrator.route("Show new listings", None).await;

        let data = envelope.data().unwrap();
        let actions: Vec<&str> = data.ctas.iter().map(|c| c.action_name()).collect();
        assert_eq!(
            actions,
            vec!["swap_quote", "create_watch", "export_csv", "route"]
        );
        assert_eq!(data.ctas[0].label, "Get swap quote for CHILLGUY");
    }

    #[tokio::test]
    async fn test_generic_info_degraded_stays_ok() {
        let failing = Arc::new(FailingBrain::network("openai", "timeout"));
        let orchestrator = demo(vec![failing]);

        let envelope = orchestrator.route("What is Solana?", None).await;

        assert!(envelope.is_ok());
        assert_eq!(envelope.meta().ai.source, AiSource::Fallback);
        assert_eq!(envelope.meta().svc.name, "ai:summary");
        assert!(envelope.meta().svc.error.is_some());
        assert_eq!(
            envelope.data().unwrap().summary.as_deref(),
            Some("No summary available.")
        );
    }

    #[tokio::test]
    async fn test_configured_instruction_reaches_providers() {
        let brain = Arc::new(ScriptedBrain::new("openai").on_classification(r#"{"kind":"generic"}"#));
        let config = RouterConfig::builder().classify_prompt("Classify as JSON.").build();
        let orchestrator = Orchestrator::with_backends(&config, vec![brain.clone()], Backends::demo());

        orchestrator.route("gm", None).await;

        assert_eq!(brain.requests()[0].system.as_deref(), Some("Classify as JSON."));
        assert_eq!(
            orchestrator.classifier().prompt_version(),
            brain_core::prompt_version("Classify as JSON.")
        );
    }

    #[tokio::test]
    async fn test_unrecognized_kind_answered_generically() {
        let brain = Arc::new(ScriptedBrain::new("openai").on_classification(r#"{"kind":"weather"}"#));
        let orchestrator = demo(vec![brain]);

        let envelope = orchestrator.route("weather in Paris", None).await;

        assert!(envelope.is_ok());
        assert_eq!(envelope.meta().svc.name, "router:generic");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["meta"]["ai"]["intent"]["kind"], "weather");
    }
}
