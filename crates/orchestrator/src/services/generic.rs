//! Catch-all answer for prompts the router cannot place.

use async_trait::async_trait;
use market_data::ServiceError;

use super::{Service, ServiceResult};
use crate::intent::{Intent, IntentKind};

/// Static "try one of these" answer. Never fails.
#[derive(Debug, Clone, Default)]
pub struct GenericService;

impl GenericService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Service for GenericService {
    fn name(&self) -> &str {
        "router:generic"
    }

    fn kind(&self) -> IntentKind {
        IntentKind::Generic
    }

    async fn run(&self, intent: &Intent, _prompt: &str) -> Result<ServiceResult, ServiceError> {
        let mut result = ServiceResult::new(IntentKind::Generic)
            .insight("Detected intent", "Generic")
            .summary(r#"Try: "New token listings", "Price SOL", or "Top holders of <TOKEN>"."#)
            .suggestions(["New token listings", "Price SOL", "Top holders of CHILLGUY"]);

        if let Intent::Unrecognized { kind } = intent {
            result = result.insight("Unsupported request", kind.as_str());
        }

        Ok(result)
    }
}
