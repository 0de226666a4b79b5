//! Holder ranking for a token.

use std::sync::Arc;

use async_trait::async_trait;
use market_data::{HoldersBackend, ServiceError};
use tracing::debug;

use super::{Service, ServiceResult};
use crate::intent::{Intent, IntentKind};
use crate::table::{HolderRow, TableRow};

pub struct TopHoldersService {
    holders: Arc<dyn HoldersBackend>,
}

impl TopHoldersService {
    pub fn new(holders: Arc<dyn HoldersBackend>) -> Self {
        Self { holders }
    }
}

#[async_trait]
impl Service for TopHoldersService {
    fn name(&self) -> &str {
        "holders:top_holders"
    }

    fn kind(&self) -> IntentKind {
        IntentKind::TopHolders
    }

    async fn run(&self, intent: &Intent, _prompt: &str) -> Result<ServiceResult, ServiceError> {
        let page = self.holders.top_holders(intent.token()).await?;
        debug!(
            backend = self.holders.name(),
            count = page.holders.len(),
            supported = page.supported,
            "HOLDERS_FETCHED"
        );

        let rows: Vec<TableRow> = page
            .holders
            .iter()
            .map(|entry| TableRow::Holder(HolderRow::from(entry)))
            .collect();

        let mut result = ServiceResult::new(IntentKind::TopHolders)
            .insight("Detected intent", "Top holders lookup");
        if let Some(token) = page.token.as_deref().or(intent.token()) {
            result = result.insight("Token", token);
        }

        let summary = if page.supported {
            format!("Top {} holders by balance.", rows.len())
        } else {
            result = result.insight("Status", "Holder rankings are coming soon");
            "Holder rankings are not available yet.".to_string()
        };

        Ok(result.summary(summary).table(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_data::{ComingSoonHolders, HolderEntry, HoldersPage};

    struct FixedHolders;

    #[async_trait]
    impl HoldersBackend for FixedHolders {
        async fn top_holders(&self, token: Option<&str>) -> Result<HoldersPage, ServiceError> {
            Ok(HoldersPage {
                token: token.map(str::to_string),
                holders: vec![
                    HolderEntry {
                        rank: 1,
                        owner: "Whale1".to_string(),
                        amount: 1_000_000.0,
                        share_pct: Some(12.5),
                    },
                    HolderEntry {
                        rank: 2,
                        owner: "Whale2".to_string(),
                        amount: 500_000.0,
                        share_pct: None,
                    },
                ],
                supported: true,
            })
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_stub_backend_yields_empty_table() {
        let service = TopHoldersService::new(Arc::new(ComingSoonHolders::new()));
        let intent = Intent::TopHolders {
            token: Some("BONK".to_string()),
        };

        let result = service.run(&intent, "Top holders of BONK").await.unwrap();

        assert_eq!(result.kind, IntentKind::TopHolders);
        assert_eq!(result.table, Some(Vec::new()));
        assert!(result.insights.iter().any(|i| i.label == "Token" && i.value == "BONK"));
        assert!(result.insights.iter().any(|i| i.label == "Status"));
    }

    #[tokio::test]
    async fn test_ranked_rows() {
        let service = TopHoldersService::new(Arc::new(FixedHolders));
        let result = service
            .run(&Intent::TopHolders { token: None }, "who holds it")
            .await
            .unwrap();

        let table = result.table.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].schema(), "holder");
        assert_eq!(result.summary.as_deref(), Some("Top 2 holders by balance."));
        assert!(!result.insights.iter().any(|i| i.label == "Status"));
    }
}
