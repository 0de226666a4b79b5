//! Holder ranking stub.

use async_trait::async_trait;
use tracing::debug;

use crate::backend::HoldersBackend;
use crate::error::ServiceError;
use crate::types::HoldersPage;

/// Holder backend for a ranking index that is not available yet.
///
/// Always answers with an empty, unsupported page.
#[derive(Debug, Clone, Default)]
pub struct ComingSoonHolders;

impl ComingSoonHolders {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HoldersBackend for ComingSoonHolders {
    async fn top_holders(&self, token: Option<&str>) -> Result<HoldersPage, ServiceError> {
        debug!(token = token.unwrap_or(""), "HOLDERS_STUB");
        Ok(HoldersPage {
            token: token.map(str::to_string),
            holders: Vec::new(),
            supported: false,
        })
    }

    fn name(&self) -> &str {
        "comingSoon"
    }
}
