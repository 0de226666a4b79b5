//! Data services, one per intent kind.

mod generic;
mod generic_info;
mod new_listings;
mod price;
mod top_holders;

use async_trait::async_trait;
use market_data::ServiceError;
use serde::{Deserialize, Serialize};

use crate::actions::Cta;
use crate::intent::{Intent, IntentKind};
use crate::table::TableRow;

pub use generic::GenericService;
pub use generic_info::GenericInfoService;
pub use new_listings::{NewListingsService, DEFAULT_LISTINGS_LIMIT};
pub use price::PriceService;
pub use top_holders::TopHoldersService;

/// A labelled fact shown above the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub label: String,
    pub value: String,
}

impl Insight {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// What a service produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResult {
    /// Kind of answer; must match the kind the service is registered for.
    pub kind: IntentKind,
    pub insights: Vec<Insight>,
    pub summary: Option<String>,
    pub table: Option<Vec<TableRow>>,
    pub suggestions: Option<Vec<String>>,
    /// Service-specific CTAs, placed before the generic ones for the kind.
    pub actions: Vec<Cta>,
    /// A non-fatal problem to report in the service metadata.
    pub degraded: Option<String>,
}

impl ServiceResult {
    /// An empty result of the given kind.
    pub fn new(kind: IntentKind) -> Self {
        Self {
            kind,
            insights: Vec::new(),
            summary: None,
            table: None,
            suggestions: None,
            actions: Vec::new(),
            degraded: None,
        }
    }

    pub fn insight(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.insights.push(Insight::new(label, value));
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn table(mut self, rows: Vec<TableRow>) -> Self {
        self.table = Some(rows);
        self
    }

    pub fn suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = Some(suggestions.into_iter().map(Into::into).collect());
        self
    }
}

/// A data service that answers one intent kind.
#[async_trait]
pub trait Service: Send + Sync {
    /// Name reported in `meta.svc.name`, e.g. `birdeye:price`.
    fn name(&self) -> &str;

    /// Kind this service answers.
    fn kind(&self) -> IntentKind;

    /// Produce an answer. Backend failures propagate.
    async fn run(&self, intent: &Intent, prompt: &str) -> Result<ServiceResult, ServiceError>;
}

/// Insight value telling the user the data is not live.
pub(crate) const DEMO_SOURCE: &str = "Demo data (no BIRDEYE_API_KEY)";
