//! Call-to-action types attached to routed answers.

use market_data::SwapQuoteRequest;
use serde::{Deserialize, Serialize};

/// A button offered alongside an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cta {
    /// Button text.
    pub label: String,
    /// What the button does.
    #[serde(flatten)]
    pub action: CtaAction,
}

impl Cta {
    pub fn new(label: impl Into<String>, action: CtaAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    /// A button that re-runs the router with a fixed intent.
    pub fn route(label: impl Into<String>, kind: &str, token: Option<&str>) -> Self {
        Self::new(
            label,
            CtaAction::Route {
                kind: kind.to_string(),
                token: token.map(str::to_string),
            },
        )
    }

    /// A button that exports the answer table.
    pub fn export_csv() -> Self {
        Self::new("Export CSV", CtaAction::ExportCsv)
    }

    /// Short action name, as serialized in `action`.
    pub fn action_name(&self) -> &'static str {
        self.action.name()
    }
}

/// Action behind a CTA. Serialized as `{"action": ..., "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum CtaAction {
    /// Route a follow-up query of the given kind.
    Route {
        kind: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    },
    /// Export the current table.
    ExportCsv,
    /// Request a swap quote.
    SwapQuote(SwapQuoteRequest),
    /// Open the holder ranking view.
    OpenTopHolders,
    /// Watch a data feed.
    CreateWatch { scope: String },
    /// Mirror a wallet's trades.
    CopyTrade { strategy: String },
}

impl CtaAction {
    /// Short action name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Route { .. } => "route",
            Self::ExportCsv => "export_csv",
            Self::SwapQuote(_) => "swap_quote",
            Self::OpenTopHolders => "open_top_holders",
            Self::CreateWatch { .. } => "create_watch",
            Self::CopyTrade { .. } => "copy_trade",
        }
    }
}
