//! Intent model and the deterministic keyword fallback.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The five kinds the router can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    NewListings,
    TopHolders,
    Price,
    GenericInfo,
    Generic,
}

impl IntentKind {
    /// Every kind, in declaration order.
    pub const ALL: [IntentKind; 5] = [
        Self::NewListings,
        Self::TopHolders,
        Self::Price,
        Self::GenericInfo,
        Self::Generic,
    ];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewListings => "new_listings",
            Self::TopHolders => "top_holders",
            Self::Price => "price",
            Self::GenericInfo => "generic_info",
            Self::Generic => "generic",
        }
    }

    /// Parse a wire name.
    pub fn parse(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == kind)
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user is asking for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawIntent", into = "RawIntent")]
pub enum Intent {
    NewListings,
    TopHolders { token: Option<String> },
    Price { token: Option<String> },
    GenericInfo,
    Generic,
    /// A provider answered with a kind outside the known set.
    Unrecognized { kind: String },
}

/// Flat JSON form: `{"kind": "...", "token": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawIntent {
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl From<RawIntent> for Intent {
    fn from(raw: RawIntent) -> Self {
        let token = raw
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        match IntentKind::parse(&raw.kind) {
            Some(IntentKind::NewListings) => Self::NewListings,
            Some(IntentKind::TopHolders) => Self::TopHolders { token },
            Some(IntentKind::Price) => Self::Price { token },
            Some(IntentKind::GenericInfo) => Self::GenericInfo,
            Some(IntentKind::Generic) => Self::Generic,
            None => Self::Unrecognized { kind: raw.kind },
        }
    }
}

impl From<Intent> for RawIntent {
    fn from(intent: Intent) -> Self {
        let kind = intent.kind().to_string();
        let token = match intent {
            Intent::TopHolders { token } | Intent::Price { token } => token,
            _ => None,
        };
        Self { kind, token }
    }
}

impl Intent {
    /// Build an intent from a JSON value returned by a provider.
    ///
    /// The value must be an object with a string `kind`. A non-string
    /// `token` is ignored.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let kind = object.get("kind")?.as_str()?.to_string();
        let token = object
            .get("token")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(RawIntent { kind, token }.into())
    }

    /// Wire name of the intent's kind, including unrecognized ones.
    pub fn kind(&self) -> &str {
        match self {
            Self::Unrecognized { kind } => kind.as_str(),
            other => other.service_kind().map(|k| k.as_str()).unwrap_or("generic"),
        }
    }

    /// The known kind, or `None` for unrecognized intents.
    pub fn service_kind(&self) -> Option<IntentKind> {
        match self {
            Self::NewListings => Some(IntentKind::NewListings),
            Self::TopHolders { .. } => Some(IntentKind::TopHolders),
            Self::Price { .. } => Some(IntentKind::Price),
            Self::GenericInfo => Some(IntentKind::GenericInfo),
            Self::Generic => Some(IntentKind::Generic),
            Self::Unrecognized { .. } => None,
        }
    }

    /// Token named by the intent, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::TopHolders { token } | Self::Price { token } => token.as_deref(),
            _ => None,
        }
    }
}

/// Classify a prompt from keywords alone. Never fails.
///
/// Checks run in a fixed order on the lower-cased prompt; the first match
/// wins.
pub fn keyword_fallback(prompt: &str) -> Intent {
    let p = prompt.to_lowercase();

    if p.contains("new") && p.contains("listing") {
        return Intent::NewListings;
    }
    if p.contains("top holder") || p.contains("who holds") {
        return Intent::TopHolders { token: None };
    }
    if p.contains("price") {
        return Intent::Price { token: None };
    }
    if p.starts_with("what ") || p.starts_with("who ") || p.starts_with("how ") || p.contains("solana?")
    {
        return Intent::GenericInfo;
    }
    Intent::Generic
}
