//! Fixed CTA table per answer kind.

use crate::actions::{Cta, CtaAction};
use crate::intent::IntentKind;

/// CTAs offered for an answer of the given kind.
///
/// `None` stands for any kind outside the known set.
pub fn ctas_for(kind: Option<IntentKind>) -> Vec<Cta> {
    match kind {
        Some(IntentKind::NewListings) => vec![
            Cta::new(
                "Monitor new listings",
                CtaAction::CreateWatch {
                    scope: "token_new_listings".to_string(),
                },
            ),
            Cta::export_csv(),
            Cta::route("See SOL price", "price", Some("SOL")),
        ],
        Some(IntentKind::TopHolders) => vec![
            Cta::new("View top holders", CtaAction::OpenTopHolders),
            Cta::new(
                "Copy-trade whale",
                CtaAction::CopyTrade {
                    strategy: "mirror-largest".to_string(),
                },
            ),
            Cta::export_csv(),
        ],
        Some(IntentKind::Price) => vec![
            Cta::export_csv(),
            Cta::route("See new listings", "new_listings", None),
        ],
        Some(IntentKind::GenericInfo) => vec![
            Cta::route("See SOL price", "price", Some("SOL")),
            Cta::route("New token listings", "new_listings", None),
            Cta::route("Top holders of CHILLGUY", "top_holders", Some("CHILLGUY")),
        ],
        Some(IntentKind::Generic) | None => vec![
            Cta::route("New token listings", "new_listings", None),
            Cta::route("See SOL price", "price", Some("SOL")),
        ],
    }
}
