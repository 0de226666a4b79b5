//! Token symbol registry and mint address detection.

/// Wrapped SOL mint.
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// USDC mint (6 decimals).
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZ2fF9xA";

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Whether `value` looks like a Solana mint address (32-44 base58 chars).
pub fn is_base58_mint(value: &str) -> bool {
    (32..=44).contains(&value.len()) && value.chars().all(|c| BASE58_ALPHABET.contains(c))
}

/// A token reference resolved to a mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    /// Display symbol (the mint itself for raw addresses).
    pub symbol: String,
    pub mint: String,
    /// Set when the request could not be honoured as given.
    pub note: Option<String>,
}

/// Maps well-known symbols to mint addresses.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    entries: Vec<(&'static str, &'static str)>,
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self {
            entries: vec![
                ("SOL", SOL_MINT),
                ("USDC", USDC_MINT),
                ("USDT", "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYb"),
                ("BONK", "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263"),
                ("JUP", "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN"),
            ],
        }
    }
}

impl TokenRegistry {
    /// Create the default registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint for a known symbol (case-insensitive, optional leading `$`).
    pub fn mint_for(&self, symbol: &str) -> Option<&'static str> {
        let wanted = symbol.trim().trim_start_matches('$');
        self.entries
            .iter()
            .find(|(sym, _)| sym.eq_ignore_ascii_case(wanted))
            .map(|(_, mint)| *mint)
    }

    /// Symbol for a known mint.
    pub fn symbol_for(&self, mint: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, m)| *m == mint)
            .map(|(sym, _)| *sym)
    }

    /// Resolve an optional token reference, defaulting to SOL.
    ///
    /// Known symbols map to their mint; strings that look like a mint are
    /// used as-is; anything else falls back to SOL with a note.
    pub fn resolve(&self, token: Option<&str>) -> ResolvedToken {
        let token = token.map(str::trim).filter(|t| !t.is_empty());

        let Some(token) = token else {
            return self.sol(None);
        };

        if let Some(mint) = self.mint_for(token) {
            return ResolvedToken {
                symbol: token.trim_start_matches('$').to_uppercase(),
                mint: mint.to_string(),
                note: None,
            };
        }

        if is_base58_mint(token) {
            return ResolvedToken {
                symbol: self
                    .symbol_for(token)
                    .map(str::to_string)
                    .unwrap_or_else(|| token.to_string()),
                mint: token.to_string(),
                note: None,
            };
        }

        self.sol(Some(format!("Unknown token \"{}\", showing SOL", token)))
    }

    fn sol(&self, note: Option<String>) -> ResolvedToken {
        ResolvedToken {
            symbol: "SOL".to_string(),
            mint: SOL_MINT.to_string(),
            note,
        }
    }
}
