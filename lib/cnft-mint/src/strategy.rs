/// Asset id reported when the chosen strategy cannot resolve one
/// synchronously; indexing happens out-of-band.
pub const PENDING_ASSET_ID: &str = "pending-indexing";

/// Royalty for every minted asset, in basis points.
pub const ROYALTY_BASIS_POINTS: u16 = 500;

/// One mint attempt's input, taken from user form fields. Immutable once
/// submitted.
#[derive(Debug, Clone)]
pub struct MintRequest {
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Skip the user-signed path even when a tree is configured.
    pub force_helius_fallback: bool,
}

impl MintRequest {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            description: None,
            image_url: None,
            force_helius_fallback: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintResult {
    pub signature: String,
    pub asset_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintStrategy {
    /// Build and sign a Bubblegum mint against the configured tree.
    UserSigned,
    /// Let the hosted mint API sign and pay.
    ServerSigned,
}

/// Pure decision, evaluated exactly once per mint call.
pub fn select_strategy(tree_configured: bool, force_fallback: bool) -> MintStrategy {
    if tree_configured && !force_fallback {
        MintStrategy::UserSigned
    } else {
        MintStrategy::ServerSigned
    }
}
