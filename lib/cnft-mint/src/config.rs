use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolanaNet {
    Mainnet,
    #[default]
    Devnet,
    Testnet,
}

impl SolanaNet {
    /// Network name as used by the Helius client.
    pub fn as_str(&self) -> &'static str {
        match self {
            SolanaNet::Mainnet => "mainnet",
            SolanaNet::Devnet => "devnet",
            SolanaNet::Testnet => "testnet",
        }
    }

    /// Cluster name as it appears in the public RPC hostnames.
    pub fn cluster(&self) -> &'static str {
        match self {
            SolanaNet::Mainnet => "mainnet-beta",
            SolanaNet::Devnet => "devnet",
            SolanaNet::Testnet => "testnet",
        }
    }
}

impl FromStr for SolanaNet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" | "mainnet-beta" => Ok(SolanaNet::Mainnet),
            "devnet" => Ok(SolanaNet::Devnet),
            "testnet" => Ok(SolanaNet::Testnet),
            _ => Err(anyhow::anyhow!("unknown solana network: {}", s)),
        }
    }
}

/// Process-wide mint configuration, read from the environment once at startup
/// and passed by reference from there on.
#[derive(Debug, Clone)]
pub struct MintConfiguration {
    /// Explicit RPC endpoint; falls back to the public cluster endpoint.
    pub rpc_url: Option<String>,
    pub network: SolanaNet,
    /// Pre-existing merkle tree. Presence selects the user-signed strategy.
    pub tree_address: Option<Pubkey>,
    /// Client-visible Helius key, handed to the connection UI.
    pub helius_api_key: Option<String>,
    /// Base URL of the server hosting the mint proxy routes.
    pub mint_api_url: Url,
}

impl MintConfiguration {
    pub const RPC_URL_VAR: &'static str = "SOLANA_RPC_URL";
    pub const NETWORK_VAR: &'static str = "SOLANA_NETWORK";
    pub const TREE_ADDRESS_VAR: &'static str = "TREE_ADDRESS";
    pub const HELIUS_API_KEY_VAR: &'static str = "HELIUS_API_KEY";
    pub const MINT_API_URL_VAR: &'static str = "MINT_API_URL";

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let network = get(Self::NETWORK_VAR)
            .and_then(|s| match s.parse() {
                Ok(net) => Some(net),
                Err(error) => {
                    tracing::warn!("{}: {}, using default", Self::NETWORK_VAR, error);
                    None
                }
            })
            .unwrap_or_default();

        let tree_address = get(Self::TREE_ADDRESS_VAR)
            .filter(|s| !s.is_empty())
            .and_then(|s| match s.parse() {
                Ok(pubkey) => Some(pubkey),
                Err(error) => {
                    tracing::warn!(
                        "{} is not a valid pubkey ({}), ignoring",
                        Self::TREE_ADDRESS_VAR,
                        error
                    );
                    None
                }
            });

        let mint_api_url = get(Self::MINT_API_URL_VAR)
            .and_then(|s| match s.parse() {
                Ok(url) => Some(url),
                Err(error) => {
                    tracing::warn!("{}: {}, using default", Self::MINT_API_URL_VAR, error);
                    None
                }
            })
            .unwrap_or_else(Self::default_mint_api_url);

        Self {
            rpc_url: get(Self::RPC_URL_VAR).filter(|s| !s.is_empty()),
            network,
            tree_address,
            helius_api_key: get(Self::HELIUS_API_KEY_VAR).filter(|s| !s.is_empty()),
            mint_api_url,
        }
    }

    pub fn default_mint_api_url() -> Url {
        "http://127.0.0.1:8080".parse().unwrap()
    }

    /// RPC endpoint: the explicit override if configured, otherwise the
    /// templated public default for the network.
    pub fn endpoint(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| format!("https://api.{}.solana.com", self.network.cluster()))
    }
}

impl Default for MintConfiguration {
    fn default() -> Self {
        Self {
            rpc_url: None,
            network: SolanaNet::default(),
            tree_address: None,
            helius_api_key: None,
            mint_api_url: Self::default_mint_api_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> MintConfiguration {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        MintConfiguration::from_lookup(|key| map.get(key).map(|s| (*s).to_owned()))
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]);
        assert_eq!(config.network, SolanaNet::Devnet);
        assert!(config.tree_address.is_none());
        assert_eq!(config.endpoint(), "https://api.devnet.solana.com");
    }

    #[test]
    fn endpoint_override_wins() {
        let config = config_from(&[
            ("SOLANA_RPC_URL", "https://rpc.example.com"),
            ("SOLANA_NETWORK", "mainnet"),
        ]);
        assert_eq!(config.endpoint(), "https://rpc.example.com");
    }

    #[test]
    fn mainnet_default_endpoint_uses_beta_cluster() {
        let config = config_from(&[("SOLANA_NETWORK", "mainnet")]);
        assert_eq!(config.endpoint(), "https://api.mainnet-beta.solana.com");
    }

    #[test]
    fn invalid_tree_address_is_ignored() {
        let config = config_from(&[("TREE_ADDRESS", "not-a-pubkey")]);
        assert!(config.tree_address.is_none());
    }

    #[test]
    fn tree_address_parses() {
        let key = Pubkey::new_unique().to_string();
        let config = config_from(&[("TREE_ADDRESS", key.as_str())]);
        assert_eq!(config.tree_address, Some(key.parse().unwrap()));
    }
}
