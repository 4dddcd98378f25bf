//! Network URL constants for the LicenseChain SDK.

use serde::{Deserialize, Serialize};

/// Default LicenseChain REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.licensechain.app";

/// Default Solana JSON-RPC URL (devnet).
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Value sent in the `X-API-Version` header on every REST request.
pub const API_VERSION: &str = "1.0";

/// Value sent in the `X-Platform` header on every REST request.
pub const PLATFORM: &str = "solana";

/// Well-known Solana clusters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    #[serde(rename = "mainnet-beta")]
    Mainnet,
    #[default]
    Devnet,
    Testnet,
    Localnet,
}

impl Cluster {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com",
            Cluster::Devnet => DEFAULT_RPC_URL,
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Localnet => "http://127.0.0.1:8899",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::Mainnet => "mainnet-beta",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::Localnet => "localnet",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mainnet" | "mainnet-beta" => Some(Cluster::Mainnet),
            "devnet" => Some(Cluster::Devnet),
            "testnet" => Some(Cluster::Testnet),
            "localnet" | "localhost" => Some(Cluster::Localnet),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
