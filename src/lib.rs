//! # LicenseChain SDK
//!
//! Rust client for LicenseChain on Solana: typed Solana JSON-RPC
//! passthroughs plus license, NFT and DeFi managers over the LicenseChain
//! REST API.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Shared newtypes, validation and unit utilities, error taxonomy, config
//! 2. **HTTP**: `LicenseChainHttp`, one transport for REST and JSON-RPC
//! 3. **Domains**: RPC entities plus the license / NFT / DeFi vertical slices
//! 4. **High-Level Client**: `LicenseChainClient` with nested sub-clients
//!
//! Every failure is an [`SdkError`](error::SdkError) with a stable
//! [`code`](error::SdkError::code). The SDK logs through `tracing` and never
//! installs a subscriber.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use licensechain_sdk::prelude::*;
//!
//! let client = LicenseChainClient::builder("lc_live_...")
//!     .cluster(Cluster::Mainnet)
//!     .build()?;
//!
//! let license = client
//!     .licenses()
//!     .create_license("user-1", "product-1", CreateLicenseOptions::default())
//!     .await?;
//! let balance = client.get_balance("4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T").await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and pure utilities.
pub mod shared;

/// Unified SDK error types.
pub mod error;

/// Network URL constants and clusters.
pub mod network;

/// Immutable client configuration.
pub mod config;

// ── Layer 2: HTTP ────────────────────────────────────────────────────────────

/// HTTP transport for REST and JSON-RPC.
pub mod http;

// ── Layer 3: Domains ─────────────────────────────────────────────────────────

/// Solana JSON-RPC entities and passthroughs.
pub mod rpc;

/// Domain modules (vertical slices): types, wire types, conversions, managers.
pub mod domain;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `LicenseChainClient`: the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes & utilities
    pub use crate::shared::{
        create_webhook_hmac, create_webhook_signature, derive_public_key,
        estimate_rent_exemption, estimate_transaction_fee, format_public_key, format_units,
        generate_keypair, lamports_to_sol, parse_units, retry, retry_with, sol_to_lamports,
        validate_amount, validate_private_key, validate_public_key, validate_signature,
        verify_webhook_hmac, verify_webhook_signature, GeneratedKeypair, PubkeyStr, RetryConfig,
    };

    // RPC entities
    pub use crate::rpc::{
        Account, Block, Blockhash, ClusterNode, Commitment, Program, SolanaRpc, StakeAccount,
        TokenAccount, TokenAccountState, Transaction, Validator, ValidatorStatus,
    };

    // Domain types: license
    pub use crate::domain::license::{
        CreateLicenseOptions, License, LicenseFilter, LicenseMetadata, LicensePage, LicenseStatus,
        LicenseUpdate, LicenseValidation,
    };

    // Domain types: nft
    pub use crate::domain::nft::{
        Collection, CollectionRef, Creator, MintNftRequest, Nft, NftAttribute, NftBurn,
        NftMetadata, NftMetadataUpdate, NftTransfer,
    };

    // Domain types: defi
    pub use crate::domain::defi::{
        DefiReceipt, Farm, LendingPool, LiquidityPool, Position, PositionKind, StakingPool,
        SwapQuote, SwapRequest,
    };

    // Errors
    pub use crate::error::{codes, SdkError, SdkResult};

    // Config & network
    pub use crate::config::{ClientConfig, ClientConfigBuilder};
    pub use crate::network::Cluster;

    // Client
    pub use crate::client::{
        DefiClient, LicenseChainClient, LicenseChainClientBuilder, LicensesClient, NftsClient,
    };
}
