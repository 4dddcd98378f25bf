//! NFT domain: minted tokens, metadata, creators, collections.

pub mod client;
mod convert;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SdkResult;
use crate::shared::validation::{require_non_empty, require_public_key};
use crate::shared::PubkeyStr;

/// Upper bound for `seller_fee_basis_points` (100%).
pub const MAX_BASIS_POINTS: u16 = 10_000;

// ─── Metadata ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: serde_json::Value,
}

/// Off-chain metadata (name, symbol, description, image, attributes).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub attributes: Vec<NftAttribute>,
}

impl NftMetadata {
    pub(crate) fn validate(&self) -> SdkResult<()> {
        require_non_empty(&self.name, "metadata.name")
    }
}

/// Partial metadata change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NftMetadataUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<NftAttribute>>,
}

impl NftMetadataUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.symbol.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.attributes.is_none()
    }
}

// ─── Creators & collections ──────────────────────────────────────────────────

/// A creator and their royalty share in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub address: PubkeyStr,
    pub share: u8,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub address: PubkeyStr,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub address: PubkeyStr,
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub size: Option<u64>,
}

// ─── Nft ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nft {
    pub mint: PubkeyStr,
    pub owner: PubkeyStr,
    pub metadata: NftMetadata,
    pub collection: Option<CollectionRef>,
    pub creators: Vec<Creator>,
    pub seller_fee_basis_points: Option<u16>,
}

impl Nft {
    /// Sum of creator shares. Conventionally 100, but not enforced.
    pub fn creator_shares_total(&self) -> u32 {
        self.creators.iter().map(|c| c.share as u32).sum()
    }
}

/// Outcome of a transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftTransfer {
    pub mint: PubkeyStr,
    pub from: PubkeyStr,
    pub to: PubkeyStr,
    pub signature: String,
}

/// Outcome of a burn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftBurn {
    pub mint: PubkeyStr,
    pub owner: PubkeyStr,
    pub signature: String,
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// Input for [`mint_nft`](client::Nfts::mint_nft).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MintNftRequest {
    /// Recipient of the minted token.
    pub owner: String,
    pub metadata: NftMetadata,
    pub collection: Option<String>,
    pub creators: Vec<Creator>,
    pub seller_fee_basis_points: Option<u16>,
}

impl MintNftRequest {
    pub(crate) fn validate(&self) -> SdkResult<()> {
        require_public_key(&self.owner, "owner")?;
        self.metadata.validate()?;
        if let Some(collection) = &self.collection {
            require_public_key(collection, "collection")?;
        }
        for creator in &self.creators {
            require_public_key(creator.address.as_str(), "creator.address")?;
        }
        if let Some(bps) = self.seller_fee_basis_points {
            if bps > MAX_BASIS_POINTS {
                return Err(crate::error::SdkError::validation(format!(
                    "seller_fee_basis_points must be at most {}, got {}",
                    MAX_BASIS_POINTS, bps
                )));
            }
        }
        Ok(())
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    InvalidAddress(&'static str, String),
    MissingName,
    MissingSignature,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidAddress(field, value) => {
                write!(f, "Invalid {} address: '{}'", field, value)
            }
            ValidationError::MissingName => write!(f, "Missing metadata name"),
            ValidationError::MissingSignature => write!(f, "Missing signature"),
        }
    }
}

impl std::error::Error for ValidationError {}
