//! Wire types for NFT REST responses and request bodies.

use serde::{Deserialize, Serialize};

use super::{Creator, NftAttribute, NftMetadata, NftMetadataUpdate};

// ─── Responses ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NftResponse {
    pub mint: String,
    pub owner: String,
    pub metadata: NftMetadataResponse,
    #[serde(default)]
    pub collection: Option<CollectionRefResponse>,
    #[serde(default)]
    pub creators: Option<Vec<CreatorResponse>>,
    #[serde(default)]
    pub seller_fee_basis_points: Option<u16>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NftMetadataResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub attributes: Option<Vec<NftAttribute>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CreatorResponse {
    pub address: String,
    pub share: u8,
    #[serde(default)]
    pub verified: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CollectionRefResponse {
    pub address: String,
    #[serde(default)]
    pub verified: Option<bool>,
}

/// `GET /nfts?owner=` returns either `{ "nfts": [...] }` or a bare array.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum NftListResponse {
    Wrapped { nfts: Vec<NftResponse> },
    Bare(Vec<NftResponse>),
}

impl NftListResponse {
    pub fn into_inner(self) -> Vec<NftResponse> {
        match self {
            NftListResponse::Wrapped { nfts } => nfts,
            NftListResponse::Bare(nfts) => nfts,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CollectionResponse {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Body of transfer and burn responses.
#[derive(Deserialize, Debug, Clone)]
pub struct SignatureResponse {
    #[serde(default)]
    pub signature: Option<String>,
}

// ─── Requests ────────────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MintNftBody<'a> {
    pub owner: &'a str,
    pub metadata: &'a NftMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<&'a str>,
    pub creators: &'a [Creator],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_fee_basis_points: Option<u16>,
}

#[derive(Serialize, Debug, Clone)]
pub struct TransferNftBody<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

#[derive(Serialize, Debug, Clone)]
pub struct BurnNftBody<'a> {
    pub owner: &'a str,
}

#[derive(Serialize, Debug, Clone)]
pub struct UpdateMetadataBody<'a> {
    pub metadata: &'a NftMetadataUpdate,
}
