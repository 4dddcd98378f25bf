//! NFTs sub-client: mint, transfer, burn, metadata, collections.

use crate::client::LicenseChainClient;
use crate::domain::nft::wire;
use crate::domain::nft::{
    Collection, MintNftRequest, Nft, NftBurn, NftMetadataUpdate, NftTransfer,
};
use crate::domain::finish;
use crate::error::{codes, SdkError, SdkResult};
use crate::http::client::segment;
use crate::shared::PubkeyStr;

/// Sub-client for NFT operations.
pub struct Nfts<'a> {
    pub(crate) client: &'a LicenseChainClient,
}

impl<'a> Nfts<'a> {
    pub async fn mint_nft(&self, request: &MintNftRequest) -> SdkResult<Nft> {
        request.validate()?;
        let body = wire::MintNftBody {
            owner: &request.owner,
            metadata: &request.metadata,
            collection: request.collection.as_deref(),
            creators: &request.creators,
            seller_fee_basis_points: request.seller_fee_basis_points,
        };
        let resp = self.client.http.post::<wire::NftResponse, _>("/nfts/mint", &body).await;
        finish(resp, "nft", codes::NFT_MINT_ERROR, "Failed to mint NFT")
    }

    pub async fn get_nft(&self, mint: &str) -> SdkResult<Nft> {
        let mint = PubkeyStr::parse(mint)?;
        let path = format!("/nfts/{}", segment(mint.as_str()));
        let resp = self.client.http.get::<wire::NftResponse>(&path).await;
        finish(resp, "nft", codes::NFT_GET_ERROR, "Failed to get NFT")
    }

    /// Transfer `mint` from `from` to `to`. All three addresses are checked
    /// before any request is sent.
    pub async fn transfer_nft(&self, mint: &str, from: &str, to: &str) -> SdkResult<NftTransfer> {
        let mint = PubkeyStr::parse(mint)?;
        let from = PubkeyStr::parse(from)?;
        let to = PubkeyStr::parse(to)?;
        if from == to {
            return Err(SdkError::validation("from and to must differ"));
        }

        let body = wire::TransferNftBody {
            from: from.as_str(),
            to: to.as_str(),
        };
        let path = format!("/nfts/{}/transfer", segment(mint.as_str()));
        let resp = self
            .client
            .http
            .post::<wire::SignatureResponse, _>(&path, &body)
            .await
            .map(|r| (r, mint, from, to));
        finish(resp, "nft transfer", codes::NFT_TRANSFER_ERROR, "Failed to transfer NFT")
    }

    pub async fn burn_nft(&self, mint: &str, owner: &str) -> SdkResult<NftBurn> {
        let mint = PubkeyStr::parse(mint)?;
        let owner = PubkeyStr::parse(owner)?;

        let body = wire::BurnNftBody {
            owner: owner.as_str(),
        };
        let path = format!("/nfts/{}/burn", segment(mint.as_str()));
        let resp = self
            .client
            .http
            .post::<wire::SignatureResponse, _>(&path, &body)
            .await
            .map(|r| (r, mint, owner));
        finish(resp, "nft burn", codes::NFT_BURN_ERROR, "Failed to burn NFT")
    }

    pub async fn get_nfts_by_owner(&self, owner: &str) -> SdkResult<Vec<Nft>> {
        let owner = PubkeyStr::parse(owner)?;
        let path = format!("/nfts?owner={}", segment(owner.as_str()));
        let resp = self.client.http.get::<wire::NftListResponse>(&path).await;
        finish(resp, "nft list", codes::NFT_LIST_ERROR, "Failed to list NFTs")
    }

    pub async fn update_nft_metadata(&self, mint: &str, update: &NftMetadataUpdate) -> SdkResult<Nft> {
        let mint = PubkeyStr::parse(mint)?;
        if update.is_empty() {
            return Err(SdkError::validation("metadata update has no fields to change"));
        }
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(SdkError::validation("metadata.name cannot be empty"));
        }

        let body = wire::UpdateMetadataBody { metadata: update };
        let path = format!("/nfts/{}/metadata", segment(mint.as_str()));
        let resp = self.client.http.put::<wire::NftResponse, _>(&path, &body).await;
        finish(resp, "nft", codes::NFT_UPDATE_ERROR, "Failed to update NFT metadata")
    }

    pub async fn get_collection(&self, address: &str) -> SdkResult<Collection> {
        let address = PubkeyStr::parse(address)?;
        let path = format!("/nfts/collections/{}", segment(address.as_str()));
        let resp = self.client.http.get::<wire::CollectionResponse>(&path).await;
        finish(resp, "collection", codes::NFT_COLLECTION_ERROR, "Failed to get collection")
    }
}
