//! Conversion: NFT wire responses → domain types (TryFrom + validation).

use super::wire;
use super::{
    Collection, CollectionRef, Creator, Nft, NftBurn, NftMetadata, NftTransfer, ValidationError,
};
use crate::shared::PubkeyStr;

fn address(field: &'static str, value: String) -> Result<PubkeyStr, ValidationError> {
    PubkeyStr::parse(&value).map_err(|_| ValidationError::InvalidAddress(field, value))
}

fn signature(source: wire::SignatureResponse) -> Result<String, ValidationError> {
    source
        .signature
        .filter(|s| !s.trim().is_empty())
        .ok_or(ValidationError::MissingSignature)
}

impl TryFrom<wire::NftMetadataResponse> for NftMetadata {
    type Error = ValidationError;

    fn try_from(source: wire::NftMetadataResponse) -> Result<Self, Self::Error> {
        let name = source
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(ValidationError::MissingName)?;
        Ok(Self {
            name,
            symbol: source.symbol.unwrap_or_default(),
            description: source.description,
            image: source.image,
            attributes: source.attributes.unwrap_or_default(),
        })
    }
}

impl TryFrom<wire::NftResponse> for Nft {
    type Error = ValidationError;

    fn try_from(source: wire::NftResponse) -> Result<Self, Self::Error> {
        let collection = match source.collection {
            Some(c) => Some(CollectionRef {
                address: address("collection", c.address)?,
                verified: c.verified.unwrap_or(false),
            }),
            None => None,
        };
        let creators = source
            .creators
            .unwrap_or_default()
            .into_iter()
            .map(|c| {
                Ok(Creator {
                    address: address("creator", c.address)?,
                    share: c.share,
                    verified: c.verified.unwrap_or(false),
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(Self {
            mint: address("mint", source.mint)?,
            owner: address("owner", source.owner)?,
            metadata: source.metadata.try_into()?,
            collection,
            creators,
            seller_fee_basis_points: source.seller_fee_basis_points,
        })
    }
}

impl TryFrom<wire::NftListResponse> for Vec<Nft> {
    type Error = ValidationError;

    fn try_from(source: wire::NftListResponse) -> Result<Self, Self::Error> {
        source.into_inner().into_iter().map(Nft::try_from).collect()
    }
}

impl TryFrom<wire::CollectionResponse> for Collection {
    type Error = ValidationError;

    fn try_from(source: wire::CollectionResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            address: address("collection", source.address)?,
            name: source
                .name
                .filter(|n| !n.trim().is_empty())
                .ok_or(ValidationError::MissingName)?,
            symbol: source.symbol.unwrap_or_default(),
            description: source.description,
            image: source.image,
            size: source.size,
        })
    }
}

/// Transfer response paired with the already-validated request addresses.
impl TryFrom<(wire::SignatureResponse, PubkeyStr, PubkeyStr, PubkeyStr)> for NftTransfer {
    type Error = ValidationError;

    fn try_from(
        (source, mint, from, to): (wire::SignatureResponse, PubkeyStr, PubkeyStr, PubkeyStr),
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            signature: signature(source)?,
            mint,
            from,
            to,
        })
    }
}

impl TryFrom<(wire::SignatureResponse, PubkeyStr, PubkeyStr)> for NftBurn {
    type Error = ValidationError;

    fn try_from(
        (source, mint, owner): (wire::SignatureResponse, PubkeyStr, PubkeyStr),
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            signature: signature(source)?,
            mint,
            owner,
        })
    }
}
