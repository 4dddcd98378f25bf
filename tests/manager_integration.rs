//! Integration tests for the license, NFT and DeFi managers against a mocked
//! LicenseChain REST backend.

use std::str::FromStr;
use std::time::Duration;

use licensechain_sdk::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";
const OTHER: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";
const MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
const WSOL: &str = "So11111111111111111111111111111111111111112";
const SIG: &str =
    "2Ana1pUpv2ZbMVkwF5FXapYeBEjdxDatLn7nvJkhgTSXbs59SyZSx866bXirPgj8QQVB57uxHJBG1YFvkRbFj4T";

fn client_for(server: &MockServer) -> LicenseChainClient {
    LicenseChainClient::builder("test-key")
        .base_url(server.uri())
        .rpc_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn data(payload: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": payload }))
}

/// License body the client accepts. `createdAt`, `userId` and `productId` are
/// required alongside `id`, `licenseKey` and `status`; `metadata` is optional.
fn license_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "userId": "u1",
        "productId": "p1",
        "licenseKey": format!("{}-KEY", id),
        "status": status,
        "createdAt": "2025-01-01T00:00:00Z",
        "metadata": {"seats": 5}
    })
}

fn nft_json(owner: &str) -> serde_json::Value {
    json!({
        "mint": MINT,
        "owner": owner,
        "metadata": {
            "name": "Seat #1",
            "symbol": "SEAT",
            "attributes": [{"trait_type": "tier", "value": "gold"}]
        },
        "collection": {"address": OTHER, "verified": true},
        "creators": [{"address": OWNER, "share": 100, "verified": true}],
        "sellerFeeBasisPoints": 500
    })
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

// =============================================================================
// Licenses
// =============================================================================

mod licenses {
    use super::*;

    #[tokio::test]
    async fn test_create_license_sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/licenses"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("x-api-version", "1.0"))
            .and(header("x-platform", "solana"))
            .and(body_json(json!({"userId": "u1", "productId": "p1", "metadata": {}})))
            .respond_with(data(license_json("L1", "active")))
            .expect(1)
            .mount(&server)
            .await;

        let license = client_for(&server)
            .licenses()
            .create_license("u1", "p1", CreateLicenseOptions::default())
            .await
            .unwrap();

        assert_eq!(license.id, "L1");
        assert_eq!(license.license_key, "L1-KEY");
        assert_eq!(license.status, LicenseStatus::Active);
        assert_eq!(license.metadata["seats"], json!(5));
    }

    #[tokio::test]
    async fn test_create_license_rejects_blank_ids() {
        let server = MockServer::start().await;
        let err = client_for(&server)
            .licenses()
            .create_license("  ", "p1", CreateLicenseOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_shape_mismatch_becomes_operation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/licenses"))
            .respond_with(data(json!({"id": "L1", "status": "bogus", "createdAt": "2025-01-01T00:00:00Z"})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .licenses()
            .create_license("u1", "p1", CreateLicenseOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "LICENSE_CREATE_ERROR");
    }

    #[tokio::test]
    async fn test_license_without_created_at_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/licenses"))
            .respond_with(data(json!({"id": "L1", "licenseKey": "K1", "status": "active"})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .licenses()
            .create_license("u1", "p1", CreateLicenseOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "LICENSE_CREATE_ERROR");
        assert!(err.to_string().contains("createdAt"));
    }

    #[tokio::test]
    async fn test_missing_data_envelope_becomes_operation_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/licenses/L1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let err = client_for(&server).licenses().get_license("L1").await.unwrap_err();
        assert_eq!(err.code(), "LICENSE_GET_ERROR");
    }

    #[tokio::test]
    async fn test_server_error_keeps_network_kind() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/licenses/L1"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
            .mount(&server)
            .await;

        let err = client_for(&server).licenses().get_license("L1").await.unwrap_err();
        match err {
            SdkError::Network { status, message, .. } => {
                assert_eq!(status, Some(500));
                assert!(message.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_license_encodes_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/licenses/a%20b"))
            .respond_with(data(license_json("a b", "suspended")))
            .mount(&server)
            .await;

        let license = client_for(&server).licenses().get_license("a b").await.unwrap();
        assert_eq!(license.status, LicenseStatus::Suspended);
    }

    #[tokio::test]
    async fn test_list_licenses_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/licenses"))
            .and(query_param("userId", "u1"))
            .and(query_param("status", "active"))
            .and(query_param("limit", "2"))
            .respond_with(data(json!({
                "licenses": [license_json("L1", "active"), license_json("L2", "active")],
                "total": 7,
                "page": 1,
                "limit": 2
            })))
            .mount(&server)
            .await;

        let filter = LicenseFilter {
            user_id: Some("u1".into()),
            status: Some(LicenseStatus::Active),
            limit: Some(2),
            ..Default::default()
        };
        let page = client_for(&server).licenses().list_licenses(&filter).await.unwrap();
        assert_eq!(page.licenses.len(), 2);
        assert_eq!(page.total, 7);
    }

    #[tokio::test]
    async fn test_update_license_only_deactivates() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/licenses/L1"))
            .and(body_json(json!({"status": "inactive"})))
            .respond_with(data(license_json("L1", "inactive")))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let suspend = LicenseUpdate {
            status: Some(LicenseStatus::Suspended),
            ..Default::default()
        };
        let err = client.licenses().update_license("L1", suspend).await.unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));

        let err = client
            .licenses()
            .update_license("L1", LicenseUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));

        let deactivate = LicenseUpdate {
            status: Some(LicenseStatus::Inactive),
            ..Default::default()
        };
        let license = client.licenses().update_license("L1", deactivate).await.unwrap();
        assert_eq!(license.status, LicenseStatus::Inactive);
        assert_eq!(request_count(&server).await, 1);
    }

    #[tokio::test]
    async fn test_revoke_ignores_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/licenses/L1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).licenses().revoke_license("L1").await.unwrap();
    }

    #[tokio::test]
    async fn test_validate_license() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/licenses/validate"))
            .and(body_json(json!({"licenseKey": "L9-KEY"})))
            .respond_with(data(json!({"valid": false, "reason": "expired"})))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .licenses()
            .validate_license("L9-KEY")
            .await
            .unwrap();
        assert!(!result.valid);
        assert!(result.license.is_none());
        assert_eq!(result.reason.as_deref(), Some("expired"));
    }

    #[tokio::test]
    async fn test_suspend_and_transition() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/licenses/L1/suspend"))
            .and(body_json(json!({"reason": "chargeback"})))
            .respond_with(data(license_json("L1", "suspended")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/licenses/L1/unsuspend"))
            .respond_with(data(license_json("L1", "active")))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let suspended = client
            .licenses()
            .suspend_license("L1", Some("chargeback"))
            .await
            .unwrap();
        assert_eq!(suspended.status, LicenseStatus::Suspended);

        let err = client
            .licenses()
            .transition_license(&suspended, LicenseStatus::Inactive)
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));

        let active = client
            .licenses()
            .transition_license(&suspended, LicenseStatus::Active)
            .await
            .unwrap();
        assert_eq!(active.status, LicenseStatus::Active);
        assert_eq!(request_count(&server).await, 2);
    }
}

// =============================================================================
// NFTs
// =============================================================================

mod nfts {
    use super::*;

    #[tokio::test]
    async fn test_transfer_rejects_bad_mint_without_request() {
        let server = MockServer::start().await;
        let err = client_for(&server)
            .nfts()
            .transfer_nft("bad-mint", OWNER, OTHER)
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));

        let err = client_for(&server)
            .nfts()
            .transfer_nft(MINT, OWNER, OWNER)
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_transfer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/nfts/{}/transfer", MINT)))
            .and(body_json(json!({"from": OWNER, "to": OTHER})))
            .respond_with(data(json!({"signature": SIG})))
            .mount(&server)
            .await;

        let transfer = client_for(&server)
            .nfts()
            .transfer_nft(MINT, OWNER, OTHER)
            .await
            .unwrap();
        assert_eq!(transfer.signature, SIG);
        assert_eq!(transfer.to.as_str(), OTHER);
    }

    #[tokio::test]
    async fn test_burn_without_signature_is_operation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/nfts/{}/burn", MINT)))
            .respond_with(data(json!({})))
            .mount(&server)
            .await;

        let err = client_for(&server).nfts().burn_nft(MINT, OWNER).await.unwrap_err();
        assert_eq!(err.code(), "NFT_BURN_ERROR");
    }

    #[tokio::test]
    async fn test_mint_nft() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/nfts/mint"))
            .and(body_partial_json(json!({
                "owner": OWNER,
                "metadata": {"name": "Seat #1", "symbol": "SEAT"},
                "sellerFeeBasisPoints": 500
            })))
            .respond_with(data(nft_json(OWNER)))
            .mount(&server)
            .await;

        let request = MintNftRequest {
            owner: OWNER.into(),
            metadata: NftMetadata {
                name: "Seat #1".into(),
                symbol: "SEAT".into(),
                ..Default::default()
            },
            seller_fee_basis_points: Some(500),
            ..Default::default()
        };
        let nft = client_for(&server).nfts().mint_nft(&request).await.unwrap();
        assert_eq!(nft.mint.as_str(), MINT);
        assert_eq!(nft.creator_shares_total(), 100);
        assert!(nft.collection.unwrap().verified);
    }

    #[tokio::test]
    async fn test_mint_requires_name() {
        let server = MockServer::start().await;
        let request = MintNftRequest {
            owner: OWNER.into(),
            ..Default::default()
        };
        let err = client_for(&server).nfts().mint_nft(&request).await.unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_nfts_by_owner_accepts_bare_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nfts"))
            .and(query_param("owner", OWNER))
            .respond_with(data(json!([nft_json(OWNER), nft_json(OWNER)])))
            .mount(&server)
            .await;

        let nfts = client_for(&server).nfts().get_nfts_by_owner(OWNER).await.unwrap();
        assert_eq!(nfts.len(), 2);
    }

    #[tokio::test]
    async fn test_update_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("/nfts/{}/metadata", MINT)))
            .and(body_json(json!({"metadata": {"name": "Seat #1"}})))
            .respond_with(data(nft_json(OWNER)))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let err = client
            .nfts()
            .update_nft_metadata(MINT, &NftMetadataUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));

        let update = NftMetadataUpdate {
            name: Some("Seat #1".into()),
            ..Default::default()
        };
        let nft = client.nfts().update_nft_metadata(MINT, &update).await.unwrap();
        assert_eq!(nft.metadata.name, "Seat #1");
    }

    #[tokio::test]
    async fn test_get_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/nfts/collections/{}", OTHER)))
            .respond_with(data(json!({"address": OTHER, "name": "Seats", "size": 250})))
            .mount(&server)
            .await;

        let collection = client_for(&server).nfts().get_collection(OTHER).await.unwrap();
        assert_eq!(collection.name, "Seats");
        assert_eq!(collection.size, Some(250));
    }
}

// =============================================================================
// DeFi
// =============================================================================

mod defi {
    use super::*;

    #[tokio::test]
    async fn test_get_liquidity_pool() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/defi/pools/{}", OWNER)))
            .respond_with(data(json!({
                "address": OWNER, "tokenAMint": WSOL, "tokenBMint": MINT,
                "reserveA": "1000", "reserveB": 150000, "feeRate": "0.003"
            })))
            .mount(&server)
            .await;

        let pool = client_for(&server).defi().get_liquidity_pool(OWNER).await.unwrap();
        assert_eq!(pool.spot_price(), Some(Decimal::from(150)));
    }

    #[tokio::test]
    async fn test_swap_quote_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/defi/swap/quote"))
            .and(query_param("inputMint", WSOL))
            .and(query_param("outputMint", MINT))
            .and(query_param("amount", "2.5"))
            .respond_with(data(json!({
                "inputMint": WSOL, "outputMint": MINT,
                "inputAmount": "2.5", "outputAmount": "370.125", "priceImpact": 0.01
            })))
            .mount(&server)
            .await;

        let quote = client_for(&server)
            .defi()
            .get_swap_quote(WSOL, MINT, "2.5")
            .await
            .unwrap();
        assert_eq!(quote.output_amount, Decimal::from_str("370.125").unwrap());
    }

    #[tokio::test]
    async fn test_swap_validates_before_sending() {
        let server = MockServer::start().await;
        let client = client_for(&server);
        let request = SwapRequest {
            owner: OWNER.into(),
            input_mint: WSOL.into(),
            output_mint: MINT.into(),
            amount: "1".into(),
            slippage_bps: 10_001,
        };
        let err = client.defi().swap(&request).await.unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));

        let zero = SwapRequest {
            amount: "0".into(),
            slippage_bps: 50,
            ..request
        };
        let err = client.defi().swap(&zero).await.unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_deposit_posts_amount() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/defi/lending/{}/deposit", MINT)))
            .and(body_json(json!({"owner": OWNER, "amount": "12.5"})))
            .respond_with(data(json!({"signature": SIG, "amount": 12.5})))
            .mount(&server)
            .await;

        let receipt = client_for(&server)
            .defi()
            .deposit(MINT, OWNER, "12.5")
            .await
            .unwrap();
        assert_eq!(receipt.signature, SIG);
        assert_eq!(receipt.amount, Some(Decimal::from_str("12.5").unwrap()));
    }

    #[tokio::test]
    async fn test_deposit_keeps_full_precision() {
        let server = MockServer::start().await;
        let amount = "1000000000000000000000000000000.000000000000000000000000000001";
        Mock::given(method("POST"))
            .and(path(format!("/defi/lending/{}/deposit", MINT)))
            .and(body_json(json!({"owner": OWNER, "amount": amount})))
            .respond_with(data(json!({"signature": SIG})))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = client_for(&server)
            .defi()
            .deposit(MINT, OWNER, amount)
            .await
            .unwrap();
        assert_eq!(receipt.signature, SIG);
    }

    #[tokio::test]
    async fn test_stake_failure_keeps_auth_kind() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/defi/staking/{}/stake", MINT)))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "forbidden"})))
            .mount(&server)
            .await;

        let err = client_for(&server).defi().stake(MINT, OWNER, "1").await.unwrap_err();
        assert!(matches!(err, SdkError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_harvest_and_positions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/defi/farms/{}/harvest", OTHER)))
            .and(body_json(json!({"owner": OWNER})))
            .respond_with(data(json!({"signature": SIG})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/defi/positions/{}", OWNER)))
            .respond_with(data(json!({"positions": [
                {"type": "farm", "pool": OTHER, "amount": "4", "pendingRewards": "0.25"}
            ]})))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let receipt = client.defi().harvest(OTHER, OWNER).await.unwrap();
        assert!(receipt.amount.is_none());

        let positions = client.defi().get_positions(OWNER).await.unwrap();
        assert_eq!(positions[0].kind, PositionKind::Farm);
        assert_eq!(positions[0].pool.as_str(), OTHER);
    }

    #[tokio::test]
    async fn test_bad_pool_payload_uses_operation_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/defi/lending/{}", MINT)))
            .respond_with(data(json!({
                "address": MINT, "mint": WSOL, "totalSupply": "plenty", "totalBorrowed": "1"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).defi().get_lending_pool(MINT).await.unwrap_err();
        assert_eq!(err.code(), "GET_LENDING_POOL_ERROR");
    }
}
