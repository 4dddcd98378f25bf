//! DeFi sub-client: pools, swaps, lending, staking, farms, positions.

use crate::client::LicenseChainClient;
use crate::domain::defi::wire;
use crate::domain::defi::{
    DefiReceipt, Farm, LendingPool, LiquidityPool, Position, StakingPool, SwapQuote, SwapRequest,
    MAX_SLIPPAGE_BPS,
};
use crate::domain::finish;
use crate::error::{codes, SdkError, SdkResult};
use crate::http::client::segment;
use crate::shared::validation::{require_amount, require_public_key};

/// A strictly positive decimal-string amount, of any precision.
fn require_positive_amount(value: &str, field_name: &str) -> SdkResult<()> {
    require_amount(value, field_name)?;
    if !value.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        return Err(SdkError::validation(format!("{} must be greater than zero", field_name)));
    }
    Ok(())
}

/// Sub-client for DeFi operations.
pub struct Defi<'a> {
    pub(crate) client: &'a LicenseChainClient,
}

impl<'a> Defi<'a> {
    // ── Liquidity pools ──────────────────────────────────────────────────

    pub async fn get_liquidity_pool(&self, pool: &str) -> SdkResult<LiquidityPool> {
        require_public_key(pool, "pool")?;
        let path = format!("/defi/pools/{}", segment(pool));
        let resp = self.client.http.get::<wire::LiquidityPoolResponse>(&path).await;
        finish(resp, "pool", codes::GET_POOL_ERROR, "Failed to get liquidity pool")
    }

    pub async fn list_liquidity_pools(&self) -> SdkResult<Vec<LiquidityPool>> {
        let resp = self
            .client
            .http
            .get::<wire::LiquidityPoolListResponse>("/defi/pools")
            .await;
        finish(resp, "pool list", codes::LIST_POOLS_ERROR, "Failed to list liquidity pools")
    }

    pub async fn add_liquidity(
        &self,
        pool: &str,
        owner: &str,
        amount_a: &str,
        amount_b: &str,
    ) -> SdkResult<DefiReceipt> {
        require_public_key(pool, "pool")?;
        require_public_key(owner, "owner")?;
        require_positive_amount(amount_a, "amount_a")?;
        require_positive_amount(amount_b, "amount_b")?;

        let body = wire::AddLiquidityBody {
            owner,
            amount_a: amount_a.trim(),
            amount_b: amount_b.trim(),
        };
        let path = format!("/defi/pools/{}/add-liquidity", segment(pool));
        let resp = self.client.http.post::<wire::ReceiptResponse, _>(&path, &body).await;
        finish(resp, "receipt", codes::ADD_LIQUIDITY_ERROR, "Failed to add liquidity")
    }

    pub async fn remove_liquidity(&self, pool: &str, owner: &str, lp_amount: &str) -> SdkResult<DefiReceipt> {
        require_public_key(pool, "pool")?;
        require_public_key(owner, "owner")?;
        require_positive_amount(lp_amount, "lp_amount")?;

        let body = wire::RemoveLiquidityBody {
            owner,
            lp_amount: lp_amount.trim(),
        };
        let path = format!("/defi/pools/{}/remove-liquidity", segment(pool));
        let resp = self.client.http.post::<wire::ReceiptResponse, _>(&path, &body).await;
        finish(resp, "receipt", codes::REMOVE_LIQUIDITY_ERROR, "Failed to remove liquidity")
    }

    // ── Swaps ────────────────────────────────────────────────────────────

    pub async fn get_swap_quote(&self, input_mint: &str, output_mint: &str, amount: &str) -> SdkResult<SwapQuote> {
        require_public_key(input_mint, "input_mint")?;
        require_public_key(output_mint, "output_mint")?;
        if input_mint == output_mint {
            return Err(SdkError::validation("input_mint and output_mint must differ"));
        }
        require_positive_amount(amount, "amount")?;

        let path = format!(
            "/defi/swap/quote?inputMint={}&outputMint={}&amount={}",
            segment(input_mint),
            segment(output_mint),
            segment(amount.trim())
        );
        let resp = self.client.http.get::<wire::SwapQuoteResponse>(&path).await;
        finish(resp, "swap quote", codes::SWAP_QUOTE_ERROR, "Failed to get swap quote")
    }

    pub async fn swap(&self, request: &SwapRequest) -> SdkResult<DefiReceipt> {
        require_public_key(&request.owner, "owner")?;
        require_public_key(&request.input_mint, "input_mint")?;
        require_public_key(&request.output_mint, "output_mint")?;
        if request.input_mint == request.output_mint {
            return Err(SdkError::validation("input_mint and output_mint must differ"));
        }
        require_positive_amount(&request.amount, "amount")?;
        if request.slippage_bps > MAX_SLIPPAGE_BPS {
            return Err(SdkError::validation(format!(
                "slippage_bps must be at most {}, got {}",
                MAX_SLIPPAGE_BPS, request.slippage_bps
            )));
        }

        let body = wire::SwapBody {
            owner: &request.owner,
            input_mint: &request.input_mint,
            output_mint: &request.output_mint,
            amount: request.amount.trim(),
            slippage_bps: request.slippage_bps,
        };
        let resp = self.client.http.post::<wire::ReceiptResponse, _>("/defi/swap", &body).await;
        finish(resp, "receipt", codes::SWAP_ERROR, "Failed to swap")
    }

    // ── Lending ──────────────────────────────────────────────────────────

    pub async fn get_lending_pool(&self, pool: &str) -> SdkResult<LendingPool> {
        require_public_key(pool, "pool")?;
        let path = format!("/defi/lending/{}", segment(pool));
        let resp = self.client.http.get::<wire::LendingPoolResponse>(&path).await;
        finish(resp, "lending pool", codes::GET_LENDING_POOL_ERROR, "Failed to get lending pool")
    }

    pub async fn deposit(&self, pool: &str, owner: &str, amount: &str) -> SdkResult<DefiReceipt> {
        self.amount_action("lending", pool, "deposit", owner, amount, codes::DEPOSIT_ERROR)
            .await
    }

    pub async fn withdraw(&self, pool: &str, owner: &str, amount: &str) -> SdkResult<DefiReceipt> {
        self.amount_action("lending", pool, "withdraw", owner, amount, codes::WITHDRAW_ERROR)
            .await
    }

    pub async fn borrow(&self, pool: &str, owner: &str, amount: &str) -> SdkResult<DefiReceipt> {
        self.amount_action("lending", pool, "borrow", owner, amount, codes::BORROW_ERROR)
            .await
    }

    pub async fn repay(&self, pool: &str, owner: &str, amount: &str) -> SdkResult<DefiReceipt> {
        self.amount_action("lending", pool, "repay", owner, amount, codes::REPAY_ERROR)
            .await
    }

    // ── Staking ──────────────────────────────────────────────────────────

    pub async fn get_staking_pool(&self, pool: &str) -> SdkResult<StakingPool> {
        require_public_key(pool, "pool")?;
        let path = format!("/defi/staking/{}", segment(pool));
        let resp = self.client.http.get::<wire::StakingPoolResponse>(&path).await;
        finish(resp, "staking pool", codes::GET_STAKING_POOL_ERROR, "Failed to get staking pool")
    }

    pub async fn stake(&self, pool: &str, owner: &str, amount: &str) -> SdkResult<DefiReceipt> {
        self.amount_action("staking", pool, "stake", owner, amount, codes::STAKE_ERROR)
            .await
    }

    pub async fn unstake(&self, pool: &str, owner: &str, amount: &str) -> SdkResult<DefiReceipt> {
        self.amount_action("staking", pool, "unstake", owner, amount, codes::UNSTAKE_ERROR)
            .await
    }

    // ── Farms ────────────────────────────────────────────────────────────

    pub async fn get_farm(&self, farm: &str) -> SdkResult<Farm> {
        require_public_key(farm, "farm")?;
        let path = format!("/defi/farms/{}", segment(farm));
        let resp = self.client.http.get::<wire::FarmResponse>(&path).await;
        finish(resp, "farm", codes::GET_FARM_ERROR, "Failed to get farm")
    }

    /// Claim pending farm rewards for `owner`.
    pub async fn harvest(&self, farm: &str, owner: &str) -> SdkResult<DefiReceipt> {
        require_public_key(farm, "farm")?;
        require_public_key(owner, "owner")?;
        let path = format!("/defi/farms/{}/harvest", segment(farm));
        let body = wire::OwnerBody { owner };
        let resp = self.client.http.post::<wire::ReceiptResponse, _>(&path, &body).await;
        finish(resp, "receipt", codes::HARVEST_ERROR, "Failed to harvest")
    }

    // ── Positions ────────────────────────────────────────────────────────

    pub async fn get_positions(&self, owner: &str) -> SdkResult<Vec<Position>> {
        require_public_key(owner, "owner")?;
        let path = format!("/defi/positions/{}", segment(owner));
        let resp = self.client.http.get::<wire::PositionListResponse>(&path).await;
        finish(resp, "position list", codes::GET_POSITIONS_ERROR, "Failed to get positions")
    }

    /// `POST /defi/{family}/{pool}/{action}` with `{ owner, amount }`.
    async fn amount_action(
        &self,
        family: &str,
        pool: &str,
        action: &str,
        owner: &str,
        amount: &str,
        code: &'static str,
    ) -> SdkResult<DefiReceipt> {
        require_public_key(pool, "pool")?;
        require_public_key(owner, "owner")?;
        require_positive_amount(amount, "amount")?;

        let body = wire::AmountBody {
            owner,
            amount: amount.trim(),
        };
        let path = format!("/defi/{}/{}/{}", family, segment(pool), action);
        let resp = self.client.http.post::<wire::ReceiptResponse, _>(&path, &body).await;
        finish(resp, "receipt", code, &format!("Failed to {}", action))
    }
}
