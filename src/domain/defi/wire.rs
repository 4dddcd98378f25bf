//! Wire types for DeFi REST responses and request bodies.

use serde::{Deserialize, Serialize};

/// Numeric field the backend may send as a JSON number or a decimal string.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DecimalWire {
    Str(String),
    Num(serde_json::Number),
}

impl DecimalWire {
    pub fn as_text(&self) -> String {
        match self {
            DecimalWire::Str(s) => s.clone(),
            DecimalWire::Num(n) => n.to_string(),
        }
    }
}

// ─── Responses ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityPoolResponse {
    pub address: String,
    pub token_a_mint: String,
    pub token_b_mint: String,
    pub reserve_a: DecimalWire,
    pub reserve_b: DecimalWire,
    #[serde(default)]
    pub lp_mint: Option<String>,
    #[serde(default)]
    pub lp_supply: Option<DecimalWire>,
    #[serde(default)]
    pub fee_rate: Option<DecimalWire>,
    #[serde(default)]
    pub apy: Option<DecimalWire>,
}

/// `GET /defi/pools` returns either `{ "pools": [...] }` or a bare array.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum LiquidityPoolListResponse {
    Wrapped { pools: Vec<LiquidityPoolResponse> },
    Bare(Vec<LiquidityPoolResponse>),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LendingPoolResponse {
    pub address: String,
    pub mint: String,
    pub total_supply: DecimalWire,
    pub total_borrowed: DecimalWire,
    #[serde(default)]
    pub supply_apy: Option<DecimalWire>,
    #[serde(default)]
    pub borrow_apy: Option<DecimalWire>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StakingPoolResponse {
    pub address: String,
    pub stake_mint: String,
    pub reward_mint: String,
    pub total_staked: DecimalWire,
    #[serde(default)]
    pub apy: Option<DecimalWire>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FarmResponse {
    pub address: String,
    pub lp_mint: String,
    pub reward_mint: String,
    pub total_staked: DecimalWire,
    #[serde(default)]
    pub reward_rate: Option<DecimalWire>,
    #[serde(default)]
    pub apy: Option<DecimalWire>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuoteResponse {
    pub input_mint: String,
    pub output_mint: String,
    pub input_amount: DecimalWire,
    pub output_amount: DecimalWire,
    #[serde(default)]
    pub price_impact: Option<DecimalWire>,
    #[serde(default)]
    pub fee: Option<DecimalWire>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ReceiptResponse {
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub amount: Option<DecimalWire>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PositionResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub pool: String,
    pub amount: DecimalWire,
    #[serde(default)]
    pub value: Option<DecimalWire>,
    #[serde(default)]
    pub pending_rewards: Option<DecimalWire>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum PositionListResponse {
    Wrapped { positions: Vec<PositionResponse> },
    Bare(Vec<PositionResponse>),
}

// ─── Requests ────────────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddLiquidityBody<'a> {
    pub owner: &'a str,
    pub amount_a: &'a str,
    pub amount_b: &'a str,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RemoveLiquidityBody<'a> {
    pub owner: &'a str,
    pub lp_amount: &'a str,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SwapBody<'a> {
    pub owner: &'a str,
    pub input_mint: &'a str,
    pub output_mint: &'a str,
    pub amount: &'a str,
    pub slippage_bps: u16,
}

/// Body shared by deposit, withdraw, borrow, repay, stake and unstake.
#[derive(Serialize, Debug, Clone)]
pub struct AmountBody<'a> {
    pub owner: &'a str,
    pub amount: &'a str,
}

#[derive(Serialize, Debug, Clone)]
pub struct OwnerBody<'a> {
    pub owner: &'a str,
}
