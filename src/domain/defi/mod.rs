//! DeFi domain: liquidity pools, swaps, lending, staking, farms, positions.
//!
//! Every type here is a read-only projection of backend state. Amounts are
//! exact [`Decimal`]s; request amounts are decimal strings checked locally.

pub mod client;
mod convert;
pub mod wire;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::PubkeyStr;

/// Upper bound for swap slippage in basis points (100%).
pub const MAX_SLIPPAGE_BPS: u16 = 10_000;

// ─── Pools ───────────────────────────────────────────────────────────────────

/// Constant-product liquidity pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityPool {
    pub address: PubkeyStr,
    pub token_a_mint: PubkeyStr,
    pub token_b_mint: PubkeyStr,
    pub reserve_a: Decimal,
    pub reserve_b: Decimal,
    pub lp_mint: Option<PubkeyStr>,
    pub lp_supply: Decimal,
    pub fee_rate: Decimal,
    pub apy: Decimal,
}

impl LiquidityPool {
    /// Price of token A in units of token B; `None` for an empty pool.
    pub fn spot_price(&self) -> Option<Decimal> {
        if self.reserve_a.is_zero() {
            return None;
        }
        self.reserve_b.checked_div(self.reserve_a)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingPool {
    pub address: PubkeyStr,
    pub mint: PubkeyStr,
    pub total_supply: Decimal,
    pub total_borrowed: Decimal,
    pub supply_apy: Decimal,
    pub borrow_apy: Decimal,
}

impl LendingPool {
    /// Borrowed / supplied; zero for an empty pool.
    pub fn utilization(&self) -> Decimal {
        if self.total_supply.is_zero() {
            return Decimal::ZERO;
        }
        self.total_borrowed
            .checked_div(self.total_supply)
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingPool {
    pub address: PubkeyStr,
    pub stake_mint: PubkeyStr,
    pub reward_mint: PubkeyStr,
    pub total_staked: Decimal,
    pub apy: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub address: PubkeyStr,
    pub lp_mint: PubkeyStr,
    pub reward_mint: PubkeyStr,
    pub total_staked: Decimal,
    pub reward_rate: Decimal,
    pub apy: Decimal,
}

// ─── Swaps ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub input_mint: PubkeyStr,
    pub output_mint: PubkeyStr,
    pub input_amount: Decimal,
    pub output_amount: Decimal,
    pub price_impact: Decimal,
    pub fee: Decimal,
}

impl SwapQuote {
    /// Least output accepted at `slippage_bps`.
    pub fn minimum_received(&self, slippage_bps: u16) -> Decimal {
        let bps = Decimal::from(slippage_bps.min(MAX_SLIPPAGE_BPS));
        let keep = Decimal::ONE - bps / Decimal::from(MAX_SLIPPAGE_BPS);
        self.output_amount * keep
    }
}

/// Input for [`swap`](client::Defi::swap).
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    pub owner: String,
    pub input_mint: String,
    pub output_mint: String,
    /// Decimal string of the input token.
    pub amount: String,
    pub slippage_bps: u16,
}

// ─── Receipts & positions ────────────────────────────────────────────────────

/// Signature of a submitted DeFi action, with the amount the backend settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefiReceipt {
    pub signature: String,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionKind {
    Liquidity,
    Lending,
    Borrow,
    Staking,
    Farm,
}

impl PositionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "liquidity" => Some(PositionKind::Liquidity),
            "lending" => Some(PositionKind::Lending),
            "borrow" => Some(PositionKind::Borrow),
            "staking" => Some(PositionKind::Staking),
            "farm" => Some(PositionKind::Farm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub kind: PositionKind,
    pub pool: PubkeyStr,
    pub amount: Decimal,
    pub value: Option<Decimal>,
    pub pending_rewards: Option<Decimal>,
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    InvalidAddress(&'static str, String),
    InvalidAmount(&'static str, String),
    InvalidPositionKind(String),
    MissingSignature,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidAddress(field, v) => write!(f, "Invalid {} address: '{}'", field, v),
            ValidationError::InvalidAmount(field, v) => write!(f, "Invalid {} amount: '{}'", field, v),
            ValidationError::InvalidPositionKind(k) => write!(f, "Invalid position kind: {}", k),
            ValidationError::MissingSignature => write!(f, "Missing signature"),
        }
    }
}

impl std::error::Error for ValidationError {}
