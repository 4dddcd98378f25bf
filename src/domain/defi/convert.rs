//! Conversion: DeFi wire responses → domain types (TryFrom + validation).

use rust_decimal::Decimal;
use std::str::FromStr;

use super::wire::{self, DecimalWire};
use super::{
    DefiReceipt, Farm, LendingPool, LiquidityPool, Position, PositionKind, StakingPool, SwapQuote,
    ValidationError,
};
use crate::shared::PubkeyStr;

fn address(field: &'static str, value: String) -> Result<PubkeyStr, ValidationError> {
    PubkeyStr::parse(&value).map_err(|_| ValidationError::InvalidAddress(field, value))
}

fn decimal(field: &'static str, value: &DecimalWire) -> Result<Decimal, ValidationError> {
    let text = value.as_text();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| ValidationError::InvalidAmount(field, text))
}

fn decimal_or_zero(field: &'static str, value: Option<&DecimalWire>) -> Result<Decimal, ValidationError> {
    value.map_or(Ok(Decimal::ZERO), |v| decimal(field, v))
}

fn optional_decimal(
    field: &'static str,
    value: Option<&DecimalWire>,
) -> Result<Option<Decimal>, ValidationError> {
    value.map(|v| decimal(field, v)).transpose()
}

impl TryFrom<wire::LiquidityPoolResponse> for LiquidityPool {
    type Error = ValidationError;

    fn try_from(p: wire::LiquidityPoolResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            reserve_a: decimal("reserveA", &p.reserve_a)?,
            reserve_b: decimal("reserveB", &p.reserve_b)?,
            lp_supply: decimal_or_zero("lpSupply", p.lp_supply.as_ref())?,
            fee_rate: decimal_or_zero("feeRate", p.fee_rate.as_ref())?,
            apy: decimal_or_zero("apy", p.apy.as_ref())?,
            lp_mint: p.lp_mint.map(|m| address("lpMint", m)).transpose()?,
            address: address("pool", p.address)?,
            token_a_mint: address("tokenAMint", p.token_a_mint)?,
            token_b_mint: address("tokenBMint", p.token_b_mint)?,
        })
    }
}

impl TryFrom<wire::LiquidityPoolListResponse> for Vec<LiquidityPool> {
    type Error = ValidationError;

    fn try_from(source: wire::LiquidityPoolListResponse) -> Result<Self, Self::Error> {
        let pools = match source {
            wire::LiquidityPoolListResponse::Wrapped { pools } => pools,
            wire::LiquidityPoolListResponse::Bare(pools) => pools,
        };
        pools.into_iter().map(LiquidityPool::try_from).collect()
    }
}

impl TryFrom<wire::LendingPoolResponse> for LendingPool {
    type Error = ValidationError;

    fn try_from(p: wire::LendingPoolResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            total_supply: decimal("totalSupply", &p.total_supply)?,
            total_borrowed: decimal("totalBorrowed", &p.total_borrowed)?,
            supply_apy: decimal_or_zero("supplyApy", p.supply_apy.as_ref())?,
            borrow_apy: decimal_or_zero("borrowApy", p.borrow_apy.as_ref())?,
            address: address("pool", p.address)?,
            mint: address("mint", p.mint)?,
        })
    }
}

impl TryFrom<wire::StakingPoolResponse> for StakingPool {
    type Error = ValidationError;

    fn try_from(p: wire::StakingPoolResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            total_staked: decimal("totalStaked", &p.total_staked)?,
            apy: decimal_or_zero("apy", p.apy.as_ref())?,
            address: address("pool", p.address)?,
            stake_mint: address("stakeMint", p.stake_mint)?,
            reward_mint: address("rewardMint", p.reward_mint)?,
        })
    }
}

impl TryFrom<wire::FarmResponse> for Farm {
    type Error = ValidationError;

    fn try_from(f: wire::FarmResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            total_staked: decimal("totalStaked", &f.total_staked)?,
            reward_rate: decimal_or_zero("rewardRate", f.reward_rate.as_ref())?,
            apy: decimal_or_zero("apy", f.apy.as_ref())?,
            address: address("farm", f.address)?,
            lp_mint: address("lpMint", f.lp_mint)?,
            reward_mint: address("rewardMint", f.reward_mint)?,
        })
    }
}

impl TryFrom<wire::SwapQuoteResponse> for SwapQuote {
    type Error = ValidationError;

    fn try_from(q: wire::SwapQuoteResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            input_amount: decimal("inputAmount", &q.input_amount)?,
            output_amount: decimal("outputAmount", &q.output_amount)?,
            price_impact: decimal_or_zero("priceImpact", q.price_impact.as_ref())?,
            fee: decimal_or_zero("fee", q.fee.as_ref())?,
            input_mint: address("inputMint", q.input_mint)?,
            output_mint: address("outputMint", q.output_mint)?,
        })
    }
}

impl TryFrom<wire::ReceiptResponse> for DefiReceipt {
    type Error = ValidationError;

    fn try_from(r: wire::ReceiptResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: optional_decimal("amount", r.amount.as_ref())?,
            signature: r
                .signature
                .filter(|s| !s.trim().is_empty())
                .ok_or(ValidationError::MissingSignature)?,
        })
    }
}

impl TryFrom<wire::PositionResponse> for Position {
    type Error = ValidationError;

    fn try_from(p: wire::PositionResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: PositionKind::parse(&p.kind)
                .ok_or_else(|| ValidationError::InvalidPositionKind(p.kind.clone()))?,
            amount: decimal("amount", &p.amount)?,
            value: optional_decimal("value", p.value.as_ref())?,
            pending_rewards: optional_decimal("pendingRewards", p.pending_rewards.as_ref())?,
            pool: address("pool", p.pool)?,
        })
    }
}

impl TryFrom<wire::PositionListResponse> for Vec<Position> {
    type Error = ValidationError;

    fn try_from(source: wire::PositionListResponse) -> Result<Self, Self::Error> {
        let positions = match source {
            wire::PositionListResponse::Wrapped { positions } => positions,
            wire::PositionListResponse::Bare(positions) => positions,
        };
        positions.into_iter().map(Position::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const A: &str = "So11111111111111111111111111111111111111112";
    const B: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
    const POOL: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";

    #[test]
    fn test_pool_accepts_numbers_and_strings() {
        let raw: wire::LiquidityPoolResponse = serde_json::from_value(json!({
            "address": POOL,
            "tokenAMint": A,
            "tokenBMint": B,
            "reserveA": "1000.5",
            "reserveB": 2500,
            "feeRate": 0.003,
            "apy": "12.75"
        }))
        .unwrap();
        let pool = LiquidityPool::try_from(raw).unwrap();
        assert_eq!(pool.reserve_a, Decimal::from_str("1000.5").unwrap());
        assert_eq!(pool.reserve_b, Decimal::from(2500));
        assert_eq!(pool.fee_rate, Decimal::from_str("0.003").unwrap());
        assert_eq!(pool.lp_supply, Decimal::ZERO);
    }

    #[test]
    fn test_pool_rejects_bad_amount() {
        let raw: wire::LiquidityPoolResponse = serde_json::from_value(json!({
            "address": POOL, "tokenAMint": A, "tokenBMint": B,
            "reserveA": "lots", "reserveB": "1"
        }))
        .unwrap();
        assert!(matches!(
            LiquidityPool::try_from(raw),
            Err(ValidationError::InvalidAmount("reserveA", _))
        ));
    }

    #[test]
    fn test_positions() {
        let raw: wire::PositionListResponse = serde_json::from_value(json!({
            "positions": [
                {"type": "staking", "pool": POOL, "amount": "10", "pendingRewards": "0.5"},
                {"type": "borrow", "pool": POOL, "amount": "3", "value": "300"}
            ]
        }))
        .unwrap();
        let positions = Vec::<Position>::try_from(raw).unwrap();
        assert_eq!(positions[0].kind, PositionKind::Staking);
        assert_eq!(positions[0].pending_rewards, Some(Decimal::from_str("0.5").unwrap()));
        assert_eq!(positions[1].value, Some(Decimal::from(300)));
    }

    #[test]
    fn test_unknown_position_kind() {
        let raw: wire::PositionResponse =
            serde_json::from_value(json!({"type": "perp", "pool": POOL, "amount": "1"})).unwrap();
        assert!(Position::try_from(raw).is_err());
    }

    #[test]
    fn test_receipt_requires_signature() {
        let raw: wire::ReceiptResponse = serde_json::from_value(json!({"amount": "1"})).unwrap();
        assert!(matches!(
            DefiReceipt::try_from(raw),
            Err(ValidationError::MissingSignature)
        ));
    }
}
