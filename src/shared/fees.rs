//! Deterministic fee and rent estimates.
//!
//! These are offline approximations for display and budgeting. They are not
//! a substitute for `getFeeForMessage` / `getMinimumBalanceForRentExemption`.

/// Flat fee charged once per transaction.
pub const BASE_FEE_LAMPORTS: u64 = 5_000;

/// Added per instruction.
pub const FEE_PER_INSTRUCTION_LAMPORTS: u64 = 1_000;

/// Added per required signature.
pub const FEE_PER_SIGNATURE_LAMPORTS: u64 = 5_000;

/// Bytes of account metadata charged for rent on top of the data length.
pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;

/// Rent in lamports per byte-year.
pub const LAMPORTS_PER_BYTE_YEAR: u64 = 3_480;

/// Years of rent required for an account to be rent-exempt.
pub const EXEMPTION_THRESHOLD_YEARS: u64 = 2;

/// `base + instructions * per_instruction + signatures * per_signature`, saturating.
pub fn estimate_transaction_fee(instruction_count: u64, signature_count: u64) -> u64 {
    BASE_FEE_LAMPORTS
        .saturating_add(instruction_count.saturating_mul(FEE_PER_INSTRUCTION_LAMPORTS))
        .saturating_add(signature_count.saturating_mul(FEE_PER_SIGNATURE_LAMPORTS))
}

/// Minimum balance for an account holding `data_len` bytes to be rent-exempt.
pub fn estimate_rent_exemption(data_len: u64) -> u64 {
    ACCOUNT_STORAGE_OVERHEAD
        .saturating_add(data_len)
        .saturating_mul(LAMPORTS_PER_BYTE_YEAR)
        .saturating_mul(EXEMPTION_THRESHOLD_YEARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_is_linear() {
        assert_eq!(estimate_transaction_fee(0, 0), 5_000);
        assert_eq!(estimate_transaction_fee(1, 1), 11_000);
        assert_eq!(estimate_transaction_fee(3, 2), 5_000 + 3_000 + 10_000);
        let step = estimate_transaction_fee(5, 1) - estimate_transaction_fee(4, 1);
        assert_eq!(step, FEE_PER_INSTRUCTION_LAMPORTS);
    }

    #[test]
    fn test_fee_saturates() {
        assert_eq!(estimate_transaction_fee(u64::MAX, u64::MAX), u64::MAX);
    }

    #[test]
    fn test_rent_exemption() {
        // Matches the cluster value for a zero-data system account.
        assert_eq!(estimate_rent_exemption(0), 890_880);
        // SPL token account (165 bytes).
        assert_eq!(estimate_rent_exemption(165), 2_039_280);
    }
}
