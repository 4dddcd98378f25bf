//! Exact decimal-string ↔ integer unit conversion.
//!
//! All math is arbitrary-precision integer arithmetic (`num-bigint`); no
//! floating point is involved anywhere, so nothing is ever rounded.

use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};
use rust_decimal::Decimal;

use crate::error::{SdkError, SdkResult};

/// Decimals of the native token (1 SOL = 10^9 lamports).
pub const SOL_DECIMALS: u32 = 9;

/// Lamports per SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

fn pow10(decimals: u32) -> BigInt {
    BigInt::from(10u32).pow(decimals)
}

/// Parse a decimal string into its integer representation at `decimals`.
///
/// `parse_units("1.5", 9)` is `1_500_000_000`. More fractional digits than
/// `decimals` is an error rather than a silent truncation.
pub fn parse_units(value: &str, decimals: u32) -> SdkResult<BigInt> {
    let value = value.trim();
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let (whole, frac) = match unsigned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (unsigned, ""),
    };

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !is_digits(whole) || !is_digits(frac) {
        return Err(SdkError::validation(format!(
            "Invalid decimal string: '{}'",
            value
        )));
    }
    if unsigned.contains('.') && frac.is_empty() {
        return Err(SdkError::validation(format!(
            "Invalid decimal string: '{}'",
            value
        )));
    }
    if frac.len() > decimals as usize {
        return Err(SdkError::validation(format!(
            "'{}' has {} fractional digits, at most {} allowed",
            value,
            frac.len(),
            decimals
        )));
    }

    let padded = format!("{}{:0<width$}", whole, frac, width = decimals as usize);
    let magnitude = BigInt::parse_bytes(padded.as_bytes(), 10)
        .ok_or_else(|| SdkError::validation(format!("Invalid decimal string: '{}'", value)))?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Format an integer amount at `decimals` as a decimal string.
///
/// Trailing fractional zeros are trimmed and the decimal point is omitted
/// entirely when the fractional part is zero.
pub fn format_units(value: &BigInt, decimals: u32) -> String {
    let divisor = pow10(decimals);
    let magnitude = value.magnitude();
    let whole = magnitude / divisor.magnitude();
    let remainder = magnitude % divisor.magnitude();

    let sign = if value.sign() == Sign::Minus { "-" } else { "" };

    if remainder.is_zero() {
        return format!("{}{}", sign, whole);
    }

    let frac = format!("{:0>width$}", remainder.to_string(), width = decimals as usize);
    let frac = frac.trim_end_matches('0');
    format!("{}{}.{}", sign, whole, frac)
}

/// Convert lamports to SOL.
pub fn lamports_to_sol(lamports: u64) -> Decimal {
    Decimal::from_i128_with_scale(lamports as i128, SOL_DECIMALS).normalize()
}

/// Convert a SOL decimal string to lamports.
pub fn sol_to_lamports(sol: &str) -> SdkResult<u64> {
    let lamports = parse_units(sol, SOL_DECIMALS)?;
    lamports.to_u64().ok_or_else(|| {
        SdkError::validation(format!("'{}' SOL does not fit in a u64 lamport amount", sol))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("1.5", 9).unwrap(), BigInt::from(1_500_000_000u64));
        assert_eq!(parse_units("0", 6).unwrap(), BigInt::zero());
        assert_eq!(parse_units("42", 0).unwrap(), BigInt::from(42));
        assert_eq!(parse_units("0.000001", 6).unwrap(), BigInt::from(1));
        assert_eq!(parse_units("-2.25", 2).unwrap(), BigInt::from(-225));
    }

    #[test]
    fn test_parse_units_arbitrary_precision() {
        let big = parse_units("123456789012345678901234567890.123456789", 18).unwrap();
        assert_eq!(
            big.to_string(),
            "123456789012345678901234567890123456789000000000"
        );
    }

    #[test]
    fn test_parse_units_rejects() {
        for bad in ["", "abc", "1.", ".5", "1.2.3", "1e9", "--1", "1,5"] {
            assert!(parse_units(bad, 9).is_err(), "{bad}");
        }
        // Too many fractional digits is an error, not a rounding.
        assert!(parse_units("0.1234567", 6).is_err());
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(&BigInt::from(1_500_000_000u64), 9), "1.5");
        assert_eq!(format_units(&BigInt::from(1_000_000_000u64), 9), "1");
        assert_eq!(format_units(&BigInt::from(1), 9), "0.000000001");
        assert_eq!(format_units(&BigInt::zero(), 6), "0");
        assert_eq!(format_units(&BigInt::from(-225), 2), "-2.25");
        assert_eq!(format_units(&BigInt::from(42), 0), "42");
    }

    #[test]
    fn test_round_trip_law() {
        let cases = [
            ("1.5", 9),
            ("0.000000001", 9),
            ("1000000", 6),
            ("3.14159", 5),
            ("98765432109876543210.5", 1),
            ("-7.07", 4),
        ];
        for (s, d) in cases {
            assert_eq!(format_units(&parse_units(s, d).unwrap(), d), s, "{s} @ {d}");
        }
        // Trailing zeros normalize away.
        assert_eq!(format_units(&parse_units("2.500", 6).unwrap(), 6), "2.5");
        assert_eq!(format_units(&parse_units("2.000", 6).unwrap(), 6), "2");
    }

    #[test]
    fn test_lamports_to_sol() {
        assert_eq!(lamports_to_sol(1_500_000_000), Decimal::from_str("1.5").unwrap());
        assert_eq!(lamports_to_sol(1), Decimal::from_str("0.000000001").unwrap());
        assert_eq!(lamports_to_sol(0), Decimal::ZERO);
        assert_eq!(lamports_to_sol(LAMPORTS_PER_SOL).to_string(), "1");
    }

    #[test]
    fn test_sol_to_lamports() {
        assert_eq!(sol_to_lamports("1").unwrap(), LAMPORTS_PER_SOL);
        assert_eq!(sol_to_lamports("0.000000001").unwrap(), 1);
        assert!(sol_to_lamports("-1").is_err());
        assert!(sol_to_lamports("100000000000").is_err());
    }
}
