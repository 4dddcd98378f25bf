//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Rich domain types (validated, business-logic-ready)
//! - `wire.rs`: Raw serde structs matching backend responses
//! - `convert.rs`: `TryFrom`/`From` conversions with validation
//! - `client.rs`: Sub-client (manager) issuing the REST calls

pub mod defi;
pub mod license;
pub mod nft;

use crate::error::{SdkError, SdkResult};

/// A backend payload that decoded but failed domain validation.
pub(crate) fn invalid_payload(resource: &str, err: impl std::fmt::Display) -> SdkError {
    SdkError::Serialization(format!("Invalid {} payload: {}", resource, err))
}

/// Convert a decoded wire payload into its domain type, wrapping anything that
/// is not already a typed failure into the manager-specific `code`.
pub(crate) fn finish<W, T>(
    wire: SdkResult<W>,
    resource: &str,
    code: &'static str,
    context: &str,
) -> SdkResult<T>
where
    T: TryFrom<W>,
    T::Error: std::fmt::Display,
{
    wire.and_then(|w| T::try_from(w).map_err(|e| invalid_payload(resource, e)))
        .map_err(|e| e.into_operation(code, context))
}
