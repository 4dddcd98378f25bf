//! Unified SDK error types.
//!
//! Every failure surfaced by the SDK is an [`SdkError`] carrying a stable,
//! machine-readable [`code`](SdkError::code). Branch on the variant or the
//! code; the `Display` message is for diagnostics only.

use std::time::Duration;

use thiserror::Error;

/// Stable error code strings.
pub mod codes {
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const RPC_ERROR: &str = "RPC_ERROR";
    pub const TRANSACTION_ERROR: &str = "TRANSACTION_ERROR";
    pub const ACCOUNT_ERROR: &str = "ACCOUNT_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const AUTHENTICATION_ERROR: &str = "AUTHENTICATION_ERROR";
    pub const RATE_LIMIT_ERROR: &str = "RATE_LIMIT_ERROR";
    pub const INSUFFICIENT_FUNDS: &str = "INSUFFICIENT_FUNDS";
    pub const TIMEOUT_ERROR: &str = "TIMEOUT_ERROR";
    pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";

    // License manager
    pub const LICENSE_CREATE_ERROR: &str = "LICENSE_CREATE_ERROR";
    pub const LICENSE_GET_ERROR: &str = "LICENSE_GET_ERROR";
    pub const LICENSE_UPDATE_ERROR: &str = "LICENSE_UPDATE_ERROR";
    pub const LICENSE_REVOKE_ERROR: &str = "LICENSE_REVOKE_ERROR";
    pub const LICENSE_LIST_ERROR: &str = "LICENSE_LIST_ERROR";
    pub const LICENSE_VALIDATE_ERROR: &str = "LICENSE_VALIDATE_ERROR";
    pub const LICENSE_SUSPEND_ERROR: &str = "LICENSE_SUSPEND_ERROR";
    pub const LICENSE_UNSUSPEND_ERROR: &str = "LICENSE_UNSUSPEND_ERROR";

    // NFT manager
    pub const NFT_MINT_ERROR: &str = "NFT_MINT_ERROR";
    pub const NFT_GET_ERROR: &str = "NFT_GET_ERROR";
    pub const NFT_TRANSFER_ERROR: &str = "NFT_TRANSFER_ERROR";
    pub const NFT_BURN_ERROR: &str = "NFT_BURN_ERROR";
    pub const NFT_LIST_ERROR: &str = "NFT_LIST_ERROR";
    pub const NFT_UPDATE_ERROR: &str = "NFT_UPDATE_ERROR";
    pub const NFT_COLLECTION_ERROR: &str = "NFT_COLLECTION_ERROR";

    // DeFi manager
    pub const GET_POOL_ERROR: &str = "GET_POOL_ERROR";
    pub const LIST_POOLS_ERROR: &str = "LIST_POOLS_ERROR";
    pub const ADD_LIQUIDITY_ERROR: &str = "ADD_LIQUIDITY_ERROR";
    pub const REMOVE_LIQUIDITY_ERROR: &str = "REMOVE_LIQUIDITY_ERROR";
    pub const SWAP_QUOTE_ERROR: &str = "SWAP_QUOTE_ERROR";
    pub const SWAP_ERROR: &str = "SWAP_ERROR";
    pub const GET_LENDING_POOL_ERROR: &str = "GET_LENDING_POOL_ERROR";
    pub const DEPOSIT_ERROR: &str = "DEPOSIT_ERROR";
    pub const WITHDRAW_ERROR: &str = "WITHDRAW_ERROR";
    pub const BORROW_ERROR: &str = "BORROW_ERROR";
    pub const REPAY_ERROR: &str = "REPAY_ERROR";
    pub const GET_STAKING_POOL_ERROR: &str = "GET_STAKING_POOL_ERROR";
    pub const STAKE_ERROR: &str = "STAKE_ERROR";
    pub const UNSTAKE_ERROR: &str = "UNSTAKE_ERROR";
    pub const GET_FARM_ERROR: &str = "GET_FARM_ERROR";
    pub const HARVEST_ERROR: &str = "HARVEST_ERROR";
    pub const GET_POSITIONS_ERROR: &str = "GET_POSITIONS_ERROR";
}

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Transport failure or non-2xx HTTP status.
    #[error("Network error: {message}")]
    Network {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The JSON-RPC response carried an `error` object.
    #[error("RPC error {rpc_code}: {message}")]
    Rpc {
        rpc_code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },

    #[error("Transaction error: {message}")]
    Transaction {
        message: String,
        signature: Option<String>,
        details: Option<serde_json::Value>,
    },

    /// Account or program lookup failed or came back empty.
    #[error("Account error: {message}")]
    Account {
        message: String,
        account: Option<String>,
    },

    /// A local precondition failed before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited (retry after {retry_after:?})")]
    RateLimit { retry_after: Option<Duration> },

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("Request timed out after {}ms", timeout.as_millis())]
    Timeout { timeout: Duration },

    /// A response body failed to decode or failed schema validation.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Manager-specific failure (e.g. `LICENSE_CREATE_ERROR`) wrapping its cause.
    #[error("{message}")]
    Operation {
        code: &'static str,
        message: String,
        #[source]
        source: Box<SdkError>,
    },
}

impl SdkError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &str {
        match self {
            SdkError::Network { .. } => codes::NETWORK_ERROR,
            SdkError::Rpc { .. } => codes::RPC_ERROR,
            SdkError::Transaction { .. } => codes::TRANSACTION_ERROR,
            SdkError::Account { .. } => codes::ACCOUNT_ERROR,
            SdkError::Validation(_) => codes::VALIDATION_ERROR,
            SdkError::Authentication(_) => codes::AUTHENTICATION_ERROR,
            SdkError::RateLimit { .. } => codes::RATE_LIMIT_ERROR,
            SdkError::InsufficientFunds { .. } => codes::INSUFFICIENT_FUNDS,
            SdkError::Timeout { .. } => codes::TIMEOUT_ERROR,
            SdkError::Serialization(_) => codes::SERIALIZATION_ERROR,
            SdkError::Operation { code, .. } => *code,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        SdkError::Validation(message.into())
    }

    pub fn account_not_found(account: &str) -> Self {
        SdkError::Account {
            message: format!("Account not found: {}", account),
            account: Some(account.to_string()),
        }
    }

    pub fn transaction_not_found(signature: &str) -> Self {
        SdkError::Transaction {
            message: format!("Transaction not found: {}", signature),
            signature: Some(signature.to_string()),
            details: None,
        }
    }

    /// Whether this is one of the typed kinds that managers pass through as-is.
    pub fn is_domain_error(&self) -> bool {
        !matches!(self, SdkError::Serialization(_))
    }

    /// Wrap untyped failures into a manager-specific kind; typed kinds pass through.
    pub fn into_operation(self, code: &'static str, context: &str) -> Self {
        if self.is_domain_error() {
            return self;
        }
        SdkError::Operation {
            code,
            message: format!("{}: {}", context, self),
            source: Box::new(self),
        }
    }

    /// The HTTP status attached to a network failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Network { status, .. } => *status,
            SdkError::RateLimit { .. } => Some(429),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

/// Result type alias for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;

/// Error body returned by the LicenseChain backend.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "error")]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn from_text(text: String) -> Self {
        Self {
            status: None,
            message: if text.is_empty() { None } else { Some(text) },
            details: None,
        }
    }

    /// Get the error message, preferring `message` over `details`.
    pub fn get_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.details.as_ref().map(|d| d.to_string()))
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(SdkError::validation("x").code(), "VALIDATION_ERROR");
        assert_eq!(SdkError::account_not_found("abc").code(), "ACCOUNT_ERROR");
        assert_eq!(SdkError::transaction_not_found("sig").code(), "TRANSACTION_ERROR");
        assert_eq!(
            SdkError::Timeout { timeout: Duration::from_millis(5) }.code(),
            "TIMEOUT_ERROR"
        );
        assert_eq!(SdkError::RateLimit { retry_after: None }.code(), "RATE_LIMIT_ERROR");
        assert_eq!(
            SdkError::InsufficientFunds { required: 2, available: 1 }.code(),
            "INSUFFICIENT_FUNDS"
        );
    }

    #[test]
    fn test_into_operation_wraps_serialization() {
        let err = SdkError::Serialization("bad body".into())
            .into_operation(codes::LICENSE_CREATE_ERROR, "Failed to create license");
        assert_eq!(err.code(), "LICENSE_CREATE_ERROR");
        match err {
            SdkError::Operation { source, .. } => {
                assert_eq!(source.code(), "SERIALIZATION_ERROR");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_into_operation_passes_typed_errors_through() {
        let err = SdkError::validation("mint is not a valid public key")
            .into_operation(codes::NFT_TRANSFER_ERROR, "Failed to transfer NFT");
        assert!(matches!(err, SdkError::Validation(_)));

        let err = SdkError::Network {
            message: "HTTP 500".into(),
            status: Some(500),
            source: None,
        }
        .into_operation(codes::ADD_LIQUIDITY_ERROR, "Failed to add liquidity");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.code(), "NETWORK_ERROR");
    }

    #[test]
    fn test_operation_source_chain() {
        use std::error::Error;
        let err = SdkError::Serialization("missing field `id`".into())
            .into_operation(codes::NFT_GET_ERROR, "Failed to get NFT");
        let source = err.source().expect("operation errors carry a source");
        assert!(source.to_string().contains("missing field"));
    }

    #[test]
    fn test_error_response_message_alias() {
        let resp: ErrorResponse = serde_json::from_str(r#"{"error": "license not found"}"#).unwrap();
        assert_eq!(resp.get_message(), "license not found");

        let resp = ErrorResponse::from_text(String::new());
        assert_eq!(resp.get_message(), "Unknown error");
    }
}
