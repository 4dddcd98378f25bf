//! HTTP transport layer: `LicenseChainHttp` shared by the RPC passthroughs and every manager.

pub mod client;

pub use client::{LicenseChainHttp, RPC_PARSE_ERROR};
