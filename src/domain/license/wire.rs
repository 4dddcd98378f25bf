//! Wire types for license REST responses and request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LicenseMetadata;

// ─── Responses ───────────────────────────────────────────────────────────────

/// License as returned by the backend.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LicenseResponse {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub license_key: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<LicenseMetadata>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LicenseListResponse {
    pub licenses: Vec<LicenseResponse>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LicenseValidationResponse {
    pub valid: bool,
    #[serde(default)]
    pub license: Option<LicenseResponse>,
    #[serde(default)]
    pub reason: Option<String>,
}

// ─── Requests ────────────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateLicenseBody<'a> {
    pub user_id: &'a str,
    pub product_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub metadata: &'a LicenseMetadata,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLicenseBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a LicenseMetadata>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValidateLicenseBody<'a> {
    pub license_key: &'a str,
}

#[derive(Serialize, Debug, Clone)]
pub struct SuspendLicenseBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}
