//! License domain: license records, status state machine, validation.

pub mod client;
mod convert;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Free-form metadata attached to a license.
pub type LicenseMetadata = HashMap<String, serde_json::Value>;

// ─── Status ──────────────────────────────────────────────────────────────────

/// License lifecycle status.
///
/// ```text
/// active ──► expired    (time-based)
/// active ──► suspended  (suspend)
/// active ──► inactive   (update)
/// suspended ──► active  (unsuspend)
/// ```
///
/// The backend is authoritative; the SDK only refuses transitions outside
/// this graph before making a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    Active,
    Inactive,
    Expired,
    Suspended,
}

impl LicenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseStatus::Active => "active",
            LicenseStatus::Inactive => "inactive",
            LicenseStatus::Expired => "expired",
            LicenseStatus::Suspended => "suspended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(LicenseStatus::Active),
            "inactive" => Some(LicenseStatus::Inactive),
            "expired" => Some(LicenseStatus::Expired),
            "suspended" => Some(LicenseStatus::Suspended),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: LicenseStatus) -> bool {
        matches!(
            (self, next),
            (LicenseStatus::Active, LicenseStatus::Expired)
                | (LicenseStatus::Active, LicenseStatus::Suspended)
                | (LicenseStatus::Active, LicenseStatus::Inactive)
                | (LicenseStatus::Suspended, LicenseStatus::Active)
        )
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── License ─────────────────────────────────────────────────────────────────

/// Point-in-time copy of a backend license.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub license_key: String,
    pub status: LicenseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub metadata: LicenseMetadata,
}

impl License {
    /// Past its expiry at `now`. Licenses without `expires_at` never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Status with time-based expiry applied to an `active` license.
    pub fn effective_status(&self, now: DateTime<Utc>) -> LicenseStatus {
        if self.status == LicenseStatus::Active && self.is_expired(now) {
            LicenseStatus::Expired
        } else {
            self.status
        }
    }
}

/// Result of validating a license key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseValidation {
    pub valid: bool,
    pub license: Option<License>,
    pub reason: Option<String>,
}

/// One page of licenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicensePage {
    pub licenses: Vec<License>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// Optional fields for [`create_license`](client::Licenses::create_license).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateLicenseOptions {
    pub expires_at: Option<DateTime<Utc>>,
    pub metadata: LicenseMetadata,
}

/// Fields to change on a license. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseUpdate {
    /// Only `inactive` is accepted; other changes have dedicated calls.
    pub status: Option<LicenseStatus>,
    pub expires_at: Option<DateTime<Utc>>,
    pub metadata: Option<LicenseMetadata>,
}

impl LicenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.expires_at.is_none() && self.metadata.is_none()
    }
}

/// Filters for [`list_licenses`](client::Licenses::list_licenses).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseFilter {
    pub user_id: Option<String>,
    pub product_id: Option<String>,
    pub status: Option<LicenseStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl LicenseFilter {
    pub(crate) fn query_string(&self) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(user_id) = &self.user_id {
            params.push(("userId", user_id.clone()));
        }
        if let Some(product_id) = &self.product_id {
            params.push(("productId", product_id.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }

        if params.is_empty() {
            return String::new();
        }
        let joined: Vec<String> = params
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
            .collect();
        format!("?{}", joined.join("&"))
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    MissingId,
    MissingLicenseKey,
    MissingUserId,
    MissingProductId,
    InvalidStatus(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingId => write!(f, "Missing id"),
            ValidationError::MissingLicenseKey => write!(f, "Missing licenseKey"),
            ValidationError::MissingUserId => write!(f, "Missing userId"),
            ValidationError::MissingProductId => write!(f, "Missing productId"),
            ValidationError::InvalidStatus(s) => write!(f, "Invalid status: {}", s),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn license(status: LicenseStatus, expires_at: Option<DateTime<Utc>>) -> License {
        License {
            id: "L1".to_string(),
            user_id: "u1".to_string(),
            product_id: "p1".to_string(),
            license_key: "K1".to_string(),
            status,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: None,
            expires_at,
            metadata: LicenseMetadata::new(),
        }
    }

    #[test]
    fn test_status_transitions() {
        use LicenseStatus::*;
        assert!(Active.can_transition_to(Expired));
        assert!(Active.can_transition_to(Suspended));
        assert!(Active.can_transition_to(Inactive));
        assert!(Suspended.can_transition_to(Active));

        assert!(!Suspended.can_transition_to(Inactive));
        assert!(!Expired.can_transition_to(Active));
        assert!(!Inactive.can_transition_to(Active));
        assert!(!Active.can_transition_to(Active));
    }

    #[test]
    fn test_status_round_trip_str() {
        for s in ["active", "inactive", "expired", "suspended"] {
            assert_eq!(LicenseStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(LicenseStatus::parse("Active").is_none());
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let expired = license(LicenseStatus::Active, Some(now - Duration::days(1)));
        assert!(expired.is_expired(now));
        assert_eq!(expired.effective_status(now), LicenseStatus::Expired);

        let valid = license(LicenseStatus::Active, Some(now + Duration::days(1)));
        assert_eq!(valid.effective_status(now), LicenseStatus::Active);

        let perpetual = license(LicenseStatus::Active, None);
        assert!(!perpetual.is_expired(now));

        // A suspended license keeps its explicit status even past expiry.
        let suspended = license(LicenseStatus::Suspended, Some(now - Duration::days(1)));
        assert_eq!(suspended.effective_status(now), LicenseStatus::Suspended);
    }

    #[test]
    fn test_filter_query_string() {
        assert_eq!(LicenseFilter::default().query_string(), "");
        let filter = LicenseFilter {
            user_id: Some("user 1".to_string()),
            status: Some(LicenseStatus::Suspended),
            page: Some(2),
            limit: Some(50),
            ..Default::default()
        };
        assert_eq!(
            filter.query_string(),
            "?userId=user%201&status=suspended&page=2&limit=50"
        );
    }
}
