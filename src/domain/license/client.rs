//! Licenses sub-client: create, query, update, suspend, revoke.

use crate::client::LicenseChainClient;
use crate::domain::finish;
use crate::domain::license::wire;
use crate::domain::license::{
    CreateLicenseOptions, License, LicenseFilter, LicensePage, LicenseStatus, LicenseUpdate,
    LicenseValidation,
};
use crate::error::{codes, SdkError, SdkResult};
use crate::http::client::segment;
use crate::shared::validation::require_non_empty;

/// Sub-client for license operations.
pub struct Licenses<'a> {
    pub(crate) client: &'a LicenseChainClient,
}

impl<'a> Licenses<'a> {
    /// Create a license for `user_id` on `product_id`.
    pub async fn create_license(
        &self,
        user_id: &str,
        product_id: &str,
        options: CreateLicenseOptions,
    ) -> SdkResult<License> {
        require_non_empty(user_id, "user_id")?;
        require_non_empty(product_id, "product_id")?;

        let body = wire::CreateLicenseBody {
            user_id,
            product_id,
            expires_at: options.expires_at,
            metadata: &options.metadata,
        };
        let resp = self.client.http.post::<wire::LicenseResponse, _>("/licenses", &body).await;
        finish(resp, "license", codes::LICENSE_CREATE_ERROR, "Failed to create license")
    }

    pub async fn get_license(&self, license_id: &str) -> SdkResult<License> {
        require_non_empty(license_id, "license_id")?;
        let path = format!("/licenses/{}", segment(license_id));
        let resp = self.client.http.get::<wire::LicenseResponse>(&path).await;
        finish(resp, "license", codes::LICENSE_GET_ERROR, "Failed to get license")
    }

    /// Apply `update`. A status change is limited to `inactive`; suspension
    /// and reactivation go through [`suspend_license`](Self::suspend_license)
    /// and [`unsuspend_license`](Self::unsuspend_license).
    pub async fn update_license(&self, license_id: &str, update: LicenseUpdate) -> SdkResult<License> {
        require_non_empty(license_id, "license_id")?;
        if update.is_empty() {
            return Err(SdkError::validation("update has no fields to change"));
        }
        if let Some(status) = update.status {
            if status != LicenseStatus::Inactive {
                return Err(SdkError::validation(format!(
                    "update_license can only set status to inactive, got {}",
                    status
                )));
            }
        }

        let body = wire::UpdateLicenseBody {
            status: update.status.map(|s| s.as_str()),
            expires_at: update.expires_at,
            metadata: update.metadata.as_ref(),
        };
        let path = format!("/licenses/{}", segment(license_id));
        let resp = self.client.http.put::<wire::LicenseResponse, _>(&path, &body).await;
        finish(resp, "license", codes::LICENSE_UPDATE_ERROR, "Failed to update license")
    }

    /// Permanently revoke (delete) a license.
    pub async fn revoke_license(&self, license_id: &str) -> SdkResult<()> {
        require_non_empty(license_id, "license_id")?;
        let path = format!("/licenses/{}", segment(license_id));
        self.client
            .http
            .delete_no_content(&path)
            .await
            .map_err(|e| e.into_operation(codes::LICENSE_REVOKE_ERROR, "Failed to revoke license"))
    }

    pub async fn list_licenses(&self, filter: &LicenseFilter) -> SdkResult<LicensePage> {
        if filter.limit == Some(0) {
            return Err(SdkError::validation("limit must be greater than zero"));
        }
        let path = format!("/licenses{}", filter.query_string());
        let resp = self.client.http.get::<wire::LicenseListResponse>(&path).await;
        finish(resp, "license list", codes::LICENSE_LIST_ERROR, "Failed to list licenses")
    }

    /// Check a license key with the backend.
    pub async fn validate_license(&self, license_key: &str) -> SdkResult<LicenseValidation> {
        require_non_empty(license_key, "license_key")?;
        let body = wire::ValidateLicenseBody { license_key };
        let resp = self
            .client
            .http
            .post::<wire::LicenseValidationResponse, _>("/licenses/validate", &body)
            .await;
        finish(resp, "license validation", codes::LICENSE_VALIDATE_ERROR, "Failed to validate license")
    }

    pub async fn suspend_license(&self, license_id: &str, reason: Option<&str>) -> SdkResult<License> {
        require_non_empty(license_id, "license_id")?;
        let path = format!("/licenses/{}/suspend", segment(license_id));
        let body = wire::SuspendLicenseBody { reason };
        let resp = self.client.http.post::<wire::LicenseResponse, _>(&path, &body).await;
        finish(resp, "license", codes::LICENSE_SUSPEND_ERROR, "Failed to suspend license")
    }

    pub async fn unsuspend_license(&self, license_id: &str) -> SdkResult<License> {
        require_non_empty(license_id, "license_id")?;
        let path = format!("/licenses/{}/unsuspend", segment(license_id));
        let resp = self
            .client
            .http
            .post::<wire::LicenseResponse, _>(&path, &serde_json::json!({}))
            .await;
        finish(resp, "license", codes::LICENSE_UNSUSPEND_ERROR, "Failed to unsuspend license")
    }

    /// Move `license` to `target`, refusing transitions outside the local
    /// state machine before any call is made. Expiry is time-based and cannot
    /// be requested.
    pub async fn transition_license(&self, license: &License, target: LicenseStatus) -> SdkResult<License> {
        let current = license.effective_status(chrono::Utc::now());
        if !current.can_transition_to(target) {
            return Err(SdkError::validation(format!(
                "license {} cannot move from {} to {}",
                license.id, current, target
            )));
        }

        match target {
            LicenseStatus::Suspended => self.suspend_license(&license.id, None).await,
            LicenseStatus::Active => self.unsuspend_license(&license.id).await,
            LicenseStatus::Inactive => {
                let update = LicenseUpdate {
                    status: Some(LicenseStatus::Inactive),
                    ..Default::default()
                };
                self.update_license(&license.id, update).await
            }
            LicenseStatus::Expired => Err(SdkError::validation(
                "expiry is time-based and cannot be requested",
            )),
        }
    }
}
