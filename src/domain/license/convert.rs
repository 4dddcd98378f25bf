//! Conversion: LicenseResponse → License (TryFrom + validation).

use super::wire;
use super::{License, LicensePage, LicenseStatus, LicenseValidation, ValidationError};

fn required(value: Option<String>, err: ValidationError) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(err),
    }
}

impl TryFrom<wire::LicenseResponse> for License {
    type Error = ValidationError;

    fn try_from(source: wire::LicenseResponse) -> Result<Self, Self::Error> {
        if source.id.trim().is_empty() {
            return Err(ValidationError::MissingId);
        }
        let status = LicenseStatus::parse(&source.status)
            .ok_or_else(|| ValidationError::InvalidStatus(source.status.clone()))?;

        Ok(Self {
            license_key: required(source.license_key, ValidationError::MissingLicenseKey)?,
            user_id: required(source.user_id, ValidationError::MissingUserId)?,
            product_id: required(source.product_id, ValidationError::MissingProductId)?,
            id: source.id,
            status,
            created_at: source.created_at,
            updated_at: source.updated_at,
            expires_at: source.expires_at,
            metadata: source.metadata.unwrap_or_default(),
        })
    }
}

impl TryFrom<wire::LicenseListResponse> for LicensePage {
    type Error = ValidationError;

    fn try_from(source: wire::LicenseListResponse) -> Result<Self, Self::Error> {
        let licenses = source
            .licenses
            .into_iter()
            .map(License::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let count = licenses.len() as u32;
        Ok(Self {
            total: source.total.unwrap_or(licenses.len() as u64),
            page: source.page.unwrap_or(1),
            limit: source.limit.unwrap_or(count),
            licenses,
        })
    }
}

impl TryFrom<wire::LicenseValidationResponse> for LicenseValidation {
    type Error = ValidationError;

    fn try_from(source: wire::LicenseValidationResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            valid: source.valid,
            license: source.license.map(License::try_from).transpose()?,
            reason: source.reason,
        })
    }
}
