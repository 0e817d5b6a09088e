//! Company profile payloads.
//!
//! Every save carries the full field set; absent fields are stored as `NULL`.

use crate::{
    domain::common::Timestamped,
    entities::prelude::{CompanyModel, CompanyStagingModel},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_aux::prelude::*;
use validator::Validate;

/// Editable company fields shared by staging and production.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[validate(length(max = 255, message = "name length must be <= 255"))]
    pub name: Option<String>,
    #[validate(length(max = 64, message = "registrationNumber length must be <= 64"))]
    pub registration_number: Option<String>,
    #[validate(length(max = 512, message = "address length must be <= 512"))]
    pub address: Option<String>,
    #[validate(length(max = 128, message = "country length must be <= 128"))]
    pub country: Option<String>,
    #[validate(length(max = 32, message = "postalCode length must be <= 32"))]
    pub postal_code: Option<String>,
    #[validate(length(max = 255, message = "email length must be <= 255"))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "contact length must be <= 255"))]
    pub contact: Option<String>,
    /// Opaque image reference. Upload URLs and data URIs are both accepted as-is.
    #[validate(length(max = 2097152, message = "logo length must be <= 2 MiB"))]
    pub logo: Option<String>,
    #[validate(length(max = 2097152, message = "banner length must be <= 2 MiB"))]
    pub banner: Option<String>,
}

impl From<&CompanyStagingModel> for CompanyProfile {
    fn from(m: &CompanyStagingModel) -> Self {
        Self {
            name: m.name.clone(),
            registration_number: m.registration_number.clone(),
            address: m.address.clone(),
            country: m.country.clone(),
            postal_code: m.postal_code.clone(),
            email: m.email.clone(),
            contact: m.contact.clone(),
            logo: m.logo.clone(),
            banner: m.banner.clone(),
        }
    }
}

impl From<&CompanyModel> for CompanyProfile {
    fn from(m: &CompanyModel) -> Self {
        Self {
            name: m.name.clone(),
            registration_number: m.registration_number.clone(),
            address: m.address.clone(),
            country: m.country.clone(),
            postal_code: m.postal_code.clone(),
            email: m.email.clone(),
            contact: m.contact.clone(),
            logo: m.logo.clone(),
            banner: m.banner.clone(),
        }
    }
}

/// Promotion request for the company draft.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PromoteCompany {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub staging_id: i32,
    #[validate(length(min = 1, max = 128, message = "reviewedBy length must be 1..=128"))]
    pub reviewed_by: String,
    /// Expected staging version. When present it must match the stored one.
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub version: Option<i32>,
}

/// Public logo lookup. Both fields are `null` until a profile is published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyLogo {
    pub logo: Option<String>,
    pub company_name: Option<String>,
}

impl From<Option<CompanyModel>> for CompanyLogo {
    fn from(m: Option<CompanyModel>) -> Self {
        match m {
            Some(m) => Self {
                logo: m.logo,
                company_name: m.name,
            },
            None => Self::default(),
        }
    }
}

impl Timestamped for CompanyModel {
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Timestamped for CompanyStagingModel {
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_none() {
        let p: CompanyProfile = serde_json::from_str(r#"{"name":"Acme"}"#).unwrap();
        assert_eq!(p.name.as_deref(), Some("Acme"));
        assert!(p.logo.is_none());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn image_references_are_capped() {
        let ok = CompanyProfile {
            logo: Some(format!("data:image/png;base64,{}", "A".repeat(1024))),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let oversized = CompanyProfile {
            banner: Some("A".repeat(2 * 1024 * 1024 + 1)),
            ..Default::default()
        };
        let errors = oversized.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("banner"));
    }

    #[test]
    fn promote_requires_reviewer() {
        let req: PromoteCompany =
            serde_json::from_str(r#"{"stagingId":"3","reviewedBy":""}"#).unwrap();
        assert_eq!(req.staging_id, 3);
        assert!(req.version.is_none());
        assert!(req.validate().is_err());
    }
}
