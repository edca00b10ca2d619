use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// The {experienced, fresh} classification. The server only enforces the
/// enum constraint; which fields go with which kind is a client contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicantType {
    Experienced,
    Fresh,
}

impl ApplicantType {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicantType::Experienced => "experienced",
            ApplicantType::Fresh => "fresh",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "experienced" => Some(ApplicantType::Experienced),
            "fresh" => Some(ApplicantType::Fresh),
            _ => None,
        }
    }
}

/// Yes/no answer to a role-fit question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confirmation {
    Yes,
    No,
}

impl Confirmation {
    pub fn as_str(self) -> &'static str {
        match self {
            Confirmation::Yes => "yes",
            Confirmation::No => "no",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "yes" => Some(Confirmation::Yes),
            "no" => Some(Confirmation::No),
            _ => None,
        }
    }
}

/// Insert payload for one application: the submission's text fields verbatim
/// plus the resolved object-store keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub applicant_type: ApplicantType,
    pub reporting_manager_name: Option<String>,
    pub reporting_manager_title: Option<String>,
    pub reporting_manager_phone: Option<String>,
    pub reporting_manager_email: Option<String>,
    pub reporting_hr_name: Option<String>,
    pub reporting_hr_title: Option<String>,
    pub reporting_hr_email: Option<String>,
    pub reporting_hr_phone: Option<String>,
    pub applying_role: String,
    pub current_ctc: Option<String>,
    pub expected_salary: Option<String>,
    pub linkedin_profile: String,
    pub total_experience: Option<String>,
    pub total_internships: Option<String>,
    pub role_specific_note: String,
    pub resume_path: String,
    pub role_specific_file_path: Option<String>,
    pub location_confirmation: Confirmation,
    pub schedule_confirmation: Confirmation,
}

impl NewApplication {
    /// Builds the insert payload from the multipart text fields (wire names
    /// are camelCase) and the storage paths resolved by the uploads.
    /// Enforces only schema-level constraints: required-field presence and
    /// the two enum domains.
    pub fn from_fields(
        fields: &BTreeMap<String, String>,
        resume_path: String,
        role_specific_file_path: Option<String>,
    ) -> Result<Self, AppError> {
        let applicant_type = ApplicantType::parse(&required(fields, "applicantType")?)
            .ok_or_else(|| invalid("applicantType", "'experienced' or 'fresh'"))?;
        let location_confirmation = Confirmation::parse(&required(fields, "locationConfirmation")?)
            .ok_or_else(|| invalid("locationConfirmation", "'yes' or 'no'"))?;
        let schedule_confirmation = Confirmation::parse(&required(fields, "scheduleConfirmation")?)
            .ok_or_else(|| invalid("scheduleConfirmation", "'yes' or 'no'"))?;

        Ok(NewApplication {
            applicant_type,
            reporting_manager_name: optional(fields, "reportingManagerName"),
            reporting_manager_title: optional(fields, "reportingManagerTitle"),
            reporting_manager_phone: optional(fields, "reportingManagerPhone"),
            reporting_manager_email: optional(fields, "reportingManagerEmail"),
            reporting_hr_name: optional(fields, "reportingHRName"),
            reporting_hr_title: optional(fields, "reportingHRTitle"),
            reporting_hr_email: optional(fields, "reportingHREmail"),
            reporting_hr_phone: optional(fields, "reportingHRPhone"),
            applying_role: required(fields, "applyingRole")?,
            current_ctc: optional(fields, "currentCTC"),
            expected_salary: optional(fields, "expectedSalary"),
            linkedin_profile: required(fields, "linkedinProfile")?,
            total_experience: optional(fields, "totalExperience"),
            total_internships: optional(fields, "totalInternships"),
            role_specific_note: required(fields, "roleSpecificNote")?,
            resume_path,
            role_specific_file_path,
            location_confirmation,
            schedule_confirmation,
        })
    }
}

fn required(fields: &BTreeMap<String, String>, name: &str) -> Result<String, AppError> {
    fields
        .get(name)
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn optional(fields: &BTreeMap<String, String>, name: &str) -> Option<String> {
    fields.get(name).filter(|v| !v.is_empty()).cloned()
}

fn invalid(name: &str, expected: &str) -> AppError {
    AppError::Validation(format!("{name} must be {expected}"))
}

/// Persisted application row. Created exactly once per successful
/// submission; read back only to resolve the resume's signed URL.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub applicant_type: String,
    pub reporting_manager_name: Option<String>,
    pub reporting_manager_title: Option<String>,
    pub reporting_manager_phone: Option<String>,
    pub reporting_manager_email: Option<String>,
    pub reporting_hr_name: Option<String>,
    pub reporting_hr_title: Option<String>,
    pub reporting_hr_email: Option<String>,
    pub reporting_hr_phone: Option<String>,
    pub applying_role: String,
    pub current_ctc: Option<String>,
    pub expected_salary: Option<String>,
    pub linkedin_profile: String,
    pub total_experience: Option<String>,
    pub total_internships: Option<String>,
    pub role_specific_note: String,
    pub resume_path: String,
    pub role_specific_file_path: Option<String>,
    pub location_confirmation: String,
    pub schedule_confirmation: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
