use serde::{Deserialize, Serialize};

/// The {experienced, fresh} classification that decides which steps and
/// which of the two experience metrics are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicantKind {
    Experienced,
    Fresh,
}

impl ApplicantKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicantKind::Experienced => "experienced",
            ApplicantKind::Fresh => "fresh",
        }
    }

    /// First step of this kind's active set: fresh applicants skip the
    /// references step entirely.
    pub fn starting_step(self) -> Step {
        match self {
            ApplicantKind::Experienced => Step::References,
            ApplicantKind::Fresh => Step::CandidateDetails,
        }
    }
}

/// Workflow steps, in fixed order. Which of them are active depends on the
/// applicant kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    References,
    CandidateDetails,
    RoleFit,
}

impl Step {
    /// Canonical 1-based index, independent of applicant kind.
    pub fn index(self) -> u8 {
        match self {
            Step::References => 1,
            Step::CandidateDetails => 2,
            Step::RoleFit => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Step> {
        match index {
            1 => Some(Step::References),
            2 => Some(Step::CandidateDetails),
            3 => Some(Step::RoleFit),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::References => "References",
            Step::CandidateDetails => "Candidate Details",
            Step::RoleFit => "Role Fit",
        }
    }

    /// Next step in the active set for `kind`, or None on the last step.
    pub fn next(self, kind: ApplicantKind) -> Option<Step> {
        match self {
            Step::References => match kind {
                ApplicantKind::Experienced => Some(Step::CandidateDetails),
                // Not part of the fresh set; normalize forward.
                ApplicantKind::Fresh => Some(Step::CandidateDetails),
            },
            Step::CandidateDetails => Some(Step::RoleFit),
            Step::RoleFit => None,
        }
    }

    /// Previous step in the active set for `kind`, or None on the first.
    pub fn previous(self, kind: ApplicantKind) -> Option<Step> {
        match self {
            Step::References => None,
            Step::CandidateDetails => match kind {
                ApplicantKind::Experienced => Some(Step::References),
                ApplicantKind::Fresh => None,
            },
            Step::RoleFit => Some(Step::CandidateDetails),
        }
    }

    /// Presentational number: fresh applicants never see the references
    /// step, so the remaining two are shown as 1 and 2.
    pub fn display_number(self, kind: ApplicantKind) -> u8 {
        match kind {
            ApplicantKind::Experienced => self.index(),
            ApplicantKind::Fresh => self.index().saturating_sub(1).max(1),
        }
    }
}

/// A file picked by the applicant. Never serialized into the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Every form field, keyed on the wire by the camelCase names the intake
/// service expects. The two attachment slots are skipped by serde, so a
/// persisted draft never carries file contents and rehydration always
/// leaves them empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormFields {
    pub reporting_manager_name: String,
    pub reporting_manager_title: String,
    pub reporting_manager_phone: String,
    pub reporting_manager_email: String,
    #[serde(rename = "reportingHRName")]
    pub reporting_hr_name: String,
    #[serde(rename = "reportingHRTitle")]
    pub reporting_hr_title: String,
    #[serde(rename = "reportingHREmail")]
    pub reporting_hr_email: String,
    #[serde(rename = "reportingHRPhone")]
    pub reporting_hr_phone: String,
    pub applying_role: String,
    #[serde(rename = "currentCTC")]
    pub current_ctc: String,
    pub expected_salary: String,
    pub linkedin_profile: String,
    pub total_experience: String,
    pub total_internships: String,
    pub role_specific_note: String,
    pub location_confirmation: String,
    pub schedule_confirmation: String,
    #[serde(skip)]
    pub resume: Option<Attachment>,
    #[serde(skip)]
    pub role_specific_file: Option<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experienced_set_walks_all_three_steps() {
        let kind = ApplicantKind::Experienced;
        assert_eq!(kind.starting_step(), Step::References);
        assert_eq!(Step::References.next(kind), Some(Step::CandidateDetails));
        assert_eq!(Step::CandidateDetails.next(kind), Some(Step::RoleFit));
        assert_eq!(Step::RoleFit.next(kind), None);
        assert_eq!(Step::CandidateDetails.previous(kind), Some(Step::References));
    }

    #[test]
    fn fresh_set_starts_at_candidate_details() {
        let kind = ApplicantKind::Fresh;
        assert_eq!(kind.starting_step(), Step::CandidateDetails);
        assert_eq!(Step::CandidateDetails.previous(kind), None);
        assert_eq!(Step::CandidateDetails.next(kind), Some(Step::RoleFit));
    }

    #[test]
    fn fresh_display_numbers_are_relabeled() {
        assert_eq!(Step::CandidateDetails.display_number(ApplicantKind::Fresh), 1);
        assert_eq!(Step::RoleFit.display_number(ApplicantKind::Fresh), 2);
        assert_eq!(Step::RoleFit.display_number(ApplicantKind::Experienced), 3);
    }

    #[test]
    fn attachments_are_never_serialized() {
        let fields = FormFields {
            applying_role: "Video Editor".to_string(),
            resume: Some(Attachment {
                file_name: "cv.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: vec![1, 2, 3],
            }),
            ..Default::default()
        };

        let json = serde_json::to_value(&fields).unwrap();
        assert!(json.get("resume").is_none());
        assert!(json.get("roleSpecificFile").is_none());
        assert_eq!(json["applyingRole"], "Video Editor");
        // Wire names with fixed capitalization survive the rename rules.
        assert!(json.get("reportingHRName").is_some());
        assert!(json.get("currentCTC").is_some());
    }
}
