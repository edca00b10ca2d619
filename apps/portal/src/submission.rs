use thiserror::Error;

use crate::fields::{ApplicantKind, Attachment, FormFields};

/// Exactly one of the two mutually exclusive experience metrics, keyed by
/// applicant kind so the exclusivity is structural rather than a field
/// convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperienceMetric {
    Experienced { total_experience: String },
    Fresh { total_internships: String },
}

impl ExperienceMetric {
    /// Wire name and value of the one field this metric contributes.
    pub fn wire_field(&self) -> (&'static str, &str) {
        match self {
            ExperienceMetric::Experienced { total_experience } => {
                ("totalExperience", total_experience)
            }
            ExperienceMetric::Fresh { total_internships } => {
                ("totalInternships", total_internships)
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    #[error("Main resume is required")]
    MissingResume,
}

/// The finalized payload, built once at the end of the workflow and sent
/// exactly once. Assembly fails before any network involvement if the
/// mandatory resume is missing.
#[derive(Debug, Clone)]
pub struct Submission {
    pub applicant_type: ApplicantKind,
    pub reporting_manager_name: String,
    pub reporting_manager_title: String,
    pub reporting_manager_phone: String,
    pub reporting_manager_email: String,
    pub reporting_hr_name: String,
    pub reporting_hr_title: String,
    pub reporting_hr_email: String,
    pub reporting_hr_phone: String,
    pub applying_role: String,
    pub current_ctc: String,
    pub expected_salary: String,
    pub linkedin_profile: String,
    pub experience: ExperienceMetric,
    pub role_specific_note: String,
    pub location_confirmation: String,
    pub schedule_confirmation: String,
    pub resume: Attachment,
    pub role_specific_file: Option<Attachment>,
}

impl Submission {
    pub fn assemble(kind: ApplicantKind, fields: &FormFields) -> Result<Self, AssembleError> {
        let resume = fields.resume.clone().ok_or(AssembleError::MissingResume)?;

        let experience = match kind {
            ApplicantKind::Experienced => ExperienceMetric::Experienced {
                total_experience: fields.total_experience.clone(),
            },
            ApplicantKind::Fresh => ExperienceMetric::Fresh {
                total_internships: fields.total_internships.clone(),
            },
        };

        Ok(Submission {
            applicant_type: kind,
            reporting_manager_name: fields.reporting_manager_name.clone(),
            reporting_manager_title: fields.reporting_manager_title.clone(),
            reporting_manager_phone: fields.reporting_manager_phone.clone(),
            reporting_manager_email: fields.reporting_manager_email.clone(),
            reporting_hr_name: fields.reporting_hr_name.clone(),
            reporting_hr_title: fields.reporting_hr_title.clone(),
            reporting_hr_email: fields.reporting_hr_email.clone(),
            reporting_hr_phone: fields.reporting_hr_phone.clone(),
            applying_role: fields.applying_role.clone(),
            current_ctc: fields.current_ctc.clone(),
            expected_salary: fields.expected_salary.clone(),
            linkedin_profile: fields.linkedin_profile.clone(),
            experience,
            role_specific_note: fields.role_specific_note.clone(),
            location_confirmation: fields.location_confirmation.clone(),
            schedule_confirmation: fields.schedule_confirmation.clone(),
            resume,
            role_specific_file: fields.role_specific_file.clone(),
        })
    }

    /// Text fields in wire order. The kind-inapplicable experience field is
    /// never present, and attachments are carried separately.
    pub fn text_fields(&self) -> Vec<(&'static str, &str)> {
        let mut out = vec![
            ("applicantType", self.applicant_type.as_str()),
            ("reportingManagerName", self.reporting_manager_name.as_str()),
            ("reportingManagerTitle", self.reporting_manager_title.as_str()),
            ("reportingManagerPhone", self.reporting_manager_phone.as_str()),
            ("reportingManagerEmail", self.reporting_manager_email.as_str()),
            ("reportingHRName", self.reporting_hr_name.as_str()),
            ("reportingHRTitle", self.reporting_hr_title.as_str()),
            ("reportingHREmail", self.reporting_hr_email.as_str()),
            ("reportingHRPhone", self.reporting_hr_phone.as_str()),
            ("applyingRole", self.applying_role.as_str()),
            ("currentCTC", self.current_ctc.as_str()),
            ("expectedSalary", self.expected_salary.as_str()),
            ("linkedinProfile", self.linkedin_profile.as_str()),
        ];
        out.push(self.experience.wire_field());
        out.push(("roleSpecificNote", self.role_specific_note.as_str()));
        out.push(("locationConfirmation", self.location_confirmation.as_str()));
        out.push(("scheduleConfirmation", self.schedule_confirmation.as_str()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields_with_resume() -> FormFields {
        FormFields {
            applying_role: "Graphic Designer".to_string(),
            total_experience: "3 Years".to_string(),
            total_internships: "6 Months".to_string(),
            resume: Some(Attachment {
                file_name: "cv.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: b"%PDF".to_vec(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn assembly_without_resume_is_refused() {
        let fields = FormFields::default();
        assert!(matches!(
            Submission::assemble(ApplicantKind::Fresh, &fields),
            Err(AssembleError::MissingResume)
        ));
    }

    #[test]
    fn experience_metric_follows_kind_even_when_both_fields_are_set() {
        let fields = fields_with_resume();

        let fresh = Submission::assemble(ApplicantKind::Fresh, &fields).unwrap();
        assert_eq!(fresh.experience.wire_field(), ("totalInternships", "6 Months"));

        let experienced = Submission::assemble(ApplicantKind::Experienced, &fields).unwrap();
        assert_eq!(
            experienced.experience.wire_field(),
            ("totalExperience", "3 Years")
        );
    }

    #[test]
    fn wire_fields_carry_exactly_one_experience_entry() {
        let submission = Submission::assemble(ApplicantKind::Fresh, &fields_with_resume()).unwrap();
        let names: Vec<&str> = submission.text_fields().iter().map(|(n, _)| *n).collect();

        assert!(names.contains(&"totalInternships"));
        assert!(!names.contains(&"totalExperience"));
        assert_eq!(names.len(), 17);
    }

    #[test]
    fn assembly_leaves_the_form_fields_intact() {
        // assemble clones the attachment rather than draining the form, so
        // the fields remain intact for a retry after a transport failure.
        let fields = fields_with_resume();
        let _ = Submission::assemble(ApplicantKind::Fresh, &fields).unwrap();
        assert!(fields.resume.is_some());
    }
}
