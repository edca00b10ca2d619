use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::fields::{ApplicantKind, FormFields, Step};

/// Field name → human-readable message. A field absent from the map is
/// valid. Keys are the wire names, so they line up with the multipart
/// payload and the server's vocabulary.
pub type ValidationErrors = BTreeMap<&'static str, &'static str>;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$").expect("url pattern")
});

/// Digits with optional separators in 3-3-4..6 grouping, optional leading +.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$").expect("phone pattern")
});

/// Validates one step's fields for the given applicant kind. Pure: looks
/// only at the requested step, touches nothing, and recomputes the full
/// map on every call.
pub fn validate_step(step: Step, kind: ApplicantKind, fields: &FormFields) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match step {
        Step::References => {
            // The references step only exists for experienced applicants.
            if kind == ApplicantKind::Experienced {
                if fields.reporting_manager_name.is_empty() {
                    errors.insert("reportingManagerName", "Full name is required");
                }
                if fields.reporting_manager_title.is_empty() {
                    errors.insert("reportingManagerTitle", "Designation is required");
                }
                if !PHONE_RE.is_match(&fields.reporting_manager_phone) {
                    errors.insert("reportingManagerPhone", "Valid phone number is required");
                }
                if !EMAIL_RE.is_match(&fields.reporting_manager_email) {
                    errors.insert("reportingManagerEmail", "Valid email is required");
                }
                if fields.reporting_hr_name.is_empty() {
                    errors.insert("reportingHRName", "HR contact name is required");
                }
                if fields.reporting_hr_title.is_empty() {
                    errors.insert("reportingHRTitle", "HR title is required");
                }
                if !EMAIL_RE.is_match(&fields.reporting_hr_email) {
                    errors.insert("reportingHREmail", "Valid HR email is required");
                }
                if !PHONE_RE.is_match(&fields.reporting_hr_phone) {
                    errors.insert("reportingHRPhone", "Valid HR phone is required");
                }
            }
        }
        Step::CandidateDetails => {
            if fields.applying_role.is_empty() {
                errors.insert("applyingRole", "Role selection is required");
            }
            if fields.current_ctc.is_empty() {
                errors.insert("currentCTC", "Current compensation is required");
            }
            if fields.expected_salary.is_empty() {
                errors.insert("expectedSalary", "Salary expectation is required");
            }
            if fields.resume.is_none() {
                errors.insert("resume", "Main resume is required");
            }
            if !URL_RE.is_match(&fields.linkedin_profile) {
                errors.insert("linkedinProfile", "Valid LinkedIn URL is required");
            }
            if fields.role_specific_note.is_empty() {
                errors.insert(
                    "roleSpecificNote",
                    "Additional role-specific information is required",
                );
            }
            // Exactly one of the two experience metrics applies per kind.
            match kind {
                ApplicantKind::Fresh => {
                    if fields.total_internships.is_empty() {
                        errors.insert("totalInternships", "Please select internship duration");
                    }
                }
                ApplicantKind::Experienced => {
                    if fields.total_experience.is_empty() {
                        errors.insert("totalExperience", "Work experience is required");
                    }
                }
            }
        }
        Step::RoleFit => {
            if !is_yes_no(&fields.location_confirmation) {
                errors.insert("locationConfirmation", "Selection required");
            }
            if !is_yes_no(&fields.schedule_confirmation) {
                errors.insert("scheduleConfirmation", "Selection required");
            }
        }
    }

    errors
}

fn is_yes_no(value: &str) -> bool {
    matches!(value, "yes" | "no")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Attachment;

    fn pdf() -> Attachment {
        Attachment {
            file_name: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF".to_vec(),
        }
    }

    fn valid_references() -> FormFields {
        FormFields {
            reporting_manager_name: "A. Manager".to_string(),
            reporting_manager_title: "Head of Marketing".to_string(),
            reporting_manager_phone: "+919876543210".to_string(),
            reporting_manager_email: "manager@company.com".to_string(),
            reporting_hr_name: "H. Partner".to_string(),
            reporting_hr_title: "People Operations Lead".to_string(),
            reporting_hr_email: "hr@company.com".to_string(),
            reporting_hr_phone: "040 123 4567".to_string(),
            ..Default::default()
        }
    }

    fn valid_candidate_details(kind: ApplicantKind) -> FormFields {
        let mut fields = FormFields {
            applying_role: "Full-Stack Developer".to_string(),
            current_ctc: "₹12,00,000 p.a.".to_string(),
            expected_salary: "₹15,00,000 p.a.".to_string(),
            linkedin_profile: "linkedin.com/in/sample".to_string(),
            role_specific_note: "github.com/sample".to_string(),
            resume: Some(pdf()),
            ..Default::default()
        };
        match kind {
            ApplicantKind::Fresh => fields.total_internships = "6 Months".to_string(),
            ApplicantKind::Experienced => fields.total_experience = "4 Years".to_string(),
        }
        fields
    }

    #[test]
    fn valid_references_step_produces_no_errors() {
        let errors = validate_step(
            Step::References,
            ApplicantKind::Experienced,
            &valid_references(),
        );
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn references_step_is_vacuous_for_fresh_applicants() {
        let errors = validate_step(Step::References, ApplicantKind::Fresh, &FormFields::default());
        assert!(errors.is_empty());
    }

    #[test]
    fn invalid_manager_email_is_flagged_by_field_name() {
        let mut fields = valid_references();
        fields.reporting_manager_email = "not-an-email".to_string();

        let errors = validate_step(Step::References, ApplicantKind::Experienced, &fields);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["reportingManagerEmail"], "Valid email is required");
    }

    #[test]
    fn phone_grouping_is_enforced() {
        let mut fields = valid_references();
        fields.reporting_manager_phone = "12".to_string();

        let errors = validate_step(Step::References, ApplicantKind::Experienced, &fields);
        assert!(errors.contains_key("reportingManagerPhone"));

        fields.reporting_manager_phone = "(123) 456-7890".to_string();
        let errors = validate_step(Step::References, ApplicantKind::Experienced, &fields);
        assert!(!errors.contains_key("reportingManagerPhone"));
    }

    #[test]
    fn empty_candidate_details_flags_every_required_field() {
        let errors = validate_step(
            Step::CandidateDetails,
            ApplicantKind::Fresh,
            &FormFields::default(),
        );
        for field in [
            "applyingRole",
            "currentCTC",
            "expectedSalary",
            "resume",
            "linkedinProfile",
            "roleSpecificNote",
            "totalInternships",
        ] {
            assert!(errors.contains_key(field), "{field} should be flagged");
        }
        assert!(!errors.contains_key("totalExperience"));
    }

    #[test]
    fn experience_metric_requirement_follows_kind() {
        let experienced = validate_step(
            Step::CandidateDetails,
            ApplicantKind::Experienced,
            &FormFields::default(),
        );
        assert!(experienced.contains_key("totalExperience"));
        assert!(!experienced.contains_key("totalInternships"));
    }

    #[test]
    fn missing_resume_is_the_only_error_on_an_otherwise_valid_step() {
        let mut fields = valid_candidate_details(ApplicantKind::Fresh);
        fields.resume = None;

        let errors = validate_step(Step::CandidateDetails, ApplicantKind::Fresh, &fields);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["resume"], "Main resume is required");
    }

    #[test]
    fn linkedin_url_without_scheme_is_accepted() {
        let fields = valid_candidate_details(ApplicantKind::Fresh);
        let errors = validate_step(Step::CandidateDetails, ApplicantKind::Fresh, &fields);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn role_fit_answers_must_be_yes_or_no() {
        let mut fields = FormFields {
            location_confirmation: "yes".to_string(),
            schedule_confirmation: "maybe".to_string(),
            ..Default::default()
        };

        let errors = validate_step(Step::RoleFit, ApplicantKind::Experienced, &fields);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("scheduleConfirmation"));

        fields.schedule_confirmation = "no".to_string();
        let errors = validate_step(Step::RoleFit, ApplicantKind::Experienced, &fields);
        assert!(errors.is_empty());
    }
}
