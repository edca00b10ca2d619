use tracing::warn;

use crate::ack;
use crate::client::SubmissionClient;
use crate::draft::{Draft, DraftStore};
use crate::fields::{ApplicantKind, Attachment, FormFields, Step};
use crate::submission::Submission;
use crate::validation::{validate_step, ValidationErrors};

/// Whether the server actually confirmed the submission. The
/// acknowledgement shown to the applicant is identical either way; this is
/// the reconciliation hook for callers that want stronger guarantees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Confirmed { id: String },
    Unconfirmed,
}

/// Terminal result of a submission attempt.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub acknowledgement: String,
    pub delivery: Delivery,
}

/// Multi-step form workflow: navigation, per-step validation, draft
/// autosave on every mutation, and the final one-shot submission.
///
/// States are the three steps plus a terminal submitted state. The active
/// step set depends on the applicant kind: experienced applicants walk
/// References → Candidate Details → Role Fit, fresh applicants skip
/// References.
pub struct FormEngine<S: DraftStore> {
    store: S,
    fields: FormFields,
    step: Step,
    kind: ApplicantKind,
    errors: ValidationErrors,
    submitted: bool,
}

impl<S: DraftStore> FormEngine<S> {
    /// Starts a workflow, rehydrating a persisted draft if one exists.
    /// Attachment slots are always empty after rehydration; malformed
    /// stored data is discarded by the store and the workflow starts
    /// fresh.
    pub fn new(store: S) -> Self {
        let (fields, step, kind) = match store.load() {
            Some(draft) => {
                let kind = draft.kind();
                let step = draft.step();
                (draft.form_data, step, kind)
            }
            None => {
                let kind = ApplicantKind::Experienced;
                (FormFields::default(), kind.starting_step(), kind)
            }
        };

        Self {
            store,
            fields,
            step,
            kind,
            errors: ValidationErrors::new(),
            submitted: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn kind(&self) -> ApplicantKind {
        self.kind
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Prompt describing what the role-specific note should contain for
    /// the currently selected role.
    pub fn role_prompt(&self) -> &'static str {
        ack::role_prompt(&self.fields.applying_role)
    }

    /// Sets a text field by its wire name, clears that field's error, and
    /// autosaves the draft. Returns false for an unknown field name.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            "reportingManagerName" => &mut self.fields.reporting_manager_name,
            "reportingManagerTitle" => &mut self.fields.reporting_manager_title,
            "reportingManagerPhone" => &mut self.fields.reporting_manager_phone,
            "reportingManagerEmail" => &mut self.fields.reporting_manager_email,
            "reportingHRName" => &mut self.fields.reporting_hr_name,
            "reportingHRTitle" => &mut self.fields.reporting_hr_title,
            "reportingHREmail" => &mut self.fields.reporting_hr_email,
            "reportingHRPhone" => &mut self.fields.reporting_hr_phone,
            "applyingRole" => &mut self.fields.applying_role,
            "currentCTC" => &mut self.fields.current_ctc,
            "expectedSalary" => &mut self.fields.expected_salary,
            "linkedinProfile" => &mut self.fields.linkedin_profile,
            "totalExperience" => &mut self.fields.total_experience,
            "totalInternships" => &mut self.fields.total_internships,
            "roleSpecificNote" => &mut self.fields.role_specific_note,
            "locationConfirmation" => &mut self.fields.location_confirmation,
            "scheduleConfirmation" => &mut self.fields.schedule_confirmation,
            _ => return false,
        };
        *slot = value.to_string();
        self.errors.remove(name);
        self.save_draft();
        true
    }

    pub fn attach_resume(&mut self, file: Attachment) {
        self.fields.resume = Some(file);
        self.errors.remove("resume");
        self.save_draft();
    }

    pub fn attach_role_file(&mut self, file: Attachment) {
        self.fields.role_specific_file = Some(file);
        self.errors.remove("roleSpecificFile");
        self.save_draft();
    }

    pub fn remove_role_file(&mut self) {
        self.fields.role_specific_file = None;
        self.save_draft();
    }

    /// Validates the current step. On success moves to the next step in
    /// the active set; on failure stays put with exactly the violated
    /// fields in the error map.
    pub fn advance(&mut self) -> bool {
        let errors = validate_step(self.step, self.kind, &self.fields);
        let ok = errors.is_empty();
        self.errors = errors;
        if ok {
            if let Some(next) = self.step.next(self.kind) {
                self.step = next;
                self.save_draft();
            }
        }
        ok
    }

    /// Unconditional move to the previous step in the active set. Does not
    /// re-validate and leaves the error map untouched.
    pub fn retreat(&mut self) {
        if let Some(previous) = self.step.previous(self.kind) {
            self.step = previous;
            self.save_draft();
        }
    }

    /// Switches the applicant kind: resets the error map and re-seeds the
    /// starting step for the new kind. Entered field values are kept.
    pub fn switch_kind(&mut self, kind: ApplicantKind) {
        self.kind = kind;
        self.errors.clear();
        self.step = kind.starting_step();
        self.save_draft();
    }

    /// Final-step submission. Re-validates the last step and assembles the
    /// payload; if either fails, the engine stays on the last step with
    /// the violated field flagged and nothing is sent.
    ///
    /// Once a payload goes out, the portal's deliberate policy applies:
    /// the draft is cleared and the workflow terminates in the submitted
    /// state whether or not transport succeeded. `delivery` records what
    /// actually happened.
    pub async fn submit(&mut self, client: &SubmissionClient) -> Option<SubmitOutcome> {
        // Only reachable from the last step, and only once per workflow.
        if self.submitted || self.step != Step::RoleFit {
            return None;
        }

        let errors = validate_step(Step::RoleFit, self.kind, &self.fields);
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }

        let submission = match Submission::assemble(self.kind, &self.fields) {
            Ok(submission) => submission,
            Err(e) => {
                self.errors.insert("resume", "Main resume is required");
                warn!("Submission refused before transport: {e}");
                return None;
            }
        };

        let delivery = match client.send(&submission).await {
            Ok(response) => Delivery::Confirmed { id: response.id },
            Err(e) => {
                warn!("Submission transport failed; acknowledging anyway: {e}");
                Delivery::Unconfirmed
            }
        };

        let acknowledgement = ack::acknowledgement_message(&self.fields.applying_role);
        if delivery != Delivery::Unconfirmed {
            client.spawn_acknowledgement_review(&self.fields.applying_role, &acknowledgement);
        }

        if let Err(e) = self.store.clear() {
            warn!("Failed to clear draft after submission: {e}");
        }
        self.submitted = true;
        self.errors.clear();

        Some(SubmitOutcome {
            acknowledgement,
            delivery,
        })
    }

    /// Re-opens the workflow for another submission: keeps entered values,
    /// re-seeds the starting step for the current kind.
    pub fn start_over(&mut self) {
        self.submitted = false;
        self.step = self.kind.starting_step();
        self.save_draft();
    }

    fn save_draft(&self) {
        if self.submitted {
            return;
        }
        let draft = Draft {
            form_data: self.fields.clone(),
            current_step: self.step.index(),
            is_fresh_applicant: self.kind == ApplicantKind::Fresh,
        };
        if let Err(e) = self.store.save(&draft) {
            warn!("Failed to persist draft: {e}");
        }
    }
}
