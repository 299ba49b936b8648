//! Submission state machine.
//!
//! ```text
//! Editing --submit(valid)--> Submitting --succeed--> Success
//!    ^  \--submit(invalid)--> Editing (errors shown)
//!    |                            |
//!    +--------- fail -------------+
//! ```
//!
//! `Submitting` is only entered with a validated record; while in it the form
//! is locked.

use log::debug;

use crate::model::registration::RegistrationRecord;
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Editing,
    Submitting,
    Success,
}

/// Why a submit attempt did not enter `Submitting`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("the form has {} validation error(s)", .0.len())]
    Invalid(ValidationErrors),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFlow {
    phase: SubmissionPhase,
    failure: Option<String>,
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// Message of the last collaborator failure, cleared by the next edit or
    /// attempt.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Takes the outcome of a full validation run and enters `Submitting`
    /// only when it produced a record.
    pub fn begin(
        &mut self,
        validated: Result<RegistrationRecord, ValidationErrors>,
    ) -> Result<RegistrationRecord, SubmitBlocked> {
        if self.is_submitting() {
            return Err(SubmitBlocked::AlreadySubmitting);
        }
        self.failure = None;
        match validated {
            Ok(record) => {
                debug!("submission started for staff {}", record.staff_id);
                self.phase = SubmissionPhase::Submitting;
                Ok(record)
            }
            Err(errors) => {
                debug!("submission blocked by {} validation error(s)", errors.len());
                self.phase = SubmissionPhase::Editing;
                Err(SubmitBlocked::Invalid(errors))
            }
        }
    }

    /// The collaborator accepted the record.
    pub fn succeed(&mut self) -> bool {
        if !self.is_submitting() {
            return false;
        }
        self.phase = SubmissionPhase::Success;
        true
    }

    /// The collaborator failed; back to editing with its message.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if !self.is_submitting() {
            return false;
        }
        let message = message.into();
        debug!("submission failed: {message}");
        self.phase = SubmissionPhase::Editing;
        self.failure = Some(message);
        true
    }

    /// Any edit after a success starts a new editing session, and any edit
    /// after a failure dismisses its message.
    pub fn edited(&mut self) {
        self.failure = None;
        if self.phase == SubmissionPhase::Success {
            self.phase = SubmissionPhase::Editing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::registration::StaffCategory;
    use crate::validation::FieldPath;

    fn record() -> RegistrationRecord {
        RegistrationRecord {
            staff_id: "sp/1234".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            phone_number: "08031234567".into(),
            staff_category: StaffCategory::Police,
            staff_address: "123 staff road".into(),
            department: "law".into(),
            relationship_status: "single".into(),
            email: None,
            image_url: None,
            wards: Vec::new(),
        }
    }

    #[test]
    fn invalid_data_never_enters_submitting() {
        let mut flow = SubmissionFlow::new();
        let mut errors = ValidationErrors::new();
        errors.insert(FieldPath::Wards, "At least one ward is required.");

        let blocked = flow.begin(Err(errors.clone())).unwrap_err();

        assert_eq!(blocked, SubmitBlocked::Invalid(errors));
        assert_eq!(flow.phase(), SubmissionPhase::Editing);
    }

    #[test]
    fn success_path() {
        let mut flow = SubmissionFlow::new();
        assert_eq!(flow.begin(Ok(record())), Ok(record()));
        assert!(flow.is_submitting());

        assert!(flow.succeed());
        assert_eq!(flow.phase(), SubmissionPhase::Success);

        flow.edited();
        assert_eq!(flow.phase(), SubmissionPhase::Editing);
    }

    #[test]
    fn duplicate_submit_is_blocked() {
        let mut flow = SubmissionFlow::new();
        flow.begin(Ok(record())).unwrap();
        assert_eq!(flow.begin(Ok(record())), Err(SubmitBlocked::AlreadySubmitting));
        assert!(flow.is_submitting());
    }

    #[test]
    fn failure_returns_to_editing_with_message() {
        let mut flow = SubmissionFlow::new();
        flow.begin(Ok(record())).unwrap();

        assert!(flow.fail("server unavailable"));
        assert_eq!(flow.phase(), SubmissionPhase::Editing);
        assert_eq!(flow.failure(), Some("server unavailable"));

        flow.begin(Ok(record())).unwrap();
        assert_eq!(flow.failure(), None);
    }

    #[test]
    fn edit_dismisses_failure() {
        let mut flow = SubmissionFlow::new();
        flow.begin(Ok(record())).unwrap();
        flow.fail("server unavailable");

        flow.edited();

        assert_eq!(flow.failure(), None);
        assert_eq!(flow.phase(), SubmissionPhase::Editing);
    }

    #[test]
    fn completion_outside_submitting_is_ignored() {
        let mut flow = SubmissionFlow::new();
        assert!(!flow.succeed());
        assert!(!flow.fail("late"));
        assert_eq!(flow.phase(), SubmissionPhase::Editing);
        assert_eq!(flow.failure(), None);
    }
}
