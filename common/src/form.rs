//! Registration form controller.
//!
//! Owns the draft, the schema, the current error set and the submission flow.
//! Errors are recomputed after every mutation; whether an error is *shown*
//! depends on the field having been blurred or a submit having been
//! attempted. While a submission is in flight every mutation is ignored.

use std::collections::HashSet;

use log::debug;

use crate::model::registration::{Field, RegistrationDraft, RegistrationRecord, WardField};
use crate::submission::{SubmissionFlow, SubmissionPhase, SubmitBlocked};
use crate::validation::{FieldPath, RegistrationSchema, ValidationErrors};
use crate::wards::{WardDraft, WardId};

#[derive(Debug)]
pub struct RegistrationForm {
    draft: RegistrationDraft,
    schema: RegistrationSchema,
    errors: ValidationErrors,
    touched: HashSet<FieldPath>,
    submit_attempted: bool,
    flow: SubmissionFlow,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::with_schema(RegistrationSchema::new())
    }

    pub fn with_schema(schema: RegistrationSchema) -> Self {
        let draft = RegistrationDraft::new();
        let errors = schema.validate(&draft);
        Self {
            draft,
            schema,
            errors,
            touched: HashSet::new(),
            submit_attempted: false,
            flow: SubmissionFlow::new(),
        }
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.flow.phase()
    }

    /// Controls are disabled while this is true.
    pub fn is_locked(&self) -> bool {
        self.flow.is_submitting()
    }

    /// Every current error, shown or not.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// The message to render next to `path`, if any.
    pub fn visible_error(&self, path: &FieldPath) -> Option<&str> {
        match path {
            FieldPath::Form => self.flow.failure(),
            FieldPath::Wards if !self.submit_attempted => None,
            _ if self.submit_attempted || self.touched.contains(path) => self.errors.get(path),
            _ => None,
        }
    }

    pub fn set_field(&mut self, field: Field, value: String) -> bool {
        if self.is_locked() {
            return false;
        }
        let changed = self.draft.set_field(field, value);
        if changed {
            self.after_edit();
        }
        changed
    }

    pub fn set_ward_field(&mut self, id: WardId, field: WardField, value: String) -> bool {
        if self.is_locked() {
            return false;
        }
        match self.draft.wards.update(id, field, value) {
            Ok(changed) => {
                if changed {
                    self.after_edit();
                }
                changed
            }
            Err(err) => {
                debug!("ward update ignored: {err}");
                false
            }
        }
    }

    /// Marks a control as visited so its error becomes visible.
    pub fn blur(&mut self, path: FieldPath) -> bool {
        if self.is_locked() {
            return false;
        }
        self.touched.insert(path)
    }

    pub fn add_ward(&mut self) -> Option<WardId> {
        if self.is_locked() {
            return None;
        }
        let id = self.draft.wards.append(WardDraft::default());
        self.after_edit();
        Some(id)
    }

    /// Removes a ward row. Refusals (last row, unknown id, locked form) leave
    /// the form untouched and return `false`.
    pub fn remove_ward(&mut self, id: WardId) -> bool {
        if self.is_locked() {
            return false;
        }
        match self.draft.wards.remove_by_id(id) {
            Ok(_) => {
                self.touched
                    .retain(|path| !matches!(path, FieldPath::Ward { id: gone, .. } if *gone == id));
                self.after_edit();
                true
            }
            Err(err) => {
                debug!("ward removal refused: {err}");
                false
            }
        }
    }

    pub fn can_remove_ward(&self) -> bool {
        !self.is_locked() && self.draft.wards.can_remove()
    }

    /// Runs full validation and, when clean, enters `Submitting` and returns
    /// the record to hand to the collaborator.
    pub fn submit(&mut self) -> Result<RegistrationRecord, SubmitBlocked> {
        if self.is_locked() {
            return Err(SubmitBlocked::AlreadySubmitting);
        }
        self.submit_attempted = true;
        self.errors = self.schema.validate(&self.draft);
        let validated = if self.errors.is_empty() {
            self.schema.parse(&self.draft)
        } else {
            Err(self.errors.clone())
        };
        self.flow.begin(validated)
    }

    /// The collaborator accepted the record: reset to a fresh draft.
    pub fn submission_succeeded(&mut self) -> bool {
        if !self.flow.succeed() {
            return false;
        }
        self.draft = RegistrationDraft::new();
        self.touched.clear();
        self.submit_attempted = false;
        self.errors = self.schema.validate(&self.draft);
        true
    }

    /// The collaborator failed; its message shows at [`FieldPath::Form`].
    pub fn submission_failed(&mut self, message: impl Into<String>) -> bool {
        self.flow.fail(message)
    }

    fn after_edit(&mut self) {
        self.flow.edited();
        self.errors = self.schema.validate(&self.draft);
    }
}
