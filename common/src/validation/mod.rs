//! Field validation engine.
//!
//! The schema is a rule table: every field maps to an ordered list of
//! [`Rule`]s evaluated first-failing-wins, so a non-empty value that is too
//! short reports the length message rather than the required one. The ward
//! list has its own list-level rule, checked independently from the rules of
//! each row.
//!
//! Validation is a pure computation over a [`RegistrationDraft`]: it never
//! mutates the draft and always yields the same [`ValidationErrors`] for the
//! same input.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::registration::{
    Field, RegistrationDraft, RegistrationRecord, Relationship, StaffCategory, WardEntry,
    WardField,
};
use crate::wards::{WardDraft, WardId, WardList};

mod phone;
mod rules;

pub use phone::{MobilePhonePatterns, PhoneNumberCheck};
pub use rules::{FieldRules, Rule};

pub const WARDS_REQUIRED_MESSAGE: &str = "At least one ward is required.";

const STAFF_ID: FieldRules = FieldRules::required(&[Rule::MinLength {
    min: 4,
    message: "id must be at least 4 characters",
}]);

const FIRST_NAME: FieldRules = FieldRules::required(&[
    Rule::Required {
        message: "First name is required.",
    },
    Rule::MinLength {
        min: 3,
        message: "First name must be at least 3 characters",
    },
]);

const LAST_NAME: FieldRules = FieldRules::required(&[
    Rule::Required {
        message: "Last name is required.",
    },
    Rule::MinLength {
        min: 3,
        message: "Last name must be at least 3 characters",
    },
]);

const PHONE_NUMBER: FieldRules = FieldRules::required(&[Rule::MobilePhone {
    message: "Invalid phone number",
}]);

const STAFF_CATEGORY: FieldRules = FieldRules::required(&[Rule::OneOf {
    allowed: &["academic", "non_academic", "police"],
    message: "You need to select a category type.",
}]);

const STAFF_ADDRESS: FieldRules = FieldRules::required(&[
    Rule::Required {
        message: "Staff address is required.",
    },
    Rule::MinLength {
        min: 3,
        message: "Staff address must be at least 3 characters",
    },
]);

const DEPARTMENT: FieldRules = FieldRules::required(&[
    Rule::Required {
        message: "Department is required.",
    },
    Rule::MinLength {
        min: 3,
        message: "Department must be at least 3 characters",
    },
]);

const RELATIONSHIP_STATUS: FieldRules = FieldRules::required(&[
    Rule::Required {
        message: "Relationship status is required.",
    },
    Rule::MinLength {
        min: 3,
        message: "Relationship status must be at least 3 characters",
    },
]);

const EMAIL: FieldRules = FieldRules::optional(&[Rule::Email {
    message: "Invalid email address",
}]);

const WARD_NAME: FieldRules = FieldRules::required(&[
    Rule::Required {
        message: "Ward name is required.",
    },
    Rule::MinLength {
        min: 3,
        message: "Ward name must be at least 3 characters",
    },
]);

const WARD_RELATIONSHIP: FieldRules = FieldRules::required(&[
    Rule::Required {
        message: "Relationship is required.",
    },
    Rule::OneOf {
        allowed: &["Daughter", "Son", "Other"],
        message: "Relationship must be Daughter, Son or Other",
    },
]);

/// Where an error is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Field(Field),
    Ward { id: WardId, field: WardField },
    /// The ward collection as a whole.
    Wards,
    /// Failure reported by the submission collaborator.
    Form,
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Field(field) => f.write_str(field.as_str()),
            FieldPath::Ward { id, field } => write!(f, "wards[{}].{}", id, field.as_str()),
            FieldPath::Wards => f.write_str("wards"),
            FieldPath::Form => f.write_str("form"),
        }
    }
}

/// Error messages keyed by path. An absent path is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FieldPath, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn insert(&mut self, path: FieldPath, message: impl Into<String>) {
        self.errors.insert(path, message.into());
    }

    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        self.get(&FieldPath::Field(field))
    }

    pub fn ward(&self, id: WardId, field: WardField) -> Option<&str> {
        self.get(&FieldPath::Ward { id, field })
    }

    pub fn wards(&self) -> Option<&str> {
        self.get(&FieldPath::Wards)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.errors.iter().map(|(path, message)| (path, message.as_str()))
    }

    /// Wire form of the errors: ward paths are rewritten to the current row
    /// index of `wards` (`wards.0.name`). Paths of rows no longer in the list
    /// are dropped.
    pub fn by_index(&self, wards: &WardList) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .filter_map(|(path, message)| {
                let key = match path {
                    FieldPath::Ward { id, field } => {
                        format!("wards.{}.{}", wards.position(*id)?, field.as_str())
                    }
                    other => other.to_string(),
                };
                Some((key, message.clone()))
            })
            .collect()
    }
}

/// The registration schema: the rule table plus the phone collaborator.
pub struct RegistrationSchema {
    phone: Box<dyn PhoneNumberCheck>,
}

impl Default for RegistrationSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RegistrationSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationSchema").finish_non_exhaustive()
    }
}

impl RegistrationSchema {
    pub fn new() -> Self {
        Self::with_phone_check(MobilePhonePatterns)
    }

    pub fn with_phone_check(check: impl PhoneNumberCheck + 'static) -> Self {
        Self {
            phone: Box::new(check),
        }
    }

    pub fn rules_for(field: Field) -> &'static FieldRules {
        match field {
            Field::StaffId => &STAFF_ID,
            Field::FirstName => &FIRST_NAME,
            Field::LastName => &LAST_NAME,
            Field::PhoneNumber => &PHONE_NUMBER,
            Field::StaffCategory => &STAFF_CATEGORY,
            Field::StaffAddress => &STAFF_ADDRESS,
            Field::Department => &DEPARTMENT,
            Field::RelationshipStatus => &RELATIONSHIP_STATUS,
            Field::Email => &EMAIL,
        }
    }

    pub fn ward_rules_for(field: WardField) -> &'static FieldRules {
        match field {
            WardField::Name => &WARD_NAME,
            WardField::Relationship => &WARD_RELATIONSHIP,
        }
    }

    pub fn validate_field(&self, field: Field, value: &str) -> Option<&'static str> {
        Self::rules_for(field).check(value, self.phone.as_ref())
    }

    pub fn validate_ward(&self, ward: &WardDraft) -> Vec<(WardField, &'static str)> {
        [WardField::Name, WardField::Relationship]
            .into_iter()
            .filter_map(|field| {
                Self::ward_rules_for(field)
                    .check(ward.field(field), self.phone.as_ref())
                    .map(|message| (field, message))
            })
            .collect()
    }

    /// List-level rule: the collection must hold at least one ward, whatever
    /// the state of its rows.
    pub fn validate_ward_list(&self, wards: &WardList) -> Option<&'static str> {
        wards.is_empty().then_some(WARDS_REQUIRED_MESSAGE)
    }

    /// Validates every field, every ward row and the ward list.
    pub fn validate(&self, draft: &RegistrationDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for field in Field::ALL {
            if let Some(message) = self.validate_field(field, draft.field(field)) {
                errors.insert(FieldPath::Field(field), message);
            }
        }

        for row in draft.wards.iter() {
            for (field, message) in self.validate_ward(&row.entry) {
                errors.insert(FieldPath::Ward { id: row.id, field }, message);
            }
        }

        if let Some(message) = self.validate_ward_list(&draft.wards) {
            errors.insert(FieldPath::Wards, message);
        }

        errors
    }

    /// Validates `draft` and, when it is clean, builds the typed record.
    pub fn parse(&self, draft: &RegistrationDraft) -> Result<RegistrationRecord, ValidationErrors> {
        let errors = self.validate(draft);
        if !errors.is_empty() {
            return Err(errors);
        }

        let staff_category = StaffCategory::from_value(&draft.staff_category).ok_or_else(|| {
            single_error(FieldPath::Field(Field::StaffCategory), STAFF_CATEGORY)
        })?;

        let wards = draft
            .wards
            .iter()
            .map(|row| {
                let relationship = Relationship::from_value(&row.entry.relationship)
                    .ok_or_else(|| {
                        single_error(
                            FieldPath::Ward {
                                id: row.id,
                                field: WardField::Relationship,
                            },
                            WARD_RELATIONSHIP,
                        )
                    })?;
                Ok(WardEntry {
                    name: row.entry.name.clone(),
                    relationship,
                })
            })
            .collect::<Result<Vec<_>, ValidationErrors>>()?;

        Ok(RegistrationRecord {
            staff_id: draft.staff_id.clone(),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            phone_number: draft.phone_number.clone(),
            staff_category,
            staff_address: draft.staff_address.clone(),
            department: draft.department.clone(),
            relationship_status: draft.relationship_status.clone(),
            email: (!draft.email.is_empty()).then(|| draft.email.clone()),
            image_url: draft.image_url.clone(),
            wards,
        })
    }
}

// Only reachable if the enum sets and the `OneOf` tables drift apart.
fn single_error(path: FieldPath, rules: FieldRules) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let message = rules.rules.last().map(Rule::message).unwrap_or_default();
    errors.insert(path, message);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> RegistrationDraft {
        let mut draft = RegistrationDraft::empty();
        draft.staff_id = "sp/1234".into();
        draft.first_name = "John".into();
        draft.last_name = "Doe".into();
        draft.phone_number = "08031234567".into();
        draft.staff_category = "academic".into();
        draft.staff_address = "123 staff road".into();
        draft.department = "law".into();
        draft.relationship_status = "married".into();
        draft.wards.append(WardDraft {
            name: "Amy".into(),
            relationship: "Daughter".into(),
        });
        draft
    }

    #[test]
    fn valid_draft_has_no_errors() {
        let schema = RegistrationSchema::new();
        assert!(schema.validate(&valid_draft()).is_empty());
    }

    #[test]
    fn short_non_empty_values_report_length_message() {
        let schema = RegistrationSchema::new();
        let cases = [
            (Field::FirstName, "First name must be at least 3 characters"),
            (Field::LastName, "Last name must be at least 3 characters"),
            (Field::StaffAddress, "Staff address must be at least 3 characters"),
            (Field::Department, "Department must be at least 3 characters"),
            (
                Field::RelationshipStatus,
                "Relationship status must be at least 3 characters",
            ),
        ];
        for (field, expected) in cases {
            for value in ["a", "ab"] {
                assert_eq!(schema.validate_field(field, value), Some(expected));
            }
        }
        assert_eq!(
            schema.validate_field(Field::FirstName, ""),
            Some("First name is required.")
        );
    }

    #[test]
    fn staff_id_needs_four_characters() {
        let schema = RegistrationSchema::new();
        assert_eq!(
            schema.validate_field(Field::StaffId, ""),
            Some("id must be at least 4 characters")
        );
        assert_eq!(
            schema.validate_field(Field::StaffId, "abc"),
            Some("id must be at least 4 characters")
        );
        assert_eq!(schema.validate_field(Field::StaffId, "abcd"), None);
    }

    #[test]
    fn staff_category_must_be_one_of_the_set() {
        let schema = RegistrationSchema::new();
        assert_eq!(
            schema.validate_field(Field::StaffCategory, ""),
            Some("You need to select a category type.")
        );
        assert!(schema.validate_field(Field::StaffCategory, "Police").is_some());
        for category in ["academic", "non_academic", "police"] {
            assert_eq!(schema.validate_field(Field::StaffCategory, category), None);
        }
    }

    #[test]
    fn phone_check_is_delegated() {
        let schema = RegistrationSchema::with_phone_check(|value: &str| value == "42");
        assert_eq!(schema.validate_field(Field::PhoneNumber, "42"), None);
        assert_eq!(
            schema.validate_field(Field::PhoneNumber, "08031234567"),
            Some("Invalid phone number")
        );
    }

    #[test]
    fn email_is_optional_but_checked_when_present() {
        let schema = RegistrationSchema::new();
        assert_eq!(schema.validate_field(Field::Email, ""), None);
        assert_eq!(schema.validate_field(Field::Email, "john@uni.edu.ng"), None);
        assert_eq!(
            schema.validate_field(Field::Email, "john@"),
            Some("Invalid email address")
        );
    }

    #[test]
    fn errors_are_per_field() {
        let schema = RegistrationSchema::new();
        let mut draft = valid_draft();
        draft.first_name = "Jo".into();

        let errors = schema.validate(&draft);

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.field(Field::FirstName),
            Some("First name must be at least 3 characters")
        );
        assert_eq!(errors.field(Field::StaffId), None);
    }

    #[test]
    fn empty_ward_list_fails_at_list_level() {
        let schema = RegistrationSchema::new();
        let mut draft = valid_draft();
        draft.wards = WardList::new();

        let errors = schema.validate(&draft);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.wards(), Some(WARDS_REQUIRED_MESSAGE));
    }

    #[test]
    fn ward_rows_are_validated_independently() {
        let schema = RegistrationSchema::new();
        let mut draft = valid_draft();
        let bad = draft.wards.append(WardDraft {
            name: "Al".into(),
            relationship: String::new(),
        });

        let errors = schema.validate(&draft);

        assert_eq!(errors.wards(), None);
        assert_eq!(
            errors.ward(bad, WardField::Name),
            Some("Ward name must be at least 3 characters")
        );
        assert_eq!(
            errors.ward(bad, WardField::Relationship),
            Some("Relationship is required.")
        );
        let good = draft.wards.get(0).unwrap().id;
        assert_eq!(errors.ward(good, WardField::Name), None);
    }

    #[test]
    fn wire_keys_use_current_row_index() {
        let schema = RegistrationSchema::new();
        let mut draft = valid_draft();
        draft.first_name = String::new();
        draft.wards.append(WardDraft::default());

        let map = schema.validate(&draft).by_index(&draft.wards);

        assert_eq!(map.get("first_name").map(String::as_str), Some("First name is required."));
        assert_eq!(
            map.get("wards.1.name").map(String::as_str),
            Some("Ward name is required.")
        );
        assert!(!map.contains_key("wards.0.name"));
    }

    #[test]
    fn parse_builds_typed_record() {
        let schema = RegistrationSchema::new();
        let mut draft = valid_draft();
        draft.email = "john@uni.edu.ng".into();

        let record = schema.parse(&draft).unwrap();

        assert_eq!(record.staff_category, StaffCategory::Academic);
        assert_eq!(record.email.as_deref(), Some("john@uni.edu.ng"));
        assert_eq!(
            record.wards,
            vec![WardEntry {
                name: "Amy".into(),
                relationship: Relationship::Daughter,
            }]
        );
    }

    #[test]
    fn parse_maps_empty_email_to_none_and_round_trips() {
        let schema = RegistrationSchema::new();
        let record = schema.parse(&valid_draft()).unwrap();
        assert_eq!(record.email, None);

        let again = schema.parse(&RegistrationDraft::from(&record)).unwrap();
        assert_eq!(again, record);
    }

    #[test]
    fn parse_rejects_invalid_draft() {
        let schema = RegistrationSchema::new();
        let errors = schema.parse(&RegistrationDraft::new()).unwrap_err();
        assert!(errors.field(Field::StaffId).is_some());
        assert_eq!(errors.wards(), None);
    }
}
