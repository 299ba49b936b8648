use serde::{Deserialize, Serialize};

use crate::wards::{WardDraft, WardList};

/// Staff category offered by the category select.
///
/// Serialized as `academic`, `non_academic` or `police`, which are also the
/// option values rendered by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffCategory {
    Academic,
    NonAcademic,
    Police,
}

impl StaffCategory {
    pub const ALL: [StaffCategory; 3] = [
        StaffCategory::Academic,
        StaffCategory::NonAcademic,
        StaffCategory::Police,
    ];

    /// Option value / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffCategory::Academic => "academic",
            StaffCategory::NonAcademic => "non_academic",
            StaffCategory::Police => "police",
        }
    }

    /// Human readable label for the select.
    pub fn label(&self) -> &'static str {
        match self {
            StaffCategory::Academic => "Academic Staff",
            StaffCategory::NonAcademic => "Non-academic Staff",
            StaffCategory::Police => "Police",
        }
    }

    /// Parses an option value. The empty string is never a category.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Relationship of a ward to the staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    Daughter,
    Son,
    Other,
}

impl Relationship {
    pub const ALL: [Relationship; 3] = [
        Relationship::Daughter,
        Relationship::Son,
        Relationship::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Daughter => "Daughter",
            Relationship::Son => "Son",
            Relationship::Other => "Other",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

/// Options for the relationship status select. The field itself is a free
/// string on the record, only its length is validated.
pub const RELATIONSHIP_STATUS_OPTIONS: [(&str, &str); 3] = [
    ("single", "Single"),
    ("married", "Married"),
    ("divorced", "Divorced"),
];

/// A single validated dependent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardEntry {
    pub name: String,
    pub relationship: Relationship,
}

/// The validated value object handed to the submission collaborator.
///
/// Only produced by [`crate::validation::RegistrationSchema::parse`] on the
/// client; the backend deserializes it from JSON and validates it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub staff_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub staff_category: StaffCategory,
    pub staff_address: String,
    pub department: String,
    pub relationship_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub wards: Vec<WardEntry>,
}

/// Identifies one scalar text control of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    StaffId,
    FirstName,
    LastName,
    PhoneNumber,
    StaffCategory,
    StaffAddress,
    Department,
    RelationshipStatus,
    Email,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::StaffId,
        Field::FirstName,
        Field::LastName,
        Field::PhoneNumber,
        Field::StaffCategory,
        Field::StaffAddress,
        Field::Department,
        Field::RelationshipStatus,
        Field::Email,
    ];

    /// Record field name, also used as the DOM id of the control.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::StaffId => "staff_id",
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::PhoneNumber => "phone_number",
            Field::StaffCategory => "staff_category",
            Field::StaffAddress => "staff_address",
            Field::Department => "department",
            Field::RelationshipStatus => "relationship_status",
            Field::Email => "email",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::StaffId => "SP/AP Number",
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::PhoneNumber => "Phone Number",
            Field::StaffCategory => "Staff Category",
            Field::StaffAddress => "Staff Address",
            Field::Department => "Department",
            Field::RelationshipStatus => "Relationship Status",
            Field::Email => "Email",
        }
    }
}

/// Field of a ward row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WardField {
    Name,
    Relationship,
}

impl WardField {
    pub fn as_str(&self) -> &'static str {
        match self {
            WardField::Name => "name",
            WardField::Relationship => "relationship",
        }
    }
}

/// Raw, unvalidated form state. Every control holds a string, so an unset
/// select is simply `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub staff_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub staff_category: String,
    pub staff_address: String,
    pub department: String,
    pub relationship_status: String,
    pub email: String,
    pub image_url: Option<String>,
    pub wards: WardList,
}

impl RegistrationDraft {
    /// Blank draft with a single blank ward, the state the form mounts with.
    pub fn new() -> Self {
        Self {
            wards: WardList::seeded(),
            ..Self::empty()
        }
    }

    /// Blank draft without any ward.
    pub fn empty() -> Self {
        Self {
            staff_id: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone_number: String::new(),
            staff_category: String::new(),
            staff_address: String::new(),
            department: String::new(),
            relationship_status: String::new(),
            email: String::new(),
            image_url: None,
            wards: WardList::new(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::StaffId => &self.staff_id,
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::PhoneNumber => &self.phone_number,
            Field::StaffCategory => &self.staff_category,
            Field::StaffAddress => &self.staff_address,
            Field::Department => &self.department,
            Field::RelationshipStatus => &self.relationship_status,
            Field::Email => &self.email,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::StaffId => &mut self.staff_id,
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::PhoneNumber => &mut self.phone_number,
            Field::StaffCategory => &mut self.staff_category,
            Field::StaffAddress => &mut self.staff_address,
            Field::Department => &mut self.department,
            Field::RelationshipStatus => &mut self.relationship_status,
            Field::Email => &mut self.email,
        }
    }

    /// Stores `value` and reports whether it differed from the previous one.
    pub fn set_field(&mut self, field: Field, value: String) -> bool {
        let slot = self.field_mut(field);
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }
}

impl Default for RegistrationDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&RegistrationRecord> for RegistrationDraft {
    fn from(record: &RegistrationRecord) -> Self {
        let mut wards = WardList::new();
        for ward in &record.wards {
            wards.append(WardDraft {
                name: ward.name.clone(),
                relationship: ward.relationship.as_str().to_string(),
            });
        }

        Self {
            staff_id: record.staff_id.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            phone_number: record.phone_number.clone(),
            staff_category: record.staff_category.as_str().to_string(),
            staff_address: record.staff_address.clone(),
            department: record.department.clone(),
            relationship_status: record.relationship_status.clone(),
            email: record.email.clone().unwrap_or_default(),
            image_url: record.image_url.clone(),
            wards,
        }
    }
}
