use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /api/images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub image_url: String,
}

/// Body of a successful `POST /api/registrations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationCreated {
    pub id: String,
}

/// Error body returned by every backend endpoint.
///
/// `fields` is only populated for validation failures and maps a field path
/// (`first_name`, `wards.0.name`, `wards`) to its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}
