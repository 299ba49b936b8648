//! Defines the properties for the `RegistrationFormComponent`.
//!
//! The form owns all of its state; parents only choose where validated
//! records and images are sent and may listen for accepted registrations.

use common::model::registration::RegistrationRecord;
use yew::prelude::*;

/// Properties for the `RegistrationFormComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct RegistrationFormProps {
    /// Endpoint receiving the validated `RegistrationRecord` as JSON.
    #[prop_or(AttrValue::Static("/api/registrations"))]
    pub submit_url: AttrValue,

    /// Endpoint resolving the selected photo to an `image_url`. Only called
    /// when a photo is selected at submit time.
    #[prop_or(AttrValue::Static("/api/images"))]
    pub image_upload_url: AttrValue,

    /// Invoked with the record once the backend has accepted it.
    #[prop_or_default]
    pub on_submitted: Option<Callback<RegistrationRecord>>,
}
