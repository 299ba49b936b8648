//! Component state for the registration form.
//!
//! The validation/state model lives in `common::form::RegistrationForm`; this
//! struct adds the browser-only pieces: the selected photo with its object URL
//! and the reference to the hidden file input.

use common::form::RegistrationForm;
use common::image::ImageSelection;
use gloo_file::ObjectUrl;
use yew::prelude::*;

/// Main state container for the `RegistrationFormComponent`.
pub struct RegistrationFormComponent {
    /// Draft, errors and submission phase.
    pub form: RegistrationForm,

    /// Selected profile photo. Dropping the `ObjectUrl` revokes it, so the
    /// preview URL is released on replace, clear and unmount.
    pub image: ImageSelection<web_sys::File, ObjectUrl>,

    /// Reference to the hidden `<input type="file">`.
    pub file_input_ref: NodeRef,
}

impl RegistrationFormComponent {
    /// Fresh form with one blank ward and no photo.
    pub fn new() -> Self {
        Self {
            form: RegistrationForm::new(),
            image: ImageSelection::new(),
            file_input_ref: NodeRef::default(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.form.is_locked()
    }
}
