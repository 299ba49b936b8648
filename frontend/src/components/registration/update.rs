//! Update function for the registration form component.
//!
//! Elm-style: receives the component state, the `Context` and a `Msg`,
//! mutates the state and returns whether the view must re-render. Form
//! mutations are delegated to `common::form::RegistrationForm`, which ignores
//! them while a submission is in flight.

use common::submission::SubmitBlocked;
use gloo_console::{error, log};
use gloo_file::ObjectUrl;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::{show_toast, submit_registration};
use super::messages::Msg;
use super::state::RegistrationFormComponent;

/// Central update function for the component.
pub fn update(
    component: &mut RegistrationFormComponent,
    ctx: &Context<RegistrationFormComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::UpdateField(field, value) => component.form.set_field(field, value),
        Msg::BlurField(path) => component.form.blur(path),
        Msg::UpdateWard(id, field, value) => component.form.set_ward_field(id, field, value),
        Msg::AddWard => component.form.add_ward().is_some(),
        Msg::RemoveWard(id) => component.form.remove_ward(id),
        Msg::OpenFileDialog => {
            if !component.is_locked() {
                if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                    input.click();
                }
            }
            false
        }
        Msg::ImageSelected(file) => {
            if component.is_locked() {
                return false;
            }
            if !file.type_().starts_with("image/") {
                show_toast("Please choose an image file.");
                return false;
            }
            let name = file.name();
            component.image.select(file, name, |file| {
                ObjectUrl::from(gloo_file::File::from(file.clone()))
            });
            true
        }
        Msg::ClearImage => {
            if component.is_locked() {
                return false;
            }
            // Reset the input so picking the same file again fires `change`.
            if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.set_value("");
            }
            component.image.clear()
        }
        Msg::Submit => match component.form.submit() {
            Ok(record) => {
                let props = ctx.props();
                let image = component.image.file().cloned();
                let submit_url = props.submit_url.clone();
                let image_upload_url = props.image_upload_url.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match submit_registration(record, image, &submit_url, &image_upload_url).await
                    {
                        Ok(record) => link.send_message(Msg::SubmitSucceeded(record)),
                        Err(message) => link.send_message(Msg::SubmitFailed(message)),
                    }
                });
                true
            }
            Err(SubmitBlocked::AlreadySubmitting) => false,
            Err(SubmitBlocked::Invalid(errors)) => {
                log!(format!("submit blocked by {} validation error(s)", errors.len()));
                true
            }
        },
        Msg::SubmitSucceeded(record) => {
            if component.form.submission_succeeded() {
                component.image.clear();
                if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                    input.set_value("");
                }
                if let Some(on_submitted) = &ctx.props().on_submitted {
                    on_submitted.emit(record);
                }
                show_toast("Registration saved.");
            }
            true
        }
        Msg::SubmitFailed(message) => {
            error!(format!("registration failed: {}", message));
            component.form.submission_failed(message)
        }
    }
}
