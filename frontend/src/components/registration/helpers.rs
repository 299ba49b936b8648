//! Utility functions for the registration form component.
//!
//! - **Event values**: reading the current value out of input/select events.
//! - **Submission**: the async hand-off to the backend (optional photo upload
//!   first, then the JSON record).
//! - **User feedback**: temporary toast notifications.

use common::model::api::{ApiErrorBody, ImageUploadResponse, RegistrationCreated};
use common::model::registration::RegistrationRecord;
use gloo_console::log;
use gloo_net::http::{Request, Response};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Current value of the `<input>` that fired `e`.
pub fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

/// Current value of the `<select>` that fired `e`.
pub fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

/// Hands a validated record to the backend.
///
/// When `image` is set it is uploaded first and the returned URL is stored
/// in `record.image_url`. Any failure is turned into the message shown
/// inline at the top of the form.
pub async fn submit_registration(
    mut record: RegistrationRecord,
    image: Option<web_sys::File>,
    submit_url: &str,
    image_upload_url: &str,
) -> Result<RegistrationRecord, String> {
    if let Some(file) = image {
        record.image_url = Some(upload_image(image_upload_url, &file).await?);
    }

    let response = Request::post(submit_url)
        .json(&record)
        .map_err(|e| format!("Could not encode the registration: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Could not reach the registration service: {}", e))?;

    if !response.ok() {
        return Err(read_error(response).await);
    }

    let created = response
        .json::<RegistrationCreated>()
        .await
        .map_err(|e| format!("Unexpected reply from the registration service: {}", e))?;
    log!(format!("registration {} stored", created.id));

    Ok(record)
}

/// Uploads the photo as `multipart/form-data` and returns its `image_url`.
async fn upload_image(url: &str, file: &web_sys::File) -> Result<String, String> {
    let form_data =
        web_sys::FormData::new().map_err(|_| "Could not prepare the photo upload".to_string())?;
    form_data
        .append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| "Could not prepare the photo upload".to_string())?;

    let response = Request::post(url)
        .body(form_data)
        .map_err(|e| format!("Could not prepare the photo upload: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Could not upload the photo: {}", e))?;

    if !response.ok() {
        return Err(read_error(response).await);
    }

    response
        .json::<ImageUploadResponse>()
        .await
        .map(|body| body.image_url)
        .map_err(|e| format!("Unexpected reply from the photo upload: {}", e))
}

/// Turns an error response into a single line for the form.
async fn read_error(response: Response) -> String {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) if body.fields.is_empty() => body.error,
        Ok(body) => {
            let details = body
                .fields
                .iter()
                .map(|(path, message)| format!("{}: {}", path, message))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} ({})", body.error, details)
        }
        Err(_) => format!("Request failed with status {}", status),
    }
}

/// Displays a temporary notification message at the bottom of the screen.
///
/// The toast is a plain `div` appended to `<body>` that removes itself after
/// three seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}
