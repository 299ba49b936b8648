//! View rendering for the registration form component.
//!
//! Left column: profile photo picker with preview. Right column: the staff
//! fields, the repeated ward rows and the submit button. Every control is
//! disabled while a submission is in flight, and each shows the error the
//! form controller currently exposes for its path.

use common::model::registration::{
    Field, Relationship, StaffCategory, WardField, RELATIONSHIP_STATUS_OPTIONS,
};
use common::validation::FieldPath;
use common::wards::WardRow;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::{input_value, select_value};
use super::messages::Msg;
use super::state::RegistrationFormComponent;

/// Main view function for the registration form.
pub fn view(component: &RegistrationFormComponent, ctx: &Context<RegistrationFormComponent>) -> Html {
    let link = ctx.link();
    let locked = component.is_locked();
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    let category_options = StaffCategory::ALL
        .iter()
        .map(|c| (c.as_str(), c.label()))
        .collect::<Vec<_>>();

    html! {
        <main class="registration-root">
            <form class="registration-form" {onsubmit} novalidate=true>
                { build_image_panel(component, link) }
                <div class="registration-fields">
                    { build_form_error(component) }
                    { text_input(component, link, Field::StaffId, "text", "e.g. for staffs sp/1234 for police 123456", "fingerprint") }
                    { text_input(component, link, Field::FirstName, "text", "e.g. John", "person") }
                    { text_input(component, link, Field::LastName, "text", "e.g. Doe", "person") }
                    { text_input(component, link, Field::PhoneNumber, "tel", "e.g. (234) 523-4567", "phone") }
                    { text_input(component, link, Field::Email, "email", "e.g. john@example.com", "mail") }
                    { select_input(component, link, Field::StaffCategory, "Select a category", &category_options) }
                    { select_input(component, link, Field::RelationshipStatus, "Relationship Status", &RELATIONSHIP_STATUS_OPTIONS) }
                    { text_input(component, link, Field::Department, "text", "e.g. admin, law", "view_week") }
                    { text_input(component, link, Field::StaffAddress, "text", "e.g. 123 staff road", "home") }
                    { build_wards_section(component, link) }
                    <button type="submit" class="submit-btn" disabled={locked}>
                        { if locked { "Submitting..." } else { "Register" } }
                    </button>
                </div>
            </form>
        </main>
    }
}

/// Photo picker: placeholder button when empty, preview with caption and a
/// remove button when a photo is selected. The file input is always mounted
/// so `file_input_ref` stays valid.
fn build_image_panel(
    component: &RegistrationFormComponent,
    link: &Scope<RegistrationFormComponent>,
) -> Html {
    let locked = component.is_locked();

    let content = match (component.image.preview(), component.image.display_name()) {
        (Some(url), Some(caption)) => {
            let src: &str = url;
            html! {
                <div class="image-preview">
                    <img src={src.to_string()} alt="Staff" width="300" height="300" />
                    <span class="image-caption">{ caption }</span>
                    <button
                        type="button"
                        class="remove-image-btn"
                        aria-label="Remove image"
                        title="Remove image"
                        disabled={locked}
                        onclick={link.callback(|_| Msg::ClearImage)}
                    >
                        { "✕" }
                    </button>
                </div>
            }
        }
        _ => html! {
            <div class="image-placeholder">
                <button
                    type="button"
                    class="upload-btn"
                    disabled={locked}
                    onclick={link.callback(|_| Msg::OpenFileDialog)}
                >
                    <i class="material-icons">{"add"}</i>
                    <span class="icon-label">{"Upload Profile photo"}</span>
                </button>
            </div>
        },
    };

    html! {
        <div class="image-panel">
            { content }
            <input
                id="staff_image"
                ref={component.file_input_ref.clone()}
                type="file"
                accept="image/*"
                class="sr-only"
                disabled={locked}
                onchange={link.batch_callback(|e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    input.files().and_then(|files| files.get(0)).map(Msg::ImageSelected)
                })}
            />
        </div>
    }
}

/// Failure reported by the backend on the last submit, if any.
fn build_form_error(component: &RegistrationFormComponent) -> Html {
    match component.form.visible_error(&FieldPath::Form) {
        Some(message) => html! {
            <div class="form-error" role="alert">{ message.to_string() }</div>
        },
        None => html! {},
    }
}

/// Labelled text input bound to one draft field.
fn text_input(
    component: &RegistrationFormComponent,
    link: &Scope<RegistrationFormComponent>,
    field: Field,
    input_type: &'static str,
    placeholder: &'static str,
    icon: &'static str,
) -> Html {
    let path = FieldPath::Field(field);
    let error = component.form.visible_error(&path);

    html! {
        <div class="form-item">
            <label for={field.as_str()}>{ field.label() }</label>
            <div class="input-with-icon">
                <i class="material-icons">{ icon }</i>
                <input
                    id={field.as_str()}
                    type={input_type}
                    placeholder={placeholder}
                    class={classes!("form-input", error.is_some().then_some("invalid"))}
                    value={component.form.draft().field(field).to_string()}
                    disabled={component.is_locked()}
                    oninput={link.callback(move |e: InputEvent| Msg::UpdateField(field, input_value(&e)))}
                    onblur={link.callback(move |_: FocusEvent| Msg::BlurField(path))}
                />
            </div>
            { error_message(error) }
        </div>
    }
}

/// Labelled select bound to one draft field. The placeholder option carries
/// the empty value, which no select rule accepts.
fn select_input(
    component: &RegistrationFormComponent,
    link: &Scope<RegistrationFormComponent>,
    field: Field,
    placeholder: &'static str,
    options: &[(&'static str, &'static str)],
) -> Html {
    let path = FieldPath::Field(field);
    let error = component.form.visible_error(&path);
    let current = component.form.draft().field(field);

    html! {
        <div class="form-item">
            <label for={field.as_str()}>{ field.label() }</label>
            <select
                id={field.as_str()}
                class={classes!("form-select", error.is_some().then_some("invalid"))}
                disabled={component.is_locked()}
                onchange={link.batch_callback(move |e: Event| {
                    vec![Msg::UpdateField(field, select_value(&e)), Msg::BlurField(path)]
                })}
            >
                <option value="" disabled=true hidden=true selected={current.is_empty()}>
                    { placeholder }
                </option>
                { for options.iter().map(|(value, label)| html! {
                    <option value={*value} selected={current == *value}>{ *label }</option>
                }) }
            </select>
            { error_message(error) }
        </div>
    }
}

/// Ward rows plus the list-level error and the add button.
fn build_wards_section(
    component: &RegistrationFormComponent,
    link: &Scope<RegistrationFormComponent>,
) -> Html {
    let can_remove = component.form.can_remove_ward();
    let rows = component
        .form
        .draft()
        .wards
        .iter()
        .enumerate()
        .map(|(index, row)| build_ward_row(component, link, index, row, can_remove))
        .collect::<Html>();

    html! {
        <fieldset class="wards">
            <legend>{ "Wards" }</legend>
            { rows }
            { error_message(component.form.visible_error(&FieldPath::Wards)) }
            <button
                type="button"
                class="add-ward-btn"
                disabled={component.is_locked()}
                onclick={link.callback(|_| Msg::AddWard)}
            >
                <i class="material-icons">{"add"}</i>
                <span class="icon-label">{"Add ward"}</span>
            </button>
        </fieldset>
    }
}

/// One ward row, keyed by its stable id so Yew never moves DOM state
/// (focus, partially typed values) to another row after a removal.
fn build_ward_row(
    component: &RegistrationFormComponent,
    link: &Scope<RegistrationFormComponent>,
    index: usize,
    row: &WardRow,
    can_remove: bool,
) -> Html {
    let id = row.id;
    let locked = component.is_locked();
    let name_path = FieldPath::Ward {
        id,
        field: WardField::Name,
    };
    let relationship_path = FieldPath::Ward {
        id,
        field: WardField::Relationship,
    };
    let name_id = format!("ward-{}-name", id);
    let relationship_id = format!("ward-{}-relationship", id);
    let relationship = row.entry.relationship.clone();

    html! {
        <div class="ward-row" key={id.to_string()}>
            <div class="form-item">
                <label for={name_id.clone()}>{ format!("Ward {} name", index + 1) }</label>
                <input
                    id={name_id}
                    type="text"
                    placeholder="e.g. Amy"
                    class={classes!("form-input", component.form.visible_error(&name_path).map(|_| "invalid"))}
                    value={row.entry.name.clone()}
                    disabled={locked}
                    oninput={link.callback(move |e: InputEvent| Msg::UpdateWard(id, WardField::Name, input_value(&e)))}
                    onblur={link.callback(move |_: FocusEvent| Msg::BlurField(name_path))}
                />
                { error_message(component.form.visible_error(&name_path)) }
            </div>
            <div class="form-item">
                <label for={relationship_id.clone()}>{ "Relationship" }</label>
                <select
                    id={relationship_id}
                    class={classes!("form-select", component.form.visible_error(&relationship_path).map(|_| "invalid"))}
                    disabled={locked}
                    onchange={link.batch_callback(move |e: Event| {
                        vec![
                            Msg::UpdateWard(id, WardField::Relationship, select_value(&e)),
                            Msg::BlurField(relationship_path),
                        ]
                    })}
                >
                    <option value="" disabled=true hidden=true selected={relationship.is_empty()}>
                        { "Select a relationship" }
                    </option>
                    { for Relationship::ALL.iter().map(|r| html! {
                        <option value={r.as_str()} selected={relationship == r.as_str()}>{ r.as_str() }</option>
                    }) }
                </select>
                { error_message(component.form.visible_error(&relationship_path)) }
            </div>
            <button
                type="button"
                class="remove-ward-btn"
                aria-label="Remove ward"
                title="Remove ward"
                disabled={locked || !can_remove}
                onclick={link.callback(move |_| Msg::RemoveWard(id))}
            >
                { "✕" }
            </button>
        </div>
    }
}

fn error_message(error: Option<&str>) -> Html {
    match error {
        Some(message) => html! { <p class="form-message">{ message.to_string() }</p> },
        None => html! {},
    }
}
