//! Staff registration form: root module wiring the Yew `Component`
//! implementation with submodules for state, update logic, view rendering and
//! helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `RegistrationFormProps`, `RegistrationFormComponent`).
//! - Provide the `Component` implementation that delegates to `update::update` and `view::view`.
//!
//! Validation, the ward list and the submission phase live in
//! `common::form::RegistrationForm`; this module only adapts browser events to
//! it and performs the network hand-off.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::RegistrationFormProps;
pub use state::RegistrationFormComponent;

impl Component for RegistrationFormComponent {
    type Message = Msg;
    type Properties = RegistrationFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        RegistrationFormComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
