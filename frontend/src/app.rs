use common::model::registration::RegistrationRecord;
use gloo_console::log;
use yew::{html, Callback, Component, Context, Html};

use crate::components::registration::RegistrationFormComponent;

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let on_submitted = Callback::from(|record: RegistrationRecord| {
            log!(format!(
                "registered {} {} ({})",
                record.first_name, record.last_name, record.staff_id
            ));
        });

        html! {
            <div>
                <RegistrationFormComponent on_submitted={on_submitted} />
            </div>
        }
    }
}
