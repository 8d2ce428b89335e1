use crate::components::{map_component::LeafletMap, workout_form::WorkoutForm, workout_list::WorkoutList};
use geolocation::BrowserGeolocation;
use gloo_console::{error, info};
use panel_state::PanelState;
use wasm_bindgen_futures::spawn_local;
use workout_tracker_lib::{
    config::MapConfig, Coordinates, Coordinator, FormInput, LocationProvider, Result, WorkoutError, WorkoutId,
};
use yew::prelude::*;

mod components;
mod geolocation;
mod panel_state;

enum MainMsg {
    PositionResolved(Result<Coordinates>),
    MapClicked(Coordinates),
    SubmitForm(FormInput),
    SelectWorkout(WorkoutId),
}

struct Model {
    coordinator: Coordinator<LeafletMap, PanelState>,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();

        let config = MapConfig::default();
        let map = LeafletMap::new(config.clone(), link.callback(MainMsg::MapClicked));

        let cb = link.callback(MainMsg::PositionResolved);
        spawn_local(async move {
            let position = BrowserGeolocation.current_position().await;
            cb.emit(position);
        });

        Self {
            coordinator: Coordinator::new(map, PanelState::default(), config),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::PositionResolved(position) => match self.coordinator.on_position_resolved(position) {
                Ok(at) => info!(format!("Map centered on {}", at)),
                Err(err) => error!(err.to_string()),
            },
            MainMsg::MapClicked(at) => {
                self.coordinator.on_location_selected(at);
            }
            MainMsg::SubmitForm(input) => match self.coordinator.on_form_submitted(&input) {
                Ok(id) => info!(format!("Logged workout {}", id)),
                // Already alerted, the user can fix the form
                Err(WorkoutError::InvalidInput(_)) => {}
                Err(err) => error!(err.to_string()),
            },
            MainMsg::SelectWorkout(id) => {
                if let Err(err) = self.coordinator.on_list_entry_selected(&id) {
                    error!(err.to_string());
                }
            }
        }
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        self.coordinator.map().invalidate_size();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let panel = self.coordinator.panel();

        html! {
            <>
                <div class="sidebar">
                    <WorkoutForm
                        key={panel.form_generation().to_string()}
                        visible={panel.form_visible()}
                        focus={panel.focus_requests()}
                        on_submit={link.callback(MainMsg::SubmitForm)}
                    />
                    <WorkoutList
                        entries={panel.entries().to_vec()}
                        on_select={link.callback(MainMsg::SelectWorkout)}
                    />
                </div>
                { self.coordinator.map().render() }
            </>
        }
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
