use std::{cell::RefCell, rc::Rc};

use components::{
    map_component::{render_container, LeafletMap},
    workout_form::{Field, FormState, UiForm, WorkoutFormView},
    workout_list::{UiList, WorkoutEntry},
};
use browser::{BrowserGeolocator, BrowserPage, LocalStorage};
use gloo_console::{error, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use workout_tracker_lib::{App, AppConfig, Collaborators, Coords, TrackerError, Workout};
use yew::prelude::*;

mod browser;
mod components;

type BrowserApp = App<LeafletMap, UiForm, UiList, LocalStorage, BrowserPage>;

enum MainMsg {
    Located(Coords),
    LocationFailed,
    MapClicked(Coords),
    FieldChanged(Field, String),
    TypeChanged(String),
    Submit,
    SelectWorkout(Option<String>),
    Reset,
    Redraw,
}

struct Model {
    app: BrowserApp,
    map_container: HtmlElement,
    form: Rc<RefCell<FormState>>,
    entries: Rc<RefCell<Vec<Workout>>>,
    distance_ref: NodeRef,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();

        let map = LeafletMap::new(link.callback(MainMsg::MapClicked));
        let map_container = map.container().clone();

        let form = Rc::new(RefCell::new(FormState::default()));
        let distance_ref = NodeRef::default();
        let ui_form = UiForm::new(form.clone(), distance_ref.clone(), link.callback(|()| MainMsg::Redraw));

        let entries = Rc::new(RefCell::new(Vec::new()));
        let list = UiList::new(entries.clone());

        let geolocator = BrowserGeolocator::new(
            link.callback(MainMsg::Located),
            link.callback(|()| MainMsg::LocationFailed),
        );

        let collaborators = Collaborators::new(map, ui_form, list, LocalStorage, BrowserPage, geolocator);
        let app = App::initialize(collaborators, AppConfig::default());
        info!(format!("Restored {} workouts", app.workouts().len()));

        Self {
            app,
            map_container,
            form,
            entries,
            distance_ref,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::Located(coords) => {
                info!(format!("Located at {}, {}", coords.lat(), coords.lng()));
                self.app.on_position(coords);
            }
            MainMsg::LocationFailed => self.app.on_position_error(),
            MainMsg::MapClicked(coords) => {
                if let Err(err) = self.app.on_map_click(coords) {
                    error!(format!("Ignoring map click: {err}"));
                }
            }
            MainMsg::FieldChanged(field, value) => self.form.borrow_mut().set(field, value),
            MainMsg::TypeChanged(workout_type) => {
                self.form.borrow_mut().input.workout_type = workout_type;
                self.app.on_type_change();
            }
            MainMsg::Submit => match self.app.on_submit() {
                Ok(workout) => info!(format!("Added {}", workout.description)),
                // Already reported to the user
                Err(TrackerError::InvalidInput) => {}
                Err(err) => error!(format!("Could not add workout: {err}")),
            },
            MainMsg::SelectWorkout(id) => {
                if let Err(err) = self.app.on_list_click(id.as_deref()) {
                    error!(format!("Ignoring workout selection: {err}"));
                }
                return false;
            }
            MainMsg::Reset => {
                if let Err(err) = self.app.reset() {
                    error!(format!("Reset failed: {err}"));
                }
            }
            MainMsg::Redraw => {}
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let on_list_click = link.callback(|e: MouseEvent| {
            let id = e
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".workout").ok().flatten())
                .and_then(|entry| entry.get_attribute("data-id"));
            MainMsg::SelectWorkout(id)
        });

        let entries = self.entries.borrow().clone();

        html! {
            <>
                <div class="sidebar">
                    <ul class="workouts" onclick={on_list_click}>
                        <WorkoutFormView
                            state={self.form.borrow().clone()}
                            distance_ref={self.distance_ref.clone()}
                            on_input={link.callback(|(field, value): (Field, String)| MainMsg::FieldChanged(field, value))}
                            on_type_change={link.callback(MainMsg::TypeChanged)}
                            on_submit={link.callback(|()| MainMsg::Submit)}
                        />
                        { for entries.into_iter().map(|workout| html! { <WorkoutEntry workout={workout} /> }) }
                    </ul>
                    <button class="reset-btn" onclick={link.callback(|_: MouseEvent| MainMsg::Reset)}>{"Reset"}</button>
                </div>
                <div class="map-wrapper">
                    { render_container(&self.map_container) }
                </div>
            </>
        }
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
