use std::{cell::RefCell, rc::Rc};

use gloo_console::error;
use gloo_timers::callback::Timeout;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::{FormInput, WorkoutForm};
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub input: FormInput,
    pub hidden: bool,
    /// Set while the form is hidden without its slide animation.
    pub display_none: bool,
    pub show_elevation: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            input: FormInput { workout_type: "running".into(), ..Default::default() },
            hidden: true,
            display_none: false,
            show_elevation: false,
        }
    }
}

impl FormState {
    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Distance => &mut self.input.distance,
            Field::Duration => &mut self.input.duration,
            Field::Cadence => &mut self.input.cadence,
            Field::Elevation => &mut self.input.elevation,
        };
        *slot = value;
    }
}

/// The controller's view of the form. Changes land in the shared state and
/// show up on the next render.
pub struct UiForm {
    state: Rc<RefCell<FormState>>,
    distance_ref: NodeRef,
    redraw: Callback<()>,
}

impl UiForm {
    pub fn new(state: Rc<RefCell<FormState>>, distance_ref: NodeRef, redraw: Callback<()>) -> Self {
        Self { state, distance_ref, redraw }
    }
}

impl WorkoutForm for UiForm {
    fn read(&self) -> FormInput {
        self.state.borrow().input.clone()
    }

    fn show(&mut self) {
        self.state.borrow_mut().hidden = false;
    }

    fn hide(&mut self) {
        {
            let mut state = self.state.borrow_mut();
            state.input.distance.clear();
            state.input.duration.clear();
            state.input.cadence.clear();
            state.input.elevation.clear();
            state.display_none = true;
            state.hidden = true;
        }

        let state = self.state.clone();
        let redraw = self.redraw.clone();
        Timeout::new(0, move || {
            state.borrow_mut().display_none = false;
            redraw.emit(());
        })
        .forget();
    }

    fn focus_distance(&mut self) {
        if let Some(input) = self.distance_ref.cast::<HtmlInputElement>() {
            if let Err(err) = input.focus() {
                error!(format!("Could not focus distance: {err:?}"));
            }
        }
    }

    fn toggle_extra_field(&mut self) {
        let mut state = self.state.borrow_mut();
        state.show_elevation = !state.show_elevation;
    }
}

#[derive(Properties, PartialEq)]
pub struct FormProps {
    pub state: FormState,
    pub distance_ref: NodeRef,
    pub on_input: Callback<(Field, String)>,
    pub on_type_change: Callback<String>,
    pub on_submit: Callback<()>,
}

fn row_class(hidden: bool) -> &'static str {
    if hidden { "form__row form__row--hidden" } else { "form__row" }
}

#[function_component]
pub fn WorkoutFormView(props: &FormProps) -> Html {
    let state = &props.state;

    let input_cb = |field: Field| {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit((field, input.value()));
        })
    };

    let on_type_change = {
        let cb = props.on_type_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            cb.emit(select.value());
        })
    };

    let onsubmit = {
        let cb = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            cb.emit(());
        })
    };

    let class = if state.hidden { "form hidden" } else { "form" };
    let style = if state.display_none { "display: none" } else { "display: grid" };

    html! {
        <form class={class} style={style} onsubmit={onsubmit}>
            <div class="form__row">
                <label class="form__label">{"Type"}</label>
                <select class="form__input form__input--type" onchange={on_type_change}>
                    <option value="running" selected={state.input.workout_type == "running"}>{"Running"}</option>
                    <option value="cycling" selected={state.input.workout_type == "cycling"}>{"Cycling"}</option>
                </select>
            </div>
            <div class="form__row">
                <label class="form__label">{"Distance"}</label>
                <input class="form__input form__input--distance" placeholder="km" ref={props.distance_ref.clone()}
                    value={state.input.distance.clone()} oninput={input_cb(Field::Distance)} />
            </div>
            <div class="form__row">
                <label class="form__label">{"Duration"}</label>
                <input class="form__input form__input--duration" placeholder="min"
                    value={state.input.duration.clone()} oninput={input_cb(Field::Duration)} />
            </div>
            <div class={row_class(state.show_elevation)}>
                <label class="form__label">{"Cadence"}</label>
                <input class="form__input form__input--cadence" placeholder="step/min"
                    value={state.input.cadence.clone()} oninput={input_cb(Field::Cadence)} />
            </div>
            <div class={row_class(!state.show_elevation)}>
                <label class="form__label">{"Elev Gain"}</label>
                <input class="form__input form__input--elevation" placeholder="meters"
                    value={state.input.elevation.clone()} oninput={input_cb(Field::Elevation)} />
            </div>
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}
