use std::{cell::RefCell, rc::Rc};

use workout_tracker_lib::{render, Workout, WorkoutList};
use yew::prelude::*;

/// Entries in display order: index 0 sits directly below the form.
pub struct UiList {
    entries: Rc<RefCell<Vec<Workout>>>,
}

impl UiList {
    pub fn new(entries: Rc<RefCell<Vec<Workout>>>) -> Self {
        Self { entries }
    }
}

impl WorkoutList for UiList {
    fn insert_after_form(&mut self, workout: &Workout) {
        self.entries.borrow_mut().insert(0, workout.clone());
    }
}

#[derive(Properties, PartialEq)]
pub struct EntryProps {
    pub workout: Workout,
}

#[function_component]
pub fn WorkoutEntry(props: &EntryProps) -> Html {
    let workout = &props.workout;

    html! {
        <li class={render::entry_class(workout)} data-id={workout.id.clone()}>
            <h2 class="workout__title">{workout.description.clone()}</h2>
            { for render::details(workout).into_iter().map(|detail| html! {
                <div class="workout__details">
                    <span class="workout__icon">{detail.icon}</span>
                    <span class="workout__value">{detail.value}</span>
                    <span class="workout__unit">{detail.unit}</span>
                </div>
            }) }
        </li>
    }
}
