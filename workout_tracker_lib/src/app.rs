use chrono::{DateTime, Utc};

use crate::{
    collaborators::{Collaborators, Geolocator, MapWidget, Page, WorkoutForm, WorkoutList},
    config::AppConfig,
    render::{maps_link, popup_content, MarkerStyle},
    storage::{KeyValueStore, WorkoutStore},
    workout::{Coords, Workout},
    TrackerError,
};

const POSITION_FAILED: &str = "Couldn't get your position.";
const INVALID_INPUT: &str = "Inputs have to be positive number";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapState {
    /// No position yet, or geolocation failed.
    Uninitialized,
    Ready,
    /// The form is open for a click at these coordinates.
    FormOpen(Coords),
}

type Clock = Box<dyn FnMut() -> DateTime<Utc>>;

/// Owns the workout list and mediates between map, form, list and storage.
pub struct App<M, F, L, S, P> {
    config: AppConfig,
    map: M,
    form: F,
    list: L,
    store: WorkoutStore<S>,
    page: P,
    state: MapState,
    workouts: Vec<Workout>,
    clock: Clock,
}

impl<M, F, L, S, P> App<M, F, L, S, P>
where
    M: MapWidget,
    F: WorkoutForm,
    L: WorkoutList,
    S: KeyValueStore,
    P: Page,
{
    /// Restores stored workouts and asks for the device position. Nothing is
    /// drawn until the position arrives.
    pub fn initialize<G: Geolocator>(collaborators: Collaborators<M, F, L, S, P, G>, config: AppConfig) -> Self {
        let Collaborators { map, form, list, storage, page, geolocator } = collaborators;

        let store = WorkoutStore::new(storage, config.storage_key.clone());
        let workouts = store.load();

        geolocator.request_position();

        Self {
            config,
            map,
            form,
            list,
            store,
            page,
            state: MapState::Uninitialized,
            workouts,
            clock: Box::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: impl FnMut() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn state(&self) -> MapState {
        self.state
    }

    pub fn on_position(&mut self, coords: Coords) {
        if self.state != MapState::Uninitialized {
            tracing::warn!("Position delivered twice, keeping the loaded map");
            return;
        }

        tracing::debug!("{}", maps_link(coords));

        self.map.show_at(coords, self.config.zoom);
        self.map.add_tile_layer(&self.config.tile_url, &self.config.attribution);

        for workout in &self.workouts {
            self.list.insert_after_form(workout);
            render_marker(&mut self.map, workout);
        }

        self.map.listen_for_clicks();
        self.state = MapState::Ready;
        tracing::info!("Map loaded with {} workouts", self.workouts.len());
    }

    pub fn on_position_error(&mut self) {
        tracing::error!("Geolocation failed");
        self.page.alert(POSITION_FAILED);
    }

    pub fn on_map_click(&mut self, coords: Coords) -> Result<(), TrackerError> {
        if self.state == MapState::Uninitialized {
            return Err(TrackerError::MapNotReady);
        }

        self.state = MapState::FormOpen(coords);
        self.form.show();
        self.form.focus_distance();
        Ok(())
    }

    pub fn on_type_change(&mut self) {
        self.form.toggle_extra_field();
    }

    /// Creates a workout from the form at the pending click.
    ///
    /// Invalid input is reported to the user and leaves everything untouched.
    /// A failed save is returned after the workout was added and drawn.
    pub fn on_submit(&mut self) -> Result<&Workout, TrackerError> {
        let MapState::FormOpen(coords) = self.state else {
            tracing::error!("Form submitted without a pending map click");
            return Err(TrackerError::NoPendingClick);
        };

        let input = match self.form.read().validate() {
            Ok(input) => input,
            Err(err) => {
                tracing::debug!("Rejected form input: {err}");
                self.page.alert(INVALID_INPUT);
                return Err(err);
            }
        };

        let workout = input.into_workout(coords, (self.clock)());
        render_marker(&mut self.map, &workout);
        self.list.insert_after_form(&workout);
        self.hide_form();

        tracing::info!("New workout {} ({})", workout.id, workout.description);
        self.workouts.push(workout);
        self.store.save(&self.workouts)?;

        Ok(&self.workouts[self.workouts.len() - 1])
    }

    pub fn hide_form(&mut self) {
        self.form.hide();
        if let MapState::FormOpen(_) = self.state {
            self.state = MapState::Ready;
        }
    }

    /// Moves the map to the selected workout. Clicks outside an entry and
    /// entries without a matching workout are ignored.
    pub fn on_list_click(&mut self, id: Option<&str>) -> Result<(), TrackerError> {
        let Some(id) = id else {
            return Ok(());
        };
        if self.state == MapState::Uninitialized {
            return Err(TrackerError::MapNotReady);
        }
        let Some(workout) = self.workouts.iter_mut().find(|w| w.id == id) else {
            tracing::debug!("No workout with id {id}");
            return Ok(());
        };

        self.map.center(workout.coords, self.config.zoom, true);
        workout.click();
        Ok(())
    }

    /// Drops every stored workout and starts over.
    pub fn reset(&mut self) -> Result<(), TrackerError> {
        self.store.reset()?;
        tracing::info!("Stored workouts removed, reloading");
        self.page.reload();
        Ok(())
    }
}

fn render_marker<M: MapWidget>(map: &mut M, workout: &Workout) {
    map.place_marker(workout.coords, &popup_content(workout), &MarkerStyle::for_workout(workout));
}
