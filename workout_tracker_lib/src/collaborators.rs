//! The outside world as seen by [`crate::App`]. The browser frontend backs
//! these with Leaflet and the DOM; tests back them with recorders.

use crate::{
    form::FormInput,
    render::MarkerStyle,
    storage::KeyValueStore,
    workout::{Coords, Workout},
};

pub trait MapWidget {
    /// Creates the view centered on `center`.
    fn show_at(&mut self, center: Coords, zoom: f64);
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str);
    /// Start reporting clicks back to [`crate::App::on_map_click`].
    fn listen_for_clicks(&mut self);
    /// Pin with an open popup showing `content`.
    fn place_marker(&mut self, coords: Coords, content: &str, style: &MarkerStyle);
    fn center(&mut self, coords: Coords, zoom: f64, animate: bool);
}

pub trait WorkoutForm {
    fn read(&self) -> FormInput;
    fn show(&mut self);
    /// Hides the form and clears every numeric field.
    fn hide(&mut self);
    fn focus_distance(&mut self);
    /// Swaps the cadence row for the elevation row or back.
    fn toggle_extra_field(&mut self);
}

pub trait WorkoutList {
    /// New entries go directly after the form, so the newest is on top.
    fn insert_after_form(&mut self, workout: &Workout);
}

pub trait Page {
    /// Blocking message to the user.
    fn alert(&self, message: &str);
    fn reload(&self);
}

pub trait Geolocator {
    /// Answer arrives later through `App::on_position` or `App::on_position_error`.
    fn request_position(&self);
}

pub struct Collaborators<M, F, L, S, P, G> {
    pub map: M,
    pub form: F,
    pub list: L,
    pub storage: S,
    pub page: P,
    pub geolocator: G,
}

impl<M, F, L, S, P, G> Collaborators<M, F, L, S, P, G>
where
    M: MapWidget,
    F: WorkoutForm,
    L: WorkoutList,
    S: KeyValueStore,
    P: Page,
    G: Geolocator,
{
    pub fn new(map: M, form: F, list: L, storage: S, page: P, geolocator: G) -> Self {
        Self { map, form, list, storage, page, geolocator }
    }
}
