use gloo_console::error;
use gloo_utils::window;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Position, Storage};
use workout_tracker_lib::{Coords, Geolocator, KeyValueStore, Page, TrackerError};
use yew::Callback;

fn storage_error(err: JsValue) -> TrackerError {
    TrackerError::Storage(format!("{err:?}"))
}

/// `window.localStorage`
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> Result<Storage, TrackerError> {
        window()
            .local_storage()
            .map_err(storage_error)?
            .ok_or_else(|| TrackerError::Storage("localStorage is not available".into()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError> {
        self.storage()?.get_item(key).map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TrackerError> {
        self.storage()?.set_item(key, value).map_err(storage_error)
    }

    fn remove(&self, key: &str) -> Result<(), TrackerError> {
        self.storage()?.remove_item(key).map_err(storage_error)
    }
}

pub struct BrowserPage;

impl Page for BrowserPage {
    fn alert(&self, message: &str) {
        if let Err(err) = window().alert_with_message(message) {
            error!(format!("alert failed: {err:?}"));
        }
    }

    fn reload(&self) {
        if let Err(err) = window().location().reload() {
            error!(format!("reload failed: {err:?}"));
        }
    }
}

pub struct BrowserGeolocator {
    on_position: Callback<Coords>,
    on_error: Callback<()>,
}

impl BrowserGeolocator {
    pub fn new(on_position: Callback<Coords>, on_error: Callback<()>) -> Self {
        Self { on_position, on_error }
    }
}

impl Geolocator for BrowserGeolocator {
    fn request_position(&self) {
        let geolocation = match window().navigator().geolocation() {
            Ok(geolocation) => geolocation,
            Err(err) => {
                error!(format!("Geolocation unavailable: {err:?}"));
                self.on_error.emit(());
                return;
            }
        };

        let on_position = self.on_position.clone();
        let success = Closure::once_into_js(move |position: Position| {
            let coords = position.coords();
            on_position.emit(Coords(coords.latitude(), coords.longitude()));
        });

        let on_error = self.on_error.clone();
        let failure = Closure::once_into_js(move |_err: JsValue| on_error.emit(()));

        if let Err(err) =
            geolocation.get_current_position_with_error_callback(success.unchecked_ref(), Some(failure.unchecked_ref()))
        {
            error!(format!("Position request failed: {err:?}"));
            self.on_error.emit(());
        }
    }
}
