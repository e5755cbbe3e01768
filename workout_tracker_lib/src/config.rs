use const_format::concatcp;

pub const DEFAULT_ZOOM: f64 = 13.;
pub const STORAGE_KEY: &str = "workouts";

const TILE_HOST: &str = "https://{s}.tile.openstreetmap.fr";
pub const TILE_URL: &str = concatcp!(TILE_HOST, "/hot/{z}/{x}/{y}.png");
pub const ATTRIBUTION: &str = concatcp!(
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a>",
    " contributors"
);

/// Settings shared by the controller and the browser collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Zoom used both for the initial view and when jumping to a workout.
    pub zoom: f64,
    pub tile_url: String,
    pub attribution: String,
    /// The single localStorage entry holding every workout.
    pub storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            tile_url: TILE_URL.into(),
            attribution: ATTRIBUTION.into(),
            storage_key: STORAGE_KEY.into(),
        }
    }
}
