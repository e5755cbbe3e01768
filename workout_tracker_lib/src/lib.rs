pub mod app;
pub mod collaborators;
pub mod config;
pub mod form;
pub mod render;
pub mod storage;
pub mod workout;

pub use app::{App, MapState};
pub use collaborators::{Collaborators, Geolocator, MapWidget, Page, WorkoutForm, WorkoutList};
pub use config::AppConfig;
pub use form::{FormInput, ValidInput};
pub use storage::{KeyValueStore, MemoryStore, WorkoutStore};
pub use workout::{Coords, Workout, WorkoutKind, WorkoutType};

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("inputs have to be positive numbers")]
    InvalidInput,
    #[error("unknown workout type: {0:?}")]
    UnknownWorkoutType(String),
    #[error("form submitted without a map click")]
    NoPendingClick,
    #[error("map is not loaded yet")]
    MapNotReady,
    #[error("storage failure: {0}")]
    Storage(String),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
