use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{workout::Workout, TrackerError};

/// A string key/value slot, `window.localStorage` in the browser.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError>;
    fn set(&self, key: &str, value: &str) -> Result<(), TrackerError>;
    fn remove(&self, key: &str) -> Result<(), TrackerError>;
}

/// Shared in-memory store. Clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TrackerError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TrackerError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Keeps the whole workout list as one JSON blob under a single key.
#[derive(Debug, Clone)]
pub struct WorkoutStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    /// Overwrites whatever was stored before. JSON has no infinity or NaN, so
    /// a list holding one would not load back and is refused.
    pub fn save(&self, workouts: &[Workout]) -> Result<(), TrackerError> {
        if let Some(bad) = workouts.iter().find(|w| !w.is_finite()) {
            tracing::error!("Refusing to save workout {} with non-finite values", bad.id);
            return Err(TrackerError::InvalidInput);
        }
        let blob = serde_json::to_string(workouts)?;
        self.store.set(&self.key, &blob)?;
        tracing::debug!("Saved {} workouts under {:?}", workouts.len(), self.key);
        Ok(())
    }

    /// Missing or unreadable data loads as an empty list.
    pub fn load(&self) -> Vec<Workout> {
        let blob = match self.store.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!("Could not read stored workouts: {err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Option<Vec<Workout>>>(&blob) {
            Ok(workouts) => {
                let workouts = workouts.unwrap_or_default();
                tracing::info!("Loaded {} stored workouts", workouts.len());
                workouts
            }
            Err(err) => {
                tracing::warn!("Discarding unreadable workout data: {err}");
                Vec::new()
            }
        }
    }

    pub fn reset(&self) -> Result<(), TrackerError> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::Coords;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, TrackerError> {
            Err(TrackerError::Storage("SecurityError".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), TrackerError> {
            Err(TrackerError::Storage("QuotaExceededError".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), TrackerError> {
            Ok(())
        }
    }

    fn sample() -> Vec<Workout> {
        vec![
            Workout::running(Coords(35.0, 139.0), 5., 30., 180.),
            Workout::cycling(Coords(35.1, 139.2), 20., 60., -5.),
        ]
    }

    #[test]
    fn round_trip_keeps_fields_and_variants() {
        let store = WorkoutStore::new(MemoryStore::new(), "workouts");
        let workouts = sample();
        store.save(&workouts).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), workouts.len());
        for (loaded, saved) in loaded.iter().zip(&workouts) {
            assert_eq!(loaded.coords, saved.coords);
            assert_eq!(loaded.distance, saved.distance);
            assert_eq!(loaded.duration, saved.duration);
            assert_eq!(loaded.description, saved.description);
            assert_eq!(loaded.workout_type(), saved.workout_type());
        }
        assert_eq!(loaded, workouts);
    }

    #[test]
    fn save_overwrites_previous_blob() {
        let store = WorkoutStore::new(MemoryStore::new(), "workouts");
        store.save(&sample()).unwrap();
        store.save(&sample()[..1]).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn absent_or_corrupt_blob_loads_empty() {
        let memory = MemoryStore::new();
        let store = WorkoutStore::new(memory.clone(), "workouts");
        assert!(store.load().is_empty());

        memory.set("workouts", "{not json").unwrap();
        assert!(store.load().is_empty());

        memory.set("workouts", "null").unwrap();
        assert!(store.load().is_empty());

        memory.set("workouts", r#"[{"id": 3}]"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn reads_blob_written_by_the_browser() {
        let memory = MemoryStore::new();
        memory
            .set(
                "workouts",
                r#"[{"date":"2024-03-15T12:00:00.000Z","id":"1710504000000","clicks":0,
                    "coords":[35,139],"distance":5,"duration":30,"type":"running",
                    "cadence":180,"pace":6,"desc":"Running on March 5"}]"#,
            )
            .unwrap();

        let loaded = WorkoutStore::new(memory, "workouts").load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].pace(), Some(6.));
        assert_eq!(loaded[0].coords, Coords(35., 139.));
        assert_eq!(loaded[0].description, "Running on March 5");
    }

    #[test]
    fn non_finite_workout_never_replaces_saved_history() {
        let store = WorkoutStore::new(MemoryStore::new(), "workouts");
        let saved = sample();
        store.save(&saved).unwrap();

        let mut workouts = saved.clone();
        workouts.push(Workout::running(Coords(35.0, 139.0), 1e-300, 1e300, 180.));
        assert_eq!(workouts[2].pace(), Some(f64::INFINITY));
        assert!(matches!(store.save(&workouts), Err(TrackerError::InvalidInput)));

        assert_eq!(store.load(), saved);
    }

    #[test]
    fn storage_errors() {
        let store = WorkoutStore::new(BrokenStore, "workouts");
        assert!(store.load().is_empty());
        assert!(matches!(store.save(&sample()), Err(TrackerError::Storage(_))));
    }

    #[test]
    fn reset_removes_blob() {
        let memory = MemoryStore::new();
        let store = WorkoutStore::new(memory.clone(), "workouts");
        store.save(&sample()).unwrap();
        store.reset().unwrap();
        assert_eq!(memory.get("workouts").unwrap(), None);
        assert!(store.load().is_empty());
    }
}
