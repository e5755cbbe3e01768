use crate::workout::{Coords, Workout, WorkoutKind};

/// How a workout marker and its popup look on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub opacity: f64,
    pub max_width: f64,
    pub min_width: f64,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

impl MarkerStyle {
    pub fn for_workout(workout: &Workout) -> Self {
        Self {
            opacity: 0.8,
            max_width: 250.,
            min_width: 100.,
            auto_close: false,
            close_on_click: false,
            class_name: workout.workout_type().popup_class(),
        }
    }
}

pub fn popup_content(workout: &Workout) -> String {
    format!("{} {}", workout.workout_type().emoji(), workout.description)
}

/// One icon/value/unit row of a list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Detail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// Rows shown under the title of a list entry. Derived values get one decimal,
/// user input is shown as entered.
pub fn details(workout: &Workout) -> Vec<Detail> {
    let mut rows = vec![
        Detail::new(workout.workout_type().emoji(), workout.distance.to_string(), "km"),
        Detail::new("⏱", workout.duration.to_string(), "min"),
    ];

    match workout.kind {
        WorkoutKind::Running { cadence, pace } => {
            rows.push(Detail::new("⚡️", format!("{pace:.1}"), "min/km"));
            rows.push(Detail::new("🦶🏼", cadence.to_string(), "spm"));
        }
        WorkoutKind::Cycling { elevation, speed } => {
            rows.push(Detail::new("⚡️", format!("{speed:.1}"), "km/h"));
            rows.push(Detail::new("⛰", elevation.to_string(), "m"));
        }
    }

    rows
}

/// CSS class of a list entry, `workout workout--running` and so on.
pub fn entry_class(workout: &Workout) -> String {
    format!("workout workout--{}", workout.workout_type())
}

pub fn maps_link(coords: Coords) -> String {
    format!("https://www.google.co.jp/maps/@{},{}", coords.lat(), coords.lng())
}
