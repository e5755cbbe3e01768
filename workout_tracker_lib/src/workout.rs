use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::TrackerError;

/// Latitude and longitude, stored as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords(pub f64, pub f64);

impl Coords {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    pub fn capitalized(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }

    pub fn popup_class(&self) -> String {
        format!("{}-popup", self.as_str())
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            other => Err(TrackerError::UnknownWorkoutType(other.to_owned())),
        }
    }
}

/// Variant specific fields. The derived metric is computed once when the
/// workout is created and stored alongside the raw input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running {
        /// steps/min
        cadence: f64,
        /// min/km
        pace: f64,
    },
    Cycling {
        /// meters
        elevation: f64,
        /// km/h
        speed: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub date: DateTime<Utc>,
    pub coords: Coords,
    /// km
    pub distance: f64,
    /// min
    pub duration: f64,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(default)]
    pub clicks: u32,
    #[serde(flatten)]
    pub kind: WorkoutKind,
}

impl Workout {
    pub fn running(coords: Coords, distance: f64, duration: f64, cadence: f64) -> Self {
        Self::running_at(Utc::now(), coords, distance, duration, cadence)
    }

    pub fn cycling(coords: Coords, distance: f64, duration: f64, elevation: f64) -> Self {
        Self::cycling_at(Utc::now(), coords, distance, duration, elevation)
    }

    pub fn running_at(date: DateTime<Utc>, coords: Coords, distance: f64, duration: f64, cadence: f64) -> Self {
        let pace = duration / distance;
        Self::new(date, coords, distance, duration, WorkoutKind::Running { cadence, pace })
    }

    pub fn cycling_at(date: DateTime<Utc>, coords: Coords, distance: f64, duration: f64, elevation: f64) -> Self {
        // Kept as distance / duration / 60 to stay comparable with stored data.
        let speed = distance / duration / 60.;
        Self::new(date, coords, distance, duration, WorkoutKind::Cycling { elevation, speed })
    }

    fn new(date: DateTime<Utc>, coords: Coords, distance: f64, duration: f64, kind: WorkoutKind) -> Self {
        let workout_type = match kind {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        };

        Self {
            id: date.timestamp_millis().to_string(),
            date,
            coords,
            distance,
            duration,
            description: describe(workout_type, date),
            clicks: 0,
            kind,
        }
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self.kind {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { pace, .. } => Some(pace),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { speed, .. } => Some(speed),
            WorkoutKind::Running { .. } => None,
        }
    }

    /// False when a number overflowed; such a workout cannot be stored as JSON.
    pub fn is_finite(&self) -> bool {
        let extra = match self.kind {
            WorkoutKind::Running { cadence, pace } => [cadence, pace],
            WorkoutKind::Cycling { elevation, speed } => [elevation, speed],
        };
        [self.coords.lat(), self.coords.lng(), self.distance, self.duration]
            .iter()
            .chain(&extra)
            .all(|v| v.is_finite())
    }

    pub fn click(&mut self) {
        self.clicks += 1;
    }
}

/// "Running on October 4". The trailing number is the weekday index
/// (Sunday = 0), not the day of the month; stored descriptions depend on it.
pub fn describe(workout_type: WorkoutType, date: DateTime<Utc>) -> String {
    let local = date.with_timezone(&Local);
    format!(
        "{} on {} {}",
        workout_type.capitalized(),
        local.format("%B"),
        local.weekday().num_days_from_sunday()
    )
}
