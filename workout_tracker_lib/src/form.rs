use chrono::{DateTime, Utc};

use crate::{
    workout::{Coords, Workout, WorkoutType},
    TrackerError,
};

/// Field values exactly as typed into the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub workout_type: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Input that passed validation and can be turned into a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidInput {
    Running { distance: f64, duration: f64, cadence: f64 },
    Cycling { distance: f64, duration: f64, elevation: f64 },
}

/// Numeric coercion of a form field. Blank is zero, anything unparsable is NaN.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.)
}

impl FormInput {
    pub fn validate(&self) -> Result<ValidInput, TrackerError> {
        let workout_type: WorkoutType = self.workout_type.parse()?;
        let distance = parse_number(&self.distance);
        let duration = parse_number(&self.duration);

        let input = match workout_type {
            WorkoutType::Running => {
                let cadence = parse_number(&self.cadence);
                let values = [distance, duration, cadence];
                if !all_finite(&values) || !all_positive(&values) {
                    return Err(TrackerError::InvalidInput);
                }
                ValidInput::Running { distance, duration, cadence }
            }
            WorkoutType::Cycling => {
                // Elevation only has to be a number: downhill rides are negative.
                let elevation = parse_number(&self.elevation);
                if !all_finite(&[distance, duration, elevation]) || !all_positive(&[distance, duration]) {
                    return Err(TrackerError::InvalidInput);
                }
                ValidInput::Cycling { distance, duration, elevation }
            }
        };

        // Finite inputs can still overflow the derived pace or speed.
        if !input.derived_metric().is_finite() {
            return Err(TrackerError::InvalidInput);
        }
        Ok(input)
    }
}

impl ValidInput {
    fn derived_metric(&self) -> f64 {
        match *self {
            ValidInput::Running { distance, duration, .. } => duration / distance,
            ValidInput::Cycling { distance, duration, .. } => distance / duration / 60.,
        }
    }

    pub fn into_workout(self, coords: Coords, date: DateTime<Utc>) -> Workout {
        match self {
            ValidInput::Running { distance, duration, cadence } => {
                Workout::running_at(date, coords, distance, duration, cadence)
            }
            ValidInput::Cycling { distance, duration, elevation } => {
                Workout::cycling_at(date, coords, distance, duration, elevation)
            }
        }
    }
}
