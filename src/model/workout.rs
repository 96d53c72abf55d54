//! Workout plans and their exercise schedule

use serde::{Deserialize, Serialize};

use super::Exercise;

/// One exercise paired with its allotted duration within a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExercisePlan {
    pub exercise: Exercise,
    /// Duration in seconds
    pub duration: u64,
}

impl ExercisePlan {
    pub fn new(exercise: Exercise, duration: u64) -> Self {
        Self { exercise, duration }
    }

    pub fn name(&self) -> &str {
        &self.exercise.name
    }
}

/// Ordered list of exercises plus timing metadata for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub name: String,
    pub title: String,
    /// Rest inserted between consecutive exercises, in seconds
    pub rest_between_exercise: u64,
    pub exercises: Vec<ExercisePlan>,
    #[serde(default)]
    pub description: String,
}

impl WorkoutPlan {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        rest_between_exercise: u64,
        exercises: Vec<ExercisePlan>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            rest_between_exercise,
            exercises,
            description: description.into(),
        }
    }

    /// Sum of all exercise durations plus the rest between them, saturating at `u64::MAX`
    pub fn total_workout_duration(&self) -> u64 {
        self.checked_total_duration().unwrap_or(u64::MAX)
    }

    /// Total duration, or `None` if it does not fit in a `u64`
    pub fn checked_total_duration(&self) -> Option<u64> {
        let Some(gaps) = self.exercises.len().checked_sub(1) else {
            return Some(0);
        };

        let rests = u64::try_from(gaps).ok()?.checked_mul(self.rest_between_exercise)?;
        self.exercises
            .iter()
            .try_fold(rests, |total, e| total.checked_add(e.duration))
    }

    pub fn is_last_exercise(&self, index: usize) -> bool {
        index + 1 == self.exercises.len()
    }
}
