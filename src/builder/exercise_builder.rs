//! Exercise builder

use std::sync::Arc;
use tracing::info;

use crate::{
    error::Result,
    model::Exercise,
    services::WorkoutService,
};

/// Builds a new exercise or edits an existing one
pub struct ExerciseBuilder {
    workouts: Arc<dyn WorkoutService>,
    building: Exercise,
    new_exercise: bool,
}

impl ExerciseBuilder {
    pub fn start_building_new(workouts: Arc<dyn WorkoutService>) -> Self {
        Self { workouts, building: Exercise::blank(), new_exercise: true }
    }

    pub fn start_building_existing(workouts: Arc<dyn WorkoutService>, name: &str) -> Result<Self> {
        let building = workouts.get_exercise(name)?;
        Ok(Self { workouts, building, new_exercise: false })
    }

    pub fn exercise(&self) -> &Exercise {
        &self.building
    }

    pub fn exercise_mut(&mut self) -> &mut Exercise {
        &mut self.building
    }

    pub fn save(&mut self) -> Result<Exercise> {
        let saved = if self.new_exercise {
            self.workouts.add_exercise(self.building.clone())?
        } else {
            self.workouts.update_exercise(self.building.clone())?
        };

        info!("Saved exercise {}", saved.name);
        self.new_exercise = false;
        Ok(saved)
    }

    pub fn delete(&self) -> Result<()> {
        info!("Deleting exercise {}", self.building.name);
        self.workouts.delete_exercise(&self.building.name)
    }

    /// Append an empty video slot to fill in
    pub fn add_video(&mut self) {
        self.building.videos.push(String::new());
    }

    pub fn delete_video(&mut self, index: usize) {
        if index < self.building.videos.len() {
            self.building.videos.remove(index);
        }
    }

    /// Only stored exercises can be deleted
    pub fn can_delete_exercise(&self) -> bool {
        !self.new_exercise
    }
}
