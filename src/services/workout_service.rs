//! Workout and exercise catalog service

use std::{collections::BTreeMap, sync::RwLock};
use tracing::{debug, info};

use crate::{
    error::{Result, TrainerError},
    model::{Exercise, WorkoutPlan},
};
use super::Catalog;

/// CRUD access to the workout and exercise catalog
pub trait WorkoutService: Send + Sync {
    fn get_workouts(&self) -> Result<Vec<WorkoutPlan>>;
    fn get_workout(&self, name: &str) -> Result<WorkoutPlan>;
    fn add_workout(&self, workout: WorkoutPlan) -> Result<WorkoutPlan>;
    fn update_workout(&self, workout: WorkoutPlan) -> Result<WorkoutPlan>;
    fn delete_workout(&self, name: &str) -> Result<()>;

    fn get_exercises(&self) -> Result<Vec<Exercise>>;
    fn get_exercise(&self, name: &str) -> Result<Exercise>;
    fn add_exercise(&self, exercise: Exercise) -> Result<Exercise>;
    fn update_exercise(&self, exercise: Exercise) -> Result<Exercise>;
    fn delete_exercise(&self, name: &str) -> Result<()>;
}

#[derive(Debug, Default)]
struct Records {
    workouts: BTreeMap<String, WorkoutPlan>,
    exercises: BTreeMap<String, Exercise>,
}

/// Catalog held in memory, keyed by name
#[derive(Debug, Default)]
pub struct InMemoryWorkoutService {
    records: RwLock<Records>,
}

impl InMemoryWorkoutService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the service from a catalog; later entries replace earlier ones with the same name
    pub fn from_catalog(catalog: Catalog) -> Self {
        let records = Records {
            workouts: catalog.workouts.into_iter().map(|w| (w.name.clone(), w)).collect(),
            exercises: catalog.exercises.into_iter().map(|e| (e.name.clone(), e)).collect(),
        };
        info!(
            "Loaded catalog with {} workouts and {} exercises",
            records.workouts.len(),
            records.exercises.len()
        );
        Self { records: RwLock::new(records) }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Records>> {
        self.records
            .read()
            .map_err(|e| TrainerError::StateLock(format!("catalog: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Records>> {
        self.records
            .write()
            .map_err(|e| TrainerError::StateLock(format!("catalog: {}", e)))
    }
}

impl WorkoutService for InMemoryWorkoutService {
    fn get_workouts(&self) -> Result<Vec<WorkoutPlan>> {
        Ok(self.read()?.workouts.values().cloned().collect())
    }

    fn get_workout(&self, name: &str) -> Result<WorkoutPlan> {
        self.read()?
            .workouts
            .get(name)
            .cloned()
            .ok_or_else(|| TrainerError::workout_not_found(name))
    }

    fn add_workout(&self, workout: WorkoutPlan) -> Result<WorkoutPlan> {
        let mut records = self.write()?;
        if records.workouts.contains_key(&workout.name) {
            return Err(TrainerError::AlreadyExists { kind: "Workout", name: workout.name });
        }
        debug!("Adding workout {}", workout.name);
        records.workouts.insert(workout.name.clone(), workout.clone());
        Ok(workout)
    }

    fn update_workout(&self, workout: WorkoutPlan) -> Result<WorkoutPlan> {
        let mut records = self.write()?;
        match records.workouts.get_mut(&workout.name) {
            Some(existing) => {
                debug!("Updating workout {}", workout.name);
                *existing = workout.clone();
                Ok(workout)
            }
            None => Err(TrainerError::workout_not_found(&workout.name)),
        }
    }

    fn delete_workout(&self, name: &str) -> Result<()> {
        self.write()?
            .workouts
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| TrainerError::workout_not_found(name))
    }

    fn get_exercises(&self) -> Result<Vec<Exercise>> {
        Ok(self.read()?.exercises.values().cloned().collect())
    }

    fn get_exercise(&self, name: &str) -> Result<Exercise> {
        self.read()?
            .exercises
            .get(name)
            .cloned()
            .ok_or_else(|| TrainerError::exercise_not_found(name))
    }

    fn add_exercise(&self, exercise: Exercise) -> Result<Exercise> {
        let mut records = self.write()?;
        if records.exercises.contains_key(&exercise.name) {
            return Err(TrainerError::AlreadyExists { kind: "Exercise", name: exercise.name });
        }
        debug!("Adding exercise {}", exercise.name);
        records.exercises.insert(exercise.name.clone(), exercise.clone());
        Ok(exercise)
    }

    fn update_exercise(&self, exercise: Exercise) -> Result<Exercise> {
        let mut records = self.write()?;
        match records.exercises.get_mut(&exercise.name) {
            Some(existing) => {
                *existing = exercise.clone();
                Ok(exercise)
            }
            None => Err(TrainerError::exercise_not_found(&exercise.name)),
        }
    }

    fn delete_exercise(&self, name: &str) -> Result<()> {
        self.write()?
            .exercises
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| TrainerError::exercise_not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExercisePlan;

    fn service() -> InMemoryWorkoutService {
        InMemoryWorkoutService::from_catalog(Catalog::seven_minute_workout())
    }

    #[test]
    fn unknown_workout_is_not_found() {
        let err = service().get_workout("missing").unwrap_err();
        assert_eq!(err, TrainerError::workout_not_found("missing"));
    }

    #[test]
    fn add_rejects_duplicates() {
        let service = service();
        let existing = service.get_workout("7MinWorkout").unwrap();

        let err = service.add_workout(existing).unwrap_err();
        assert!(matches!(err, TrainerError::AlreadyExists { kind: "Workout", .. }));
    }

    #[test]
    fn update_replaces_stored_workout() {
        let service = service();
        let mut workout = service.get_workout("7MinWorkout").unwrap();
        workout.rest_between_exercise = 5;
        workout.exercises.truncate(2);

        service.update_workout(workout).unwrap();

        let stored = service.get_workout("7MinWorkout").unwrap();
        assert_eq!(stored.rest_between_exercise, 5);
        assert_eq!(stored.exercises.len(), 2);
    }

    #[test]
    fn update_of_unknown_exercise_fails() {
        let err = service()
            .update_exercise(crate::model::Exercise::new("nope", "Nope", "", "", ""))
            .unwrap_err();
        assert_eq!(err, TrainerError::exercise_not_found("nope"));
    }

    #[test]
    fn delete_removes_records() {
        let service = service();
        let exercise = service.get_exercises().unwrap().remove(0);
        let workout = WorkoutPlan::new(
            "short",
            "Short",
            0,
            vec![ExercisePlan::new(exercise.clone(), 10)],
            "",
        );
        service.add_workout(workout).unwrap();

        service.delete_workout("short").unwrap();
        service.delete_exercise(&exercise.name).unwrap();

        assert!(service.get_workout("short").is_err());
        assert!(service.get_exercise(&exercise.name).is_err());
        assert!(service.delete_workout("short").is_err());
    }
}
