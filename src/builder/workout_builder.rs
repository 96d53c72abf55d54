//! Workout plan builder

use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    error::{Result, TrainerError},
    model::{ExercisePlan, WorkoutPlan},
    services::WorkoutService,
    validation::RemoteValidator,
};

/// Error key reported when a workout name is already taken
pub const WORKOUT_NAME_ERROR_KEY: &str = "workoutname";

const DEFAULT_REST_BETWEEN_EXERCISE: u64 = 30;

/// Builds a new workout plan or edits an existing one
pub struct WorkoutBuilder {
    workouts: Arc<dyn WorkoutService>,
    building: WorkoutPlan,
    /// Stored name of the plan being edited; `None` until a new plan is first saved
    original_name: Option<String>,
}

impl WorkoutBuilder {
    /// Start with an empty plan
    pub fn start_building_new(workouts: Arc<dyn WorkoutService>) -> Self {
        Self {
            workouts,
            building: WorkoutPlan::new("", "", DEFAULT_REST_BETWEEN_EXERCISE, Vec::new(), ""),
            original_name: None,
        }
    }

    /// Start from a copy of a stored plan
    pub fn start_building_existing(workouts: Arc<dyn WorkoutService>, name: &str) -> Result<Self> {
        let building = workouts.get_workout(name)?;
        debug!("Editing workout {}", name);
        Ok(Self { workouts, building, original_name: Some(name.to_string()) })
    }

    pub fn workout(&self) -> &WorkoutPlan {
        &self.building
    }

    pub fn workout_mut(&mut self) -> &mut WorkoutPlan {
        &mut self.building
    }

    pub fn is_new(&self) -> bool {
        self.original_name.is_none()
    }

    pub fn add_exercise(&mut self, exercise: ExercisePlan) {
        self.building.exercises.push(exercise);
    }

    /// Remove the first exercise with the given name
    pub fn remove_exercise(&mut self, name: &str) -> Option<ExercisePlan> {
        let index = self.position_of(name)?;
        Some(self.building.exercises.remove(index))
    }

    /// Move the named exercise to `to_index`; out of range targets are ignored
    pub fn move_exercise_to(&mut self, name: &str, to_index: usize) -> bool {
        if to_index >= self.building.exercises.len() {
            return false;
        }
        let Some(from) = self.position_of(name) else {
            return false;
        };

        let exercise = self.building.exercises.remove(from);
        self.building.exercises.insert(to_index, exercise);
        true
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.building.exercises.iter().position(|e| e.name() == name)
    }

    /// Add the plan if it is new, otherwise update the stored one.
    ///
    /// Renaming an existing plan moves it to the new name, which must not belong to
    /// another plan.
    pub fn save(&mut self) -> Result<WorkoutPlan> {
        let saved = match self.original_name.as_deref() {
            None => self.workouts.add_workout(self.building.clone())?,
            Some(original) if original == self.building.name => {
                self.workouts.update_workout(self.building.clone())?
            }
            Some(original) => {
                if self.workouts.get_workout(&self.building.name).is_ok() {
                    return Err(TrainerError::AlreadyExists {
                        kind: "Workout",
                        name: self.building.name.clone(),
                    });
                }
                debug!("Renaming workout {} to {}", original, self.building.name);
                let saved = self.workouts.add_workout(self.building.clone())?;
                self.workouts.delete_workout(original)?;
                saved
            }
        };

        info!("Saved workout {}", saved.name);
        self.original_name = Some(saved.name.clone());
        Ok(saved)
    }

    /// Whether `name` can be used for the plan being built
    pub fn validate_workout_name(&self, name: &str) -> bool {
        is_workout_name_available(self.workouts.as_ref(), name, self.original_name())
    }

    fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }

    /// Remote validator for the name field of this builder's form
    pub fn name_validator(&self) -> RemoteValidator {
        let workouts = Arc::clone(&self.workouts);
        let original = self.original_name().map(str::to_string);

        RemoteValidator::new(WORKOUT_NAME_ERROR_KEY, move |name: String| {
            let available = is_workout_name_available(workouts.as_ref(), &name, original.as_deref());
            async move { Ok::<_, anyhow::Error>(available) }
        })
    }
}

/// A name is available when it is non-empty and unused, or already belongs to the plan
/// being edited
pub fn is_workout_name_available(
    workouts: &dyn WorkoutService,
    name: &str,
    editing: Option<&str>,
) -> bool {
    if name.trim().is_empty() {
        return false;
    }
    if editing == Some(name) {
        return true;
    }
    workouts.get_workout(name).is_err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::TrainerError,
        model::Exercise,
        services::{Catalog, InMemoryWorkoutService},
        validation::ValidatedField,
    };

    fn service() -> Arc<dyn WorkoutService> {
        Arc::new(InMemoryWorkoutService::from_catalog(Catalog::seven_minute_workout()))
    }

    fn exercise(name: &str, duration: u64) -> ExercisePlan {
        ExercisePlan::new(Exercise::new(name, name, "", "", ""), duration)
    }

    #[test]
    fn new_workout_starts_empty_with_default_rest() {
        let builder = WorkoutBuilder::start_building_new(service());

        assert!(builder.is_new());
        assert!(builder.workout().exercises.is_empty());
        assert_eq!(builder.workout().rest_between_exercise, 30);
    }

    #[test]
    fn existing_workout_must_exist() {
        let err = WorkoutBuilder::start_building_existing(service(), "missing").err();
        assert_eq!(err, Some(TrainerError::workout_not_found("missing")));
    }

    #[test]
    fn exercises_can_be_reordered_and_removed() {
        let mut builder = WorkoutBuilder::start_building_new(service());
        builder.add_exercise(exercise("a", 10));
        builder.add_exercise(exercise("b", 10));
        builder.add_exercise(exercise("c", 10));

        assert!(builder.move_exercise_to("c", 0));
        assert!(!builder.move_exercise_to("a", 3));
        assert!(!builder.move_exercise_to("missing", 1));
        let names: Vec<_> = builder.workout().exercises.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);

        assert_eq!(builder.remove_exercise("a").map(|e| e.name().to_string()), Some("a".into()));
        assert!(builder.remove_exercise("a").is_none());
        assert_eq!(builder.workout().exercises.len(), 2);
    }

    #[test]
    fn save_adds_then_updates() {
        let workouts = service();
        let mut builder = WorkoutBuilder::start_building_new(Arc::clone(&workouts));
        builder.workout_mut().name = "legday".into();
        builder.workout_mut().title = "Leg Day".into();
        builder.add_exercise(exercise("squat", 45));

        builder.save().unwrap();
        assert!(!builder.is_new());

        builder.workout_mut().rest_between_exercise = 15;
        builder.save().unwrap();
        assert_eq!(workouts.get_workout("legday").unwrap().rest_between_exercise, 15);
    }

    #[test]
    fn save_propagates_service_errors() {
        let mut builder = WorkoutBuilder::start_building_new(service());
        builder.workout_mut().name = "7MinWorkout".into();

        let err = builder.save().unwrap_err();
        assert!(matches!(err, TrainerError::AlreadyExists { .. }));
        assert!(builder.is_new());
    }

    #[test]
    fn workout_name_must_be_unused() {
        let new_builder = WorkoutBuilder::start_building_new(service());
        assert!(!new_builder.validate_workout_name("7MinWorkout"));
        assert!(!new_builder.validate_workout_name("  "));
        assert!(new_builder.validate_workout_name("6MinWorkout"));

        let editing = WorkoutBuilder::start_building_existing(service(), "7MinWorkout").unwrap();
        assert!(editing.validate_workout_name("7MinWorkout"));
    }

    fn save_leg_day(workouts: &Arc<dyn WorkoutService>) {
        let mut builder = WorkoutBuilder::start_building_new(Arc::clone(workouts));
        builder.workout_mut().name = "legday".into();
        builder.workout_mut().title = "Leg Day".into();
        builder.add_exercise(exercise("squat", 45));
        builder.save().unwrap();
    }

    #[test]
    fn renaming_onto_another_workout_is_rejected() {
        let workouts = service();
        save_leg_day(&workouts);
        let mut builder = WorkoutBuilder::start_building_existing(Arc::clone(&workouts), "7MinWorkout").unwrap();
        builder.workout_mut().name = "legday".into();

        assert!(!builder.validate_workout_name("legday"));
        assert!(builder.validate_workout_name("7MinWorkout"));

        let err = builder.save().unwrap_err();
        assert_eq!(err, TrainerError::AlreadyExists { kind: "Workout", name: "legday".into() });

        let leg_day = workouts.get_workout("legday").unwrap();
        assert_eq!(leg_day.title, "Leg Day");
        assert_eq!(leg_day.exercises.len(), 1);
        assert_eq!(workouts.get_workout("7MinWorkout").unwrap().exercises.len(), 12);
    }

    #[test]
    fn renaming_to_a_free_name_moves_the_workout() {
        let workouts = service();
        let mut builder = WorkoutBuilder::start_building_existing(Arc::clone(&workouts), "7MinWorkout").unwrap();
        builder.workout_mut().name = "8MinWorkout".into();

        builder.save().unwrap();

        assert!(workouts.get_workout("7MinWorkout").is_err());
        assert_eq!(workouts.get_workout("8MinWorkout").unwrap().exercises.len(), 12);
        assert!(builder.validate_workout_name("8MinWorkout"));
        assert!(!builder.is_new());
    }

    #[tokio::test]
    async fn name_validator_keeps_the_loaded_name_after_a_rename() {
        let workouts = service();
        save_leg_day(&workouts);
        let mut builder = WorkoutBuilder::start_building_existing(Arc::clone(&workouts), "7MinWorkout").unwrap();
        builder.workout_mut().name = "legday".into();
        let mut field = ValidatedField::new(builder.name_validator());

        field.set_value("legday");
        field.settled().await;

        assert!(field.has_error(WORKOUT_NAME_ERROR_KEY));
        assert_eq!(field.errors(), vec![WORKOUT_NAME_ERROR_KEY.to_string()]);
    }

    #[tokio::test]
    async fn name_validator_flags_taken_names() {
        let builder = WorkoutBuilder::start_building_new(service());
        let mut field = ValidatedField::new(builder.name_validator());

        field.set_value("7MinWorkout");
        field.settled().await;
        assert!(field.has_error(WORKOUT_NAME_ERROR_KEY));

        field.set_value("6MinWorkout");
        field.settled().await;
        assert!(field.is_valid());
    }
}
