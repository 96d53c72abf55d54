//! Workout runner state machine
//!
//! The runner does not own a clock. Something else calls [`WorkoutRunner::tick`] once per
//! second; pausing only flips a flag that `tick` checks, so no timer is ever stopped or
//! restarted and nothing drifts.

use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    error::{Result, TrainerError},
    model::{Slot, WorkoutPlan},
    services::{HistoryTracker, Navigator, FINISH_ROUTE},
};
use super::{RunnerSnapshot, WorkoutEvent};

/// Whether the runner still has slots to time
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerPhase {
    Running,
    Completed,
    Aborted,
}

/// Drives one workout plan through its exercise and rest slots
pub struct WorkoutRunner {
    plan: WorkoutPlan,
    current_exercise_index: usize,
    current_slot: Slot,
    exercise_running_duration: u64,
    workout_time_remaining: u64,
    workout_paused: bool,
    phase: RunnerPhase,
    tracker: Arc<dyn HistoryTracker>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for WorkoutRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutRunner")
            .field("workout", &self.plan.name)
            .field("current_exercise_index", &self.current_exercise_index)
            .field("current_slot", &self.current_slot.name())
            .field("exercise_running_duration", &self.exercise_running_duration)
            .field("workout_time_remaining", &self.workout_time_remaining)
            .field("workout_paused", &self.workout_paused)
            .field("phase", &self.phase)
            .finish()
    }
}

impl WorkoutRunner {
    /// Validate the plan, enter the first exercise and notify the tracker.
    ///
    /// Fails with [`TrainerError::Configuration`] when the plan has no exercises, when an
    /// exercise has no duration, or when the total duration overflows. Nothing is notified
    /// in that case.
    pub fn start(
        plan: WorkoutPlan,
        tracker: Arc<dyn HistoryTracker>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<(Self, WorkoutEvent)> {
        Self::validate(&plan)?;
        let first = plan.exercises[0].clone();

        let runner = Self {
            current_exercise_index: 0,
            current_slot: Slot::Exercise { index: 0, plan: first },
            exercise_running_duration: 0,
            workout_time_remaining: plan.total_workout_duration(),
            workout_paused: false,
            phase: RunnerPhase::Running,
            tracker,
            navigator,
            plan,
        };

        info!(
            "Starting workout {} ({} exercises, {}s)",
            runner.plan.name,
            runner.plan.exercises.len(),
            runner.workout_time_remaining
        );
        runner.tracker.start_tracking(&runner.plan);

        let event = WorkoutEvent::Started { workout: runner.plan.name.clone() };
        Ok((runner, event))
    }

    /// Check that a plan can be run
    pub fn validate(plan: &WorkoutPlan) -> Result<()> {
        if plan.exercises.is_empty() {
            return Err(TrainerError::Configuration(format!(
                "Workout {} has no exercises",
                plan.name
            )));
        }

        if let Some(empty) = plan.exercises.iter().find(|e| e.duration == 0) {
            return Err(TrainerError::Configuration(format!(
                "Exercise {} in workout {} has no duration",
                empty.name(),
                plan.name
            )));
        }

        if plan.checked_total_duration().is_none() {
            return Err(TrainerError::Configuration(format!(
                "Workout {} is too long to run",
                plan.name
            )));
        }

        Ok(())
    }

    /// Advance the workout by one second.
    ///
    /// Returns the transition event when this tick finished the current slot.
    pub fn tick(&mut self) -> Option<WorkoutEvent> {
        if self.workout_paused || self.phase != RunnerPhase::Running {
            return None;
        }

        self.exercise_running_duration += 1;
        self.workout_time_remaining = self.workout_time_remaining.saturating_sub(1);

        if self.exercise_running_duration < self.current_slot.duration() {
            return None;
        }

        Some(self.finish_slot())
    }

    fn finish_slot(&mut self) -> WorkoutEvent {
        let index = self.current_exercise_index;

        if self.current_slot.is_rest() {
            return self.enter_exercise(index + 1);
        }

        debug!("Exercise {} complete", self.current_slot.name());
        self.tracker.exercise_complete(&self.plan.exercises[index]);

        if self.plan.is_last_exercise(index) {
            return self.complete();
        }

        let rest = self.plan.rest_between_exercise;
        if rest == 0 {
            return self.enter_exercise(index + 1);
        }

        debug!("Resting for {}s after exercise {}", rest, index);
        self.current_slot = Slot::Rest { after: index, duration: rest };
        self.exercise_running_duration = 0;
        WorkoutEvent::RestStarted { after: index, duration: rest }
    }

    fn enter_exercise(&mut self, index: usize) -> WorkoutEvent {
        let plan = self.plan.exercises[index].clone();
        let name = plan.name().to_string();
        debug!("Starting exercise {} ({})", index, name);

        self.current_exercise_index = index;
        self.current_slot = Slot::Exercise { index, plan };
        self.exercise_running_duration = 0;
        WorkoutEvent::ExerciseStarted { index, name }
    }

    fn complete(&mut self) -> WorkoutEvent {
        info!("Workout {} complete", self.plan.name);

        self.phase = RunnerPhase::Completed;
        self.workout_time_remaining = 0;
        self.tracker.end_tracking(&self.plan, true);
        self.navigator.navigate(FINISH_ROUTE);

        WorkoutEvent::Completed { workout: self.plan.name.clone() }
    }

    /// Stop counting down; ticks leave every counter untouched until resumed
    pub fn pause(&mut self) -> Option<WorkoutEvent> {
        if self.workout_paused || self.phase != RunnerPhase::Running {
            return None;
        }
        info!("Pausing workout {}", self.plan.name);
        self.workout_paused = true;
        Some(WorkoutEvent::Paused)
    }

    /// Continue from exactly where the workout was paused
    pub fn resume(&mut self) -> Option<WorkoutEvent> {
        if !self.workout_paused || self.phase != RunnerPhase::Running {
            return None;
        }
        info!("Resuming workout {}", self.plan.name);
        self.workout_paused = false;
        Some(WorkoutEvent::Resumed)
    }

    pub fn toggle_pause(&mut self) -> Option<WorkoutEvent> {
        if self.workout_paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Tear down an unfinished workout, recording it as incomplete
    pub fn abort(&mut self) -> Option<WorkoutEvent> {
        if self.phase != RunnerPhase::Running {
            return None;
        }
        info!("Aborting workout {}", self.plan.name);
        self.phase = RunnerPhase::Aborted;
        self.tracker.end_tracking(&self.plan, false);
        Some(WorkoutEvent::Aborted { workout: self.plan.name.clone() })
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn current_exercise_index(&self) -> usize {
        self.current_exercise_index
    }

    pub fn current_slot(&self) -> &Slot {
        &self.current_slot
    }

    pub fn exercise_running_duration(&self) -> u64 {
        self.exercise_running_duration
    }

    pub fn workout_time_remaining(&self) -> u64 {
        self.workout_time_remaining
    }

    pub fn is_paused(&self) -> bool {
        self.workout_paused
    }

    pub fn phase(&self) -> RunnerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunnerPhase::Running
    }

    pub fn snapshot(&self) -> RunnerSnapshot {
        RunnerSnapshot {
            workout: Some(self.plan.name.clone()),
            phase: Some(self.phase),
            paused: self.workout_paused,
            current_exercise_index: Some(self.current_exercise_index),
            current_slot: Some(self.current_slot.clone()),
            exercise_running_duration: self.exercise_running_duration,
            workout_time_remaining: self.workout_time_remaining,
            total_duration: self.plan.total_workout_duration(),
        }
    }
}
