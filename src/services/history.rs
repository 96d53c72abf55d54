//! Workout history tracking

use std::{collections::VecDeque, sync::Mutex};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::model::{ExercisePlan, WorkoutPlan};

/// Receives lifecycle notifications from a running workout
pub trait HistoryTracker: Send + Sync {
    fn start_tracking(&self, plan: &WorkoutPlan);
    fn exercise_complete(&self, exercise: &ExercisePlan);
    fn end_tracking(&self, plan: &WorkoutPlan, completed: bool);
}

/// One tracked workout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutLogEntry {
    pub id: u64,
    pub workout: String,
    pub started_on: DateTime<Utc>,
    pub ended_on: Option<DateTime<Utc>>,
    pub last_exercise: Option<String>,
    pub exercises_done: u32,
    pub completed: bool,
}

/// Sessions kept by [`InMemoryHistoryTracker::new`]
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Default)]
struct TrackerState {
    log: VecDeque<WorkoutLogEntry>,
    current: Option<usize>,
    next_id: u64,
}

/// History tracker that keeps the most recent sessions in memory
#[derive(Debug)]
pub struct InMemoryHistoryTracker {
    state: Mutex<TrackerState>,
    limit: usize,
}

impl Default for InMemoryHistoryTracker {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl InMemoryHistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` sessions (at least one); older entries are dropped first
    pub fn with_limit(limit: usize) -> Self {
        Self {
            state: Mutex::new(TrackerState::default()),
            limit: limit.max(1),
        }
    }

    /// Tracked sessions, newest first
    pub fn history(&self) -> Vec<WorkoutLogEntry> {
        match self.state.lock() {
            Ok(state) => state.log.iter().rev().cloned().collect(),
            Err(e) => {
                warn!("Failed to lock workout history: {}", e);
                Vec::new()
            }
        }
    }

    /// Whether a session has started and not yet ended
    pub fn is_tracking(&self) -> bool {
        self.state.lock().map(|s| s.current.is_some()).unwrap_or(false)
    }

    fn with_current<F>(&self, action: &str, update: F)
    where
        F: FnOnce(&mut WorkoutLogEntry),
    {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(e) => {
                warn!("Failed to lock workout history for {}: {}", action, e);
                return;
            }
        };

        let current = state.current;
        match current {
            Some(index) => update(&mut state.log[index]),
            None => debug!("Ignoring {} with no tracked workout", action),
        }
    }
}

impl HistoryTracker for InMemoryHistoryTracker {
    fn start_tracking(&self, plan: &WorkoutPlan) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(e) => {
                warn!("Failed to lock workout history: {}", e);
                return;
            }
        };

        state.next_id += 1;
        let entry = WorkoutLogEntry {
            id: state.next_id,
            workout: plan.name.clone(),
            started_on: Utc::now(),
            ended_on: None,
            last_exercise: None,
            exercises_done: 0,
            completed: false,
        };
        state.log.push_back(entry);
        while state.log.len() > self.limit {
            if let Some(dropped) = state.log.pop_front() {
                debug!("Dropping log entry {} from workout history", dropped.id);
            }
        }
        state.current = Some(state.log.len() - 1);

        info!("Tracking workout {} (log entry {})", plan.name, state.next_id);
    }

    fn exercise_complete(&self, exercise: &ExercisePlan) {
        self.with_current("exercise completion", |entry| {
            entry.last_exercise = Some(exercise.name().to_string());
            entry.exercises_done += 1;
        });
    }

    fn end_tracking(&self, plan: &WorkoutPlan, completed: bool) {
        self.with_current("end of workout", |entry| {
            entry.completed = completed;
            entry.ended_on = Some(Utc::now());
        });

        if let Ok(mut state) = self.state.lock() {
            state.current = None;
        }

        info!("Stopped tracking workout {} (completed: {})", plan.name, completed);
    }
}
