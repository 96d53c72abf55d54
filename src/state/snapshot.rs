//! Runner snapshot published to watchers and the status endpoint

use serde::{Deserialize, Serialize};

use crate::model::Slot;
use super::RunnerPhase;

/// Point-in-time copy of the runner counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerSnapshot {
    pub workout: Option<String>,
    pub phase: Option<RunnerPhase>,
    pub paused: bool,
    pub current_exercise_index: Option<usize>,
    pub current_slot: Option<Slot>,
    pub exercise_running_duration: u64,
    pub workout_time_remaining: u64,
    pub total_duration: u64,
}

impl RunnerSnapshot {
    /// Snapshot for when no workout has been started
    pub fn idle() -> Self {
        Self::default()
    }

    /// Check if a workout is counting down right now
    pub fn is_active(&self) -> bool {
        self.phase == Some(RunnerPhase::Running) && !self.paused
    }

    /// Seconds left in the current slot
    pub fn slot_time_remaining(&self) -> Option<u64> {
        self.current_slot
            .as_ref()
            .map(|slot| slot.duration().saturating_sub(self.exercise_running_duration))
    }
}
