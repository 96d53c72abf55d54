//! Slots a running workout moves through

use serde::{Deserialize, Serialize};

use super::ExercisePlan;

/// The interval a runner is currently timing: a real exercise or the rest after one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Slot {
    Exercise { index: usize, plan: ExercisePlan },
    Rest { after: usize, duration: u64 },
}

impl Slot {
    pub fn duration(&self) -> u64 {
        match self {
            Slot::Exercise { plan, .. } => plan.duration,
            Slot::Rest { duration, .. } => *duration,
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, Slot::Rest { .. })
    }

    /// The exercise plan behind this slot, `None` while resting
    pub fn exercise_plan(&self) -> Option<&ExercisePlan> {
        match self {
            Slot::Exercise { plan, .. } => Some(plan),
            Slot::Rest { .. } => None,
        }
    }

    /// Display name; rest slots are always called "rest"
    pub fn name(&self) -> &str {
        match self {
            Slot::Exercise { plan, .. } => plan.name(),
            Slot::Rest { .. } => "rest",
        }
    }
}
