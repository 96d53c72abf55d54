//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    error::{Result, TrainerError},
    model::WorkoutPlan,
    services::{InMemoryHistoryTracker, RouteRecorder, WorkoutService},
};
use super::{RunnerSnapshot, WorkoutEvent, WorkoutRunner};

/// Session lifecycle notifications consumed by the workout clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    Started { generation: u64 },
    Stopped { generation: u64 },
}

/// Result of applying one clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Finished,
}

#[derive(Debug, Default)]
struct Session {
    generation: u64,
    runner: Option<WorkoutRunner>,
}

/// Main application state that owns the active workout runner and its collaborators
pub struct AppState {
    /// Collaborators
    pub workouts: Arc<dyn WorkoutService>,
    pub tracker: Arc<InMemoryHistoryTracker>,
    pub navigator: Arc<RouteRecorder>,
    /// Clock period for the workout runner
    pub tick_period: Duration,
    session: Mutex<Session>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for session start/stop notifications
    pub session_tx: broadcast::Sender<SessionChange>,
    /// Channel for runner lifecycle events
    pub event_tx: broadcast::Sender<WorkoutEvent>,
    /// Channel for runner snapshots
    pub snapshot_tx: watch::Sender<RunnerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<RunnerSnapshot>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tick_period", &self.tick_period)
            .field("port", &self.port)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create a new AppState around the given catalog
    pub fn new(
        workouts: Arc<dyn WorkoutService>,
        tick_period: Duration,
        port: u16,
        host: String,
    ) -> Self {
        let (session_tx, _) = broadcast::channel(16);
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(RunnerSnapshot::idle());

        Self {
            workouts,
            tracker: Arc::new(InMemoryHistoryTracker::new()),
            navigator: Arc::new(RouteRecorder::new()),
            tick_period,
            session: Mutex::new(Session::default()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            session_tx,
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    fn lock_session(&self) -> Result<MutexGuard<'_, Session>> {
        self.session
            .lock()
            .map_err(|e| TrainerError::StateLock(format!("workout session: {}", e)))
    }

    /// Look up a workout by name and start running it, replacing any active session
    pub fn start_workout(&self, name: &str) -> Result<RunnerSnapshot> {
        let plan = self.workouts.get_workout(name)?;
        self.start_plan(plan)
    }

    /// Start running the given plan, replacing any active session
    pub fn start_plan(&self, plan: WorkoutPlan) -> Result<RunnerSnapshot> {
        WorkoutRunner::validate(&plan)?;

        let mut session = self.lock_session()?;
        // The old session must end before the tracker sees the new one start
        if let Some(aborted) = session.runner.as_mut().and_then(|r| r.abort()) {
            info!("Replacing running workout");
            self.publish_event(aborted);
        }

        let (runner, started) =
            WorkoutRunner::start(plan, self.tracker.clone(), self.navigator.clone())?;

        session.generation += 1;
        let generation = session.generation;
        let workout = runner.plan().name.clone();
        let snapshot = runner.snapshot();
        session.runner = Some(runner);
        drop(session); // Release the lock early

        self.publish_snapshot(snapshot.clone());
        self.publish_event(started);
        self.record_action(&format!("start:{}", workout));

        if let Err(e) = self.session_tx.send(SessionChange::Started { generation }) {
            warn!("Failed to send session start notification: {}", e);
        }

        Ok(snapshot)
    }

    /// Apply one clock tick to the runner of session `generation`
    pub fn tick_runner(&self, generation: u64) -> Result<TickStatus> {
        let mut session = self.lock_session()?;
        if session.generation != generation {
            debug!("Ignoring tick for stale session {}", generation);
            return Ok(TickStatus::Finished);
        }

        let runner = match session.runner.as_mut() {
            Some(runner) => runner,
            None => return Ok(TickStatus::Finished),
        };

        let event = runner.tick();
        let snapshot = runner.snapshot();
        let status = if runner.is_running() { TickStatus::Running } else { TickStatus::Finished };
        drop(session);

        self.publish_snapshot(snapshot);
        if let Some(event) = event {
            self.publish_event(event);
        }

        Ok(status)
    }

    pub fn pause(&self) -> Result<RunnerSnapshot> {
        self.command("pause", WorkoutRunner::pause).map(|(snapshot, _)| snapshot)
    }

    pub fn resume(&self) -> Result<RunnerSnapshot> {
        self.command("resume", WorkoutRunner::resume).map(|(snapshot, _)| snapshot)
    }

    pub fn toggle_pause(&self) -> Result<RunnerSnapshot> {
        self.command("toggle", WorkoutRunner::toggle_pause).map(|(snapshot, _)| snapshot)
    }

    /// Abort the running workout and stop its clock
    pub fn stop(&self) -> Result<RunnerSnapshot> {
        let (snapshot, generation) = self.command("stop", WorkoutRunner::abort)?;

        if let Err(e) = self.session_tx.send(SessionChange::Stopped { generation }) {
            warn!("Failed to send session stop notification: {}", e);
        }

        Ok(snapshot)
    }

    /// Apply a command to the running workout; returns the new snapshot and the session generation
    fn command<F>(&self, action: &str, apply: F) -> Result<(RunnerSnapshot, u64)>
    where
        F: FnOnce(&mut WorkoutRunner) -> Option<WorkoutEvent>,
    {
        let mut session = self.lock_session()?;
        let generation = session.generation;
        let runner = session
            .runner
            .as_mut()
            .filter(|r| r.is_running())
            .ok_or(TrainerError::NoActiveWorkout)?;

        let event = apply(runner);
        let snapshot = runner.snapshot();
        drop(session);

        self.record_action(action);
        if let Some(event) = event {
            self.publish_snapshot(snapshot.clone());
            self.publish_event(event);
        }

        Ok((snapshot, generation))
    }

    /// Get the current runner snapshot
    pub fn snapshot(&self) -> Result<RunnerSnapshot> {
        Ok(self
            .lock_session()?
            .runner
            .as_ref()
            .map(WorkoutRunner::snapshot)
            .unwrap_or_else(RunnerSnapshot::idle))
    }

    pub fn current_generation(&self) -> Result<u64> {
        Ok(self.lock_session()?.generation)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<WorkoutEvent> {
        self.event_tx.subscribe()
    }

    pub fn subscribe_snapshots(&self) -> watch::Receiver<RunnerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    fn publish_snapshot(&self, snapshot: RunnerSnapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to send runner snapshot: {}", e);
        }
    }

    fn publish_event(&self, event: WorkoutEvent) {
        debug!("Workout event: {:?}", event);
        // No subscribers is not an error
        let _ = self.event_tx.send(event);
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{Exercise, ExercisePlan},
        services::{Catalog, InMemoryWorkoutService, FINISH_ROUTE},
        state::RunnerPhase,
    };

    fn app_state() -> AppState {
        let service = InMemoryWorkoutService::from_catalog(Catalog::seven_minute_workout());
        service
            .add_workout(WorkoutPlan::new(
                "quick",
                "Quick",
                1,
                vec![
                    ExercisePlan::new(Exercise::new("a", "A", "", "", ""), 2),
                    ExercisePlan::new(Exercise::new("b", "B", "", "", ""), 2),
                ],
                "",
            ))
            .unwrap();
        service
            .add_workout(WorkoutPlan::new("empty", "Empty", 10, Vec::new(), ""))
            .unwrap();
        AppState::new(Arc::new(service), Duration::from_secs(1), 0, "127.0.0.1".into())
    }

    #[test]
    fn start_unknown_workout_is_not_found() {
        let err = app_state().start_workout("missing").unwrap_err();
        assert_eq!(err, TrainerError::workout_not_found("missing"));
    }

    #[test]
    fn start_empty_workout_is_a_configuration_error() {
        let state = app_state();
        let err = state.start_workout("empty").unwrap_err();

        assert!(matches!(err, TrainerError::Configuration(_)));
        assert_eq!(state.current_generation().unwrap(), 0);
        assert!(state.tracker.history().is_empty());
    }

    #[test]
    fn commands_without_a_session_fail() {
        let state = app_state();
        assert_eq!(state.pause().unwrap_err(), TrainerError::NoActiveWorkout);
        assert_eq!(state.resume().unwrap_err(), TrainerError::NoActiveWorkout);
        assert_eq!(state.stop().unwrap_err(), TrainerError::NoActiveWorkout);
        assert_eq!(state.snapshot().unwrap(), RunnerSnapshot::idle());
    }

    #[test]
    fn ticks_drive_the_session_to_completion() {
        let state = app_state();
        let mut events = state.subscribe_events();
        state.start_workout("quick").unwrap();
        let generation = state.current_generation().unwrap();

        let statuses: Vec<_> = (0..5).map(|_| state.tick_runner(generation).unwrap()).collect();

        assert_eq!(statuses[3], TickStatus::Running);
        assert_eq!(statuses[4], TickStatus::Finished);
        assert_eq!(state.snapshot().unwrap().phase, Some(RunnerPhase::Completed));
        assert_eq!(state.navigator.navigation_count(FINISH_ROUTE), 1);
        assert_eq!(state.subscribe_snapshots().borrow().workout_time_remaining, 0);

        assert_eq!(events.try_recv().unwrap(), WorkoutEvent::Started { workout: "quick".into() });
        assert!(matches!(events.try_recv().unwrap(), WorkoutEvent::RestStarted { after: 0, .. }));
    }

    #[test]
    fn ticks_for_a_replaced_session_are_ignored() {
        let state = app_state();
        state.start_workout("quick").unwrap();
        let old = state.current_generation().unwrap();
        state.start_workout("7MinWorkout").unwrap();

        assert_eq!(state.tick_runner(old).unwrap(), TickStatus::Finished);
        assert_eq!(state.snapshot().unwrap().exercise_running_duration, 0);

        let history = state.tracker.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].workout, "quick");
        assert!(!history[1].completed);
    }

    #[test]
    fn pause_records_last_action() {
        let state = app_state();
        state.start_workout("quick").unwrap();

        let snapshot = state.pause().unwrap();

        assert!(snapshot.paused);
        assert_eq!(state.get_last_action().0.as_deref(), Some("pause"));
        let generation = state.current_generation().unwrap();
        state.tick_runner(generation).unwrap();
        assert_eq!(state.snapshot().unwrap().workout_time_remaining, 5);
    }

    #[test]
    fn stop_aborts_and_rejects_further_commands() {
        let state = app_state();
        state.start_workout("quick").unwrap();

        let snapshot = state.stop().unwrap();

        assert_eq!(snapshot.phase, Some(RunnerPhase::Aborted));
        assert_eq!(state.pause().unwrap_err(), TrainerError::NoActiveWorkout);
        assert!(!state.tracker.history()[0].completed);
    }
}
