//! Workout clock background task

use std::sync::Arc;
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::{app_state::TickStatus, AppState, SessionChange};

/// Subscribe to session changes and spawn the clock task.
///
/// The subscription is taken before spawning so a session started right after this call
/// is never missed.
pub fn spawn_workout_clock(state: Arc<AppState>) -> JoinHandle<()> {
    let session_rx = state.session_tx.subscribe();
    tokio::spawn(workout_clock_task(state, session_rx))
}

/// Background task that ticks the active workout runner once per period.
///
/// Each session gets exactly one interval. It is dropped when the workout completes or
/// the session is stopped, and also when a newer session replaces it.
async fn workout_clock_task(
    state: Arc<AppState>,
    mut session_rx: broadcast::Receiver<SessionChange>,
) {
    info!("Starting workout clock task (period {:?})", state.tick_period);

    let mut next_session: Option<u64> = None;

    loop {
        let generation = match next_session.take() {
            Some(generation) => generation,
            None => match session_rx.recv().await {
                Ok(SessionChange::Started { generation }) => {
                    match state.current_generation() {
                        Ok(current) if current > generation => {
                            debug!("Skipping start of superseded session {}", generation);
                            continue;
                        }
                        Ok(_) => generation,
                        Err(e) => {
                            error!("Failed to read current session: {}", e);
                            continue;
                        }
                    }
                }
                Ok(SessionChange::Stopped { .. }) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Workout clock lagged behind {} session changes", skipped);
                    match state.current_generation() {
                        Ok(generation) => generation,
                        Err(e) => {
                            error!("Failed to read current session: {}", e);
                            continue;
                        }
                    }
                }
                Err(RecvError::Closed) => break,
            },
        };

        info!("Clock running for session {}", generation);

        let period = state.tick_period;
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick_runner(generation) {
                        Ok(TickStatus::Running) => {}
                        Ok(TickStatus::Finished) => {
                            debug!("Session {} finished", generation);
                            break;
                        }
                        Err(e) => {
                            error!("Failed to tick workout runner: {}", e);
                            break;
                        }
                    }
                }

                change = session_rx.recv() => {
                    match change {
                        Ok(SessionChange::Started { generation: newer }) if newer > generation => {
                            info!("Session {} replaced by session {}", generation, newer);
                            next_session = Some(newer);
                            break;
                        }
                        Ok(SessionChange::Started { generation: stale }) => {
                            debug!("Ignoring late start of session {} during session {}", stale, generation);
                        }
                        Ok(SessionChange::Stopped { generation: stopped }) if stopped == generation => {
                            info!("Session {} stopped", generation);
                            break;
                        }
                        Ok(SessionChange::Stopped { .. }) => {}
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Workout clock lagged behind {} session changes", skipped);
                            if let Ok(current) = state.current_generation() {
                                if current != generation {
                                    next_session = Some(current);
                                    break;
                                }
                            }
                        }
                        Err(RecvError::Closed) => return,
                    }
                }
            }
        }
    }

    info!("Workout clock task stopped");
}
