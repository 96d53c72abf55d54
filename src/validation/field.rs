//! Form field with remote validation

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::RemoteValidator;

#[derive(Debug, Default)]
struct FieldState {
    value: String,
    errors: BTreeSet<String>,
    generation: u64,
    pending: bool,
}

/// A single form value checked by a [`RemoteValidator`] whenever it changes
#[derive(Debug)]
pub struct ValidatedField {
    validator: RemoteValidator,
    state: Arc<Mutex<FieldState>>,
    task: Option<JoinHandle<()>>,
}

impl ValidatedField {
    pub fn new(validator: RemoteValidator) -> Self {
        Self {
            validator,
            state: Arc::new(Mutex::new(FieldState::default())),
            task: None,
        }
    }

    /// Change the value and start validating it.
    ///
    /// Any validation still running for an older value is cancelled; its result would
    /// be discarded anyway.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();

        if let Some(previous) = self.task.take() {
            previous.abort();
        }

        let generation = match self.state.lock() {
            Ok(mut state) => {
                state.value = value.clone();
                state.generation += 1;
                state.pending = true;
                state.generation
            }
            Err(e) => {
                warn!("Failed to lock field state: {}", e);
                return;
            }
        };

        let validator = self.validator.clone();
        let state = Arc::clone(&self.state);

        self.task = Some(tokio::spawn(async move {
            let valid = validator.validate(value).await;

            let mut state = match state.lock() {
                Ok(state) => state,
                Err(e) => {
                    warn!("Failed to lock field state: {}", e);
                    return;
                }
            };

            if state.generation != generation {
                debug!("Discarding stale validation result for '{}'", validator.key());
                return;
            }

            state.pending = false;
            if valid {
                state.errors.remove(validator.key());
            } else {
                state.errors.insert(validator.key().to_string());
            }
        }));
    }

    /// Wait for the latest validation to finish
    pub async fn settled(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!("Validation task failed: {}", e);
                }
            }
        }
    }

    pub fn value(&self) -> String {
        self.state.lock().map(|s| s.value.clone()).unwrap_or_default()
    }

    pub fn is_pending(&self) -> bool {
        self.state.lock().map(|s| s.pending).unwrap_or(false)
    }

    /// Valid once validation has finished without errors
    pub fn is_valid(&self) -> bool {
        self.state
            .lock()
            .map(|s| !s.pending && s.errors.is_empty())
            .unwrap_or(false)
    }

    pub fn has_error(&self, key: &str) -> bool {
        self.state.lock().map(|s| s.errors.contains(key)).unwrap_or(false)
    }

    pub fn errors(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.errors.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Drop for ValidatedField {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    fn constant(valid: bool) -> RemoteValidator {
        RemoteValidator::new("workoutname", move |_: String| async move { Ok::<_, anyhow::Error>(valid) })
    }

    #[tokio::test]
    async fn failed_validation_marks_field_invalid() {
        let mut field = ValidatedField::new(constant(false));

        field.set_value("6MinWorkout");
        field.settled().await;

        assert_eq!(field.value(), "6MinWorkout");
        assert!(field.has_error("workoutname"));
        assert_eq!(field.errors(), vec!["workoutname".to_string()]);
        assert!(!field.is_valid());
    }

    #[tokio::test]
    async fn successful_validation_clears_the_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let validator = RemoteValidator::new("workoutname", move |name: String| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, anyhow::Error>(name != "taken") }
        });
        let mut field = ValidatedField::new(validator);

        field.set_value("taken");
        field.settled().await;
        assert!(field.has_error("workoutname"));

        field.set_value("6MinWorkout");
        field.settled().await;
        assert!(!field.has_error("workoutname"));
        assert!(field.errors().is_empty());
        assert!(field.is_valid());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn rejected_validation_marks_field_invalid() {
        let validator = RemoteValidator::new("workoutname", |_: String| async {
            Err::<bool, _>(anyhow::anyhow!("lookup failed"))
        });
        let mut field = ValidatedField::new(validator);

        field.set_value("6MinWorkout");
        field.settled().await;

        assert!(field.has_error("workoutname"));
    }

    #[tokio::test(start_paused = true)]
    async fn newer_value_wins_over_slower_older_validation() {
        let validator = RemoteValidator::new("workoutname", |name: String| async move {
            if name == "slow" {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, anyhow::Error>(false)
            } else {
                Ok(true)
            }
        });
        let mut field = ValidatedField::new(validator);

        field.set_value("slow");
        assert!(field.is_pending());
        assert!(!field.is_valid());
        field.set_value("fast");
        field.settled().await;

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(field.value(), "fast");
        assert!(field.is_valid());
        assert!(!field.has_error("workoutname"));
    }
}
