//! User-supplied asynchronous validators

use std::{fmt, future::Future, sync::Arc};
use futures::future::{BoxFuture, FutureExt};
use tracing::warn;

/// Future returned by a validation function; `Ok(true)` means the value is valid
pub type ValidationFuture = BoxFuture<'static, anyhow::Result<bool>>;

type ValidateFn = dyn Fn(String) -> ValidationFuture + Send + Sync;

/// Validator that reports failures under a named error key
#[derive(Clone)]
pub struct RemoteValidator {
    key: String,
    validate_fn: Arc<ValidateFn>,
}

impl fmt::Debug for RemoteValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteValidator").field("key", &self.key).finish_non_exhaustive()
    }
}

impl RemoteValidator {
    pub fn new<F, Fut>(key: impl Into<String>, validate_fn: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
    {
        Self {
            key: key.into(),
            validate_fn: Arc::new(move |value: String| validate_fn(value).boxed()),
        }
    }

    /// Error key set on a field this validator rejects
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Run the validation function; a failed call counts as invalid
    pub async fn validate(&self, value: String) -> bool {
        match (self.validate_fn)(value).await {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Remote validation '{}' failed: {}", self.key, e);
                false
            }
        }
    }
}
