//! Navigation collaborator for the workout runner

use std::{collections::HashMap, sync::Mutex};
use tracing::info;

/// Route the runner sends the user to once a workout is complete
pub const FINISH_ROUTE: &str = "/finish";

/// Receives navigation requests from the runner
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

#[derive(Debug, Default)]
struct Routes {
    last: Option<String>,
    counts: HashMap<String, usize>,
}

/// Navigator that remembers the last route and how often each route was requested
#[derive(Debug, Default)]
pub struct RouteRecorder {
    routes: Mutex<Routes>,
}

impl RouteRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent route, if any
    pub fn current_route(&self) -> Option<String> {
        self.routes.lock().ok().and_then(|r| r.last.clone())
    }

    /// Number of times `path` was navigated to
    pub fn navigation_count(&self, path: &str) -> usize {
        self.routes
            .lock()
            .map(|r| r.counts.get(path).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl Navigator for RouteRecorder {
    fn navigate(&self, path: &str) {
        info!("Navigating to {}", path);
        if let Ok(mut routes) = self.routes.lock() {
            *routes.counts.entry(path.to_string()).or_default() += 1;
            routes.last = Some(path.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remembers_last_route_and_counts_each_path() {
        let recorder = RouteRecorder::new();
        assert_eq!(recorder.current_route(), None);

        recorder.navigate(FINISH_ROUTE);
        recorder.navigate("/workouts");
        recorder.navigate(FINISH_ROUTE);

        assert_eq!(recorder.current_route().as_deref(), Some(FINISH_ROUTE));
        assert_eq!(recorder.navigation_count(FINISH_ROUTE), 2);
        assert_eq!(recorder.navigation_count("/workouts"), 1);
        assert_eq!(recorder.navigation_count("/start"), 0);
    }
}
