//! Navigator for headless hosts: routes are logged, not rendered

use std::sync::{Mutex, PoisonError};

use ingredient_admin_core::Navigator;

/// Logs navigation requests and remembers the current route
pub struct LogNavigator {
    current: Mutex<Option<String>>,
}

impl LogNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    /// Last route navigated to, if any
    pub fn current_route(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for LogNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for LogNavigator {
    fn navigate_to(&self, path: &str) {
        log::info!("Navigate to {path}");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.to_string());
    }

    fn refresh_current_route(&self) {
        match self.current_route() {
            Some(route) => log::info!("Refresh {route}"),
            None => log::info!("Refresh current route"),
        }
    }
}
