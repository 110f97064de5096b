//! Navigator for the command-line client.
//!
//! There is no browser history to push onto, so a navigation is logged and
//! remembered. The binary checks [`ConsoleNavigator::redirected_to`] after
//! mounting a protected screen and exits when a redirect happened.

use std::sync::{Mutex, PoisonError};

use crate::traits::Navigator;

#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    last: Mutex<Option<String>>,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent route requested, if any.
    pub fn redirected_to(&self) -> Option<String> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: &str) {
        tracing::info!("Navigating to {}", route);
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(route.to_string());
    }
}
