//! Top-level navigation contracts.

use std::{cell::RefCell, rc::Rc};

/// Host service that replaces the current page location.
///
/// A successful call only means the navigation was requested. Whether an app, a store, or
/// nothing at all handled it is not observable from the page.
pub trait Navigator {
    /// Navigates the top-level browsing context to `url`.
    fn navigate(&self, url: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Default)]
/// Navigator that records requested URLs instead of leaving the page.
pub struct RecordingNavigator {
    visited: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    /// Returns every requested URL in order.
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) -> Result<(), String> {
        self.visited.borrow_mut().push(url.to_string());
        Ok(())
    }
}
