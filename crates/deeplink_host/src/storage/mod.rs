//! Storage channel contracts used to persist referral records across the app handoff.

pub mod cookie;
pub mod kv;

use std::{cell::RefCell, rc::Rc};

/// Host service that writes `document.cookie`-style assignments.
pub trait CookieJar {
    /// Applies a fully rendered cookie assignment (see [`cookie::CookieSpec::render`]).
    fn set_cookie(&self, cookie: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Default)]
/// In-memory cookie jar that records every assignment in write order.
pub struct MemoryCookieJar {
    inner: Rc<RefCell<Vec<String>>>,
}

impl MemoryCookieJar {
    /// Returns all recorded cookie assignments.
    pub fn cookies(&self) -> Vec<String> {
        self.inner.borrow().clone()
    }
}

impl CookieJar for MemoryCookieJar {
    fn set_cookie(&self, cookie: &str) -> Result<(), String> {
        self.inner.borrow_mut().push(cookie.to_string());
        Ok(())
    }
}
