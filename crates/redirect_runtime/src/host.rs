//! Host service bundle used by the redirect controller.

use std::rc::Rc;

use deeplink_host::{ClipboardService, CookieJar, KeyValueStore, Navigator, TimerScheduler};
use deeplink_host_web::{
    WebClipboardService, WebCookieJar, WebKeyValueStore, WebNavigator, WebTimerScheduler,
};

#[derive(Clone)]
/// Storage, navigation, timer, and clipboard services for one landing page.
///
/// [`Default`] wires the browser adapters; tests swap individual services with the `with_*`
/// builders.
pub struct RedirectHostContext {
    durable: Rc<dyn KeyValueStore>,
    session: Rc<dyn KeyValueStore>,
    cookies: Rc<dyn CookieJar>,
    navigator: Rc<dyn Navigator>,
    timers: Rc<dyn TimerScheduler>,
    clipboard: Rc<dyn ClipboardService>,
}

impl Default for RedirectHostContext {
    fn default() -> Self {
        Self {
            durable: Rc::new(WebKeyValueStore::local()),
            session: Rc::new(WebKeyValueStore::session()),
            cookies: Rc::new(WebCookieJar),
            navigator: Rc::new(WebNavigator),
            timers: Rc::new(WebTimerScheduler),
            clipboard: Rc::new(WebClipboardService),
        }
    }
}

impl RedirectHostContext {
    /// Replaces the durable (`localStorage`) store.
    pub fn with_durable_store(mut self, store: Rc<dyn KeyValueStore>) -> Self {
        self.durable = store;
        self
    }

    /// Replaces the session (`sessionStorage`) store.
    pub fn with_session_store(mut self, store: Rc<dyn KeyValueStore>) -> Self {
        self.session = store;
        self
    }

    /// Replaces the cookie jar.
    pub fn with_cookie_jar(mut self, cookies: Rc<dyn CookieJar>) -> Self {
        self.cookies = cookies;
        self
    }

    /// Replaces the page navigator.
    pub fn with_navigator(mut self, navigator: Rc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Replaces the timer scheduler.
    pub fn with_timers(mut self, timers: Rc<dyn TimerScheduler>) -> Self {
        self.timers = timers;
        self
    }

    /// Replaces the clipboard service.
    pub fn with_clipboard(mut self, clipboard: Rc<dyn ClipboardService>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn durable_store(&self) -> Rc<dyn KeyValueStore> {
        self.durable.clone()
    }

    pub fn session_store(&self) -> Rc<dyn KeyValueStore> {
        self.session.clone()
    }

    pub fn cookie_jar(&self) -> Rc<dyn CookieJar> {
        self.cookies.clone()
    }

    pub fn navigator(&self) -> Rc<dyn Navigator> {
        self.navigator.clone()
    }

    pub fn timers(&self) -> Rc<dyn TimerScheduler> {
        self.timers.clone()
    }

    pub fn clipboard(&self) -> Rc<dyn ClipboardService> {
        self.clipboard.clone()
    }
}
