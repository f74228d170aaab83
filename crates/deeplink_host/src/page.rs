//! Page-load inputs and browser presence signals.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Inputs captured from the landing page once at load time.
pub struct PageContext {
    /// `navigator.userAgent`, or `navigator.vendor` when the agent string is empty.
    pub user_agent: String,
    /// `location.search`, with or without the leading `?`.
    pub query: String,
    /// `location.href`.
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Browser events used as weak evidence of whether the native app took over.
///
/// None of these prove anything: a user switching tabs blurs the window too, and some apps open
/// without the page ever losing focus.
pub enum PresenceSignal {
    /// The window lost focus.
    WindowBlurred {
        /// `document.hidden` at the time of the event.
        document_hidden: bool,
    },
    /// `document.visibilityState` changed.
    VisibilityChanged {
        /// Whether the page is now visible.
        visible: bool,
    },
    /// The page is about to unload.
    BeforeUnload,
}
