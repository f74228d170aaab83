//! Browser (`wasm32`) implementations of [`deeplink_host`] service contracts.
//!
//! Each adapter talks to the browser through `web-sys` when compiled for `wasm32` and falls back
//! to an inert shim natively, so the redirect runtime can be wired to the same types in both
//! builds:
//! - `storage`: `localStorage` / `sessionStorage`
//! - `cookie`: `document.cookie`
//! - `navigation`: `location.href`
//! - `timers`: `setTimeout`
//! - `clipboard`: `navigator.clipboard.writeText`
//! - `events`: presence and page-fault listeners
//! - `page`: user agent and location capture

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod clipboard;
pub mod cookie;
pub mod events;
pub mod navigation;
pub mod page;
pub mod storage;
pub mod timers;

pub use clipboard::WebClipboardService;
pub use cookie::WebCookieJar;
pub use events::{install_fault_listeners, install_presence_listeners, PageFault};
pub use navigation::WebNavigator;
pub use page::read_page_context;
pub use storage::{WebKeyValueStore, WebStorageArea};
pub use timers::WebTimerScheduler;

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn unsupported() -> String {
    "Browser APIs are only available when compiled for wasm32".to_string()
}
