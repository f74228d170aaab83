//! Typed host contracts and shared models for the deep-link redirect landing page.
//!
//! This crate is the API-first boundary between the redirect runtime and the browser. It exposes
//! the referral/platform models persisted across the app handoff, the storage, cookie,
//! navigation, timer, clipboard, and presenter service traits, and in-memory adapters used by
//! native tests. Concrete browser adapters live in `deeplink_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod clipboard;
pub mod navigation;
pub mod page;
pub mod presenter;
pub mod referral;
pub mod storage;
pub mod time;
pub mod timers;

pub use clipboard::{ClipboardFuture, ClipboardService, MemoryClipboard};
pub use navigation::{Navigator, RecordingNavigator};
pub use page::{PageContext, PresenceSignal};
pub use presenter::{PresenterEvent, RecordingPresenter, RedirectPresenter};
pub use referral::{
    PlatformKind, ReferralData, StoredReferral, MS_PER_DAY, REFERRAL_CODE_KEY,
    REFERRAL_CODE_SENTINEL,
};
pub use storage::cookie::{render_http_date, CookieSpec, SameSite};
pub use storage::kv::{KeyValueStore, MemoryKeyValueStore};
pub use storage::{CookieJar, MemoryCookieJar};
pub use time::unix_time_ms_now;
pub use timers::{TimerCallback, TimerScheduler, VirtualTimers};
