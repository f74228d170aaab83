//! Deep-link redirect runtime for the referral landing page.
//!
//! A visit is handled by one [`RedirectController`]: it classifies the visitor's platform,
//! captures and persists the referral parameters, and then walks a per-platform
//! [`RedirectPlan`] of app-link attempts ending in a store fallback. Sequencing is a pure reducer
//! ([`reduce_redirect`]) over [`SequencerState`]; timers are gated by state rather than cancelled.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
mod logging;
pub mod model;
pub mod plan;
pub mod platform;
pub mod reducer;
pub mod referral;
pub mod referral_store;

pub use config::{ConfigError, RedirectConfig};
pub use controller::{report_boot_failure, RedirectController, STATUS_BOOT_FAILED, STATUS_COPIED};
pub use error::RedirectError;
pub use host::RedirectHostContext;
pub use model::{SequencerPhase, SequencerState, TimerKind};
pub use plan::{build_redirect_plan, RedirectPlan, RedirectStage, StagedNavigation};
pub use platform::detect_platform;
pub use reducer::{reduce_redirect, RedirectAction, RedirectEffect};
pub use referral::{extract_referral, ReferralSummary};
pub use referral_store::{load_stored_referral, ReferralStore};
