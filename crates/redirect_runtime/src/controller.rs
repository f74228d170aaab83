//! Per-page-load redirect controller.
//!
//! [`RedirectController`] owns the sequencer state for one landing page visit, feeds timer expiry
//! and presence signals through [`reduce_redirect`], and executes the resulting effects against
//! the [`RedirectHostContext`] services and the page's [`RedirectPresenter`].
//!
//! Presence signals are heuristics. A visitor switching tabs blurs the window exactly like an app
//! handoff does, and some apps open without the page ever losing focus, so `app_opened` can be
//! wrong in both directions. The controller only uses it to skip later attempts.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use deeplink_host::{PageContext, PlatformKind, PresenceSignal, RedirectPresenter, ReferralData};
use leptos::logging;

use crate::{
    config::RedirectConfig,
    error::RedirectError,
    host::RedirectHostContext,
    logging as deeplink_log,
    model::{SequencerState, TimerKind},
    plan::build_redirect_plan,
    platform::detect_platform,
    reducer::{reduce_redirect, RedirectAction, RedirectEffect},
    referral::extract_referral,
    referral_store::ReferralStore,
};

pub const STATUS_BOOT_FAILED: &str = "Error initializing. Please try again.";
pub const STATUS_COPIED: &str = "Copied to clipboard!";

struct ControllerInner {
    config: RedirectConfig,
    host: RedirectHostContext,
    presenter: Rc<dyn RedirectPresenter>,
    referral: ReferralData,
    state: RefCell<SequencerState>,
}

#[derive(Clone)]
/// Handle to the redirect flow of one page load.
pub struct RedirectController {
    inner: Rc<ControllerInner>,
}

impl RedirectController {
    /// Captures the referral, persists it, and arms the redirect timers.
    ///
    /// In order: validate `config`, classify the user agent, extract and present the referral,
    /// write it to the storage channels, show the loading section, build the plan, and schedule
    /// the initial-delay and global-timeout timers. Storage failures are logged and do not stop
    /// boot.
    ///
    /// # Errors
    ///
    /// Returns [`RedirectError::InvalidConfig`] when validation fails and
    /// [`RedirectError::Scheduler`] when a boot timer cannot be armed.
    pub fn boot(
        config: RedirectConfig,
        host: RedirectHostContext,
        presenter: Rc<dyn RedirectPresenter>,
        page: &PageContext,
    ) -> Result<Self, RedirectError> {
        config.validate()?;

        let platform = detect_platform(&page.user_agent);
        deeplink_log::debug(config.debug, format!("Platform detected: {platform}"));

        let referral = extract_referral(&page.query);
        if config.debug {
            let json = serde_json::to_string(&referral).unwrap_or_default();
            deeplink_log::debug(true, format!("Referral data: {json}"));
        }
        presenter.show_referral_info(&referral);

        let durable = host.durable_store();
        let session = host.session_store();
        let cookies = host.cookie_jar();
        let saved = ReferralStore::new(&config, durable.as_ref(), session.as_ref(), cookies.as_ref())
            .persist(&referral, platform, &page.href);
        if !saved {
            logging::warn!("referral capture not persisted to durable storage");
        }

        presenter.show_loading_section();

        let plan = build_redirect_plan(&config, platform, &referral);
        let controller = Self {
            inner: Rc::new(ControllerInner {
                state: RefCell::new(SequencerState::new(platform, plan)),
                config,
                host,
                presenter,
                referral,
            }),
        };
        controller
            .apply(RedirectAction::Boot)
            .map_err(RedirectError::Scheduler)?;
        Ok(controller)
    }

    /// Boots the controller, reporting failures on the page instead of returning them.
    pub fn start(
        config: RedirectConfig,
        host: RedirectHostContext,
        presenter: Rc<dyn RedirectPresenter>,
        page: &PageContext,
    ) -> Option<Self> {
        match Self::boot(config, host, presenter.clone(), page) {
            Ok(controller) => Some(controller),
            Err(err) => {
                report_boot_failure(presenter.as_ref(), &err);
                None
            }
        }
    }

    /// Feeds `action` through the reducer and runs the resulting effects.
    pub fn dispatch(&self, action: RedirectAction) {
        if let Err(err) = self.apply(action) {
            logging::warn!("redirect timer scheduling failed: {err}");
        }
    }

    /// Forwards a browser presence signal to the sequencer.
    pub fn handle_presence(&self, signal: PresenceSignal) {
        self.dispatch(RedirectAction::Presence(signal));
    }

    /// Presents the store section on request.
    pub fn show_store_buttons(&self) {
        self.dispatch(RedirectAction::ShowStoreButtons);
    }

    /// Copies the captured referral code to the clipboard.
    ///
    /// Nothing is copied when no code was passed. Returns whether the clipboard accepted the
    /// text.
    pub async fn copy_referral_code(&self) -> bool {
        if !self.inner.referral.has_referral_code() {
            return false;
        }
        let code = self.inner.referral.referral_code();
        let clipboard = self.inner.host.clipboard();
        match clipboard.write_text(code).await {
            Ok(()) => {
                self.inner.presenter.update_status(STATUS_COPIED, false);
                true
            }
            Err(err) => {
                deeplink_log::error(format!("Clipboard write failed: {err}"));
                false
            }
        }
    }

    /// Platform detected at boot.
    pub fn platform(&self) -> PlatformKind {
        self.inner.state.borrow().platform
    }

    /// Referral captured at boot.
    pub fn referral(&self) -> &ReferralData {
        &self.inner.referral
    }

    /// Snapshot of the sequencer state.
    pub fn state(&self) -> SequencerState {
        self.inner.state.borrow().clone()
    }

    fn apply(&self, action: RedirectAction) -> Result<(), String> {
        let effects = {
            let mut state = self.inner.state.borrow_mut();
            reduce_redirect(&mut state, &self.inner.config, action)
        };
        let mut first_error = None;
        for effect in effects {
            if let Err(err) = self.run_effect(effect) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn run_effect(&self, effect: RedirectEffect) -> Result<(), String> {
        let inner = &self.inner;
        match effect {
            RedirectEffect::Schedule { delay_ms, timer } => self.schedule(delay_ms, timer)?,
            RedirectEffect::Navigate(url) => {
                deeplink_log::debug(inner.config.debug, format!("Redirecting to: {url}"));
                if let Err(err) = inner.host.navigator().navigate(&url) {
                    deeplink_log::error(format!("Navigation to {url} failed: {err}"));
                }
            }
            RedirectEffect::UpdateStatus { message, is_error } => {
                inner.presenter.update_status(&message, is_error)
            }
            RedirectEffect::ShowStoreSection => inner.presenter.show_store_section(),
            RedirectEffect::Debug(message) => deeplink_log::debug(inner.config.debug, message),
        }
        Ok(())
    }

    fn schedule(&self, delay_ms: u32, timer: TimerKind) -> Result<(), String> {
        let weak: Weak<ControllerInner> = Rc::downgrade(&self.inner);
        self.inner.host.timers().schedule(
            delay_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    RedirectController { inner }.dispatch(RedirectAction::TimerFired(timer));
                }
            }),
        )
    }
}

/// Logs a boot failure and falls back to the download options.
pub fn report_boot_failure(presenter: &dyn RedirectPresenter, err: &RedirectError) {
    deeplink_log::error(format!("Initialization failed: {err}"));
    presenter.update_status(STATUS_BOOT_FAILED, true);
    presenter.show_store_section();
}
