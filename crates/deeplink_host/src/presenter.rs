//! Presentation contract between the redirect runtime and the landing page UI.

use std::{cell::RefCell, rc::Rc};

use crate::referral::ReferralData;

/// Side-effecting UI hooks invoked by the redirect runtime.
///
/// The runtime never reads anything back from the presenter.
pub trait RedirectPresenter {
    /// Replaces the status line. `is_error` switches to the error styling.
    fn update_status(&self, message: &str, is_error: bool);

    /// Renders the referral summary card for the captured parameters.
    fn show_referral_info(&self, data: &ReferralData);

    /// Shows the loading section and hides the store section.
    fn show_loading_section(&self);

    /// Shows the store/download section and hides the loading section.
    fn show_store_section(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One presenter call captured by [`RecordingPresenter`].
pub enum PresenterEvent {
    /// [`RedirectPresenter::update_status`].
    Status {
        /// Status text.
        message: String,
        /// Error styling flag.
        is_error: bool,
    },
    /// [`RedirectPresenter::show_referral_info`].
    ReferralInfo(ReferralData),
    /// [`RedirectPresenter::show_loading_section`].
    LoadingSection,
    /// [`RedirectPresenter::show_store_section`].
    StoreSection,
}

#[derive(Debug, Clone, Default)]
/// Presenter that records calls in order for assertions.
pub struct RecordingPresenter {
    events: Rc<RefCell<Vec<PresenterEvent>>>,
}

impl RecordingPresenter {
    /// All recorded calls.
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.borrow().clone()
    }

    /// Status messages only, in order.
    pub fn statuses(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Status { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// The most recent status message.
    pub fn last_status(&self) -> Option<String> {
        self.statuses().pop()
    }

    /// How many times the store section was shown.
    pub fn store_section_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, PresenterEvent::StoreSection))
            .count()
    }
}

impl RedirectPresenter for RecordingPresenter {
    fn update_status(&self, message: &str, is_error: bool) {
        self.events.borrow_mut().push(PresenterEvent::Status {
            message: message.to_string(),
            is_error,
        });
    }

    fn show_referral_info(&self, data: &ReferralData) {
        self.events
            .borrow_mut()
            .push(PresenterEvent::ReferralInfo(data.clone()));
    }

    fn show_loading_section(&self) {
        self.events.borrow_mut().push(PresenterEvent::LoadingSection);
    }

    fn show_store_section(&self) {
        self.events.borrow_mut().push(PresenterEvent::StoreSection);
    }
}
