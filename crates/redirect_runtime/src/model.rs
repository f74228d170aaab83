//! Redirect sequencer state model.

use deeplink_host::PlatformKind;
use serde::{Deserialize, Serialize};

use crate::plan::RedirectPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Coarse progress of the redirect flow.
pub enum SequencerPhase {
    /// Page loaded, waiting for the initial delay.
    Idle,
    /// Attempts in flight.
    Sequencing,
    /// Store/download section is final. No further phase changes.
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identity of a scheduled timer, echoed back when it fires.
pub enum TimerKind {
    /// Initial delay elapsed; enter sequencing.
    StartSequence,
    /// Staged attempt at this index of the plan came due.
    Stage(usize),
    /// Desktop display delay elapsed.
    DesktopSettle,
    /// Global page budget elapsed.
    GlobalTimeout,
    /// Grace period after the page became visible again elapsed.
    VisibilityGrace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Sequencer state for one page load.
pub struct SequencerState {
    /// Platform detected at boot.
    pub platform: PlatformKind,
    /// Attempts for that platform.
    pub plan: RedirectPlan,
    /// Current phase.
    pub phase: SequencerPhase,
    /// Monotonic: once set, never cleared for this page load.
    pub app_opened: bool,
    /// Guards sequencing entry; the first start wins.
    pub redirect_started: bool,
    /// A terminal fallback has begun (store navigation issued or store section presented).
    pub fallback_started: bool,
    /// The store navigation has been issued; it is never issued twice.
    pub final_fallback_issued: bool,
}

impl SequencerState {
    /// Creates an idle state with every latch cleared.
    pub fn new(platform: PlatformKind, plan: RedirectPlan) -> Self {
        Self {
            platform,
            plan,
            phase: SequencerPhase::Idle,
            app_opened: false,
            redirect_started: false,
            fallback_started: false,
            final_fallback_issued: false,
        }
    }

    /// Whether the download options are final.
    pub fn is_terminal(&self) -> bool {
        self.phase == SequencerPhase::Terminal
    }
}
