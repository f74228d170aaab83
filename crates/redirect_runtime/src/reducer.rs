//! Sequencer actions, side-effect intents, and transition logic.
//!
//! Timers scheduled through [`RedirectEffect::Schedule`] are never cancelled. Every timer action
//! re-checks the latches in [`SequencerState`] when it fires, so a stale, duplicated, or
//! out-of-order [`RedirectAction::TimerFired`] is harmless.

use deeplink_host::PresenceSignal;

use crate::{
    config::RedirectConfig,
    model::{SequencerPhase, SequencerState, TimerKind},
    plan::RedirectPlan,
};

pub const STATUS_DESKTOP: &str = "Please open this link on your mobile device";
pub const STATUS_APP_OPENED: &str = "App opened successfully!";
pub const STATUS_GLOBAL_TIMEOUT: &str = "Timeout - showing download options";
pub const STATUS_APP_NOT_DETECTED: &str = "App not detected. Showing download options...";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Inputs accepted by [`reduce_redirect`].
pub enum RedirectAction {
    /// Page load finished; arm the initial-delay and global timers.
    Boot,
    /// A previously scheduled timer elapsed.
    TimerFired(TimerKind),
    /// A browser presence signal arrived.
    Presence(PresenceSignal),
    /// The visitor asked for the download options.
    ShowStoreButtons,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_redirect`] for the controller to execute.
pub enum RedirectEffect {
    /// Dispatch `TimerFired(timer)` after `delay_ms`.
    Schedule {
        /// Delay from now.
        delay_ms: u32,
        /// Timer identity echoed back on expiry.
        timer: TimerKind,
    },
    /// Navigate the page to a URL.
    Navigate(String),
    /// Replace the status line.
    UpdateStatus {
        /// Status text.
        message: String,
        /// Error styling flag.
        is_error: bool,
    },
    /// Show the store/download section.
    ShowStoreSection,
    /// Diagnostic line for the debug log.
    Debug(String),
}

fn status(message: impl Into<String>) -> RedirectEffect {
    RedirectEffect::UpdateStatus {
        message: message.into(),
        is_error: false,
    }
}

/// Applies `action` to `state` and returns the effects to run, in order.
pub fn reduce_redirect(
    state: &mut SequencerState,
    config: &RedirectConfig,
    action: RedirectAction,
) -> Vec<RedirectEffect> {
    let mut effects = Vec::new();
    match action {
        RedirectAction::Boot => {
            effects.push(RedirectEffect::Schedule {
                delay_ms: config.initial_delay_ms,
                timer: TimerKind::StartSequence,
            });
            effects.push(RedirectEffect::Schedule {
                delay_ms: config.total_timeout_ms,
                timer: TimerKind::GlobalTimeout,
            });
        }
        RedirectAction::TimerFired(TimerKind::StartSequence) => {
            start_sequence(state, &mut effects);
        }
        RedirectAction::TimerFired(TimerKind::Stage(index)) => {
            run_stage(state, index, &mut effects);
        }
        RedirectAction::TimerFired(TimerKind::DesktopSettle) => {
            effects.push(RedirectEffect::ShowStoreSection);
            state.phase = SequencerPhase::Terminal;
        }
        RedirectAction::TimerFired(TimerKind::GlobalTimeout) => {
            if state.app_opened || state.fallback_started || state.is_terminal() {
                effects.push(RedirectEffect::Debug(
                    "global timeout elapsed after app signal or fallback".to_string(),
                ));
            } else {
                force_terminal(state, STATUS_GLOBAL_TIMEOUT, &mut effects);
            }
        }
        RedirectAction::TimerFired(TimerKind::VisibilityGrace) => {
            if !state.fallback_started && !state.is_terminal() {
                force_terminal(state, STATUS_APP_NOT_DETECTED, &mut effects);
            }
        }
        RedirectAction::Presence(signal) => on_presence(state, config, signal, &mut effects),
        RedirectAction::ShowStoreButtons => effects.push(RedirectEffect::ShowStoreSection),
    }
    effects
}

fn start_sequence(state: &mut SequencerState, effects: &mut Vec<RedirectEffect>) {
    if state.redirect_started {
        effects.push(RedirectEffect::Debug("redirect already started".to_string()));
        return;
    }
    if state.is_terminal() {
        effects.push(RedirectEffect::Debug(
            "download options already shown, not starting redirect".to_string(),
        ));
        return;
    }
    state.redirect_started = true;
    state.phase = SequencerPhase::Sequencing;
    effects.push(status(format!(
        "Detected: {}",
        state.platform.as_str().to_uppercase()
    )));

    match &state.plan {
        RedirectPlan::NativeApp { stages } => {
            let delays: Vec<(usize, u32)> = stages
                .iter()
                .enumerate()
                .map(|(index, staged)| (index, staged.delay_ms))
                .collect();
            for (index, delay_ms) in delays {
                if delay_ms == 0 {
                    run_stage(state, index, effects);
                } else {
                    effects.push(RedirectEffect::Schedule {
                        delay_ms,
                        timer: TimerKind::Stage(index),
                    });
                }
            }
        }
        RedirectPlan::StoreOnly { display_delay_ms } => {
            let display_delay_ms = *display_delay_ms;
            state.fallback_started = true;
            effects.push(status(STATUS_DESKTOP));
            effects.push(RedirectEffect::ShowStoreSection);
            effects.push(RedirectEffect::Schedule {
                delay_ms: display_delay_ms,
                timer: TimerKind::DesktopSettle,
            });
        }
    }
}

fn run_stage(state: &mut SequencerState, index: usize, effects: &mut Vec<RedirectEffect>) {
    let Some(staged) = state.plan.stages().get(index).cloned() else {
        effects.push(RedirectEffect::Debug(format!("no staged attempt at {index}")));
        return;
    };
    if state.app_opened {
        effects.push(RedirectEffect::Debug(format!(
            "skipping {:?}: app already opened",
            staged.stage
        )));
        return;
    }
    if staged.stage.is_final() {
        if state.final_fallback_issued {
            effects.push(RedirectEffect::Debug(format!(
                "skipping {:?}: store fallback already issued",
                staged.stage
            )));
            return;
        }
        state.final_fallback_issued = true;
        state.fallback_started = true;
        state.phase = SequencerPhase::Terminal;
    } else if state.is_terminal() {
        effects.push(RedirectEffect::Debug(format!(
            "skipping {:?}: download options already shown",
            staged.stage
        )));
        return;
    }
    effects.push(status(staged.stage.status_message()));
    effects.push(RedirectEffect::Navigate(staged.url));
}

fn force_terminal(state: &mut SequencerState, message: &str, effects: &mut Vec<RedirectEffect>) {
    state.phase = SequencerPhase::Terminal;
    state.fallback_started = true;
    effects.push(status(message));
    effects.push(RedirectEffect::ShowStoreSection);
}

fn on_presence(
    state: &mut SequencerState,
    config: &RedirectConfig,
    signal: PresenceSignal,
    effects: &mut Vec<RedirectEffect>,
) {
    match signal {
        PresenceSignal::WindowBlurred { document_hidden } => {
            state.app_opened = true;
            effects.push(RedirectEffect::Debug(
                "App opened (window blurred)".to_string(),
            ));
            if !document_hidden {
                effects.push(status(STATUS_APP_OPENED));
            }
        }
        PresenceSignal::BeforeUnload => {
            state.app_opened = true;
            effects.push(RedirectEffect::Debug(
                "Page unloading - assuming app opened".to_string(),
            ));
        }
        PresenceSignal::VisibilityChanged { visible } => {
            if visible && !state.app_opened {
                effects.push(RedirectEffect::Debug(
                    "User returned - app not opened".to_string(),
                ));
                effects.push(RedirectEffect::Schedule {
                    delay_ms: config.visibility_grace_ms,
                    timer: TimerKind::VisibilityGrace,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use deeplink_host::{PlatformKind, ReferralData};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::plan::build_redirect_plan;

    fn state_for(platform: PlatformKind) -> (SequencerState, RedirectConfig) {
        let config = RedirectConfig::default();
        let referral = ReferralData::from_pairs([("referral_code", "ABC123")]);
        let plan = build_redirect_plan(&config, platform, &referral);
        (SequencerState::new(platform, plan), config)
    }

    fn navigations(effects: &[RedirectEffect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                RedirectEffect::Navigate(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    fn blurred() -> RedirectAction {
        RedirectAction::Presence(PresenceSignal::WindowBlurred {
            document_hidden: true,
        })
    }

    #[test]
    fn boot_arms_initial_delay_and_global_timeout() {
        let (mut state, config) = state_for(PlatformKind::Ios);
        let effects = reduce_redirect(&mut state, &config, RedirectAction::Boot);
        assert_eq!(
            effects,
            vec![
                RedirectEffect::Schedule {
                    delay_ms: 800,
                    timer: TimerKind::StartSequence
                },
                RedirectEffect::Schedule {
                    delay_ms: 2500,
                    timer: TimerKind::GlobalTimeout
                },
            ]
        );
        assert_eq!(state.phase, SequencerPhase::Idle);
    }

    #[test]
    fn start_navigates_immediately_and_schedules_remaining_stages() {
        let (mut state, config) = state_for(PlatformKind::Ios);
        let effects = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        assert_eq!(
            effects,
            vec![
                status("Detected: IOS"),
                status("Opening iOS app..."),
                RedirectEffect::Navigate(
                    "https://paramedics-deeplinks.vercel.app/app-link?referral_code=ABC123"
                        .to_string()
                ),
                RedirectEffect::Schedule {
                    delay_ms: 500,
                    timer: TimerKind::Stage(1)
                },
                RedirectEffect::Schedule {
                    delay_ms: 1500,
                    timer: TimerKind::Stage(2)
                },
            ]
        );
        assert!(state.redirect_started);
        assert_eq!(state.phase, SequencerPhase::Sequencing);
    }

    #[test]
    fn second_start_is_ignored() {
        let (mut state, config) = state_for(PlatformKind::Android);
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        let again = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        assert!(navigations(&again).is_empty());
        assert!(matches!(again.as_slice(), [RedirectEffect::Debug(_)]));
    }

    #[test]
    fn stages_are_skipped_once_app_opened() {
        let (mut state, config) = state_for(PlatformKind::Android);
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        reduce_redirect(&mut state, &config, blurred());

        for index in [1, 2] {
            let effects = reduce_redirect(
                &mut state,
                &config,
                RedirectAction::TimerFired(TimerKind::Stage(index)),
            );
            assert!(navigations(&effects).is_empty(), "stage {index} fired");
        }
        assert!(!state.final_fallback_issued);
        assert_eq!(state.phase, SequencerPhase::Sequencing);
    }

    #[test]
    fn app_opened_before_start_suppresses_first_attempt_too() {
        let (mut state, config) = state_for(PlatformKind::Ios);
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::Presence(PresenceSignal::BeforeUnload),
        );
        let effects = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        assert!(navigations(&effects).is_empty());
    }

    #[test]
    fn final_fallback_is_issued_at_most_once() {
        let (mut state, config) = state_for(PlatformKind::Ios);
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        let first = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::Stage(2)),
        );
        let duplicate = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::Stage(2)),
        );
        assert_eq!(
            navigations(&first),
            vec!["https://apps.apple.com/uz/app/paramedics-dr/id6469779193"]
        );
        assert!(navigations(&duplicate).is_empty());
        assert!(state.is_terminal());
    }

    #[test]
    fn out_of_order_stage_timers_are_still_gated() {
        let (mut state, config) = state_for(PlatformKind::Android);
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        let store = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::Stage(2)),
        );
        assert_eq!(navigations(&store).len(), 1);

        reduce_redirect(&mut state, &config, blurred());
        let late_scheme = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::Stage(1)),
        );
        assert!(navigations(&late_scheme).is_empty());
    }

    #[test]
    fn desktop_shows_store_without_navigation() {
        let (mut state, config) = state_for(PlatformKind::Other);
        let effects = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        assert_eq!(
            effects,
            vec![
                status("Detected: OTHER"),
                status(STATUS_DESKTOP),
                RedirectEffect::ShowStoreSection,
                RedirectEffect::Schedule {
                    delay_ms: 3000,
                    timer: TimerKind::DesktopSettle
                },
            ]
        );

        let settle = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::DesktopSettle),
        );
        assert_eq!(settle, vec![RedirectEffect::ShowStoreSection]);
        assert!(state.is_terminal());
    }

    #[test]
    fn global_timeout_forces_terminal_when_nothing_started() {
        let (mut state, config) = state_for(PlatformKind::Android);
        let effects = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::GlobalTimeout),
        );
        assert_eq!(
            effects,
            vec![status(STATUS_GLOBAL_TIMEOUT), RedirectEffect::ShowStoreSection]
        );
        assert!(state.is_terminal());
        assert!(!state.redirect_started);
    }

    #[test]
    fn late_start_after_forced_terminal_does_not_navigate() {
        let (mut state, config) = state_for(PlatformKind::Ios);
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::GlobalTimeout),
        );
        let effects = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        assert!(navigations(&effects).is_empty());
        assert!(!state.redirect_started);
        assert!(state.is_terminal());
    }

    #[test]
    fn global_timeout_is_quiet_after_app_signal_or_fallback() {
        let (mut opened, config) = state_for(PlatformKind::Ios);
        reduce_redirect(&mut opened, &config, blurred());
        let effects = reduce_redirect(
            &mut opened,
            &config,
            RedirectAction::TimerFired(TimerKind::GlobalTimeout),
        );
        assert!(matches!(effects.as_slice(), [RedirectEffect::Debug(_)]));

        let (mut desktop, config) = state_for(PlatformKind::Other);
        reduce_redirect(
            &mut desktop,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        let effects = reduce_redirect(
            &mut desktop,
            &config,
            RedirectAction::TimerFired(TimerKind::GlobalTimeout),
        );
        assert!(!effects.contains(&RedirectEffect::ShowStoreSection));
    }

    #[test]
    fn global_timeout_is_quiet_after_store_navigation() {
        let (mut state, config) = state_for(PlatformKind::Android);
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::Stage(2)),
        );
        assert!(state.fallback_started);

        let effects = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::GlobalTimeout),
        );
        assert!(!effects.contains(&RedirectEffect::ShowStoreSection));
        assert!(!effects.contains(&status(STATUS_GLOBAL_TIMEOUT)));
    }

    #[test]
    fn scheme_stage_is_skipped_after_forced_terminal() {
        let (mut state, config) = state_for(PlatformKind::Ios);
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::VisibilityGrace),
        );
        let effects = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::Stage(1)),
        );
        assert!(navigations(&effects).is_empty());
        assert!(!effects.contains(&status("Trying URL scheme...")));
        assert!(state.is_terminal());
    }

    #[test]
    fn global_timeout_rescues_a_stalled_native_sequence() {
        let config = RedirectConfig {
            store_redirect_timeout_ms: 60_000,
            ..RedirectConfig::default()
        };
        let plan = build_redirect_plan(&config, PlatformKind::Ios, &ReferralData::default());
        let mut state = SequencerState::new(PlatformKind::Ios, plan);
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        let effects = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::GlobalTimeout),
        );
        assert!(effects.contains(&RedirectEffect::ShowStoreSection));
        assert!(state.is_terminal());
    }

    #[test]
    fn blur_reports_success_only_while_page_is_visible() {
        let (mut state, config) = state_for(PlatformKind::Ios);
        let hidden = reduce_redirect(&mut state, &config, blurred());
        assert!(!hidden.contains(&status(STATUS_APP_OPENED)));

        let visible = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::Presence(PresenceSignal::WindowBlurred {
                document_hidden: false,
            }),
        );
        assert!(visible.contains(&status(STATUS_APP_OPENED)));
        assert!(state.app_opened);
    }

    #[test]
    fn returning_visible_without_app_arms_grace_timer() {
        let (mut state, config) = state_for(PlatformKind::Android);
        let effects = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::Presence(PresenceSignal::VisibilityChanged { visible: true }),
        );
        assert!(effects.contains(&RedirectEffect::Schedule {
            delay_ms: 1000,
            timer: TimerKind::VisibilityGrace
        }));

        let hidden = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::Presence(PresenceSignal::VisibilityChanged { visible: false }),
        );
        assert!(hidden.is_empty());
    }

    #[test]
    fn visibility_is_ignored_after_app_opened() {
        let (mut state, config) = state_for(PlatformKind::Android);
        reduce_redirect(&mut state, &config, blurred());
        let effects = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::Presence(PresenceSignal::VisibilityChanged { visible: true }),
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn grace_timer_forces_terminal_unless_already_terminal() {
        let (mut state, config) = state_for(PlatformKind::Android);
        let effects = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::VisibilityGrace),
        );
        assert_eq!(
            effects,
            vec![status(STATUS_APP_NOT_DETECTED), RedirectEffect::ShowStoreSection]
        );

        let again = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::VisibilityGrace),
        );
        assert!(again.is_empty());
    }

    #[test]
    fn forced_terminal_does_not_block_the_single_store_navigation() {
        let (mut state, config) = state_for(PlatformKind::Ios);
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::StartSequence),
        );
        reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::VisibilityGrace),
        );
        let store = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::Stage(2)),
        );
        assert_eq!(navigations(&store).len(), 1);
        assert!(state.final_fallback_issued);
    }

    #[test]
    fn unknown_stage_index_is_a_no_op() {
        let (mut state, config) = state_for(PlatformKind::Other);
        let effects = reduce_redirect(
            &mut state,
            &config,
            RedirectAction::TimerFired(TimerKind::Stage(7)),
        );
        assert!(matches!(effects.as_slice(), [RedirectEffect::Debug(_)]));
    }

    #[test]
    fn show_store_buttons_only_presents() {
        let (mut state, config) = state_for(PlatformKind::Ios);
        let before = state.clone();
        let effects = reduce_redirect(&mut state, &config, RedirectAction::ShowStoreButtons);
        assert_eq!(effects, vec![RedirectEffect::ShowStoreSection]);
        assert_eq!(state, before);
    }
}
