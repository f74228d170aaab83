//! Per-platform redirect plans: which URLs to try, and when.

use deeplink_host::{PlatformKind, ReferralData};
use serde::{Deserialize, Serialize};

use crate::config::RedirectConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// One kind of navigation attempt.
pub enum RedirectStage {
    /// iOS universal link carrying the referral query.
    UniversalLink,
    /// Android `intent://` URI naming the app package.
    IntentUri,
    /// Custom URI scheme carrying the referral query.
    CustomScheme,
    /// App Store listing (final).
    AppStore,
    /// Play Store listing (final).
    PlayStore,
}

impl RedirectStage {
    /// Status line shown when the stage fires.
    pub const fn status_message(self) -> &'static str {
        match self {
            Self::UniversalLink => "Opening iOS app...",
            Self::IntentUri => "Opening Android app...",
            Self::CustomScheme => "Trying URL scheme...",
            Self::AppStore => "Redirecting to App Store...",
            Self::PlayStore => "Redirecting to Google Play...",
        }
    }

    /// Whether the stage is the store fallback that ends sequencing.
    pub const fn is_final(self) -> bool {
        matches!(self, Self::AppStore | Self::PlayStore)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A navigation attempt offset from the start of sequencing.
pub struct StagedNavigation {
    /// Delay from sequencing start.
    pub delay_ms: u32,
    /// Attempt kind.
    pub stage: RedirectStage,
    /// Fully built target URL.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// What sequencing does for the detected platform.
pub enum RedirectPlan {
    /// Ordered native-app attempts ending in a store fallback.
    NativeApp {
        /// Attempts in firing order.
        stages: Vec<StagedNavigation>,
    },
    /// No app attempt; present the store section and settle after a display delay.
    StoreOnly {
        /// Delay before the store section is presented again and sequencing ends.
        display_delay_ms: u32,
    },
}

impl RedirectPlan {
    /// Staged attempts, empty for [`RedirectPlan::StoreOnly`].
    pub fn stages(&self) -> &[StagedNavigation] {
        match self {
            Self::NativeApp { stages } => stages,
            Self::StoreOnly { .. } => &[],
        }
    }
}

/// Builds the redirect plan for `platform`, forwarding `referral` on every app link.
pub fn build_redirect_plan(
    config: &RedirectConfig,
    platform: PlatformKind,
    referral: &ReferralData,
) -> RedirectPlan {
    let query = referral.to_query_string();
    let scheme = StagedNavigation {
        delay_ms: config.app_open_timeout_ms,
        stage: RedirectStage::CustomScheme,
        url: append_query(&config.app_scheme, &query),
    };
    match platform {
        PlatformKind::Ios => RedirectPlan::NativeApp {
            stages: vec![
                StagedNavigation {
                    delay_ms: 0,
                    stage: RedirectStage::UniversalLink,
                    url: append_query(&config.universal_link, &query),
                },
                scheme,
                StagedNavigation {
                    delay_ms: config.store_redirect_timeout_ms,
                    stage: RedirectStage::AppStore,
                    url: config.app_store_url.clone(),
                },
            ],
        },
        PlatformKind::Android => RedirectPlan::NativeApp {
            stages: vec![
                StagedNavigation {
                    delay_ms: 0,
                    stage: RedirectStage::IntentUri,
                    url: intent_uri(config, &query),
                },
                scheme,
                StagedNavigation {
                    delay_ms: config.store_redirect_timeout_ms,
                    stage: RedirectStage::PlayStore,
                    url: config.play_store_url.clone(),
                },
            ],
        },
        PlatformKind::Other => RedirectPlan::StoreOnly {
            display_delay_ms: config.desktop_display_delay_ms,
        },
    }
}

fn append_query(base: &str, query: &str) -> String {
    if query.is_empty() {
        base.to_string()
    } else if base.contains('?') {
        format!("{base}&{query}")
    } else {
        format!("{base}?{query}")
    }
}

fn intent_uri(config: &RedirectConfig, query: &str) -> String {
    format!(
        "{}#Intent;scheme={};package={};end",
        append_query(&format!("intent://{}", config.intent_host), query),
        config.intent_scheme,
        config.android_package
    )
}
