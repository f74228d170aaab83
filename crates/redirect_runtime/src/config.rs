//! Redirect targets, timing budget, and storage layout.
//!
//! Deployment values live in `redirect.toml` next to this crate's manifest and are compiled in by
//! `build.rs`; [`RedirectConfig::bundled`] returns them.

use leptos::logging;
use serde::{Deserialize, Serialize};
use thiserror::Error;

include!(concat!(env!("OUT_DIR"), "/redirect_config_generated.rs"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejected configuration values.
pub enum ConfigError {
    /// A link that must be an absolute `https` URL is not.
    #[error("{field} must be an https URL, got `{value}`")]
    NotHttps {
        /// Offending field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// A required string field is blank.
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// The store fallback would fire before (or with) the scheme fallback.
    #[error(
        "store_redirect_timeout_ms ({store_ms}) must be greater than app_open_timeout_ms ({scheme_ms})"
    )]
    StageOrder {
        /// Scheme fallback delay.
        scheme_ms: u32,
        /// Store fallback delay.
        store_ms: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Redirect configuration for one landing page deployment.
pub struct RedirectConfig {
    /// Display name of the native app.
    pub app_name: String,
    /// Custom URI scheme base, e.g. `paramedicsdr://deeplink`.
    pub app_scheme: String,
    /// Universal link base URL used for the first iOS attempt.
    pub universal_link: String,
    /// Host part of the Android intent URI.
    pub intent_host: String,
    /// Scheme named inside the Android intent fragment.
    pub intent_scheme: String,
    /// Android application id.
    pub android_package: String,
    /// App Store listing.
    pub app_store_url: String,
    /// Play Store listing.
    pub play_store_url: String,
    /// Generic web destination offered next to the store buttons.
    pub web_fallback_url: String,
    /// Delay between page load and the start of sequencing.
    pub initial_delay_ms: u32,
    /// Delay from sequencing start to the custom scheme attempt.
    pub app_open_timeout_ms: u32,
    /// Delay from sequencing start to the store fallback.
    pub store_redirect_timeout_ms: u32,
    /// Global budget from page load before the store section is forced.
    pub total_timeout_ms: u32,
    /// Delay after the page becomes visible again before the store section is forced.
    pub visibility_grace_ms: u32,
    /// Delay before desktop visitors are considered settled on the store section.
    pub desktop_display_delay_ms: u32,
    /// Durable store key and cookie name for the full referral record.
    pub storage_key: String,
    /// Session store key for the raw referral parameters.
    pub session_key: String,
    /// Advisory lifetime of the stored referral record.
    pub storage_expiry_days: u32,
    /// Emit `[DeepLink]` diagnostics to the console.
    pub debug: bool,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            app_name: "Paramedics Dr".to_string(),
            app_scheme: "paramedicsdr://deeplink".to_string(),
            universal_link: "https://paramedics-deeplinks.vercel.app/app-link".to_string(),
            intent_host: "deeplink".to_string(),
            intent_scheme: "paramedicsdr".to_string(),
            android_package: "com.paramedics.paramedicsuz_doctor".to_string(),
            app_store_url: "https://apps.apple.com/uz/app/paramedics-dr/id6469779193".to_string(),
            play_store_url:
                "https://play.google.com/store/apps/details?id=com.paramedics.paramedicsuz_doctor"
                    .to_string(),
            web_fallback_url: "https://paramedics-deeplinks.vercel.app/".to_string(),
            initial_delay_ms: 800,
            app_open_timeout_ms: 500,
            store_redirect_timeout_ms: 1500,
            total_timeout_ms: 2500,
            visibility_grace_ms: 1000,
            desktop_display_delay_ms: 3000,
            storage_key: "paramedics_referral".to_string(),
            session_key: "current_referral".to_string(),
            storage_expiry_days: 7,
            debug: false,
        }
    }
}

impl RedirectConfig {
    /// Returns the configuration compiled from `redirect.toml`.
    ///
    /// Falls back to [`RedirectConfig::default`] if the bundled JSON does not deserialize.
    pub fn bundled() -> Self {
        match serde_json::from_str(REDIRECT_CONFIG_JSON) {
            Ok(config) => config,
            Err(err) => {
                logging::warn!("bundled redirect config unreadable, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Checks link shapes and stage ordering.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("universal_link", &self.universal_link),
            ("app_store_url", &self.app_store_url),
            ("play_store_url", &self.play_store_url),
        ] {
            if !value.starts_with("https://") {
                return Err(ConfigError::NotHttps {
                    field,
                    value: value.clone(),
                });
            }
        }
        for (field, value) in [
            ("app_scheme", &self.app_scheme),
            ("intent_host", &self.intent_host),
            ("intent_scheme", &self.intent_scheme),
            ("android_package", &self.android_package),
            ("storage_key", &self.storage_key),
            ("session_key", &self.session_key),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(field));
            }
        }
        if self.store_redirect_timeout_ms <= self.app_open_timeout_ms {
            return Err(ConfigError::StageOrder {
                scheme_ms: self.app_open_timeout_ms,
                store_ms: self.store_redirect_timeout_ms,
            });
        }
        Ok(())
    }
}
