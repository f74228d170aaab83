//! Triple-channel referral persistence.
//!
//! The same capture is written to the durable store, the session store, and a cookie as three
//! independent attempts. There is no cross-channel atomicity: any subset may succeed.

use deeplink_host::{
    unix_time_ms_now, CookieJar, CookieSpec, KeyValueStore, PlatformKind, ReferralData, SameSite,
    StoredReferral,
};
use leptos::logging;

use crate::{config::RedirectConfig, logging as deeplink_log};

/// Writes referral captures to the three storage channels.
pub struct ReferralStore<'a> {
    config: &'a RedirectConfig,
    durable: &'a dyn KeyValueStore,
    session: &'a dyn KeyValueStore,
    cookies: &'a dyn CookieJar,
}

impl<'a> ReferralStore<'a> {
    /// Binds the store to its channels.
    pub fn new(
        config: &'a RedirectConfig,
        durable: &'a dyn KeyValueStore,
        session: &'a dyn KeyValueStore,
        cookies: &'a dyn CookieJar,
    ) -> Self {
        Self {
            config,
            durable,
            session,
            cookies,
        }
    }

    /// Persists a capture stamped with the current wall-clock time.
    ///
    /// Returns whether the durable channel accepted the record.
    pub fn persist(&self, data: &ReferralData, platform: PlatformKind, url: &str) -> bool {
        self.persist_at(data, platform, url, unix_time_ms_now())
    }

    /// Persists a capture stamped with `now_ms`.
    ///
    /// Session and cookie failures are logged and do not affect the result.
    pub fn persist_at(
        &self,
        data: &ReferralData,
        platform: PlatformKind,
        url: &str,
        now_ms: u64,
    ) -> bool {
        let record = StoredReferral::new(
            data.clone(),
            platform,
            url,
            now_ms,
            self.config.storage_expiry_days,
        );
        let record_json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(err) => {
                deeplink_log::error(format!("Storage save error: {err}"));
                return false;
            }
        };

        let durable_saved = match self.durable.set_item(&self.config.storage_key, &record_json) {
            Ok(()) => true,
            Err(err) => {
                logging::warn!("durable referral write failed: {err}");
                false
            }
        };

        let session_result = serde_json::to_string(data)
            .map_err(|err| err.to_string())
            .and_then(|json| self.session.set_item(&self.config.session_key, &json));
        if let Err(err) = session_result {
            logging::warn!("session referral write failed: {err}");
        }

        let cookie = CookieSpec::new(self.config.storage_key.clone(), &record_json)
            .expires_at(record.expires)
            .path("/")
            .same_site(SameSite::Lax);
        if let Err(err) = self.cookies.set_cookie(&cookie.render()) {
            logging::warn!("referral cookie write failed: {err}");
        }

        if durable_saved {
            deeplink_log::debug(self.config.debug, "Data saved to storage");
        }
        durable_saved
    }
}

/// Reads the durable referral record left by an earlier page load.
///
/// Returns `None` when the record is absent, unreadable, or past its advisory expiry.
pub fn load_stored_referral(
    store: &dyn KeyValueStore,
    key: &str,
    now_ms: u64,
) -> Option<StoredReferral> {
    let raw = match store.get_item(key) {
        Ok(raw) => raw?,
        Err(err) => {
            logging::warn!("durable referral read failed: {err}");
            return None;
        }
    };
    let record: StoredReferral = match serde_json::from_str(&raw) {
        Ok(record) => record,
        Err(err) => {
            logging::warn!("stored referral record malformed: {err}");
            return None;
        }
    };
    (!record.is_expired(now_ms)).then_some(record)
}
