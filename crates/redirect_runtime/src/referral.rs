//! Referral extraction from the landing URL and the derived summary card.

use deeplink_host::{ReferralData, REFERRAL_CODE_SENTINEL};
use serde::{Deserialize, Serialize};

/// Parses a query string into [`ReferralData`].
///
/// Accepts the query with or without its leading `?`. Values are form-decoded (`+` is a space,
/// percent escapes are decoded, invalid UTF-8 is replaced). Duplicate keys keep their first
/// position and last value; fragments without a key are dropped. Never fails.
pub fn extract_referral(query: &str) -> ReferralData {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs = url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.into_owned(), value.into_owned()));
    ReferralData::from_pairs(pairs)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Rows shown on the referral card.
pub struct ReferralSummary {
    /// `user_name`, or `User <user_id>` when only an id was passed.
    pub referrer: Option<String>,
    /// Referral code, hidden when it is the sentinel.
    pub referral_code: Option<String>,
    /// Campaign label.
    pub campaign: Option<String>,
}

impl ReferralSummary {
    /// Derives the card rows from captured referral data.
    pub fn from_data(data: &ReferralData) -> Self {
        let non_empty = |key: &str| data.get(key).filter(|value| !value.is_empty());
        let referrer = non_empty("user_name")
            .map(str::to_string)
            .or_else(|| non_empty("user_id").map(|id| format!("User {id}")));
        let referral_code = Some(data.referral_code())
            .filter(|code| *code != REFERRAL_CODE_SENTINEL)
            .map(str::to_string);
        Self {
            referrer,
            referral_code,
            campaign: non_empty("campaign").map(str::to_string),
        }
    }

    /// Whether the card has anything to show.
    pub fn is_visible(&self) -> bool {
        self.referrer.is_some() || self.referral_code.is_some() || self.campaign.is_some()
    }
}
