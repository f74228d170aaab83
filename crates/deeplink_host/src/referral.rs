//! Referral and platform models shared by the redirect runtime and its storage channels.

use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Query key carrying the distinguished referral code.
pub const REFERRAL_CODE_KEY: &str = "referral_code";
/// Placeholder stored when the landing URL carries no usable referral code.
pub const REFERRAL_CODE_SENTINEL: &str = "N/A";
/// Milliseconds in one day, used for referral expiry arithmetic.
pub const MS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Visiting agent classification, derived once per page load.
pub enum PlatformKind {
    /// iPhone, iPad, or iPod browsers.
    Ios,
    /// Android browsers.
    Android,
    /// Desktop and any agent without a recognizable mobile token.
    Other,
}

impl PlatformKind {
    /// Stable lowercase token used in persisted records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered key/value referral parameters captured from the landing URL.
///
/// Keys keep their first-seen order and later duplicates replace earlier values. Every value of
/// this type carries a non-empty [`REFERRAL_CODE_KEY`] entry; construction substitutes
/// [`REFERRAL_CODE_SENTINEL`] when it is missing or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralData {
    entries: Vec<(String, String)>,
}

impl Default for ReferralData {
    fn default() -> Self {
        Self::from_pairs(std::iter::empty::<(String, String)>())
    }
}

impl ReferralData {
    /// Builds referral data from decoded pairs, applying last-wins and the sentinel default.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = Self {
            entries: Vec::new(),
        };
        for (key, value) in pairs {
            data.set(key.into(), value.into());
        }
        if data.get(REFERRAL_CODE_KEY).map_or(true, str::is_empty) {
            data.set(
                REFERRAL_CODE_KEY.to_string(),
                REFERRAL_CODE_SENTINEL.to_string(),
            );
        }
        data
    }

    fn set(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the referral code, which may be [`REFERRAL_CODE_SENTINEL`].
    pub fn referral_code(&self) -> &str {
        self.get(REFERRAL_CODE_KEY).unwrap_or(REFERRAL_CODE_SENTINEL)
    }

    /// Whether the referral code is a real value rather than the sentinel.
    pub fn has_referral_code(&self) -> bool {
        self.referral_code() != REFERRAL_CODE_SENTINEL
    }

    /// Iterates entries in first-seen key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for constructed values; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encodes the entries as an `application/x-www-form-urlencoded` query (no leading `?`).
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl Serialize for ReferralData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ReferralData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = ReferralData;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of referral parameters")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    pairs.push((key, value));
                }
                Ok(ReferralData::from_pairs(pairs))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Referral record written to the durable store and cookie for later read-back.
///
/// Expiry is advisory: readers ignore records past `expires`, writers never delete them.
pub struct StoredReferral {
    /// Captured referral parameters.
    pub data: ReferralData,
    /// Capture time in unix milliseconds.
    pub timestamp: u64,
    /// Advisory expiry in unix milliseconds.
    pub expires: u64,
    /// Platform the visitor arrived on.
    pub platform: PlatformKind,
    /// Full landing URL.
    pub url: String,
}

impl StoredReferral {
    /// Stamps a new record captured at `now_ms` that expires `expiry_days` later.
    pub fn new(
        data: ReferralData,
        platform: PlatformKind,
        url: impl Into<String>,
        now_ms: u64,
        expiry_days: u32,
    ) -> Self {
        Self {
            data,
            timestamp: now_ms,
            expires: now_ms.saturating_add(u64::from(expiry_days) * MS_PER_DAY),
            platform,
            url: url.into(),
        }
    }

    /// Whether the record is past its advisory expiry at `now_ms`.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.expires
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_or_empty_referral_code_becomes_sentinel() {
        let missing = ReferralData::from_pairs([("user_name", "Ali")]);
        assert_eq!(missing.referral_code(), REFERRAL_CODE_SENTINEL);
        assert!(!missing.has_referral_code());

        let empty = ReferralData::from_pairs([("referral_code", "")]);
        assert_eq!(empty.referral_code(), REFERRAL_CODE_SENTINEL);
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn duplicate_keys_keep_first_position_and_last_value() {
        let data = ReferralData::from_pairs([
            ("campaign", "spring"),
            ("referral_code", "ABC"),
            ("campaign", "summer"),
        ]);
        let entries: Vec<_> = data.iter().collect();
        assert_eq!(
            entries,
            vec![("campaign", "summer"), ("referral_code", "ABC")]
        );
    }

    #[test]
    fn query_string_uses_form_encoding() {
        let data = ReferralData::from_pairs([("referral_code", "A&B"), ("user_name", "Ali Vali")]);
        assert_eq!(data.to_query_string(), "referral_code=A%26B&user_name=Ali+Vali");
    }

    #[test]
    fn referral_data_serializes_as_ordered_object() {
        let data = ReferralData::from_pairs([("user_name", "Ali"), ("referral_code", "ABC123")]);
        let json = serde_json::to_string(&data).expect("serialize");
        assert_eq!(json, r#"{"user_name":"Ali","referral_code":"ABC123"}"#);

        let back: ReferralData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, data);
    }

    #[test]
    fn deserialized_referral_data_restores_sentinel() {
        let data: ReferralData = serde_json::from_str(r#"{"campaign":"x"}"#).expect("deserialize");
        assert_eq!(data.referral_code(), REFERRAL_CODE_SENTINEL);
    }

    #[test]
    fn stored_referral_expiry_is_days_after_timestamp() {
        let record = StoredReferral::new(
            ReferralData::default(),
            PlatformKind::Android,
            "https://example.test/?referral_code=ABC",
            1_000,
            7,
        );
        assert_eq!(record.expires - record.timestamp, 7 * MS_PER_DAY);
        assert!(!record.is_expired(record.expires));
        assert!(record.is_expired(record.expires + 1));

        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["platform"], "android");
        assert_eq!(json["data"]["referral_code"], "N/A");
    }
}
