//! Cookie assignment rendering.

use std::fmt;

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// `SameSite` cookie attribute values.
pub enum SameSite {
    /// Sent on top-level navigations and same-site requests.
    Lax,
    /// Sent on same-site requests only.
    Strict,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lax => "lax",
            Self::Strict => "strict",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A cookie assignment with its value escaped like `encodeURIComponent`.
pub struct CookieSpec {
    name: String,
    value: String,
    expires_unix_ms: Option<u64>,
    path: String,
    same_site: SameSite,
}

impl CookieSpec {
    /// Creates a cookie for `name` holding the unescaped `value`, scoped to `/` with `SameSite=Lax`.
    pub fn new(name: impl Into<String>, value: &str) -> Self {
        Self {
            name: name.into(),
            value: utf8_percent_encode(value, URI_COMPONENT).to_string(),
            expires_unix_ms: None,
            path: "/".to_string(),
            same_site: SameSite::Lax,
        }
    }

    /// Sets the absolute expiry in unix milliseconds.
    pub fn expires_at(mut self, unix_ms: u64) -> Self {
        self.expires_unix_ms = Some(unix_ms);
        self
    }

    /// Overrides the cookie path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Overrides the `SameSite` attribute.
    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Escaped cookie value.
    pub fn encoded_value(&self) -> &str {
        &self.value
    }

    /// Renders the `document.cookie` assignment string.
    pub fn render(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);
        if let Some(expires) = self.expires_unix_ms.and_then(render_http_date) {
            out.push_str("; expires=");
            out.push_str(&expires);
        }
        out.push_str("; path=");
        out.push_str(&self.path);
        out.push_str("; samesite=");
        out.push_str(&self.same_site.to_string());
        out
    }
}

/// Formats unix milliseconds as an IMF-fixdate (`Wed, 21 Oct 2015 07:28:00 GMT`).
///
/// Returns `None` for timestamps outside chrono's representable range.
pub fn render_http_date(unix_ms: u64) -> Option<String> {
    let millis = i64::try_from(unix_ms).ok()?;
    let at = DateTime::<Utc>::from_timestamp_millis(millis)?;
    Some(at.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn value_is_escaped_like_encode_uri_component() {
        let cookie = CookieSpec::new("k", r#"{"a":"b c"}!*'()~"#);
        assert_eq!(
            cookie.encoded_value(),
            "%7B%22a%22%3A%22b%20c%22%7D!*'()~"
        );
    }

    #[test]
    fn renders_expiry_path_and_same_site() {
        let rendered = CookieSpec::new("paramedics_referral", "x")
            .expires_at(1_445_412_480_000)
            .render();
        assert_eq!(
            rendered,
            "paramedics_referral=x; expires=Wed, 21 Oct 2015 07:28:00 GMT; path=/; samesite=lax"
        );
    }

    #[test]
    fn omits_expiry_when_unset() {
        let rendered = CookieSpec::new("k", "v")
            .path("/app")
            .same_site(SameSite::Strict)
            .render();
        assert_eq!(rendered, "k=v; path=/app; samesite=strict");
    }
}
