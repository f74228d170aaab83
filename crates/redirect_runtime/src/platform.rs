//! User-agent platform classification.

use deeplink_host::PlatformKind;

const IOS_DEVICE_TOKENS: [&str; 3] = ["iPad", "iPhone", "iPod"];
/// Marker of legacy IE Mobile agents that spoofed iOS tokens.
const LEGACY_MS_MARKER: &str = "MSStream";

/// Classifies an agent string as `ios`, `android`, or `other`.
///
/// iOS device tokens are matched case-sensitively and lose to the legacy MS marker; the Android
/// token is matched case-insensitively. Anything else, including an empty string, is `other`.
pub fn detect_platform(user_agent: &str) -> PlatformKind {
    let ios_token = IOS_DEVICE_TOKENS
        .iter()
        .any(|token| user_agent.contains(token));
    if ios_token && !user_agent.contains(LEGACY_MS_MARKER) {
        PlatformKind::Ios
    } else if user_agent.to_ascii_lowercase().contains("android") {
        PlatformKind::Android
    } else {
        PlatformKind::Other
    }
}
