//! `[DeepLink]`-prefixed console logging.

use leptos::logging;

/// Diagnostic message, emitted only when `enabled` (the config `debug` flag).
pub(crate) fn debug(enabled: bool, message: impl AsRef<str>) {
    if enabled {
        logging::log!("[DeepLink] {}", message.as_ref());
    }
}

/// Always-on error message.
pub(crate) fn error(message: impl AsRef<str>) {
    logging::error!("[DeepLink Error] {}", message.as_ref());
}
