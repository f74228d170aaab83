//! `location.href` navigation adapter.

use deeplink_host::Navigator;

#[derive(Debug, Clone, Copy, Default)]
/// Browser navigator that assigns `window.location.href`.
pub struct WebNavigator;

impl Navigator for WebNavigator {
    fn navigate(&self, url: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            window
                .location()
                .set_href(url)
                .map_err(|e| format!("navigation to `{url}` failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = url;
            Err(crate::unsupported())
        }
    }
}
