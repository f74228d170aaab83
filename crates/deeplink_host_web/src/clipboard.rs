//! Async Clipboard API adapter.

use deeplink_host::{ClipboardFuture, ClipboardService};

#[derive(Debug, Clone, Copy, Default)]
/// Browser clipboard adapter calling `navigator.clipboard.writeText`.
///
/// The API is looked up dynamically so insecure contexts (where `navigator.clipboard` is absent)
/// surface as an error instead of a trap.
pub struct WebClipboardService;

impl ClipboardService for WebClipboardService {
    fn write_text<'a>(&'a self, text: &'a str) -> ClipboardFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                use js_sys::{Function, Promise, Reflect};
                use wasm_bindgen::{JsCast, JsValue};
                use wasm_bindgen_futures::JsFuture;

                let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
                let navigator = window.navigator();
                let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
                    .map_err(|e| format!("navigator.clipboard unreadable: {e:?}"))?;
                if clipboard.is_undefined() || clipboard.is_null() {
                    return Err("clipboard API unavailable".to_string());
                }
                let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
                    .map_err(|e| format!("clipboard.writeText unreadable: {e:?}"))?
                    .dyn_into::<Function>()
                    .map_err(|_| "clipboard.writeText is not callable".to_string())?;
                let promise = write_text
                    .call1(&clipboard, &JsValue::from_str(text))
                    .map_err(|e| format!("clipboard.writeText threw: {e:?}"))?
                    .dyn_into::<Promise>()
                    .map_err(|_| "clipboard.writeText did not return a promise".to_string())?;
                JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|e| format!("clipboard write rejected: {e:?}"))
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = text;
                Err(crate::unsupported())
            }
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use deeplink_host::{ClipboardService, CookieJar, Navigator, TimerScheduler};
    use futures::executor::block_on;

    use crate::{WebClipboardService, WebCookieJar, WebNavigator, WebTimerScheduler};

    #[test]
    fn native_shims_report_unsupported_for_page_effects() {
        assert!(block_on(WebClipboardService.write_text("ABC")).is_err());
        assert!(WebNavigator.navigate("https://example.test").is_err());
        assert!(WebTimerScheduler.schedule(10, Box::new(|| {})).is_err());
        assert!(WebCookieJar.set_cookie("k=v").is_ok());
        assert!(crate::read_page_context().is_err());
    }
}
