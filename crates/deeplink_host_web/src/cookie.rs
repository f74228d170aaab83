//! `document.cookie` adapter.

use deeplink_host::CookieJar;

#[derive(Debug, Clone, Copy, Default)]
/// Browser cookie jar writing through `document.cookie`.
pub struct WebCookieJar;

impl CookieJar for WebCookieJar {
    fn set_cookie(&self, cookie: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;

            let document = web_sys::window()
                .and_then(|window| window.document())
                .ok_or_else(|| "document unavailable".to_string())?;
            let document = document
                .dyn_into::<web_sys::HtmlDocument>()
                .map_err(|_| "document is not an HTML document".to_string())?;
            document
                .set_cookie(cookie)
                .map_err(|e| format!("document.cookie write failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = cookie;
            Ok(())
        }
    }
}
