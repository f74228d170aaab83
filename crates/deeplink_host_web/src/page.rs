//! Landing page input capture.

use deeplink_host::PageContext;

/// Reads the user agent, query string, and full URL of the current page.
///
/// # Errors
///
/// Returns an error when the window or its location cannot be read.
pub fn read_page_context() -> Result<PageContext, String> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let navigator = window.navigator();
        let user_agent = navigator.user_agent().unwrap_or_default();
        let user_agent = if user_agent.is_empty() {
            navigator.vendor()
        } else {
            user_agent
        };
        let location = window.location();
        let query = location
            .search()
            .map_err(|e| format!("location.search unreadable: {e:?}"))?;
        let href = location
            .href()
            .map_err(|e| format!("location.href unreadable: {e:?}"))?;
        Ok(PageContext {
            user_agent,
            query,
            href,
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Err(crate::unsupported())
    }
}
