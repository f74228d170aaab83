//! `setTimeout` scheduler adapter.

use deeplink_host::{TimerCallback, TimerScheduler};

#[derive(Debug, Clone, Copy, Default)]
/// Browser scheduler backed by `window.setTimeout`.
///
/// Timer handles are discarded; pending callbacks are abandoned when the page navigates away.
pub struct WebTimerScheduler;

impl TimerScheduler for WebTimerScheduler {
    fn schedule(&self, delay_ms: u32, callback: TimerCallback) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::{closure::Closure, JsCast};

            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            let js_callback = Closure::once_into_js(move || callback());
            let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    js_callback.unchecked_ref(),
                    timeout,
                )
                .map(|_| ())
                .map_err(|e| format!("setTimeout failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (delay_ms, callback);
            Err(crate::unsupported())
        }
    }
}
