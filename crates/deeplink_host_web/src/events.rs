//! DOM event listeners feeding presence signals and page faults to the runtime.
//!
//! Listeners are never removed; their closures are leaked with `Closure::forget`.

use std::rc::Rc;

use deeplink_host::PresenceSignal;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised outside the redirect runtime's own control flow.
pub enum PageFault {
    /// A `window` `error` event (uncaught exception).
    UncaughtError(String),
    /// A `window` `unhandledrejection` event.
    UnhandledRejection(String),
}

/// Registers `blur` and `beforeunload` on `window` and `visibilitychange` on `document`.
///
/// Handlers fire in registration order for a given event, after any listeners registered
/// earlier by the page.
///
/// # Errors
///
/// Returns an error when the window/document is unavailable or listener registration fails.
pub fn install_presence_listeners(handler: Rc<dyn Fn(PresenceSignal)>) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::{closure::Closure, JsCast};

        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let document = window
            .document()
            .ok_or_else(|| "document unavailable".to_string())?;

        let on_blur = {
            let handler = handler.clone();
            let document = document.clone();
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                handler(PresenceSignal::WindowBlurred {
                    document_hidden: document.hidden(),
                });
            })
        };
        window
            .add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())
            .map_err(|e| format!("blur listener registration failed: {e:?}"))?;
        on_blur.forget();

        let on_visibility = {
            let handler = handler.clone();
            let observed = document.clone();
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                handler(PresenceSignal::VisibilityChanged {
                    visible: observed.visibility_state() == web_sys::VisibilityState::Visible,
                });
            })
        };
        document
            .add_event_listener_with_callback(
                "visibilitychange",
                on_visibility.as_ref().unchecked_ref(),
            )
            .map_err(|e| format!("visibilitychange listener registration failed: {e:?}"))?;
        on_visibility.forget();

        let on_unload = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            handler(PresenceSignal::BeforeUnload);
        });
        window
            .add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref())
            .map_err(|e| format!("beforeunload listener registration failed: {e:?}"))?;
        on_unload.forget();

        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = handler;
        Err(crate::unsupported())
    }
}

/// Registers `error` and `unhandledrejection` listeners on `window`.
///
/// # Errors
///
/// Returns an error when the window is unavailable or listener registration fails.
pub fn install_fault_listeners(handler: Rc<dyn Fn(PageFault)>) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::{closure::Closure, JsCast};

        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;

        let on_error = {
            let handler = handler.clone();
            Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
                let message = event
                    .dyn_ref::<web_sys::ErrorEvent>()
                    .map(|error| format!("{} ({:?})", error.message(), error.error()))
                    .unwrap_or_else(|| event.type_());
                handler(PageFault::UncaughtError(message));
            })
        };
        window
            .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
            .map_err(|e| format!("error listener registration failed: {e:?}"))?;
        on_error.forget();

        let on_rejection = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let reason = event
                .dyn_ref::<web_sys::PromiseRejectionEvent>()
                .map(|rejection| format!("{:?}", rejection.reason()))
                .unwrap_or_else(|| event.type_());
            handler(PageFault::UnhandledRejection(reason));
        });
        window
            .add_event_listener_with_callback(
                "unhandledrejection",
                on_rejection.as_ref().unchecked_ref(),
            )
            .map_err(|e| format!("unhandledrejection listener registration failed: {e:?}"))?;
        on_rejection.forget();

        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = handler;
        Err(crate::unsupported())
    }
}
