//! Web Storage (`localStorage` / `sessionStorage`) key/value adapters.

use deeplink_host::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which Web Storage area an adapter writes to.
pub enum WebStorageArea {
    /// `window.localStorage`, durable across sessions.
    Local,
    /// `window.sessionStorage`, scoped to the current tab.
    Session,
}

impl WebStorageArea {
    #[cfg(target_arch = "wasm32")]
    fn label(self) -> &'static str {
        match self {
            Self::Local => "localStorage",
            Self::Session => "sessionStorage",
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// Browser key/value store backed by one Web Storage area.
///
/// Outside `wasm32` reads return `None` and writes succeed without storing anything.
pub struct WebKeyValueStore {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    area: WebStorageArea,
}

impl WebKeyValueStore {
    /// Adapter over `window.localStorage`.
    pub const fn local() -> Self {
        Self {
            area: WebStorageArea::Local,
        }
    }

    /// Adapter over `window.sessionStorage`.
    pub const fn session() -> Self {
        Self {
            area: WebStorageArea::Session,
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn storage(self) -> Result<web_sys::Storage, String> {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let storage = match self.area {
            WebStorageArea::Local => window.local_storage(),
            WebStorageArea::Session => window.session_storage(),
        };
        storage
            .map_err(|e| format!("{} access denied: {e:?}", self.area.label()))?
            .ok_or_else(|| format!("{} unavailable", self.area.label()))
    }
}

impl KeyValueStore for WebKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage()?
                .get_item(key)
                .map_err(|e| format!("{} get_item failed: {e:?}", self.area.label()))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage()?
                .set_item(key, value)
                .map_err(|e| format!("{} set_item failed: {e:?}", self.area.label()))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }
}
