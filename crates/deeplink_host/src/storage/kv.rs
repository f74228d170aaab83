//! Synchronous key/value storage contracts (`localStorage` / `sessionStorage` shaped).

use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Host key/value store holding raw strings per key.
///
/// Browser Web Storage is synchronous, so unlike the async host services this contract returns
/// results directly.
pub trait KeyValueStore {
    /// Reads a raw value by key.
    fn get_item(&self, key: &str) -> Result<Option<String>, String>;

    /// Writes a raw value by key.
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Default)]
/// In-memory key/value store keyed by string.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites_by_key() {
        let store = MemoryKeyValueStore::default();
        let store_obj: &dyn KeyValueStore = &store;

        store_obj.set_item("k", "{\"a\":1}").expect("set");
        assert_eq!(
            store_obj.get_item("k").expect("get"),
            Some("{\"a\":1}".to_string())
        );
        store_obj.set_item("k", "2").expect("overwrite");
        assert_eq!(store_obj.get_item("k").expect("get").as_deref(), Some("2"));
        assert_eq!(store_obj.get_item("missing").expect("get"), None);
    }

    #[test]
    fn clones_share_the_same_backing_map() {
        let store = MemoryKeyValueStore::default();
        let clone = store.clone();
        clone.set_item("shared", "1").expect("set");
        assert_eq!(store.get_item("shared").expect("get").as_deref(), Some("1"));
    }
}
