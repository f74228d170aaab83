//! Clipboard host-service contracts.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`ClipboardService`].
pub type ClipboardFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for writing text to the system clipboard.
pub trait ClipboardService {
    /// Writes `text` to the clipboard.
    fn write_text<'a>(&'a self, text: &'a str) -> ClipboardFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Default)]
/// In-memory clipboard holding the last written text.
pub struct MemoryClipboard {
    inner: Rc<RefCell<Option<String>>>,
}

impl MemoryClipboard {
    /// Returns the last written text.
    pub fn contents(&self) -> Option<String> {
        self.inner.borrow().clone()
    }
}

impl ClipboardService for MemoryClipboard {
    fn write_text<'a>(&'a self, text: &'a str) -> ClipboardFuture<'a, Result<(), String>> {
        Box::pin(async move {
            *self.inner.borrow_mut() = Some(text.to_string());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_clipboard_keeps_last_write() {
        let clipboard = MemoryClipboard::default();
        let clipboard_obj: &dyn ClipboardService = &clipboard;
        block_on(clipboard_obj.write_text("first")).expect("write");
        block_on(clipboard_obj.write_text("ABC123")).expect("write");
        assert_eq!(clipboard.contents().as_deref(), Some("ABC123"));
    }
}
