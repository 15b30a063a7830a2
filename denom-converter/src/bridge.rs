//! Host capabilities the converter talks to

use std::cell::RefCell;
use std::collections::HashMap;

/// Write-only clipboard; fire-and-forget
pub trait Clipboard {
    fn write_text(&self, text: &str);
}

/// One-shot key-value store used to hand a value to a converter on mount.
/// Reading a key removes it.
pub trait HandoffStore {
    fn take(&mut self, key: &str) -> Option<String>;
}

/// In-memory clipboard that remembers what was written
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    history: RefCell<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent write
    pub fn contents(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) {
        self.history.borrow_mut().push(text.to_string());
    }
}

/// In-memory handoff store
#[derive(Debug, Clone, Default)]
pub struct MemoryHandoff {
    values: HashMap<String, String>,
}

impl MemoryHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl HandoffStore for MemoryHandoff {
    fn take(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_records_writes() {
        let clip = MemoryClipboard::new();
        assert_eq!(clip.contents(), None);
        clip.write_text("1");
        clip.write_text("2");
        assert_eq!(clip.contents().as_deref(), Some("2"));
        assert_eq!(clip.history(), vec!["1", "2"]);
    }

    #[test]
    fn test_handoff_take_clears() {
        let mut store = MemoryHandoff::new();
        store.put("eth-value", "1.5");
        assert!(store.contains("eth-value"));
        assert_eq!(store.take("eth-value").as_deref(), Some("1.5"));
        assert!(!store.contains("eth-value"));
        assert_eq!(store.take("eth-value"), None);
    }
}
