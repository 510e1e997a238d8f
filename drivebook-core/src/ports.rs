//! Capabilities the lesson book needs from its environment.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::DriveBookResult;

/// Key-value persistence for serialized state.
pub trait KeyValueStore {
    /// The stored value, or None if nothing was ever written under `key`.
    fn get(&self, key: &str) -> DriveBookResult<Option<String>>;

    /// Replace the value under `key`. Callers treat this as atomic.
    fn set(&self, key: &str, value: &str) -> DriveBookResult<()>;
}

/// Asks the user a yes/no question before destructive actions.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> DriveBookResult<bool>;
}

/// In-memory store, used for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.values.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DriveBookResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DriveBookResult<()> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Answers every confirmation with the same value (`--yes` and tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl ConfirmPrompt for FixedAnswer {
    fn confirm(&self, _message: &str) -> DriveBookResult<bool> {
        Ok(self.0)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> DriveBookResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> DriveBookResult<()> {
        (**self).set(key, value)
    }
}
