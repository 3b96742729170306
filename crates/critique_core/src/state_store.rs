use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use thiserror::Error;

/// Logical slots of persisted shell state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateKey {
    /// Theme flag, `"dark"` or `"light"`.
    Theme,
    /// JSON array of history entries, most recent first.
    History,
    /// JSON object of the result currently on display.
    CurrentScan,
}

impl StateKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StateKey::Theme => "theme",
            StateKey::History => "scanHistory",
            StateKey::CurrentScan => "currentScan",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state io error for {key}: {source}")]
    Io {
        key: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// String-keyed persisted state, shared by every component of one shell.
///
/// Writes are last-writer-wins; nothing coordinates two processes that share
/// the same backing storage.
pub trait StateStore {
    /// Returns `Ok(None)` when the slot has never been written.
    fn get(&self, key: StateKey) -> Result<Option<String>, StoreError>;
    fn set(&self, key: StateKey, value: &str) -> Result<(), StoreError>;
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn get(&self, key: StateKey) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: StateKey, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: StateStore + ?Sized> StateStore for Rc<S> {
    fn get(&self, key: StateKey) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: StateKey, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: StateStore + ?Sized> StateStore for Arc<S> {
    fn get(&self, key: StateKey) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: StateKey, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    slots: RefCell<BTreeMap<StateKey, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: StateKey) -> Result<Option<String>, StoreError> {
        Ok(self.slots.borrow().get(&key).cloned())
    }

    fn set(&self, key: StateKey, value: &str) -> Result<(), StoreError> {
        self.slots.borrow_mut().insert(key, value.to_string());
        Ok(())
    }
}
