//! Shared-handle wrapper around [`muxlog_sinks::MemoryStore`].
//!
//! `Multiplexer::setup` consumes its store box, so harnesses that need to
//! inspect the persisted blob afterwards wire in a [`SharedStore`] and
//! keep the inner handle.

use muxlog_core::ConfigStore;
use muxlog_sinks::MemoryStore;
use std::cell::RefCell;
use std::rc::Rc;

/// [`ConfigStore`] delegating to a shared [`MemoryStore`].
pub struct SharedStore {
    inner: Rc<RefCell<MemoryStore>>,
}

/// Build a shared store from an existing memory store, plus the handle
/// the test inspects (`blob()`, `writes()`).
pub fn shared_store(inner: MemoryStore) -> (SharedStore, Rc<RefCell<MemoryStore>>) {
    let inner = Rc::new(RefCell::new(inner));
    (
        SharedStore {
            inner: Rc::clone(&inner),
        },
        inner,
    )
}

impl ConfigStore for SharedStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.inner.borrow().get_string(key, default)
    }

    fn get_long(&self, key: &str, default: i64) -> i64 {
        self.inner.borrow().get_long(key, default)
    }

    fn set_config_data(&mut self, canonical: &str) {
        self.inner.borrow_mut().set_config_data(canonical);
    }

    fn write_config(&mut self) {
        self.inner.borrow_mut().write_config();
    }
}
