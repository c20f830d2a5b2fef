//! Per-instance override store.
//!
//! Every owner object carries one [`PropertyStore`] holding the values that
//! were assigned to its properties or cached after computation, keyed by
//! property name. A missing entry means "compute again"; it is distinct from
//! an entry holding [`Value::Null`].
//!
//! The store uses interior mutability so that a read through a shared
//! reference can cache its result. It is deliberately `!Sync`: an owner is
//! accessed from one thread at a time, and two racing first reads of a cached
//! property would simply both compute.

use crate::value::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    values: RefCell<BTreeMap<&'static str, Value>>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the assigned or cached value of a property.
    ///
    /// `None` is the "absent" marker: nothing was assigned or cached.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.values.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.borrow().contains_key(name)
    }

    /// Store a value, replacing any previous entry.
    pub fn insert(&self, name: &'static str, value: Value) {
        self.values.borrow_mut().insert(name, value);
    }

    /// Remove an entry. Returns the removed value, if there was one.
    pub fn remove(&self, name: &str) -> Option<Value> {
        self.values.borrow_mut().remove(name)
    }

    /// Names with an entry, in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        self.values.borrow().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}
