//! Resolution of node names into unique names.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use inlinable_string::InlinableString;

/// The base name used when a node is created without a name.
pub const DEFAULT_NAME: &str = "Node";

/// `NameRegistry` hands out unique node names. It keeps a usage counter for every
/// base name it has seen, so the first request of `Robot` resolves to `Robot`, and
/// the following ones to `Robot_1`, `Robot_2` and so on.
///
/// Consumed names are never released, even after the node that used it has been
/// dropped. The registry is a cheap handle, clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    counters: Rc<RefCell<HashMap<InlinableString, usize>>>,
}

thread_local! {
    static GLOBAL: NameRegistry = NameRegistry::new();
}

impl NameRegistry {
    /// Constructs a new, empty `NameRegistry`.
    pub fn new() -> Self {
        NameRegistry::default()
    }

    /// Returns the registry used by `Node::create`. It lives as long as the current
    /// thread.
    pub fn global() -> Self {
        GLOBAL.with(|v| v.clone())
    }

    /// Resolves `name` into an unique name and consumes it.
    pub fn resolve(&self, name: &str) -> String {
        let base = if name.is_empty() { DEFAULT_NAME } else { name };

        let mut counters = self.counters.borrow_mut();
        if let Some(n) = counters.get_mut(base) {
            // The suffix is the count before increment, "Robot" is followed by "Robot_1".
            let resolved = format!("{}_{}", base, n);
            *n += 1;
            return resolved;
        }

        counters.insert(base.into(), 1);
        base.to_owned()
    }

    /// Returns true if `name` has been used as a base name.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.counters.borrow().contains_key(name)
    }

    /// Returns the number of distinct base names.
    pub fn len(&self) -> usize {
        self.counters.borrow().len()
    }

    /// Returns true if no name has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.counters.borrow().is_empty()
    }

    /// Forgets every consumed name.
    pub fn reset(&self) {
        self.counters.borrow_mut().clear();
    }
}
