//! Opaque values attached to nodes under string keys.

use std::any::Any;
use std::rc::Rc;

use crate::node::Node;

/// A shared, type-erased value attached to a node. The hierarchy never looks
/// into it, use `Rc::downcast` or `Node::user_data_as` to get it back.
pub type UserData = Rc<dyn Any>;

impl Node {
    /// Attachs `value` under `key`, replacing the previous value if any.
    pub fn set_user_data<K: Into<String>>(&self, key: K, value: UserData) {
        self.user_data.borrow_mut().insert(key.into(), value);
    }

    /// Gets the value attached under `key`.
    #[inline]
    pub fn user_data(&self, key: &str) -> Option<UserData> {
        self.user_data.borrow().get(key).cloned()
    }

    /// Gets the value attached under `key` if it is a `T`.
    pub fn user_data_as<T: Any>(&self, key: &str) -> Option<Rc<T>> {
        self.user_data(key).and_then(|v| v.downcast::<T>().ok())
    }

    /// Returns true if some value is attached under `key`.
    #[inline]
    pub fn has_user_data(&self, key: &str) -> bool {
        self.user_data.borrow().contains_key(key)
    }

    /// Removes and returns the value attached under `key`.
    #[inline]
    pub fn remove_user_data(&self, key: &str) -> Option<UserData> {
        self.user_data.borrow_mut().remove(key)
    }

    /// Returns the keys with attached values, in no particular order.
    pub fn user_data_keys(&self) -> Vec<String> {
        self.user_data.borrow().keys().cloned().collect()
    }
}
