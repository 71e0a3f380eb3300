//! # Callbacks
//!
//! Caller-supplied event handlers. The sidebar never mutates host state; it
//! only calls these. An absent callback is a no-op, so props can be left
//! unset without special-casing every call site.

use std::fmt;
use std::rc::Rc;

/// An optional, cheaply clonable handler taking `T`.
pub struct Callback<T>(Option<Rc<dyn Fn(T)>>);

impl<T> Callback<T> {
    pub fn new(f: impl Fn(T) + 'static) -> Self {
        Self(Some(Rc::new(f)))
    }

    /// A callback that ignores every emission.
    pub fn noop() -> Self {
        Self(None)
    }

    /// Invoke the handler, if any.
    pub fn emit(&self, value: T) {
        if let Some(f) = &self.0 {
            f(value);
        }
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl<T> Default for Callback<T> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_set() {
            f.write_str("Callback(set)")
        } else {
            f.write_str("Callback(noop)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_noop_callback_is_silent() {
        let cb: Callback<u32> = Callback::noop();
        assert!(!cb.is_set());
        cb.emit(7);
    }

    #[test]
    fn test_clones_share_the_handler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let cb = Callback::new(move |v: u32| sink.borrow_mut().push(v));
        let copy = cb.clone();

        cb.emit(1);
        copy.emit(2);

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}
