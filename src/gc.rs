use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// The contract with the memory manager.
///
/// Any call that allocates may move live objects around. A value that has to
/// survive such a call must be pinned in the collector's root set for exactly
/// the duration of the call. `Roots` is that root set and `RootGuard` is the
/// scoped pin: acquiring a guard registers the value, dropping it releases
/// the registration again. Guards nest strictly LIFO, which falls out of
/// Rust's drop order for locals.
///
/// The collector itself lives outside of this crate. This is only the
/// bookkeeping the printer is obliged to do so that the collector can find
/// everything the printer still holds on to.
#[derive(Debug, Clone)]
pub struct Roots {
    inner: Rc<RefCell<Vec<Value>>>,
}

impl Roots {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Pin `v` until the returned guard is dropped.
    pub fn pin(&self, v: &Value) -> RootGuard {
        let mut roots = self.inner.borrow_mut();
        let index = roots.len();
        roots.push(v.clone());

        RootGuard {
            set: Rc::clone(&self.inner),
            index,
            count: 1,
        }
    }

    /// Pin a port/value pair behind a single guard, the common case in the
    /// serializer. Both registrations are released together, in reverse.
    pub fn pin2(&self, a: &Value, b: &Value) -> RootGuard {
        let mut roots = self.inner.borrow_mut();
        let index = roots.len();
        roots.push(a.clone());
        roots.push(b.clone());

        RootGuard {
            set: Rc::clone(&self.inner),
            index,
            count: 2,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Roots {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped registration of one or two values in the root set.
pub struct RootGuard {
    set: Rc<RefCell<Vec<Value>>>,
    index: usize,
    count: usize,
}

impl Drop for RootGuard {
    fn drop(&mut self) {
        let mut roots = self.set.borrow_mut();
        // release order must mirror acquisition order
        debug_assert_eq!(
            roots.len(),
            self.index + self.count,
            "root guards released out of order"
        );
        roots.truncate(self.index);
    }
}
