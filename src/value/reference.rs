use std::cell::{Ref, RefCell};
use std::ops::Deref;
use std::rc::Rc;

/// A Reference is a set-able place in the heap.
///
/// Pairs, vectors, strings and environments are collections of such places:
/// the runtime may mutate them while the printer holds a handle, so handles
/// share the underlying cell instead of owning a copy.
#[repr(transparent)]
#[derive(Debug, Clone, PartialEq)]
pub struct Reference<T> {
    inner: Rc<RefCell<T>>,
}

#[repr(transparent)]
struct RefGuard<'a, T> {
    guard: Ref<'a, T>,
}

impl<'b, T> Deref for RefGuard<'b, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.guard.deref()
    }
}

impl<T> Reference<T> {
    pub fn new(v: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(v)),
        }
    }

    /// ref_eq is true iff both references point to the same place
    pub fn ref_eq(lhs: &Self, rhs: &Self) -> bool {
        std::ptr::eq(lhs.inner.as_ptr(), rhs.inner.as_ptr())
    }

    /// The place's address, used as the printed identity token of objects
    /// that have no textual representation of their own. Injective among
    /// simultaneously live objects and stable for this object's lifetime.
    pub fn identity(&self) -> usize {
        self.inner.as_ptr() as usize
    }

    pub fn get_inner_ref(&self) -> impl Deref<Target = T> + '_ {
        RefGuard {
            guard: self.inner.borrow(),
        }
    }

    pub fn set(&self, v: T) {
        self.inner.replace(v);
    }
}

impl<T: Clone> Reference<T> {
    pub fn to_owned(&self) -> T {
        self.inner.borrow().clone()
    }
}

impl<T> From<T> for Reference<T> {
    fn from(v: T) -> Self {
        Self::new(v)
    }
}
