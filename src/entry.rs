//! A single registration inside a [`Delegate`](crate::Delegate).
//!
//! An [`Entry`] adapts one invokable target (a closure, a plain function, or an
//! instance paired with one of its methods) to the uniform `A -> R` shape the
//! delegate stores. Identity belongs to the entry, not to the wrapped function:
//! wrapping the same function twice produces two entries that compare unequal.

use std::fmt;
use std::sync::Arc;

/// Type alias for the shared, type-erased target of an entry.
pub type Listener<A, R> = dyn Fn(A) -> R + Send + Sync + 'static;

/// A registered invokable target.
///
/// Cloning an `Entry` copies the handle, not the registration: both clones are
/// equal and removing either one from a delegate removes the same registration.
///
/// # Examples
///
/// ```rust
/// use multicast_delegate::Entry;
///
/// fn add_one(x: i32) -> i32 {
///     x + 1
/// }
///
/// let a = Entry::function(add_one);
/// let b = Entry::function(add_one);
///
/// assert_eq!(a.invoke(1), 2);
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
pub struct Entry<A, R> {
    target: Arc<Listener<A, R>>,
}

impl<A, R> Entry<A, R> {
    /// Wraps any closure with the delegate's call shape.
    pub fn new(f: impl Fn(A) -> R + Send + Sync + 'static) -> Self {
        Self {
            target: Arc::new(f),
        }
    }

    /// Calls the wrapped target.
    ///
    /// No synchronization happens here: invoking the same entry from several
    /// threads is as safe as the target itself.
    pub fn invoke(&self, args: A) -> R {
        (self.target)(args)
    }
}

impl<A: 'static, R: 'static> Entry<A, R> {
    /// Wraps a plain function pointer.
    pub fn function(f: fn(A) -> R) -> Self {
        Self::new(f)
    }

    /// Pairs an instance with one of its methods.
    ///
    /// The entry keeps the instance alive for as long as it is registered.
    ///
    /// ```rust
    /// use multicast_delegate::Entry;
    /// use std::sync::Arc;
    ///
    /// struct Scale(i32);
    ///
    /// impl Scale {
    ///     fn apply(&self, x: i32) -> i32 {
    ///         x * self.0
    ///     }
    /// }
    ///
    /// let entry = Entry::bound(Arc::new(Scale(3)), Scale::apply);
    /// assert_eq!(entry.invoke(4), 12);
    /// ```
    pub fn bound<T>(instance: Arc<T>, method: fn(&T, A) -> R) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self::new(move |args| method(&instance, args))
    }
}

impl<A, R> Clone for Entry<A, R> {
    fn clone(&self) -> Self {
        Self {
            target: Arc::clone(&self.target),
        }
    }
}

impl<A, R> PartialEq for Entry<A, R> {
    fn eq(&self, other: &Self) -> bool {
        // Compare allocations only; vtable pointers are not stable across codegen units.
        std::ptr::addr_eq(Arc::as_ptr(&self.target), Arc::as_ptr(&other.target))
    }
}

impl<A, R> Eq for Entry<A, R> {}

impl<A, R> fmt::Debug for Entry<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("target", &Arc::as_ptr(&self.target).cast::<()>())
            .finish()
    }
}

impl<A: 'static, R: 'static> From<fn(A) -> R> for Entry<A, R> {
    fn from(f: fn(A) -> R) -> Self {
        Self::function(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn double(x: i32) -> i32 {
        x * 2
    }

    #[test]
    fn test_invoke_closure() {
        let offset = 10;
        let entry = Entry::new(move |x: i32| x + offset);
        assert_eq!(entry.invoke(5), 15);
    }

    #[test]
    fn test_invoke_function_pointer() {
        let entry = Entry::function(double);
        assert_eq!(entry.invoke(21), 42);

        let from: Entry<i32, i32> = Entry::from(double as fn(i32) -> i32);
        assert_eq!(from.invoke(4), 8);
    }

    #[test]
    fn test_invoke_bound_method() {
        struct Counter {
            hits: AtomicUsize,
        }

        impl Counter {
            fn hit(&self, by: usize) -> usize {
                self.hits.fetch_add(by, Ordering::SeqCst) + by
            }
        }

        let counter = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });
        let entry = Entry::bound(counter.clone(), Counter::hit);

        assert_eq!(entry.invoke(2), 2);
        assert_eq!(entry.invoke(3), 5);
        assert_eq!(counter.hits.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_identity_not_structural() {
        let a = Entry::function(double);
        let b = Entry::function(double);

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_unit_arguments() {
        let entry: Entry<(), &'static str> = Entry::new(|()| "fired");
        assert_eq!(entry.invoke(()), "fired");
    }

    #[test]
    fn test_debug_format() {
        let entry = Entry::function(double);
        assert!(format!("{:?}", entry).starts_with("Entry { target: 0x"));
    }
}
