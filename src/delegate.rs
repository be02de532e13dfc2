//! A thread-safe multicast delegate.
//!
//! A [`Delegate<A, R>`] holds an ordered list of [`Entry`] values sharing the call
//! shape `A -> R`. Every operation takes the delegate's single lock for its whole
//! duration, so the list is never observed half-modified.
//!
//! # Examples
//!
//! ```
//! use multicast_delegate::Delegate;
//!
//! let delegate: Delegate<i32, i32> = Delegate::new();
//! let add_one = delegate.add(|x| x + 1);
//! delegate.add(|x| x * 2);
//!
//! assert_eq!(delegate.invoke(5), vec![6, 10]);
//!
//! delegate.remove(&add_one);
//! assert_eq!(delegate.invoke(5), vec![10]);
//! ```
//!
//! # Reentrancy
//!
//! [`invoke`](Delegate::invoke) holds the lock while listeners run. A listener
//! that adds to, removes from, or invokes the same delegate will deadlock.
//! Slow listeners stall every other caller of that delegate.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{DelegateEvent, Entry};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `DelegateEvent` every time the delegate is
/// mutated or invoked. It must be thread-safe because the delegate may be shared.
pub type TraceCallback = dyn Fn(&DelegateEvent) + Send + Sync + 'static;

/// A delegate whose listeners return nothing.
pub type Action<A> = Delegate<A, ()>;

/// Ordered, lock-guarded collection of entries sharing one call signature.
///
/// `A` is the argument type (use a tuple for several arguments, `()` for none) and
/// `R` the return type. Insertion order is invocation order.
///
/// A delegate cannot be copied; it has no `Clone` impl. Use
/// [`take_from`](Delegate::take_from) to move entries out, or
/// [`merge`](Delegate::merge) to share them:
///
/// ```compile_fail
/// use multicast_delegate::Delegate;
///
/// let a: Delegate<i32, i32> = Delegate::new();
/// let b = a.clone();
/// ```
pub struct Delegate<A, R> {
    entries: Mutex<Vec<Entry<A, R>>>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

// -------------------------------------------------------------------------------------------------
// Construction
// -------------------------------------------------------------------------------------------------

impl<A, R> Delegate<A, R> {
    /// Creates an empty delegate.
    pub fn new() -> Self {
        Self::from_entries(Vec::new())
    }

    fn from_entries(entries: Vec<Entry<A, R>>) -> Self {
        Self {
            entries: Mutex::new(entries),
            trace: Mutex::new(None),
        }
    }

    /// Creates a delegate seeded with one closure.
    pub fn with(f: impl Fn(A) -> R + Send + Sync + 'static) -> Self {
        Self::from(Entry::new(f))
    }

    /// Creates a new delegate holding every entry of `source`, leaving `source` empty.
    ///
    /// The source lock is held only while the list is swapped out. `source` stays
    /// usable afterwards. Its trace callback is not carried over.
    ///
    /// ```
    /// use multicast_delegate::Delegate;
    ///
    /// let source: Delegate<(), u8> = Delegate::with(|()| 1);
    /// let target = Delegate::take_from(&source);
    ///
    /// assert!(source.is_empty());
    /// assert_eq!(target.invoke(()), vec![1]);
    /// ```
    pub fn take_from(source: &Self) -> Self {
        let entries = std::mem::take(&mut *source.entries.lock());

        source.emit_event(&DelegateEvent::Transfer {
            moved: entries.len(),
        });

        Self::from_entries(entries)
    }
}

impl<A: 'static, R: 'static> Delegate<A, R> {
    /// Creates a delegate seeded with one plain function.
    pub fn from_fn(f: fn(A) -> R) -> Self {
        Self::from(Entry::function(f))
    }

    /// Creates a delegate seeded with an instance paired with one of its methods.
    pub fn bound<T>(instance: Arc<T>, method: fn(&T, A) -> R) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self::from(Entry::bound(instance, method))
    }
}

impl<A, R> Default for Delegate<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> From<Entry<A, R>> for Delegate<A, R> {
    fn from(entry: Entry<A, R>) -> Self {
        Self::from_entries(vec![entry])
    }
}

impl<A, R> fmt::Debug for Delegate<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Delegate");
        // Debug may run inside a listener; never block on our own lock.
        match self.entries.try_lock() {
            Some(entries) => s.field("len", &entries.len()),
            None => s.field("len", &format_args!("<locked>")),
        };
        s.finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tracing
// -------------------------------------------------------------------------------------------------

impl<A, R> Delegate<A, R> {
    /// Set a tracing callback for delegate operations.
    ///
    /// The callback is invoked after every add, remove, merge, unmerge, transfer,
    /// clear and completed invocation, once the entry lock has been released.
    ///
    /// ```
    /// use multicast_delegate::{Delegate, DelegateEvent};
    /// use std::sync::{Arc, Mutex};
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = seen.clone();
    ///
    /// let delegate: Delegate<(), ()> = Delegate::new();
    /// delegate.set_trace_callback(move |event| sink.lock().unwrap().push(event.clone()));
    /// delegate.add(|()| {});
    ///
    /// assert_eq!(seen.lock().unwrap()[0], DelegateEvent::Add { len: 1 });
    /// ```
    pub fn set_trace_callback(&self, callback: impl Fn(&DelegateEvent) + Send + Sync + 'static) {
        *self.trace.lock() = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// Only the callback is affected; `tracing` records continue.
    pub fn clear_trace_callback(&self) {
        *self.trace.lock() = None;
    }

    fn emit_event(&self, event: &DelegateEvent) {
        tracing::trace!(%event, "delegate operation");

        // Clone out so the callback runs without the trace lock.
        let callback = self.trace.lock().clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Registration
// -------------------------------------------------------------------------------------------------

impl<A, R> Delegate<A, R> {
    /// Wraps `f` in a new entry and appends it.
    ///
    /// Returns the entry handle; pass it to [`remove`](Delegate::remove) to
    /// unregister exactly this registration.
    pub fn add(&self, f: impl Fn(A) -> R + Send + Sync + 'static) -> Entry<A, R> {
        let entry = Entry::new(f);
        self.add_entry(entry.clone());
        entry
    }

    /// Appends an existing entry handle. Returns `self` for chaining.
    ///
    /// ```
    /// use multicast_delegate::{Delegate, Entry};
    ///
    /// let delegate: Delegate<u8, u8> = Delegate::new();
    /// delegate
    ///     .add_entry(Entry::new(|x: u8| x + 1))
    ///     .add_entry(Entry::new(|x: u8| x + 2));
    ///
    /// assert_eq!(delegate.invoke(0), vec![1, 2]);
    /// ```
    pub fn add_entry(&self, entry: Entry<A, R>) -> &Self {
        let len = self.push(entry);
        self.emit_event(&DelegateEvent::Add { len });
        self
    }

    /// Appends a copy of every entry currently in `other`, in `other`'s order.
    ///
    /// `other` is read once and left unchanged. Each entry is appended under its
    /// own lock acquisition, so concurrent observers of `self` may see a partial
    /// merge. Both locks are never held at once.
    pub fn merge(&self, other: &Self) -> &Self {
        let snapshot = other.entries();
        let added = snapshot.len();

        for entry in snapshot {
            self.push(entry);
        }

        self.emit_event(&DelegateEvent::Merge { added });
        self
    }

    fn push(&self, entry: Entry<A, R>) -> usize {
        let mut entries = self.entries.lock();
        entries.push(entry);
        entries.len()
    }
}

// -------------------------------------------------------------------------------------------------
// Deregistration
// -------------------------------------------------------------------------------------------------

impl<A, R> Delegate<A, R> {
    /// Removes the most recently added registration equal to `entry`.
    ///
    /// Only one registration is removed per call. Returns `false`, and changes
    /// nothing, when `entry` is not registered.
    pub fn remove(&self, entry: &Entry<A, R>) -> bool {
        let (removed, len) = self.remove_last_match(entry);
        let found = removed.is_some();

        self.emit_event(&DelegateEvent::Remove { found, len });

        // Dropped here, outside the lock: the target's destructor may touch `self`.
        drop(removed);
        found
    }

    /// Performs one [`remove`](Delegate::remove) for each entry currently in
    /// `other`, in `other`'s order. `other` is left unchanged.
    pub fn unmerge(&self, other: &Self) -> &Self {
        let mut removed = 0;

        for entry in other.entries() {
            if self.remove_last_match(&entry).0.is_some() {
                removed += 1;
            }
        }

        self.emit_event(&DelegateEvent::Unmerge { removed });
        self
    }

    /// Drops every entry.
    pub fn clear(&self) {
        let dropped = std::mem::take(&mut *self.entries.lock());

        self.emit_event(&DelegateEvent::Clear {
            dropped: dropped.len(),
        });
    }

    fn remove_last_match(&self, entry: &Entry<A, R>) -> (Option<Entry<A, R>>, usize) {
        let mut entries = self.entries.lock();
        let index = entries.iter().rposition(|candidate| candidate == entry);
        let removed = index.map(|index| entries.remove(index));
        (removed, entries.len())
    }
}

// -------------------------------------------------------------------------------------------------
// Introspection
// -------------------------------------------------------------------------------------------------

impl<A, R> Delegate<A, R> {
    /// Returns a snapshot of the registered entries, in invocation order.
    pub fn entries(&self) -> Vec<Entry<A, R>> {
        self.entries.lock().clone()
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no entry is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Whether this exact registration is present.
    pub fn contains(&self, entry: &Entry<A, R>) -> bool {
        self.entries.lock().iter().any(|candidate| candidate == entry)
    }
}

// -------------------------------------------------------------------------------------------------
// Invocation
// -------------------------------------------------------------------------------------------------

impl<A: Clone, R> Delegate<A, R> {
    /// Calls every entry in insertion order and collects the results.
    ///
    /// The lock is held for the whole pass. An empty delegate returns an empty
    /// `Vec`. A panicking listener aborts the pass; the remaining listeners are
    /// not called and the partial results are dropped.
    pub fn invoke(&self, args: A) -> Vec<R> {
        let mut results = Vec::new();
        let listeners = infallible(self.call_each(args, |result| {
            results.push(result);
            Ok(())
        }));

        self.emit_event(&DelegateEvent::Invoke { listeners });
        results
    }

    /// Calls every entry in insertion order for effect only.
    ///
    /// Same locking and ordering as [`invoke`](Delegate::invoke), without
    /// collecting anything.
    pub fn emit(&self, args: A) {
        let listeners = infallible(self.call_each(args, |_| Ok(())));
        self.emit_event(&DelegateEvent::Invoke { listeners });
    }

    /// Shared locked pass over the entries. Stops at the first `Err` from `sink`.
    fn call_each<E>(
        &self,
        args: A,
        mut sink: impl FnMut(R) -> Result<(), E>,
    ) -> Result<usize, E> {
        let entries = self.entries.lock();

        if let Some((last, rest)) = entries.split_last() {
            for entry in rest {
                sink(entry.invoke(args.clone()))?;
            }
            sink(last.invoke(args))?;
        }

        Ok(entries.len())
    }
}

impl<A: Clone, T, E> Delegate<A, Result<T, E>> {
    /// Calls every entry in insertion order until one returns `Err`.
    ///
    /// The first error is returned and the results collected so far are
    /// dropped; later listeners are not called.
    ///
    /// ```
    /// use multicast_delegate::Delegate;
    ///
    /// let delegate: Delegate<i32, Result<i32, String>> = Delegate::new();
    /// delegate.add(|x| Ok(x + 1));
    /// delegate.add(|x| if x < 0 { Err("negative".to_string()) } else { Ok(x * 2) });
    ///
    /// assert_eq!(delegate.try_invoke(5), Ok(vec![6, 10]));
    /// assert_eq!(delegate.try_invoke(-1), Err("negative".to_string()));
    /// ```
    pub fn try_invoke(&self, args: A) -> Result<Vec<T>, E> {
        let mut results = Vec::new();
        let listeners = self.call_each(args, |result: Result<T, E>| -> Result<(), E> {
            results.push(result?);
            Ok(())
        })?;

        self.emit_event(&DelegateEvent::Invoke { listeners });
        Ok(results)
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
