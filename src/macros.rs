//! Macros for declaring process-global delegates.
//!
//! A global delegate is a named event that any part of the program can subscribe
//! to or fire without passing a `Delegate` value around.

/// Declares a process-global delegate with a single macro invocation.
///
/// The macro generates a module containing:
/// - A lazily initialised `Delegate<Args, Ret>` static (hidden)
/// - Free functions forwarding to it (`add`, `remove`, `invoke`, `emit`, ...)
/// - `delegate()`, returning the underlying `&'static Delegate`
///
/// `Args` and `Ret` must be `'static` types; use owned values or tuples of them.
/// Types defined next to the macro invocation are visible inside the module.
///
/// # Examples
///
/// ```rust
/// use multicast_delegate::define_delegate;
///
/// define_delegate!(on_resize, (u32, u32) => u64);
///
/// on_resize::add(|(w, h)| u64::from(w) * u64::from(h));
/// on_resize::add(|(w, h)| u64::from(w + h));
///
/// assert_eq!(on_resize::invoke((4, 5)), vec![20, 9]);
/// ```
///
/// # Multiple Delegates
///
/// Each invocation creates an isolated delegate:
///
/// ```rust
/// use multicast_delegate::define_delegate;
///
/// define_delegate!(on_open, String => ());
/// define_delegate!(on_close, String => ());
///
/// on_open::add(|_path| {});
///
/// assert_eq!(on_open::len(), 1);
/// assert!(on_close::is_empty());
/// ```
#[macro_export]
macro_rules! define_delegate {
    ($name:ident, $args:ty => $ret:ty) => {
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;

            use std::sync::LazyLock;

            // The delegate itself (module-private)
            static DELEGATE: LazyLock<$crate::Delegate<$args, $ret>> =
                LazyLock::new($crate::Delegate::new);

            /// The underlying delegate, for merge/transfer or trait-style use.
            pub fn delegate() -> &'static $crate::Delegate<$args, $ret> {
                &DELEGATE
            }

            /// Wrap a closure and append it.
            pub fn add(
                f: impl Fn($args) -> $ret + Send + Sync + 'static,
            ) -> $crate::Entry<$args, $ret> {
                DELEGATE.add(f)
            }

            /// Append an existing entry.
            pub fn add_entry(entry: $crate::Entry<$args, $ret>) {
                DELEGATE.add_entry(entry);
            }

            /// Remove the most recent registration equal to `entry`.
            pub fn remove(entry: &$crate::Entry<$args, $ret>) -> bool {
                DELEGATE.remove(entry)
            }

            /// Append every entry of `other`.
            pub fn merge(other: &$crate::Delegate<$args, $ret>) {
                DELEGATE.merge(other);
            }

            /// Remove every entry of `other`, one by one.
            pub fn unmerge(other: &$crate::Delegate<$args, $ret>) {
                DELEGATE.unmerge(other);
            }

            /// Call every entry in order and collect the results.
            pub fn invoke(args: $args) -> Vec<$ret> {
                DELEGATE.invoke(args)
            }

            /// Call every entry in order for effect.
            pub fn emit(args: $args) {
                DELEGATE.emit(args)
            }

            /// Snapshot of the registered entries.
            pub fn entries() -> Vec<$crate::Entry<$args, $ret>> {
                DELEGATE.entries()
            }

            /// Number of registered entries.
            pub fn len() -> usize {
                DELEGATE.len()
            }

            /// Whether no entry is registered.
            pub fn is_empty() -> bool {
                DELEGATE.is_empty()
            }

            /// Drop every entry.
            pub fn clear() {
                DELEGATE.clear()
            }

            /// Set a tracing callback for delegate operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::DelegateEvent) + Send + Sync + 'static,
            ) {
                DELEGATE.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                DELEGATE.clear_trace_callback()
            }
        }
    };
}
