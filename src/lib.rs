//! # Multicast Delegate
//!
//! A thread-safe multicast delegate: an ordered list of listeners sharing one call
//! signature, invoked together under a single lock.
//!
//! ## Quick Start
//!
//! ```rust
//! use multicast_delegate::Delegate;
//!
//! fn add_one(x: i32) -> i32 {
//!     x + 1
//! }
//!
//! let delegate = Delegate::from_fn(add_one);
//! let doubler = delegate.add(|x| x * 2);
//!
//! assert_eq!(delegate.invoke(5), vec![6, 10]);
//!
//! delegate.remove(&doubler);
//! assert_eq!(delegate.invoke(5), vec![6]);
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: add, remove and invoke may race from any thread
//! - **Ordered**: listeners run in insertion order; results come back in that order
//! - **Exact removal**: an [`Entry`] handle identifies one registration, duplicates included
//! - **Tracing support**: optional callback plus `tracing` records for every operation
//!
//! ## Main Types
//!
//! - [`Delegate`] - The lock-guarded listener list
//! - [`Action`] - A delegate whose listeners return `()`
//! - [`Entry`] - One registration (closure, function, or bound method)
//! - [`DelegateEvent`] - Operation descriptions passed to the trace callback
//! - [`define_delegate!`] - Declare a named, process-global delegate

mod delegate;
mod delegate_event;
mod entry;
mod macros;

pub use delegate::{Action, Delegate, TraceCallback};
pub use delegate_event::DelegateEvent;
pub use entry::{Entry, Listener};
