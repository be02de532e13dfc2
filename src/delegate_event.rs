/// Events emitted by a delegate during operations.
///
/// These events are passed to the tracing callback set via
/// [`Delegate::set_trace_callback`](crate::Delegate::set_trace_callback) and are
/// recorded at `TRACE` level through the `tracing` crate.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use multicast_delegate::DelegateEvent;
///
/// let event = DelegateEvent::Add { len: 1 };
/// assert_eq!(event.to_string(), "add { len: 1 }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateEvent {
    /// An entry was appended.
    Add {
        /// Number of entries after the append
        len: usize,
    },

    /// A removal was attempted.
    Remove {
        /// Whether a matching entry was found and removed
        found: bool,
        /// Number of entries after the attempt
        len: usize,
    },

    /// Entries of another delegate were appended.
    Merge {
        /// How many entries were copied in
        added: usize,
    },

    /// Entries of another delegate were removed one by one.
    Unmerge {
        /// How many of the other delegate's entries were found and removed
        removed: usize,
    },

    /// All entries were called.
    Invoke {
        /// Number of entries called in this pass
        listeners: usize,
    },

    /// The whole sequence of another delegate was moved into a new one.
    Transfer {
        /// Number of entries moved
        moved: usize,
    },

    /// The delegate was cleared.
    Clear {
        /// Number of entries dropped
        dropped: usize,
    },
}

impl std::fmt::Display for DelegateEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DelegateEvent::Add { len } => write!(f, "add {{ len: {} }}", len),
            DelegateEvent::Remove { found, len } => {
                write!(f, "remove {{ found: {}, len: {} }}", found, len)
            }
            DelegateEvent::Merge { added } => write!(f, "merge {{ added: {} }}", added),
            DelegateEvent::Unmerge { removed } => {
                write!(f, "unmerge {{ removed: {} }}", removed)
            }
            DelegateEvent::Invoke { listeners } => {
                write!(f, "invoke {{ listeners: {} }}", listeners)
            }
            DelegateEvent::Transfer { moved } => write!(f, "transfer {{ moved: {} }}", moved),
            DelegateEvent::Clear { dropped } => {
                write!(f, "Clearing the Delegate ({} dropped)", dropped)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delegate_event_display() {
        let event = DelegateEvent::Add { len: 3 };
        assert_eq!(event.to_string(), "add { len: 3 }");

        let event = DelegateEvent::Remove {
            found: false,
            len: 2,
        };
        assert_eq!(event.to_string(), "remove { found: false, len: 2 }");

        let event = DelegateEvent::Invoke { listeners: 4 };
        assert_eq!(event.to_string(), "invoke { listeners: 4 }");

        let event = DelegateEvent::Merge { added: 2 };
        assert_eq!(event.to_string(), "merge { added: 2 }");

        let event = DelegateEvent::Unmerge { removed: 1 };
        assert_eq!(event.to_string(), "unmerge { removed: 1 }");

        let event = DelegateEvent::Transfer { moved: 5 };
        assert_eq!(event.to_string(), "transfer { moved: 5 }");

        let event = DelegateEvent::Clear { dropped: 0 };
        assert_eq!(event.to_string(), "Clearing the Delegate (0 dropped)");
    }

    #[test]
    fn test_delegate_event_clone() {
        let event = DelegateEvent::Remove {
            found: true,
            len: 0,
        };
        let cloned = event.clone();
        assert_eq!(event, cloned);
        assert_eq!(format!("{:?}", event), format!("{:?}", cloned));
    }
}
