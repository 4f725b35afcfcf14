//! Signal/slot system for Swatchpop.
//!
//! This module provides a type-safe, Qt-inspired signal/slot mechanism.
//! Signals are emitted by the widget controller when its state changes, and
//! connected slots (callbacks) are invoked in response.
//!
//! All widget operations run to completion on the thread handling a user
//! interaction event, so every emission invokes its slots directly on the
//! emitting thread. The signal itself is still `Send + Sync`, so an embedding
//! application may own the controller on whichever thread drives its UI.
//!
//! # Example
//!
//! ```
//! use swatchpop_core::Signal;
//!
//! // Create a signal that passes a string argument
//! let text_changed = Signal::<String>::new();
//!
//! // Connect a slot (closure)
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! // Emit the signal
//! text_changed.emit("Hello, World!".to_string());
//!
//! // Disconnect when done
//! text_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke.
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, every connected slot is invoked with a reference
/// to the provided arguments.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no arguments.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use swatchpop_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
        })
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. This is useful during
    /// initialization or batch updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is blocked, this does nothing. Slots are collected
    /// before invocation, so a slot may connect to or disconnect from this
    /// same signal without deadlocking; such changes take effect on the next
    /// emission.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "swatchpop_core::signal", "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<_> = {
            let connections = self.connections.lock();
            connections.values().map(|conn| conn.slot.clone()).collect()
        };
        tracing::trace!(target: "swatchpop_core::signal", connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicI32;

    #[test]
    fn test_connect_and_emit() {
        let signal = Signal::<i32>::new();
        let sum = Arc::new(AtomicI32::new(0));

        let sum_clone = sum.clone();
        signal.connect(move |&n| {
            sum_clone.fetch_add(n, Ordering::SeqCst);
        });

        signal.emit(40);
        signal.emit(2);
        assert_eq!(sum.load(Ordering::SeqCst), 42);
    }

    #[test]
    fn test_disconnect() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicI32::new(0));

        let count_clone = count.clone();
        let id = signal.connect(move |()| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(());
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_blocked_emission() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicI32::new(0));

        let count_clone = count.clone();
        signal.connect(move |()| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        signal.set_blocked(false);
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_all_slots_receive_arguments() {
        let signal = Signal::<i32>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let log_clone = log.clone();
            signal.connect(move |&n| {
                log_clone.lock().push((tag, n));
            });
        }

        signal.emit(7);
        assert_eq!(*log.lock(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_slot_may_mutate_signal() {
        let signal = Arc::new(Signal::<()>::new());

        let signal_clone = signal.clone();
        signal.connect(move |()| {
            signal_clone.disconnect_all();
        });

        // Must not deadlock on the connection lock
        signal.emit(());
        assert_eq!(signal.connection_count(), 0);
    }
}
