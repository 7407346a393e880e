//! Testing utilities for Herald.
//!
//! # Features
//!
//! - [`EventRecorder`]: A listener that records everything it receives
//! - [`capture`]: Record what a publisher broadcasts while running a closure
//!
//! # Example
//!
//! ```rust
//! use herald_core::{Kind, Message, Typed};
//! use herald_std::{Publisher, testing::capture};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Refunded {
//!     order: u32,
//! }
//! impl Typed for Refunded {
//!     const KIND: &'static Kind = &Kind::new("Refunded");
//! }
//! impl Message for Refunded {}
//!
//! let publisher = Publisher::default();
//! let recorder = capture(&publisher, |publisher| {
//!     publisher.publish(&Refunded { order: 7 }).unwrap();
//! })
//! .unwrap();
//!
//! assert!(recorder.received::<Refunded>());
//! assert!(recorder.received_where(|event: &Refunded| event.order == 7));
//! assert!(publisher.is_empty());
//! ```

use crate::{options::SubscribeOptions, publisher::Publisher};
use herald_core::{
    Args, BoxError, DispatchError, DynMessage, Listener, Message, StructuredListener,
    SubscribeError,
};
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

// ============================================================================
// Captured Events
// ============================================================================

/// One thing an [`EventRecorder`] received.
#[derive(Clone)]
pub enum Captured {
    /// A structured event.
    Message(Box<dyn DynMessage>),
    /// A symbolic event, as the method it was mapped to and its arguments.
    Call {
        /// The listener method the event was mapped to.
        method: String,
        /// The broadcast's arguments.
        args: Args,
    },
}

impl fmt::Debug for Captured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Captured::Message(message) => fmt::Debug::fmt(message, f),
            Captured::Call { method, args } => write!(f, "{method}({args})"),
        }
    }
}

// ============================================================================
// Event Recorder
// ============================================================================

/// A listener that accepts every event and records it.
///
/// It implements the structured contract, so kind filters may be used
/// with it, and it responds to every method name.
#[derive(Default)]
pub struct EventRecorder {
    captured: Mutex<Vec<Captured>>,
}

impl EventRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far, in order.
    pub fn captured(&self) -> Vec<Captured> {
        self.lock().clone()
    }

    /// The structured events received so far.
    pub fn messages(&self) -> Vec<Box<dyn DynMessage>> {
        self.lock()
            .iter()
            .filter_map(|captured| match captured {
                Captured::Message(message) => Some(message.clone()),
                Captured::Call { .. } => None,
            })
            .collect()
    }

    /// The symbolic calls received so far.
    pub fn calls(&self) -> Vec<(String, Args)> {
        self.lock()
            .iter()
            .filter_map(|captured| match captured {
                Captured::Call { method, args } => Some((method.clone(), args.clone())),
                Captured::Message(_) => None,
            })
            .collect()
    }

    /// Whether a message of kind `M`, or a subtype of it, was received.
    pub fn received<M: Message>(&self) -> bool {
        self.lock().iter().any(|captured| match captured {
            Captured::Message(message) => message.kind().is_a(M::KIND),
            Captured::Call { .. } => false,
        })
    }

    /// Whether a message of type `M` satisfying `predicate` was received.
    pub fn received_where<M: Message>(&self, predicate: impl Fn(&M) -> bool) -> bool {
        self.lock().iter().any(|captured| match captured {
            Captured::Message(message) => message.downcast_ref::<M>().is_some_and(&predicate),
            Captured::Call { .. } => false,
        })
    }

    /// Whether a message equal to `expected` was received.
    pub fn received_message<M: Message + PartialEq>(&self, expected: &M) -> bool {
        self.received_where(|message: &M| message == expected)
    }

    /// Whether `method` was called.
    pub fn received_call(&self, method: &str) -> bool {
        self.received_call_where(method, |_| true)
    }

    /// Whether `method` was called with arguments satisfying `predicate`.
    pub fn received_call_where(&self, method: &str, predicate: impl Fn(&Args) -> bool) -> bool {
        self.lock().iter().any(|captured| match captured {
            Captured::Call { method: called, args } => called == method && predicate(args),
            Captured::Message(_) => false,
        })
    }

    /// Failure-message suffix listing what was received.
    pub fn summary(&self) -> String {
        let captured = self.lock();
        if captured.is_empty() {
            return " (no events broadcast)".to_string();
        }
        let events: Vec<String> = captured.iter().map(|c| format!("{c:?}")).collect();
        format!(" (actual events broadcast: {})", events.join(", "))
    }

    /// Panic unless a message of kind `M` was received.
    #[track_caller]
    pub fn assert_received<M: Message>(&self) {
        assert!(
            self.received::<M>(),
            "expected publisher to broadcast event of type {}{}",
            M::KIND,
            self.summary()
        );
    }

    /// Panic if a message of kind `M` was received.
    #[track_caller]
    pub fn assert_not_received<M: Message>(&self) {
        assert!(
            !self.received::<M>(),
            "expected publisher not to broadcast event of type {}",
            M::KIND
        );
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget everything recorded.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Captured>> {
        self.captured.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Listener for EventRecorder {
    fn responds_to(&self, _method: &str) -> bool {
        true
    }

    fn call(&self, method: &str, args: &Args) -> Result<(), BoxError> {
        self.lock().push(Captured::Call {
            method: method.to_string(),
            args: args.clone(),
        });
        Ok(())
    }

    fn as_structured(&self) -> Option<&dyn StructuredListener> {
        Some(self as &dyn StructuredListener)
    }
}

impl StructuredListener for EventRecorder {
    fn trigger(&self, message: &dyn DynMessage) -> Result<(), DispatchError> {
        self.lock().push(Captured::Message(message.clone_message()));
        Ok(())
    }
}

impl fmt::Debug for EventRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRecorder")
            .field("captured", &*self.lock())
            .finish()
    }
}

// ============================================================================
// Capture
// ============================================================================

/// Subscribe a fresh recorder to `publisher`, run `f`, then unsubscribe it.
///
/// The recorder is removed again even when `f` panics.
pub fn capture<F>(publisher: &Publisher, f: F) -> Result<Arc<EventRecorder>, SubscribeError>
where
    F: FnOnce(&Publisher),
{
    struct Unsubscribe<'a> {
        publisher: &'a Publisher,
        recorder: &'a Arc<EventRecorder>,
    }

    impl Drop for Unsubscribe<'_> {
        fn drop(&mut self) {
            self.publisher.unsubscribe(self.recorder);
        }
    }

    let recorder = Arc::new(EventRecorder::new());
    publisher.subscribe(Arc::clone(&recorder), SubscribeOptions::new())?;
    {
        let _guard = Unsubscribe {
            publisher,
            recorder: &recorder,
        };
        f(publisher);
    }
    Ok(recorder)
}
