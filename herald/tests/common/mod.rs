#![allow(dead_code)]

use herald::{
    Args, DispatchError, EventHandlers, HandlerTable, Message, Publisher, Subscriber, Typed,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Test Event Types
// ============================================================================

#[derive(Clone, Debug, PartialEq, Message)]
#[herald(name = "MySuccessEvent")]
pub struct SuccessEvent {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Message)]
#[herald(name = "MyFailureEvent")]
pub struct FailureEvent {
    pub message: String,
}

// ============================================================================
// Test Publisher
// ============================================================================

/// A command that reports its outcome both as a symbolic event and as a
/// structured one.
#[derive(Typed)]
#[herald(name = "MyCommand")]
pub struct MyCommand {
    pub publisher: Publisher,
}

impl MyCommand {
    pub fn new() -> Self {
        Self {
            publisher: Publisher::of::<Self>(),
        }
    }

    pub fn execute(&self, be_successful: bool) -> Result<(), DispatchError> {
        self.announce(be_successful)?;
        self.report(be_successful)
    }

    /// Symbolic events only.
    pub fn announce(&self, be_successful: bool) -> Result<(), DispatchError> {
        if be_successful {
            self.publisher
                .broadcast("success", &Args::new().kw("message", "hello"))?;
        } else {
            self.publisher
                .broadcast("failure", &Args::new().arg("world"))?;
        }
        Ok(())
    }

    /// Structured events only.
    pub fn report(&self, be_successful: bool) -> Result<(), DispatchError> {
        if be_successful {
            self.publisher.publish(&SuccessEvent {
                message: "hello".into(),
            })?;
        } else {
            self.publisher.publish(&FailureEvent {
                message: "world".into(),
            })?;
        }
        Ok(())
    }
}

// ============================================================================
// Test Listeners
// ============================================================================

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::default()
}

pub fn entries(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// A listener with plain methods for symbolic events. Each call is
/// recorded as `method(args)`.
pub fn classic_listener(methods: &[&str]) -> Arc<Subscriber<Vec<String>>> {
    let mut subscriber = Subscriber::new(Vec::new());
    for method in methods {
        let name = method.to_string();
        subscriber = subscriber.method(*method, move |calls: &mut Vec<String>, args: &Args| {
            calls.push(format!("{name}({args})"));
        });
    }
    Arc::new(subscriber)
}

/// A listener implementing the structured contract for both outcomes.
pub struct StructuredListener {
    pub verify: CallLog,
}

impl EventHandlers for StructuredListener {
    fn declare(handlers: &mut HandlerTable<Self>) {
        handlers
            .on(|this: &mut StructuredListener, event: &SuccessEvent| {
                this.verify
                    .lock()
                    .unwrap()
                    .push(format!("call_success({})", event.message));
            })
            .on(|this: &mut StructuredListener, event: &FailureEvent| {
                this.verify
                    .lock()
                    .unwrap()
                    .push(format!("call_failure({})", event.message));
            });
    }
}

pub fn structured_listener(verify: &CallLog) -> Arc<Subscriber<StructuredListener>> {
    Arc::new(Subscriber::structured(StructuredListener {
        verify: Arc::clone(verify),
    }))
}
