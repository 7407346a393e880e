use super::Broadcaster;
use crate::executor::{Executor, ThreadExecutor};
use herald_core::{Args, BoxError, Kind, Listener};
use std::{fmt, sync::Arc};

/// Hands each call to an [`Executor`] and returns immediately.
///
/// Listener errors surface only in the log; the broadcaster never sees
/// them and no ordering is kept between submitted calls.
#[derive(Clone)]
pub struct AsyncBroadcaster {
    executor: Arc<dyn Executor>,
}

impl AsyncBroadcaster {
    /// Submit calls to `executor`.
    pub fn new<E: Executor>(executor: E) -> Self {
        Self {
            executor: Arc::new(executor),
        }
    }

    /// Submit calls to a shared executor.
    pub fn shared(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }
}

impl Default for AsyncBroadcaster {
    fn default() -> Self {
        Self::new(ThreadExecutor)
    }
}

impl fmt::Debug for AsyncBroadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncBroadcaster").finish_non_exhaustive()
    }
}

impl Broadcaster for AsyncBroadcaster {
    fn broadcast(
        &self,
        listener: Arc<dyn Listener>,
        publisher: &'static Kind,
        method: &str,
        args: Args,
    ) -> Result<(), BoxError> {
        let method = method.to_string();
        self.executor.submit(Box::new(move || {
            if let Err(error) = listener.call(&method, &args) {
                tracing::warn!(
                    %publisher,
                    listener = listener.listener_name(),
                    %method,
                    %error,
                    "async delivery failed"
                );
            }
        }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Job;
    use herald_core::Subscriber;
    use std::sync::Mutex;

    const PUBLISHER: &Kind = &Kind::new("Test::Publisher");

    #[test]
    fn test_submits_instead_of_calling() {
        let queue: Arc<Mutex<Vec<Job>>> = Arc::default();
        let sink = queue.clone();
        let broadcaster = AsyncBroadcaster::new(move |job: Job| sink.lock().unwrap().push(job));

        let listener = Arc::new(
            Subscriber::new(0u32).method("tick", |count: &mut u32, _: &Args| *count += 1),
        );
        broadcaster
            .broadcast(listener.clone(), PUBLISHER, "tick", Args::new())
            .unwrap();

        assert_eq!(*listener.lock(), 0);
        let jobs: Vec<Job> = std::mem::take(&mut *queue.lock().unwrap());
        assert_eq!(jobs.len(), 1);
        for job in jobs {
            job();
        }
        assert_eq!(*listener.lock(), 1);
    }

    #[test]
    fn test_listener_error_is_not_returned() {
        let broadcaster = AsyncBroadcaster::new(|job: Job| job());
        let listener = Arc::new(
            Subscriber::new(()).method("fail", |_: &mut (), _: &Args| Err::<(), _>("boom")),
        );
        assert!(
            broadcaster
                .broadcast(listener, PUBLISHER, "fail", Args::new())
                .is_ok()
        );
    }
}
