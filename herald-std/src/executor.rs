//! Work submission for asynchronous delivery.
//!
//! The dispatcher does not own a runtime. Asynchronous registrations hand a
//! fully bound [`Job`] to an [`Executor`] and return immediately; whatever
//! runs the job is supplied by the host application.

use futures::executor::ThreadPool;
use std::io;

/// A unit of deferred work: one bound listener call.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fire-and-forget work submission.
///
/// Scheduling failures are the executor's own concern; nothing is
/// reported back to the broadcaster.
pub trait Executor: Send + Sync + 'static {
    /// Schedule `job` to run.
    fn submit(&self, job: Job);
}

// Blanket implementation: any `Fn(Job)` closure is an executor.
impl<F> Executor for F
where
    F: Fn(Job) + Send + Sync + 'static,
{
    fn submit(&self, job: Job) {
        self(job)
    }
}

/// Runs every job on its own OS thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadExecutor;

impl Executor for ThreadExecutor {
    fn submit(&self, job: Job) {
        if let Err(error) = std::thread::Builder::new()
            .name("herald-async".into())
            .spawn(job)
        {
            tracing::warn!(%error, "failed to spawn async delivery thread");
        }
    }
}

/// Runs jobs on a `futures` thread pool.
#[derive(Clone)]
pub struct PoolExecutor {
    pool: ThreadPool,
}

impl PoolExecutor {
    /// Create a pool with one thread per CPU.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            pool: ThreadPool::new()?,
        })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: ThreadPool) -> Self {
        Self { pool }
    }
}

impl Executor for PoolExecutor {
    fn submit(&self, job: Job) {
        self.pool.spawn_ok(async move { job() });
    }
}

#[cfg(feature = "tokio")]
pub use self::tokio_executor::TokioExecutor;

#[cfg(feature = "tokio")]
mod tokio_executor {
    use super::{Executor, Job};
    use tokio::runtime::{Handle, TryCurrentError};

    /// Runs jobs on a Tokio runtime's blocking pool.
    #[derive(Debug, Clone)]
    pub struct TokioExecutor {
        handle: Handle,
    }

    impl TokioExecutor {
        /// Use the given runtime handle.
        pub fn new(handle: Handle) -> Self {
            Self { handle }
        }

        /// Use the runtime the caller is running on.
        pub fn current() -> Result<Self, TryCurrentError> {
            Ok(Self::new(Handle::try_current()?))
        }
    }

    impl Executor for TokioExecutor {
        fn submit(&self, job: Job) {
            // The join handle is dropped; the task keeps running detached.
            let _ = self.handle.spawn_blocking(job);
        }
    }
}
