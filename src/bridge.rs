//! Bridge for driving async operations to completion from synchronous callers.
//!
//! Callers land here from two worlds: plain threads with no tokio runtime in
//! scope, and code already executing inside a runtime (handlers that hopped to
//! a blocking section, tasks on the blocking pool). `run_blocking` handles
//! both without deadlocking or corrupting scheduler state.

use std::future::Future;

use tokio::runtime::{Builder, Handle, Runtime};
use tracing::debug;

use crate::error::{Error, Result};

/// Drive `fut` to completion exactly once and return its result to the
/// calling thread.
///
/// Three cases, decided by whether a runtime is already active on the
/// current thread:
///
/// - No runtime: build a throwaway current-thread runtime, block on the
///   future, and drop the runtime before returning.
/// - Runtime active: `block_on` here would panic inside tokio, so the future
///   is handed to a dedicated worker thread that owns a private runtime; the
///   calling thread joins the worker and relays its result.
/// - Nested (`run_blocking` inside an operation already being driven by
///   `run_blocking`): the inner call sees the worker's private runtime as
///   active and takes the delegate branch again. Nesting completes; it never
///   deadlocks.
///
/// Runtime construction failures and worker panics are normalized to
/// [`Error::Service`]; raw scheduling errors never escape.
pub fn run_blocking<F, T>(fut: F) -> Result<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    match Handle::try_current() {
        Ok(_) => {
            debug!("runtime active on calling thread, delegating to bridge worker");
            let worker = std::thread::Builder::new()
                .name("bridge-worker".into())
                .spawn(move || -> Result<T> {
                    let runtime = new_runtime()?;
                    runtime.block_on(fut)
                })
                .map_err(|e| Error::Service(format!("failed to spawn bridge worker: {e}")))?;

            worker
                .join()
                .map_err(|_| Error::Service("bridge worker panicked".to_string()))?
        }
        Err(_) => {
            let runtime = new_runtime()?;
            runtime.block_on(fut)
        }
    }
}

fn new_runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Service(format!("failed to build bridge runtime: {e}")))
}
