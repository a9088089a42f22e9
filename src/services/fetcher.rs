//! Background fetch runner
//!
//! Runs one request per mount on a worker thread and hands the result
//! back to the UI thread through a channel polled on every tick.

use super::api::ApiError;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

struct FetchMessage<T> {
    generation: u64,
    result: Result<T, ApiError>,
}

struct PendingFetch<T> {
    receiver: Receiver<FetchMessage<T>>,
    endpoint: &'static str,
    started: Instant,
}

/// Owns at most one in-flight request.
///
/// Each `spawn` bumps the generation; only a message tagged with the
/// current generation is ever delivered by `poll`.
pub struct Fetcher<T> {
    pending: Option<PendingFetch<T>>,
    generation: u64,
}

impl<T> Default for Fetcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Fetcher<T> {
    pub fn new() -> Self {
        Self {
            pending: None,
            generation: 0,
        }
    }

    /// Drop the in-flight request. The worker keeps running but its
    /// result has nowhere to go.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::info!(
                endpoint = pending.endpoint,
                elapsed_ms = pending.started.elapsed().as_millis() as u64,
                "cancelled in-flight fetch"
            );
        }
        self.generation += 1;
    }
}

impl<T: Send + 'static> Fetcher<T> {
    /// Start `fetch` on a worker thread, replacing any request in flight
    pub fn spawn<F>(&mut self, endpoint: &'static str, fetch: F)
    where
        F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    {
        self.cancel();
        let generation = self.generation;
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = fetch();
            // Receiver is gone if the view unmounted first
            let _ = tx.send(FetchMessage { generation, result });
        });

        tracing::info!(endpoint, "fetch started");
        self.pending = Some(PendingFetch {
            receiver: rx,
            endpoint,
            started: Instant::now(),
        });
    }

    /// Take the result if it has arrived
    pub fn poll(&mut self) -> Option<Result<T, ApiError>> {
        let pending = self.pending.as_ref()?;

        let outcome = match pending.receiver.try_recv() {
            Ok(message) if message.generation == self.generation => message.result,
            Ok(_) => {
                tracing::debug!(endpoint = pending.endpoint, "discarded stale response");
                return None;
            }
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(ApiError::Interrupted),
        };

        let elapsed_ms = pending.started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(_) => tracing::info!(endpoint = pending.endpoint, elapsed_ms, "fetch completed"),
            Err(e) => {
                tracing::error!(endpoint = pending.endpoint, elapsed_ms, error = %e, "fetch failed")
            }
        }

        self.pending = None;
        Some(outcome)
    }
}
