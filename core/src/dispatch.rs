//! Hand-off of worker results back to the UI context.
//!
//! # Design
//! Work runs on the tokio blocking pool. When it finishes, its result is
//! posted to an unbounded channel tagged with the `Ticket` it was issued
//! under. The owning presenter drains the channel on its own context,
//! either with a non-blocking `try_next` from a UI tick or by awaiting
//! `next`. Nothing ever waits on the UI context from a worker.
//!
//! A panicking worker still posts: the caller supplies the message that
//! stands in for its result, so the presenter can leave its loading state.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Identifies one issued unit of work. Tickets from one channel increase
/// monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct UiChannel<M> {
    tx: mpsc::UnboundedSender<(Ticket, M)>,
    rx: mpsc::UnboundedReceiver<(Ticket, M)>,
    next_ticket: u64,
}

impl<M: Send + 'static> UiChannel<M> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            next_ticket: 0,
        }
    }

    /// Run `work` on the blocking pool of `runtime` and post its result,
    /// or `on_panic()` if `work` panics.
    pub fn spawn<K, F>(
        &mut self,
        runtime: &Handle,
        key: K,
        work: F,
        on_panic: fn() -> M,
    ) -> InFlight<K>
    where
        F: FnOnce() -> M + Send + 'static,
    {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        let tx = self.tx.clone();
        let handle = runtime.spawn_blocking(move || {
            let message = catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|_| {
                warn!(?ticket, "worker panicked");
                on_panic()
            });
            // The receiver lives as long as the presenter; a closed channel
            // only means nobody is left to render the result.
            let _ = tx.send((ticket, message));
        });
        InFlight {
            key,
            ticket,
            handle,
        }
    }

    pub fn try_next(&mut self) -> Option<(Ticket, M)> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next posted result. Pending forever if nothing is in
    /// flight, so callers check first.
    pub async fn next(&mut self) -> Option<(Ticket, M)> {
        self.rx.recv().await
    }
}

impl<M: Send + 'static> Default for UiChannel<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// A spawned fetch, keyed by what it is fetching.
#[derive(Debug)]
pub struct InFlight<K> {
    pub key: K,
    pub ticket: Ticket,
    handle: JoinHandle<()>,
}

impl<K> InFlight<K> {
    /// Stop the work if it has not started yet. A result that was already
    /// posted is left in the channel and must be discarded by ticket.
    pub fn abort(self) {
        self.handle.abort();
    }
}
