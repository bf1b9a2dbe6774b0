//! Bounded in-memory work queue backed by a tokio channel.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::core::error::SchedulerError;
use crate::core::scheduler::WorkQueue;
use crate::core::task::{Task, WorkPayload};

/// FIFO queue of pending tasks with fixed capacity.
///
/// A bounded mpsc channel does the heavy lifting: `try_send` gives the
/// non-blocking, capacity-enforcing push, and the channel's own
/// synchronization is the only coordination between producers and the
/// dequeue path. The receiver sits behind an async mutex so any number of
/// worker-facing callers can pop; depth is mirrored in an atomic so `len()`
/// never touches either.
pub struct BoundedWorkQueue<P> {
    tx: mpsc::Sender<Task<P>>,
    rx: Mutex<mpsc::Receiver<Task<P>>>,
    depth: AtomicUsize,
    capacity: usize,
}

impl<P> BoundedWorkQueue<P> {
    /// Create a queue with the given fixed capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx,
            rx: Mutex::new(rx),
            depth: AtomicUsize::new(0),
            capacity,
        }
    }
}

#[async_trait]
impl<P> WorkQueue<P> for BoundedWorkQueue<P>
where
    P: WorkPayload,
{
    fn push(&self, task: Task<P>) -> Result<(), SchedulerError> {
        // Incremented before the send so a concurrent pop can never drive the
        // gauge below zero; rolled back on rejection.
        self.depth.fetch_add(1, Ordering::Relaxed);
        match self.tx.try_send(task) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.depth.fetch_sub(1, Ordering::Relaxed);
                Err(SchedulerError::QueueFull(format!(
                    "capacity {} reached",
                    self.capacity
                )))
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.depth.fetch_sub(1, Ordering::Relaxed);
                Err(SchedulerError::Backend("queue receiver dropped".into()))
            }
        }
    }

    async fn pop(&self, cancel: &CancellationToken) -> Result<Task<P>, SchedulerError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(SchedulerError::Cancelled),
            received = async {
                let mut rx = self.rx.lock().await;
                rx.recv().await
            } => match received {
                Some(task) => {
                    self.depth.fetch_sub(1, Ordering::Relaxed);
                    Ok(task)
                }
                None => Err(SchedulerError::Backend("queue channel closed".into())),
            },
        }
    }

    fn len(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
