//! Hand-off of detection batches from a background worker.
//!
//! Batches move through a bounded channel as whole `Vec`s, so the consumer
//! sees either a complete batch or nothing. The consumer drains the channel
//! every tick and keeps only the newest batch.

use std::sync::mpsc::{self, Receiver, RecvError, SyncSender, TryRecvError, TrySendError};

use crate::tracker::Detection;

/// Create a bounded batch channel holding at most `capacity` batches.
pub fn batch_channel(capacity: usize) -> (BatchSender, BatchReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity.max(1));
    (BatchSender { tx }, BatchReceiver { rx })
}

#[derive(Debug, Clone)]
pub struct BatchSender {
    tx: SyncSender<Vec<Detection>>,
}

impl BatchSender {
    /// Block until there is room. Returns `false` once the receiver is gone.
    pub fn push(&self, batch: Vec<Detection>) -> bool {
        self.tx.send(batch).is_ok()
    }

    /// Push without blocking; a full queue drops `batch`.
    ///
    /// Returns `false` once the receiver is gone.
    pub fn try_push(&self, batch: Vec<Detection>) -> bool {
        match self.tx.try_send(batch) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::debug!("batch queue full, dropping batch");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

#[derive(Debug)]
pub struct BatchReceiver {
    rx: Receiver<Vec<Detection>>,
}

/// Result of draining the queue.
#[derive(Debug, Clone, PartialEq)]
pub enum Latest {
    /// Newest complete batch; `drained` older ones were discarded
    Batch { batch: Vec<Detection>, drained: usize },
    /// Nothing new since the last call
    Empty,
    /// The worker hung up and nothing is left
    Disconnected,
}

impl BatchReceiver {
    /// Drain everything queued and return the newest batch.
    pub fn latest(&self) -> Latest {
        let mut newest = None;
        let mut drained = 0;
        loop {
            match self.rx.try_recv() {
                Ok(batch) => {
                    if newest.replace(batch).is_some() {
                        drained += 1;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if newest.is_none() {
                        return Latest::Disconnected;
                    }
                    break;
                }
            }
        }

        match newest {
            Some(batch) => {
                if drained > 0 {
                    tracing::debug!(drained, "skipped stale detection batches");
                }
                Latest::Batch { batch, drained }
            }
            None => Latest::Empty,
        }
    }

    /// Block until the next batch arrives.
    pub fn recv(&self) -> Result<Vec<Detection>, RecvError> {
        self.rx.recv()
    }
}
