// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Ordered delivery of terminal entries.
//!
//! Command output is shown after a short cosmetic delay, so the user gets the
//! feeling of a command "running". Entries are pushed onto an [`OutputQueue`]
//! that owns a single worker task. The worker waits out each entry's delay and
//! then hands it to the renderer, so entries always appear in the order they
//! were submitted even when a later entry has a shorter delay.
//!
//! Every push returns a [`Receipt`] that resolves once the entry was
//! rendered.

use crate::terminal::{Entry, Render, Settings};

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, warn};

enum Job {
    Show {
        entry: Entry,
        delay: Duration,
        done: oneshot::Sender<()>,
    },
    Configure(Settings),
}

/// Single worker output queue.
#[derive(Debug)]
pub struct OutputQueue {
    sender: mpsc::UnboundedSender<Job>,
    worker: JoinHandle<()>,
}

impl OutputQueue {
    /// Start worker task that feeds entries to `renderer`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(mut renderer: impl Render) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
        let worker = tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                match job {
                    Job::Show { entry, delay, done } => {
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                        renderer.entry(&entry);

                        // Nobody waiting on the receipt is fine.
                        let _ = done.send(());
                    }
                    Job::Configure(settings) => renderer.configure(&settings),
                }
            }
            debug!("output queue drained");
        });

        Self { sender, worker }
    }

    /// Queue entry to be rendered after `delay`.
    pub fn push(&self, entry: Entry, delay: Duration) -> Receipt {
        let (done, receipt) = oneshot::channel();
        if self.sender.send(Job::Show { entry, delay, done }).is_err() {
            warn!("output queue worker is gone, entry dropped");
        }

        Receipt(receipt)
    }

    /// Apply new settings to the renderer, in order with queued entries.
    pub fn configure(&self, settings: Settings) {
        if self.sender.send(Job::Configure(settings)).is_err() {
            warn!("output queue worker is gone, settings dropped");
        }
    }

    /// Render everything still queued, then stop the worker.
    pub async fn shutdown(self) {
        let Self { sender, worker } = self;
        drop(sender);
        if let Err(error) = worker.await {
            warn!("output queue worker failed: {error}");
        }
    }
}

/// Completion handle of a queued entry.
#[derive(Debug)]
pub struct Receipt(oneshot::Receiver<()>);

impl Receipt {
    /// Wait until the entry was rendered.
    ///
    /// Also returns if the entry can never be rendered because the worker
    /// stopped.
    pub async fn rendered(self) {
        let _ = self.0.await;
    }
}

/// Renderer that records entries in memory.
///
/// Clones share the same recording.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything rendered so far.
    pub fn entries(&self) -> Vec<Entry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Render for Transcript {
    fn entry(&mut self, entry: &Entry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::Output;
    use pretty_assertions::assert_eq;

    fn notice(text: &str) -> Entry {
        let mut out = Output::new();
        out.plain(text);
        Entry::Notice(out)
    }

    #[tokio::test]
    async fn entries_keep_submission_order() {
        let transcript = Transcript::new();
        let queue = OutputQueue::spawn(transcript.clone());

        let slow = queue.push(notice("first"), Duration::from_millis(30));
        let fast = queue.push(notice("second"), Duration::ZERO);
        fast.rendered().await;
        slow.rendered().await;

        assert_eq!(transcript.entries(), vec![notice("first"), notice("second")]);
        queue.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_flushes_pending_entries() {
        let transcript = Transcript::new();
        let queue = OutputQueue::spawn(transcript.clone());
        let _ = queue.push(notice("a"), Duration::from_millis(5));
        let _ = queue.push(notice("b"), Duration::from_millis(5));
        queue.shutdown().await;

        assert_eq!(transcript.entries(), vec![notice("a"), notice("b")]);
    }

    #[tokio::test]
    async fn receipt_waits_for_render() {
        let transcript = Transcript::new();
        let queue = OutputQueue::spawn(transcript.clone());
        let receipt = queue.push(notice("hello"), Duration::from_millis(10));
        assert!(transcript.entries().is_empty());

        receipt.rendered().await;
        assert_eq!(transcript.entries().len(), 1);
        queue.shutdown().await;
    }
}
