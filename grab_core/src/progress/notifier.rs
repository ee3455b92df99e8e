use tokio::sync::mpsc;

use crate::types::ProgressUpdate;

use super::observer::ProgressObserver;
use super::snapshot::ProgressSnapshot;

/// Consumes `Result<ProgressUpdate, String>` from the download channel,
/// turns each update into a `ProgressSnapshot`, and fans out to all
/// registered observers.
///
/// # Lifecycle
///
/// | Channel message        | Observer method called          |
/// |------------------------|---------------------------------|
/// | `Ok(ProgressUpdate)`   | `on_progress(&snapshot)`        |
/// | `Err(String)`          | `on_error(&msg)` then stops     |
/// | Channel closed (no err)| `on_complete(&final_snapshot)`  |
pub struct ProgressNotifier {
    observers: Vec<Box<dyn ProgressObserver>>,
    latest: ProgressSnapshot,
}

impl ProgressNotifier {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            latest: ProgressSnapshot::empty(),
        }
    }

    /// Register an observer. Must be called before `run()`.
    pub fn add_observer(&mut self, observer: Box<dyn ProgressObserver>) {
        self.observers.push(observer);
    }

    /// Consume progress messages until the channel closes or an error arrives.
    pub async fn run(mut self, mut progress_rx: mpsc::Receiver<Result<ProgressUpdate, String>>) {
        while let Some(msg) = progress_rx.recv().await {
            match msg {
                Ok(update) => {
                    self.latest = ProgressSnapshot {
                        percent: update.percent,
                        bytes_received: update.bytes_received,
                        total_bytes: update.total_bytes,
                        done: false,
                    };
                    for observer in &self.observers {
                        observer.on_progress(&self.latest).await;
                    }
                }
                Err(error) => {
                    for observer in &self.observers {
                        observer.on_error(&error).await;
                    }
                    return; // stop processing after error
                }
            }
        }

        // Channel closed cleanly — all senders dropped, no error received.
        self.finish().await;
    }

    /// Finalize: mark the latest snapshot as done and notify all observers.
    async fn finish(mut self) {
        self.latest.done = true;
        for observer in &self.observers {
            observer.on_complete(&self.latest).await;
        }
    }
}

impl Default for ProgressNotifier {
    fn default() -> Self {
        Self::new()
    }
}
